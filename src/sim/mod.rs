//! Platformer simulation module
//!
//! All platformer gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (see `clock`)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod geom;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use geom::{Aabb, Rect, intersects};
pub use level::{Level, LevelError, PatrolRange, catalog, validate_catalog};
pub use state::{Enemy, Facing, GameEvent, GamePhase, GameState, Gem, Player};
pub use tick::{TickInput, tick};
