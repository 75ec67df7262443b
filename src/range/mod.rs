//! First-person shooting range
//!
//! Pointer-lock mouse-look, raycast hit detection against upright cylinder
//! targets, a magazine with timed reloads and timed target respawns. Timers
//! are epoch-guarded so a reset never resurrects work from the old session.

pub mod ray;
pub mod state;
pub mod tick;
pub mod timers;

pub use ray::{Cylinder, Ray, look_direction, ray_cylinder};
pub use state::{Camera, RangeEvent, RangePhase, RangeState, Target, TargetState};
pub use tick::{RangeInput, tick};
pub use timers::{Deferred, TimerQueue};
