//! Pixel Arcade - two small browser arcade demos
//!
//! Core modules:
//! - `sim`: Platformer simulation (level catalog, entities, tick, session phases)
//! - `range`: First-person shooting range (mouse-look, raycast, deferred timers)
//! - `renderer`: Draw lists and the WebGPU pipeline that rasterizes them
//! - `platform`: Host input recording and the per-frame demo drivers
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod hud;
pub mod platform;
pub mod range;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{RangeTuning, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration in milliseconds; per-tick constants are tuned for it
    pub const REFERENCE_FRAME_MS: f64 = 16.6;
    /// Fixed simulation step, in reference frames
    pub const SIM_DT: f32 = 1.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 540.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Enemy box
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 26.0;

    /// Gem pickup radius
    pub const GEM_RADIUS: f32 = 8.0;

    /// Shooting range camera eye height (meters)
    pub const EYE_HEIGHT: f32 = 1.6;
    /// Shooting range target cylinder
    pub const TARGET_RADIUS: f32 = 0.45;
    pub const TARGET_HEIGHT: f32 = 1.8;
}
