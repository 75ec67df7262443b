//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override it with JSON in
//! the canvas `data-tuning` attribute.
//! Platformer values are per reference frame (see `consts::REFERENCE_FRAME_MS`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Platformer balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Multiplier applied to horizontal velocity when no direction is held
    pub damping: f32,
    /// Horizontal speed below which a decaying player stops
    pub stop_threshold: f32,
    /// How far below a platform top the previous bottom edge may be and still land
    pub landing_tolerance: f32,
    /// Minimum downward speed for an enemy contact to count as a stomp
    pub stomp_min_fall_speed: f32,
    /// Maximum depth of the player's bottom edge into an enemy for a stomp
    pub stomp_margin: f32,
    /// Fraction of the jump impulse applied after a stomp
    pub stomp_bounce: f32,
    pub stomp_bonus: u64,
    pub gem_bonus: u64,
    pub start_lives: u8,
    /// Enemy speed is `enemy_speed_min + U[0, enemy_speed_spread)`
    pub enemy_speed_min: f32,
    pub enemy_speed_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_velocity: -11.0,
            move_speed: 4.2,
            damping: 0.8,
            stop_threshold: 0.1,
            landing_tolerance: 4.0,
            stomp_min_fall_speed: 1.0,
            stomp_margin: 14.0,
            stomp_bounce: 0.7,
            stomp_bonus: 120,
            gem_bonus: 80,
            start_lives: 3,
            enemy_speed_min: 1.3,
            enemy_speed_spread: 0.8,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from the canvas `data-tuning` attribute (WASM only).
    /// Defaults when the attribute is absent; a bad value is an error.
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Result<Self, TuningError> {
        match canvas.get_attribute("data-tuning") {
            Some(json) => {
                log::info!("Loaded platformer tuning from page");
                Self::from_json(&json)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        positive("move_speed", self.move_speed)?;
        positive("stop_threshold", self.stop_threshold)?;
        positive("enemy_speed_min", self.enemy_speed_min)?;
        non_negative("landing_tolerance", self.landing_tolerance)?;
        non_negative("stomp_min_fall_speed", self.stomp_min_fall_speed)?;
        non_negative("stomp_margin", self.stomp_margin)?;
        non_negative("stomp_bounce", self.stomp_bounce)?;
        non_negative("enemy_speed_spread", self.enemy_speed_spread)?;
        if !self.jump_velocity.is_finite() || self.jump_velocity >= 0.0 {
            return Err(TuningError::Invalid {
                field: "jump_velocity",
                reason: "must be negative (upward)",
            });
        }
        if !(0.0..1.0).contains(&self.damping) {
            return Err(TuningError::Invalid {
                field: "damping",
                reason: "must be in [0, 1)",
            });
        }
        if self.start_lives == 0 {
            return Err(TuningError::Invalid {
                field: "start_lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Shooting range balance (times in milliseconds, distances in meters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeTuning {
    pub magazine_size: u32,
    pub reload_ms: f64,
    pub respawn_ms: f64,
    pub fire_cooldown_ms: f64,
    pub max_range: f32,
    pub target_score: u64,
    pub start_health: u32,
}

impl Default for RangeTuning {
    fn default() -> Self {
        Self {
            magazine_size: 12,
            reload_ms: 1200.0,
            respawn_ms: 3000.0,
            fire_cooldown_ms: 150.0,
            max_range: 100.0,
            target_score: 100,
            start_health: 100,
        }
    }
}

impl RangeTuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Result<Self, TuningError> {
        match canvas.get_attribute("data-tuning") {
            Some(json) => {
                log::info!("Loaded range tuning from page");
                Self::from_json(&json)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.magazine_size == 0 {
            return Err(TuningError::Invalid {
                field: "magazine_size",
                reason: "must be at least 1",
            });
        }
        non_negative("reload_ms", self.reload_ms as f32)?;
        non_negative("respawn_ms", self.respawn_ms as f32)?;
        non_negative("fire_cooldown_ms", self.fire_cooldown_ms as f32)?;
        positive("max_range", self.max_range)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a positive finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            reason: "must be a non-negative finite number",
        })
    }
}
