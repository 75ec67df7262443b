//! Player preferences
//!
//! Supplied by the embedding page as JSON in the canvas `data-settings`
//! attribute. Nothing is written back; every session starts from the page.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Input ===
    /// Mouse-look sensitivity (radians per pixel of pointer movement)
    pub mouse_sensitivity: f32,
    /// Invert vertical mouse-look
    pub invert_y: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (skip background stripes and muzzle flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            invert_y: false,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Vertical look multiplier (respects invert_y)
    pub fn pitch_sign(&self) -> f32 {
        if self.invert_y { -1.0 } else { 1.0 }
    }

    fn sanitized(mut self) -> Self {
        if !self.mouse_sensitivity.is_finite() || self.mouse_sensitivity <= 0.0 {
            self.mouse_sensitivity = Self::default().mouse_sensitivity;
        }
        self
    }

    /// Load settings from the canvas data attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        match canvas.get_attribute("data-settings") {
            Some(json) => {
                log::info!("Loaded settings from page");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_invalid_sensitivity_is_replaced() {
        let settings = Settings::from_json(r#"{ "mouse_sensitivity": -3.0, "invert_y": true }"#);
        assert_eq!(settings.mouse_sensitivity, 0.002);
        assert!(settings.invert_y);
        assert_eq!(settings.pitch_sign(), -1.0);
    }
}
