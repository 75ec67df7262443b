//! HUD text for both demos
//!
//! Each field is keyed by the id of the DOM element that shows it.

use crate::range::RangeState;
use crate::sim::GameState;

/// Text for each HUD element, as `(element id, text)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub fields: Vec<(&'static str, String)>,
}

impl HudText {
    pub fn platformer(state: &GameState) -> Self {
        Self {
            fields: vec![
                ("score", format!("Score: {}", state.score)),
                ("lives", format!("Lives: {}", state.lives)),
                ("level", format!("Level: {}", state.level_index + 1)),
                ("status", state.status.to_string()),
            ],
        }
    }

    pub fn range(state: &RangeState) -> Self {
        Self {
            fields: vec![
                ("health", format!("Health: {}", state.health)),
                (
                    "ammo",
                    format!("Ammo: {}/{}", state.ammo, state.tuning.magazine_size),
                ),
                ("targets", format!("Targets: {}", state.targets_remaining())),
                ("status", state.status.to_string()),
            ],
        }
    }

    /// Text for one element id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, text)| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog;
    use crate::{RangeTuning, Settings, Tuning};

    #[test]
    fn test_platformer_hud() {
        let state = GameState::new(catalog().unwrap().into(), Tuning::default(), 1);
        let hud = HudText::platformer(&state);
        assert_eq!(hud.get("score"), Some("Score: 0"));
        assert_eq!(hud.get("lives"), Some("Lives: 3"));
        assert_eq!(hud.get("level"), Some("Level: 1"));
        assert_eq!(hud.get("status"), Some("Press Space to start!"));
    }

    #[test]
    fn test_range_hud() {
        let mut state = RangeState::new(RangeTuning::default(), Settings::default());
        state.ammo = 7;
        let hud = HudText::range(&state);
        assert_eq!(hud.get("health"), Some("Health: 100"));
        assert_eq!(hud.get("ammo"), Some("Ammo: 7/12"));
        assert_eq!(hud.get("targets"), Some("Targets: 5"));
        assert_eq!(hud.get("missing"), None);
    }
}
