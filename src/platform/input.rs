//! Keyboard state and key bindings
//!
//! Keys are identified by `KeyboardEvent.code` so bindings don't depend on
//! the keyboard layout.

use std::collections::HashSet;

pub const KEYS_LEFT: &[&str] = &["ArrowLeft", "KeyA"];
pub const KEYS_RIGHT: &[&str] = &["ArrowRight", "KeyD"];
/// Starts the platformer, then jumps
pub const KEY_JUMP: &str = "Space";
pub const KEY_PAUSE: &str = "KeyP";
pub const KEY_RELOAD: &str = "KeyR";
pub const KEY_START: &str = "Enter";
pub const KEY_RESET: &str = "Backspace";

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    held: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns false for auto-repeat of a held key.
    pub fn press(&mut self, code: &str) -> bool {
        self.held.insert(code.to_string())
    }

    pub fn release(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_down(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    pub fn any_down(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.is_down(c))
    }

    /// Drop everything, e.g. when the window loses focus and key-ups go missing
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
