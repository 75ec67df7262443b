//! Platform layer
//!
//! Everything between host events and the pure simulations:
//! - `input`: held-key tracking and the key bindings of both demos
//! - `driver`: per-frame demo drivers (input latching, fixed stepping, presentation)
//!
//! Nothing here touches the DOM, so both drivers run natively under test.

pub mod driver;
pub mod input;

pub use driver::{Demo, DemoKind, PlatformerDemo, RangeDemo};
pub use input::HeldKeys;
