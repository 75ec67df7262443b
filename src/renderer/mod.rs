//! Rendering
//!
//! Both demos present through the same path: the game state is projected
//! into a pixel-space `DrawList`, which the WebGPU backend tessellates into
//! flat-colored triangles.

pub mod draw;
pub mod pipeline;
pub mod range_view;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use draw::{Color, DrawCommand, DrawList};
pub use pipeline::{RenderError, RenderState};
