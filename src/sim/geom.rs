//! Axis-aligned boxes in pixel space
//!
//! Screen convention: +x right, +y down. A box's `y` is its top edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box inscribing a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

/// Anything that occupies an axis-aligned box
pub trait Aabb {
    fn bounds(&self) -> Rect;
}

impl Aabb for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict overlap test (touching edges do not overlap)
pub fn intersects(a: &impl Aabb, b: &impl Aabb) -> bool {
    let a = a.bounds();
    let b = b.bounds();
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
