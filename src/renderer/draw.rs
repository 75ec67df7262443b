//! Backend-neutral drawing commands in pixel space
//!
//! The presentation step produces a `DrawList`; the GPU backend tessellates
//! and uploads it. Lists compare by value so a frame can be checked for
//! determinism.

use glam::Vec2;

/// Straight (non-premultiplied) RGBA color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Opaque color from a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Self {
        Self([
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ])
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a])
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, a])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear(Color),
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// An ordered list of drawing commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    /// Background color of the frame (the last clear wins)
    pub fn clear_color(&self) -> Option<Color> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Clear(color) => Some(*color),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(Color::hex(0xff0000), Color([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(Color::hex(0x000000).with_alpha(0.5), Color([0.0, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn test_clear_color_is_last_clear() {
        let mut list = DrawList::new();
        assert_eq!(list.clear_color(), None);
        list.clear(Color::hex(0x111111));
        list.rect(0.0, 0.0, 1.0, 1.0, Color::hex(0xffffff));
        list.clear(Color::hex(0x222222));
        assert_eq!(list.clear_color(), Some(Color::hex(0x222222)));
    }
}
