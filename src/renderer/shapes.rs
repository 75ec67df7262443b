//! Tessellation of draw commands into triangle lists

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::{Color, DrawCommand, DrawList};
use super::vertex::Vertex;

/// Triangle fan resolution for circles
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Flatten a frame into pixel-space triangles, in paint order.
/// A clear discards everything emitted before it.
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in &list.commands {
        match *command {
            DrawCommand::Clear(_) => vertices.clear(),
            DrawCommand::FillRect { pos, size, color } => {
                vertices.extend(quad(pos, size, color));
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => vertices.extend(circle(center, radius, color, CIRCLE_SEGMENTS)),
        }
    }
    vertices
}

/// Two triangles covering an axis-aligned rectangle
pub fn quad(pos: Vec2, size: Vec2, color: Color) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    let c = color.0;
    [
        Vertex::new(x0, y0, c),
        Vertex::new(x1, y0, c),
        Vertex::new(x0, y1, c),
        Vertex::new(x0, y1, c),
        Vertex::new(x1, y0, c),
        Vertex::new(x1, y1, c),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta1.cos(), theta1.sin()),
            color,
        ));
        vertices.push(Vertex::at(
            center + radius * Vec2::new(theta2.cos(), theta2.sin()),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::hex(0xff0000);

    #[test]
    fn test_quad_covers_rect() {
        let q = quad(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), RED);
        let xs: Vec<f32> = q.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = q.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(100.0, 100.0);
        for v in circle(center, 8.0, RED, 12) {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 8.0 + 1e-3);
        }
    }

    #[test]
    fn test_tessellate_counts() {
        let mut list = DrawList::new();
        list.clear(RED);
        list.rect(0.0, 0.0, 1.0, 1.0, RED);
        list.circle(Vec2::ZERO, 2.0, RED);
        assert_eq!(tessellate(&list).len(), 6 + CIRCLE_SEGMENTS as usize * 3);
    }

    #[test]
    fn test_clear_discards_earlier_shapes() {
        let mut list = DrawList::new();
        list.rect(0.0, 0.0, 1.0, 1.0, RED);
        list.rect(0.0, 0.0, 1.0, 1.0, RED);
        list.clear(RED);
        list.rect(5.0, 5.0, 1.0, 1.0, RED);
        let vertices = tessellate(&list);
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [5.0, 5.0]);
    }
}
