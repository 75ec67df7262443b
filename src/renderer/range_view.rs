//! Shooting range presentation
//!
//! Projects the 3D range through the first-person camera into the same
//! pixel-space draw list the platformer uses. Targets are drawn as
//! camera-facing billboards, far to near.

use glam::{Mat4, Vec2, Vec3};

use super::draw::{Color, DrawList};
use crate::consts::{TARGET_HEIGHT, TARGET_RADIUS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::range::{RangeState, Target};

/// Vertical field of view (radians)
pub const FOV_Y: f32 = 70.0 * std::f32::consts::PI / 180.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;
/// How long the muzzle flash stays up after a shot
const FLASH_MS: f64 = 60.0;

const SKY: Color = Color::hex(0x6fa8dc);
const GROUND: Color = Color::hex(0x7a6a4f);
const TARGET_BODY: Color = Color::hex(0xd8423b);
const TARGET_BAND: Color = Color::hex(0xf5f1e8);
const TARGET_DOWN: Color = Color::hex(0x5b5550);
const CROSSHAIR: Color = Color::rgba(255, 255, 255, 0.9);
const FLASH: Color = Color::hex(0xffdc78).with_alpha(0.35);

/// Camera projection into pixel space
pub struct Projector {
    view_proj: Mat4,
    view: Mat4,
    /// Pixels per world unit at unit depth
    focal: f32,
}

impl Projector {
    pub fn new(state: &RangeState) -> Self {
        let aspect = WORLD_WIDTH / WORLD_HEIGHT;
        let proj = Mat4::perspective_rh(FOV_Y, aspect, NEAR, FAR);
        let view = Mat4::look_to_rh(state.camera.eye, state.camera.forward(), Vec3::Y);
        Self {
            view_proj: proj * view,
            view,
            focal: (WORLD_HEIGHT / 2.0) / (FOV_Y / 2.0).tan(),
        }
    }

    /// Pixel position of a world point, or None if it is behind the camera
    pub fn project(&self, p: Vec3) -> Option<Vec2> {
        let clip = self.view_proj * p.extend(1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = Vec2::new(clip.x, clip.y) / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * WORLD_WIDTH,
            (1.0 - ndc.y) * 0.5 * WORLD_HEIGHT,
        ))
    }

    /// Distance in front of the camera
    pub fn depth(&self, p: Vec3) -> f32 {
        -(self.view * p.extend(1.0)).z
    }

    pub fn scale_at(&self, depth: f32) -> f32 {
        self.focal / depth
    }
}

/// Build the frame for the current range state
pub fn draw(state: &RangeState, reduced_motion: bool) -> DrawList {
    let projector = Projector::new(state);
    let mut list = DrawList::new();
    list.clear(SKY);
    draw_ground(&mut list, state, &projector);

    let mut visible: Vec<(f32, &Target)> = state
        .targets
        .iter()
        .map(|t| (projector.depth(t.base), t))
        .filter(|(depth, _)| *depth > NEAR)
        .collect();
    visible.sort_by(|a, b| b.0.total_cmp(&a.0));
    for (depth, target) in visible {
        draw_target(&mut list, &projector, target, depth);
    }

    draw_crosshair(&mut list);

    let flashing = state
        .last_shot_ms
        .is_some_and(|t| state.clock_ms - t < FLASH_MS);
    if flashing && !reduced_motion {
        list.rect(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT, FLASH);
    }
    list
}

fn draw_ground(list: &mut DrawList, state: &RangeState, projector: &Projector) {
    // Horizon: a far point straight ahead at eye height
    let flat = Vec3::new(-state.camera.yaw.sin(), 0.0, -state.camera.yaw.cos());
    let far = state.camera.eye + flat * (FAR * 0.9);
    let horizon = match projector.project(far) {
        Some(p) => p.y.clamp(0.0, WORLD_HEIGHT),
        // Looking straight up: nothing of the ground is visible
        None if state.camera.pitch > 0.0 => WORLD_HEIGHT,
        None => 0.0,
    };
    list.rect(0.0, horizon, WORLD_WIDTH, WORLD_HEIGHT - horizon, GROUND);
}

fn draw_target(list: &mut DrawList, projector: &Projector, target: &Target, depth: f32) {
    let height = if target.is_standing() { TARGET_HEIGHT } else { 0.15 };
    let (Some(base), Some(top)) = (
        projector.project(target.base),
        projector.project(target.base + Vec3::Y * height),
    ) else {
        return;
    };
    let half_w = TARGET_RADIUS * projector.scale_at(depth);
    let (y, h) = (top.y.min(base.y), (base.y - top.y).abs());

    if !target.is_standing() {
        list.rect(base.x - half_w, y, half_w * 2.0, h.max(2.0), TARGET_DOWN);
        return;
    }
    list.rect(base.x - half_w, y, half_w * 2.0, h, TARGET_BODY);
    // Two bands across the upper body
    for frac in [0.2, 0.45] {
        list.rect(base.x - half_w, y + h * frac, half_w * 2.0, h * 0.08, TARGET_BAND);
    }
}

fn draw_crosshair(list: &mut DrawList) {
    let c = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);
    list.rect(c.x - 10.0, c.y - 1.0, 20.0, 2.0, CROSSHAIR);
    list.rect(c.x - 1.0, c.y - 10.0, 2.0, 20.0, CROSSHAIR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::range::TargetState;
    use crate::tuning::RangeTuning;

    fn range() -> RangeState {
        RangeState::new(RangeTuning::default(), Settings::default())
    }

    #[test]
    fn test_center_projects_to_screen_center() {
        let state = range();
        let projector = Projector::new(&state);
        let ahead = state.camera.eye + state.camera.forward() * 10.0;
        let p = projector.project(ahead).unwrap();
        assert!((p - Vec2::new(480.0, 270.0)).length() < 0.01);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let state = range();
        let projector = Projector::new(&state);
        assert!(projector.project(Vec3::new(0.0, 1.0, 10.0)).is_none());
    }

    #[test]
    fn test_draw_is_idempotent() {
        let state = range();
        assert_eq!(draw(&state, false), draw(&state, false));
    }

    #[test]
    fn test_downed_target_changes_frame() {
        let mut state = range();
        let before = draw(&state, true);
        state.targets[2].state = TargetState::Down;
        let after = draw(&state, true);
        assert_ne!(before, after);
    }

    #[test]
    fn test_targets_hidden_when_facing_away() {
        let mut state = range();
        let facing = draw(&state, true).len();
        state.camera.yaw = std::f32::consts::PI;
        let away = draw(&state, true).len();
        // Five targets of three rects each disappear
        assert_eq!(facing - away, 15);
    }
}
