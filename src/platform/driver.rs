//! Per-frame demo drivers
//!
//! A driver owns one session, latches host input between frames, turns the
//! host timestamp into fixed ticks and presents the post-update state once
//! per frame. The wasm shell talks to both demos through [`Demo`].

use std::rc::Rc;

use glam::Vec2;

use super::input::*;
use crate::consts::SIM_DT;
use crate::hud::HudText;
use crate::range::{self, RangeEvent, RangeInput, RangePhase, RangeState};
use crate::renderer::{DrawList, range_view, scene};
use crate::settings::Settings;
use crate::sim::{self, FrameClock, GameEvent, GamePhase, GameState, Level, TickInput};
use crate::tuning::{RangeTuning, Tuning};

/// Which demo a page hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    Platformer,
    Range,
}

impl DemoKind {
    /// Parse the canvas `data-game` attribute
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("range") => Self::Range,
            Some("platformer") | None => Self::Platformer,
            Some(other) => {
                log::warn!("Unknown data-game {:?}, using platformer", other);
                Self::Platformer
            }
        }
    }
}

/// Host-facing surface shared by both demos
pub trait Demo {
    /// Returns true if the key is bound (the host should suppress its default action)
    fn key_down(&mut self, code: &str) -> bool;
    fn key_up(&mut self, code: &str);
    /// Relative pointer motion in pixels
    fn mouse_move(&mut self, _dx: f32, _dy: f32) {}
    /// Primary button pressed. Returns true if the host should request pointer lock.
    fn mouse_down(&mut self) -> bool {
        false
    }
    fn pointer_lock_changed(&mut self, _locked: bool) {}
    /// Window blurred or tab hidden
    fn focus_lost(&mut self);
    /// Advance to `timestamp_ms` and return the frame to present, if any
    fn frame(&mut self, timestamp_ms: f64) -> Option<DrawList>;
    fn hud(&self) -> HudText;
}

/// Platformer session driver
pub struct PlatformerDemo {
    pub state: GameState,
    pub settings: Settings,
    keys: HeldKeys,
    /// One-shot inputs waiting for the next tick
    latched: TickInput,
    clock: FrameClock,
    /// Present on the next frame even without a running tick
    dirty: bool,
}

impl PlatformerDemo {
    pub fn new(levels: Rc<[Level]>, tuning: Tuning, settings: Settings, seed: u64) -> Self {
        Self {
            state: GameState::new(levels, tuning, seed),
            settings,
            keys: HeldKeys::new(),
            latched: TickInput::default(),
            clock: FrameClock::new(),
            dirty: true,
        }
    }

    fn input(&self) -> TickInput {
        TickInput {
            left: self.keys.any_down(KEYS_LEFT),
            right: self.keys.any_down(KEYS_RIGHT),
            ..self.latched.clone()
        }
    }

    /// Run `steps` fixed ticks. One-shots are consumed by the first tick.
    pub fn step(&mut self, steps: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..steps {
            let input = self.input();
            self.latched = TickInput::default();
            events.extend(sim::tick(&mut self.state, &input, SIM_DT));
        }
        events
    }

    pub fn present(&self) -> DrawList {
        scene::draw(&self.state, self.state.level(), self.settings.reduced_motion)
    }
}

impl Demo for PlatformerDemo {
    fn key_down(&mut self, code: &str) -> bool {
        let fresh = self.keys.press(code);
        match code {
            KEY_JUMP => {
                // Auto-repeat keeps jumping on landing, starting only on a fresh press
                self.latched.jump = true;
                self.latched.start |= fresh;
                true
            }
            KEY_PAUSE => {
                self.latched.pause |= fresh;
                true
            }
            _ => self.keys.any_down(KEYS_LEFT) || self.keys.any_down(KEYS_RIGHT),
        }
    }

    fn key_up(&mut self, code: &str) {
        self.keys.release(code);
    }

    fn focus_lost(&mut self) {
        self.keys.clear();
        self.clock.reset();
        if self.state.phase == GamePhase::Running {
            self.latched.pause = true;
            log::info!("Auto-paused (focus lost)");
        }
    }

    fn frame(&mut self, timestamp_ms: f64) -> Option<DrawList> {
        let was_running = self.state.phase == GamePhase::Running;
        let steps = self.clock.advance(timestamp_ms);
        let events = self.step(steps);

        let present = self.dirty || !events.is_empty() || (was_running && steps > 0);
        self.dirty = false;
        present.then(|| self.present())
    }

    fn hud(&self) -> HudText {
        HudText::platformer(&self.state)
    }
}

/// Shooting range session driver
pub struct RangeDemo {
    pub state: RangeState,
    keys: HeldKeys,
    latched: RangeInput,
    clock: FrameClock,
    dirty: bool,
}

impl RangeDemo {
    pub fn new(tuning: RangeTuning, settings: Settings) -> Self {
        Self {
            state: RangeState::new(tuning, settings),
            keys: HeldKeys::new(),
            latched: RangeInput::default(),
            clock: FrameClock::new(),
            dirty: true,
        }
    }

    /// Run `steps` fixed ticks. Latched input and pointer motion go to the first tick.
    pub fn step(&mut self, steps: u32) -> Vec<RangeEvent> {
        let mut events = Vec::new();
        for _ in 0..steps {
            let input = std::mem::take(&mut self.latched);
            events.extend(range::tick(&mut self.state, &input, SIM_DT));
        }
        events
    }

    pub fn present(&self) -> DrawList {
        range_view::draw(&self.state, self.state.settings.reduced_motion)
    }
}

impl Demo for RangeDemo {
    fn key_down(&mut self, code: &str) -> bool {
        let fresh = self.keys.press(code);
        let latch = match code {
            KEY_RELOAD => &mut self.latched.reload,
            KEY_PAUSE => &mut self.latched.pause,
            KEY_START => &mut self.latched.start,
            KEY_RESET => &mut self.latched.reset,
            _ => return false,
        };
        *latch |= fresh;
        true
    }

    fn key_up(&mut self, code: &str) {
        self.keys.release(code);
    }

    fn mouse_move(&mut self, dx: f32, dy: f32) {
        if self.state.pointer_locked {
            self.latched.look += Vec2::new(dx, dy);
        }
    }

    fn mouse_down(&mut self) -> bool {
        if self.state.pointer_locked {
            self.latched.fire = true;
            false
        } else {
            // The click that grabs the pointer also starts or resumes
            self.latched.start = true;
            true
        }
    }

    fn pointer_lock_changed(&mut self, locked: bool) {
        self.latched.pointer_lock = Some(locked);
    }

    fn focus_lost(&mut self) {
        self.keys.clear();
        self.clock.reset();
        if self.state.phase == RangePhase::Running {
            self.latched.pause = true;
            log::info!("Auto-paused (focus lost)");
        }
    }

    fn frame(&mut self, timestamp_ms: f64) -> Option<DrawList> {
        let steps = self.clock.advance(timestamp_ms);
        let events = self.step(steps);

        let running = self.state.phase == RangePhase::Running;
        let present = self.dirty || !events.is_empty() || (running && steps > 0);
        self.dirty = false;
        present.then(|| self.present())
    }

    fn hud(&self) -> HudText {
        HudText::range(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog;

    const FRAME: f64 = 16.6;

    fn platformer() -> PlatformerDemo {
        PlatformerDemo::new(
            catalog().unwrap().into(),
            Tuning::default(),
            Settings::default(),
            3,
        )
    }

    #[test]
    fn test_demo_kind_from_attr() {
        assert_eq!(DemoKind::from_attr(Some("range")), DemoKind::Range);
        assert_eq!(DemoKind::from_attr(None), DemoKind::Platformer);
        assert_eq!(DemoKind::from_attr(Some("pinball")), DemoKind::Platformer);
    }

    #[test]
    fn test_first_frame_presents_idle_scene() {
        let mut demo = platformer();
        assert!(demo.frame(0.0).is_some());
        // Idle and nothing pressed: keep the last frame
        assert!(demo.frame(FRAME).is_none());
    }

    #[test]
    fn test_space_starts_then_jumps() {
        let mut demo = platformer();
        demo.frame(0.0);
        assert!(demo.key_down(KEY_JUMP));
        demo.key_up(KEY_JUMP);
        assert!(demo.frame(FRAME).is_some());
        assert_eq!(demo.state.phase, GamePhase::Running);
        assert_eq!(demo.state.player.vel.y, 0.0);

        // Let the player settle on the ground, then jump
        for i in 2..40 {
            demo.frame(FRAME * i as f64);
        }
        assert!(demo.state.player.grounded);
        demo.key_down(KEY_JUMP);
        demo.frame(FRAME * 40.0);
        assert!(demo.state.player.vel.y < 0.0);
    }

    #[test]
    fn test_one_shot_survives_frame_without_ticks() {
        let mut demo = platformer();
        demo.frame(0.0);
        demo.key_down(KEY_JUMP);
        // Less than a reference frame has passed: no tick yet
        demo.frame(1.0);
        assert_eq!(demo.state.phase, GamePhase::Idle);
        demo.frame(FRAME + 1.0);
        assert_eq!(demo.state.phase, GamePhase::Running);
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut demo = platformer();
        demo.frame(0.0);
        demo.key_down(KEY_JUMP);
        demo.frame(FRAME);
        let x = demo.state.player.pos.x;
        assert!(demo.key_down("ArrowRight"));
        demo.frame(FRAME * 2.0);
        demo.frame(FRAME * 3.0);
        assert!(demo.state.player.pos.x > x);
    }

    #[test]
    fn test_paused_frames_are_not_presented() {
        let mut demo = platformer();
        demo.frame(0.0);
        demo.key_down(KEY_JUMP);
        demo.frame(FRAME);
        demo.key_down(KEY_PAUSE);
        // The pause itself is presented once
        assert!(demo.frame(FRAME * 2.0).is_some());
        assert_eq!(demo.state.phase, GamePhase::Paused);
        assert!(demo.frame(FRAME * 3.0).is_none());
    }

    #[test]
    fn test_focus_lost_pauses_and_releases_keys() {
        let mut demo = platformer();
        demo.frame(0.0);
        demo.key_down(KEY_JUMP);
        demo.frame(FRAME);
        demo.key_down("KeyA");
        demo.focus_lost();
        demo.frame(FRAME * 2.0);
        assert_eq!(demo.state.phase, GamePhase::Paused);
        assert!(!demo.input().left);
    }

    #[test]
    fn test_focus_lost_forgets_frame_time() {
        let mut demo = platformer();
        demo.frame(0.0);
        demo.focus_lost();
        demo.key_down(KEY_JUMP);
        // Back after a long absence: the start tick runs alone, no catch-up burst
        demo.frame(FRAME * 600.0);
        assert_eq!(demo.state.phase, GamePhase::Running);
        assert_eq!(demo.state.time_ticks, 0);
    }

    #[test]
    fn test_hud_tracks_state() {
        let mut demo = platformer();
        demo.state.score = 240;
        assert_eq!(demo.hud().get("score"), Some("Score: 240"));
    }

    fn locked_range() -> RangeDemo {
        let mut demo = RangeDemo::new(RangeTuning::default(), Settings::default());
        demo.frame(0.0);
        assert!(demo.mouse_down());
        demo.pointer_lock_changed(true);
        demo.frame(FRAME);
        demo
    }

    #[test]
    fn test_range_click_locks_and_starts() {
        let demo = locked_range();
        assert_eq!(demo.state.phase, RangePhase::Running);
        assert!(demo.state.pointer_locked);
    }

    #[test]
    fn test_range_fire_while_locked() {
        let mut demo = locked_range();
        assert!(!demo.mouse_down());
        demo.frame(FRAME * 2.0);
        assert_eq!(demo.state.ammo, 11);
        assert_eq!(demo.hud().get("ammo"), Some("Ammo: 11/12"));
    }

    #[test]
    fn test_range_look_accumulates_between_ticks() {
        let mut demo = locked_range();
        demo.mouse_move(50.0, 0.0);
        demo.mouse_move(50.0, 0.0);
        demo.frame(FRAME * 2.0);
        let expected = (-100.0 * Settings::default().mouse_sensitivity)
            .rem_euclid(std::f32::consts::TAU);
        assert!((demo.state.camera.yaw - expected).abs() < 1e-5);
    }

    #[test]
    fn test_range_lock_loss_pauses() {
        let mut demo = locked_range();
        demo.pointer_lock_changed(false);
        assert!(demo.frame(FRAME * 2.0).is_some());
        assert_eq!(demo.state.phase, RangePhase::Paused);
        assert!(demo.frame(FRAME * 3.0).is_none());
    }

    #[test]
    fn test_range_unlock_and_blur_in_one_frame_stays_paused() {
        let mut demo = locked_range();
        demo.pointer_lock_changed(false);
        demo.focus_lost();
        demo.frame(FRAME * 2.0);
        assert_eq!(demo.state.phase, RangePhase::Paused);
        assert!(!demo.state.pointer_locked);

        let clock = demo.state.clock_ms;
        demo.frame(FRAME * 3.0);
        assert_eq!(demo.state.clock_ms, clock);

        // Clicking back in regains the lock and resumes
        assert!(demo.mouse_down());
        demo.pointer_lock_changed(true);
        demo.frame(FRAME * 5.0);
        assert_eq!(demo.state.phase, RangePhase::Running);
    }

    #[test]
    fn test_range_unbound_key_is_ignored() {
        let mut demo = RangeDemo::new(RangeTuning::default(), Settings::default());
        assert!(!demo.key_down("KeyQ"));
        assert!(demo.key_down(KEY_RELOAD));
    }
}
