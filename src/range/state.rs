//! Shooting range session state

use glam::Vec3;

use super::ray::{Cylinder, Ray, look_direction};
use super::timers::TimerQueue;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::RangeTuning;

/// Range session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePhase {
    /// Waiting for the first click
    Idle,
    Running,
    /// Pointer lock lost or pause pressed
    Paused,
}

/// Something that happened during a range tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    /// A round was fired; `hit` is the target index struck, if any
    Shot { hit: Option<usize> },
    /// Trigger pulled with an empty magazine
    DryFire,
    ReloadStarted,
    Reloaded,
    TargetRespawned { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Standing,
    Down,
}

/// An upright cylindrical target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub base: Vec3,
    pub state: TargetState,
}

impl Target {
    pub fn standing(base: Vec3) -> Self {
        Self {
            base,
            state: TargetState::Standing,
        }
    }

    pub fn cylinder(&self) -> Cylinder {
        Cylinder {
            base: self.base,
            radius: TARGET_RADIUS,
            height: TARGET_HEIGHT,
        }
    }

    pub fn is_standing(&self) -> bool {
        self.state == TargetState::Standing
    }
}

/// Fixed lane positions down range
pub const TARGET_LANES: [(f32, f32); 5] = [
    (-6.0, -14.0),
    (-3.0, -18.0),
    (0.0, -12.0),
    (3.0, -20.0),
    (6.0, -16.0),
];

/// Maximum look pitch (just short of straight up/down)
pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

pub const STATUS_IDLE: &str = "Click to enter the range";
pub const STATUS_READY: &str = "Fire at will!";
pub const STATUS_PAUSED: &str = "Paused - click to resume";
pub const STATUS_OUT_OF_AMMO: &str = "Out of ammo! Press R to reload.";
pub const STATUS_RELOADING: &str = "Reloading...";
pub const STATUS_RELOADED: &str = "Reloaded";
pub const STATUS_HIT: &str = "Hit!";
pub const STATUS_MISS: &str = "Missed";
pub const STATUS_RESET: &str = "Range reset";

/// First-person camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.eye, self.forward())
    }

    /// Apply a pointer movement in pixels
    pub fn look(&mut self, dx: f32, dy: f32, settings: &Settings) {
        self.yaw -= dx * settings.mouse_sensitivity;
        self.pitch -= dy * settings.mouse_sensitivity * settings.pitch_sign();
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }
}

/// Complete range session
#[derive(Debug, Clone)]
pub struct RangeState {
    pub tuning: RangeTuning,
    pub settings: Settings,
    pub phase: RangePhase,
    /// Bumped on every reset; deferred actions from older epochs are ignored
    pub epoch: u64,
    /// Simulated time, advanced only while running
    pub clock_ms: f64,
    pub camera: Camera,
    pub targets: Vec<Target>,
    pub ammo: u32,
    pub reloading: bool,
    pub health: u32,
    pub score: u64,
    pub pointer_locked: bool,
    /// Time of the last round fired
    pub last_shot_ms: Option<f64>,
    /// Raycasts performed this session
    pub shots_cast: u64,
    pub status: &'static str,
    pub timers: TimerQueue,
}

impl RangeState {
    pub fn new(tuning: RangeTuning, settings: Settings) -> Self {
        Self {
            ammo: tuning.magazine_size,
            health: tuning.start_health,
            tuning,
            settings,
            phase: RangePhase::Idle,
            epoch: 0,
            clock_ms: 0.0,
            camera: Camera::default(),
            targets: Self::layout(),
            reloading: false,
            score: 0,
            pointer_locked: false,
            last_shot_ms: None,
            shots_cast: 0,
            status: STATUS_IDLE,
            timers: TimerQueue::new(),
        }
    }

    fn layout() -> Vec<Target> {
        TARGET_LANES
            .iter()
            .map(|&(x, z)| Target::standing(Vec3::new(x, 0.0, z)))
            .collect()
    }

    /// Targets still standing
    pub fn targets_remaining(&self) -> usize {
        self.targets.iter().filter(|t| t.is_standing()).count()
    }

    /// Rebuild targets and magazine. Pending deferred actions become stale.
    pub fn reset(&mut self) {
        self.epoch += 1;
        if !self.timers.is_empty() {
            log::debug!("{} pending timers left to go stale", self.timers.len());
        }
        self.targets = Self::layout();
        self.ammo = self.tuning.magazine_size;
        self.reloading = false;
        self.health = self.tuning.start_health;
        self.score = 0;
        self.last_shot_ms = None;
        self.camera = Camera::default();
        log::info!("Range reset (epoch {})", self.epoch);
    }

    /// Nearest standing target along the aim ray within range
    pub fn cast(&mut self) -> Option<usize> {
        self.shots_cast += 1;
        let ray = self.camera.aim_ray();
        let max_range = self.tuning.max_range;
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_standing())
            .filter_map(|(i, t)| {
                super::ray::ray_cylinder(&ray, &t.cylinder()).map(|dist| (i, dist))
            })
            .filter(|&(_, dist)| dist <= max_range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_range_is_full() {
        let state = RangeState::new(RangeTuning::default(), Settings::default());
        assert_eq!(state.ammo, 12);
        assert_eq!(state.targets_remaining(), 5);
        assert_eq!(state.phase, RangePhase::Idle);
    }

    #[test]
    fn test_cast_hits_center_lane() {
        let mut state = RangeState::new(RangeTuning::default(), Settings::default());
        // Center lane target at z=-12; aim down slightly to the body
        state.camera.pitch = -0.03;
        assert_eq!(state.cast(), Some(2));
        assert_eq!(state.shots_cast, 1);
    }

    #[test]
    fn test_cast_ignores_downed_targets() {
        let mut state = RangeState::new(RangeTuning::default(), Settings::default());
        state.camera.pitch = -0.03;
        state.targets[2].state = TargetState::Down;
        assert_eq!(state.cast(), None);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut camera = Camera::default();
        camera.look(0.0, -100_000.0, &Settings::default());
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.look(0.0, 200_000.0, &Settings::default());
        assert_eq!(camera.pitch, -MAX_PITCH);
    }

    #[test]
    fn test_reset_bumps_epoch() {
        let mut state = RangeState::new(RangeTuning::default(), Settings::default());
        state.targets[0].state = TargetState::Down;
        state.ammo = 0;
        state.reset();
        assert_eq!(state.epoch, 1);
        assert_eq!(state.ammo, 12);
        assert_eq!(state.targets_remaining(), 5);
    }
}
