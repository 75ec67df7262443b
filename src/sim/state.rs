//! Platformer session state and entity records
//!
//! `GameState` owns the live player, gems and enemies and replaces them
//! wholesale whenever a level is (re)built. The level catalog is shared
//! and never mutated.

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geom::{Aabb, Rect};
use super::level::{Level, PatrolRange};
use crate::consts::*;
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Not started, waiting for the start input
    Idle,
    /// Active gameplay
    Running,
    /// Simulation and presentation suspended
    Paused,
    /// Out of lives
    GameOver,
    /// Every level cleared
    Victory,
}

/// Something that happened during a tick, for HUD/logging consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Jumped,
    GemCollected { index: usize },
    EnemyStomped,
    /// A life was lost and the current level rebuilt
    LifeLost { lives_left: u8 },
    /// Advanced to the next level (0-based index)
    LevelCleared { next_level: usize },
    GameOver,
    Victory,
}

/// Which way the player sprite looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// The player's character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Last vertical contact was a landing on a platform
    pub grounded: bool,
    pub facing: Facing,
}

impl Player {
    pub fn spawn(at: Vec2) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            grounded: false,
            facing: Facing::Right,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

impl Aabb for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// A collectible gem
#[derive(Debug, Clone, PartialEq)]
pub struct Gem {
    pub pos: Vec2,
    pub radius: f32,
    pub collected: bool,
}

impl Aabb for Gem {
    /// Box inscribing the pickup circle
    fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// +1.0 walking right, -1.0 walking left
    pub dir: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn spawn(range: &PatrolRange, speed: f32) -> Self {
        Self {
            pos: Vec2::new(range.x, range.y),
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            dir: 1.0,
            min_x: range.min_x,
            max_x: range.max_x,
            speed,
        }
    }

    /// Walk one step and turn around at the patrol bounds.
    ///
    /// `x` stays within `[min_x, max_x]`. The left edge stops at `min_x`; the
    /// right edge turns back as soon as the box touches `max_x`, without
    /// moving the enemy further than one step.
    pub fn patrol(&mut self, dt: f32) {
        self.pos.x += self.dir * self.speed * dt;
        if self.pos.x <= self.min_x {
            self.pos.x = self.min_x;
            self.dir = 1.0;
        } else if self.pos.x + self.size.x >= self.max_x {
            self.pos.x = self.pos.x.min(self.max_x);
            self.dir = -1.0;
        }
    }
}

impl Aabb for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Status line shown before the first start
pub const STATUS_PRESS_START: &str = "Press Space to start!";
pub const STATUS_STARTED: &str = "Collect all gems to clear the level!";
pub const STATUS_PAUSED: &str = "Paused";
pub const STATUS_RESUMED: &str = "Back in action!";
pub const STATUS_LIFE_LOST: &str = "Ouch! Watch out for stompers.";
pub const STATUS_LEVEL_CLEARED: &str = "Level cleared! Next up...";
pub const STATUS_GAME_OVER: &str = "Game Over! Press Space to try again.";
pub const STATUS_VICTORY: &str = "Victory! You collected every jumbo gem.";

/// Complete platformer session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Shared, read-only level catalog
    levels: Rc<[Level]>,
    pub tuning: Tuning,
    /// Seed for enemy speed rolls
    pub seed: u64,
    rng: Pcg32,
    /// Current level (0-based)
    pub level_index: usize,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// HUD status line
    pub status: &'static str,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub gems: Vec<Gem>,
    pub enemies: Vec<Enemy>,
}

impl GameState {
    /// Create an idle session. `levels` must already be validated.
    pub fn new(levels: Rc<[Level]>, tuning: Tuning, seed: u64) -> Self {
        assert!(!levels.is_empty(), "level catalog must not be empty");
        let mut state = Self {
            player: Player::spawn(levels[0].player_start),
            levels,
            lives: tuning.start_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            score: 0,
            phase: GamePhase::Idle,
            status: STATUS_PRESS_START,
            time_ticks: 0,
            gems: Vec::new(),
            enemies: Vec::new(),
        };
        state.build_level(0);
        state
    }

    /// The catalog entry for the current level
    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    /// Shared handle to the whole catalog
    pub fn catalog(&self) -> Rc<[Level]> {
        Rc::clone(&self.levels)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Replace player, gems and enemies with fresh copies of a catalog entry
    pub fn build_level(&mut self, index: usize) {
        self.level_index = index;
        let levels = self.catalog();
        let level = &levels[index];

        self.player = Player::spawn(level.player_start);
        self.gems = level
            .gems
            .iter()
            .map(|&pos| Gem {
                pos,
                radius: GEM_RADIUS,
                collected: false,
            })
            .collect();

        let (min, spread) = (self.tuning.enemy_speed_min, self.tuning.enemy_speed_spread);
        self.enemies = level
            .enemies
            .iter()
            .map(|range| {
                let speed = min + self.rng.random::<f32>() * spread;
                Enemy::spawn(range, speed)
            })
            .collect();

        log::info!(
            "Built level {} ({} gems, {} enemies)",
            index + 1,
            self.gems.len(),
            self.enemies.len()
        );
    }

    /// Start a new run from Idle, GameOver or Victory. Returns false if already playing.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Running | GamePhase::Paused => return false,
            GamePhase::GameOver | GamePhase::Victory => self.phase = GamePhase::Idle,
            GamePhase::Idle => {}
        }
        self.score = 0;
        self.lives = self.tuning.start_lives;
        self.time_ticks = 0;
        self.build_level(0);
        self.phase = GamePhase::Running;
        self.status = STATUS_STARTED;
        log::info!("Run started (seed {})", self.seed);
        true
    }

    /// Toggle Running/Paused; ignored in other phases
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.status = STATUS_PAUSED;
                Some(GameEvent::Paused)
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.status = STATUS_RESUMED;
                Some(GameEvent::Resumed)
            }
            _ => None,
        }
    }

    /// Spend a life: rebuild the level or end the run
    pub fn lose_life(&mut self) -> GameEvent {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.status = STATUS_GAME_OVER;
            log::info!("Game over with score {}", self.score);
            GameEvent::GameOver
        } else {
            self.status = STATUS_LIFE_LOST;
            log::info!("Life lost, {} remaining", self.lives);
            self.build_level(self.level_index);
            GameEvent::LifeLost {
                lives_left: self.lives,
            }
        }
    }

    /// Advance to the next level or finish the run
    pub fn complete_level(&mut self) -> GameEvent {
        let next = self.level_index + 1;
        if next >= self.level_count() {
            self.phase = GamePhase::Victory;
            self.status = STATUS_VICTORY;
            log::info!("Victory with score {}", self.score);
            GameEvent::Victory
        } else {
            self.status = STATUS_LEVEL_CLEARED;
            log::info!("Level {} cleared", self.level_index + 1);
            self.build_level(next);
            GameEvent::LevelCleared { next_level: next }
        }
    }

    /// True once every gem of the current level is collected
    pub fn all_gems_collected(&self) -> bool {
        self.gems.iter().all(|g| g.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::catalog;

    fn new_state() -> GameState {
        GameState::new(catalog().unwrap().into(), Tuning::default(), 7)
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.status, STATUS_PRESS_START);
        assert_eq!(state.gems.len(), 5);
    }

    #[test]
    fn test_enemy_speeds_in_range() {
        let state = new_state();
        for enemy in &state.enemies {
            assert!((1.3..2.1).contains(&enemy.speed), "speed {}", enemy.speed);
        }
    }

    #[test]
    fn test_same_seed_same_speeds() {
        let a = new_state();
        let b = new_state();
        assert_eq!(a.enemies, b.enemies);
    }

    #[test]
    fn test_start_only_from_idle_like_phases() {
        let mut state = new_state();
        assert!(state.start());
        assert!(!state.start());
        state.toggle_pause();
        assert!(!state.start());
        state.phase = GamePhase::Victory;
        state.score = 500;
        assert!(state.start());
        assert_eq!(state.score, 0);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn test_pause_ignored_when_idle() {
        let mut state = new_state();
        assert_eq!(state.toggle_pause(), None);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_lose_life_rebuilds_level() {
        let mut state = new_state();
        state.start();
        state.gems[0].collected = true;
        state.player.pos = Vec2::new(500.0, 10.0);
        assert_eq!(state.lose_life(), GameEvent::LifeLost { lives_left: 2 });
        assert!(!state.gems[0].collected);
        assert_eq!(state.player.pos, Vec2::new(70.0, 300.0));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_last_level_completion_is_victory() {
        let mut state = new_state();
        state.start();
        assert_eq!(state.complete_level(), GameEvent::LevelCleared { next_level: 1 });
        assert_eq!(state.complete_level(), GameEvent::Victory);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_enemy_turns_at_bounds() {
        let mut enemy = Enemy::spawn(
            &PatrolRange {
                x: 100.0,
                y: 0.0,
                min_x: 100.0,
                max_x: 140.0,
            },
            2.0,
        );
        enemy.dir = -1.0;
        enemy.patrol(1.0);
        assert_eq!(enemy.pos.x, 100.0);
        assert_eq!(enemy.dir, 1.0);
        for _ in 0..4 {
            enemy.patrol(1.0);
        }
        assert_eq!(enemy.pos.x, 108.0);
        assert_eq!(enemy.dir, -1.0);
    }

    #[test]
    fn test_first_patrol_step_moves_at_most_speed() {
        let mut state = new_state();
        for level in 0..state.level_count() {
            state.build_level(level);
            for enemy in state.enemies.iter_mut() {
                let start = enemy.pos.x;
                enemy.patrol(1.0);
                let moved = (enemy.pos.x - start).abs();
                assert!(moved <= enemy.speed + 1e-4, "level {} moved {}", level, moved);
                assert!(enemy.pos.x >= enemy.min_x && enemy.pos.x <= enemy.max_x);
            }
        }
    }

    #[test]
    fn test_enemy_spawned_past_right_edge_turns_in_place() {
        // Level 2's first enemy starts at 240 with its box overhanging 260
        let mut state = new_state();
        state.build_level(1);
        let enemy = &mut state.enemies[0];
        let speed = enemy.speed;
        enemy.patrol(1.0);
        assert!((enemy.pos.x - (240.0 + speed)).abs() < 1e-4);
        assert_eq!(enemy.dir, -1.0);
        enemy.patrol(1.0);
        assert!((enemy.pos.x - 240.0).abs() < 1e-4);
    }
}
