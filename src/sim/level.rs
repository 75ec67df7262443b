//! Level catalog
//!
//! Static layouts, validated once at startup. A malformed layout is a
//! configuration defect and aborts startup rather than being repaired.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geom::Rect;
use crate::consts::*;

/// An interval an enemy walks back and forth within, plus its spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRange {
    pub x: f32,
    pub y: f32,
    pub min_x: f32,
    pub max_x: f32,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub player_start: Vec2,
    pub platforms: Vec<Rect>,
    pub gems: Vec<Vec2>,
    pub enemies: Vec<PatrolRange>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("level catalog is empty")]
    EmptyCatalog,
    #[error("level {level} has no gems and could never be cleared")]
    NoGems { level: usize },
    #[error("level {level} platform {index} has a non-positive size")]
    DegeneratePlatform { level: usize, index: usize },
    #[error("level {level} player start is outside the world")]
    PlayerStartOutside { level: usize },
    #[error("level {level} gem {index} is outside the world")]
    GemOutside { level: usize, index: usize },
    #[error("level {level} enemy {index} patrol range is narrower than an enemy")]
    NarrowPatrol { level: usize, index: usize },
    #[error("level {level} enemy {index} starts outside its patrol range")]
    EnemyOutsidePatrol { level: usize, index: usize },
}

impl Level {
    pub fn validate(&self, level: usize) -> Result<(), LevelError> {
        if self.gems.is_empty() {
            return Err(LevelError::NoGems { level });
        }
        for (index, p) in self.platforms.iter().enumerate() {
            if !(p.w > 0.0 && p.h > 0.0) {
                return Err(LevelError::DegeneratePlatform { level, index });
            }
        }
        if !in_world(self.player_start) {
            return Err(LevelError::PlayerStartOutside { level });
        }
        for (index, gem) in self.gems.iter().enumerate() {
            if !in_world(*gem) {
                return Err(LevelError::GemOutside { level, index });
            }
        }
        for (index, e) in self.enemies.iter().enumerate() {
            if e.max_x - e.min_x < ENEMY_WIDTH {
                return Err(LevelError::NarrowPatrol { level, index });
            }
            if e.x < e.min_x || e.x > e.max_x {
                return Err(LevelError::EnemyOutsidePatrol { level, index });
            }
        }
        Ok(())
    }
}

fn in_world(p: Vec2) -> bool {
    (0.0..=WORLD_WIDTH).contains(&p.x) && (0.0..=WORLD_HEIGHT).contains(&p.y)
}

/// Validate every level of a catalog
pub fn validate_catalog(levels: &[Level]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::EmptyCatalog);
    }
    levels
        .iter()
        .enumerate()
        .try_for_each(|(i, level)| level.validate(i))
}

/// The built-in two-level catalog
pub fn catalog() -> Result<Vec<Level>, LevelError> {
    let levels = vec![
        Level {
            player_start: Vec2::new(70.0, 300.0),
            platforms: vec![
                Rect::new(0.0, 460.0, 960.0, 80.0),
                Rect::new(120.0, 380.0, 140.0, 22.0),
                Rect::new(330.0, 320.0, 160.0, 20.0),
                Rect::new(560.0, 270.0, 130.0, 20.0),
                Rect::new(730.0, 210.0, 160.0, 20.0),
            ],
            gems: vec![
                Vec2::new(165.0, 340.0),
                Vec2::new(385.0, 280.0),
                Vec2::new(600.0, 230.0),
                Vec2::new(780.0, 170.0),
                Vec2::new(880.0, 420.0),
            ],
            enemies: vec![
                patrol(420.0, 290.0, 320.0, 520.0),
                patrol(700.0, 180.0, 680.0, 860.0),
            ],
        },
        Level {
            player_start: Vec2::new(40.0, 300.0),
            platforms: vec![
                Rect::new(0.0, 470.0, 960.0, 70.0),
                Rect::new(80.0, 390.0, 200.0, 22.0),
                Rect::new(320.0, 330.0, 120.0, 20.0),
                Rect::new(500.0, 280.0, 160.0, 20.0),
                Rect::new(720.0, 240.0, 200.0, 20.0),
                Rect::new(620.0, 390.0, 120.0, 20.0),
            ],
            gems: vec![
                Vec2::new(140.0, 350.0),
                Vec2::new(350.0, 290.0),
                Vec2::new(550.0, 240.0),
                Vec2::new(760.0, 200.0),
                Vec2::new(640.0, 350.0),
            ],
            enemies: vec![
                patrol(240.0, 350.0, 120.0, 260.0),
                patrol(560.0, 240.0, 500.0, 640.0),
                patrol(800.0, 200.0, 720.0, 900.0),
            ],
        },
    ];
    validate_catalog(&levels)?;
    Ok(levels)
}

const fn patrol(x: f32, y: f32, min_x: f32, max_x: f32) -> PatrolRange {
    PatrolRange { x, y, min_x, max_x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let levels = catalog().unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].gems.len(), 5);
        assert_eq!(levels[1].enemies.len(), 3);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(validate_catalog(&[]), Err(LevelError::EmptyCatalog));
    }

    #[test]
    fn test_gemless_level_rejected() {
        let mut levels = catalog().unwrap();
        levels[1].gems.clear();
        assert_eq!(validate_catalog(&levels), Err(LevelError::NoGems { level: 1 }));
    }

    #[test]
    fn test_narrow_patrol_rejected() {
        let mut levels = catalog().unwrap();
        levels[0].enemies[1] = patrol(700.0, 180.0, 690.0, 700.0);
        assert_eq!(
            validate_catalog(&levels),
            Err(LevelError::NarrowPatrol { level: 0, index: 1 })
        );
    }

    #[test]
    fn test_enemy_outside_patrol_rejected() {
        let mut levels = catalog().unwrap();
        levels[0].enemies[0].x = 100.0;
        assert_eq!(
            validate_catalog(&levels),
            Err(LevelError::EnemyOutsidePatrol { level: 0, index: 0 })
        );
    }

    #[test]
    fn test_degenerate_platform_rejected() {
        let mut levels = catalog().unwrap();
        levels[0].platforms[2].w = 0.0;
        assert_eq!(
            validate_catalog(&levels),
            Err(LevelError::DegeneratePlatform { level: 0, index: 2 })
        );
    }
}
