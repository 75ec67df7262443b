//! Platformer simulation tick
//!
//! One call advances the session by `dt` reference frames. Resolution order
//! is player, then enemies, then gems; a life loss aborts the rest of the
//! tick and a level clear ends it.

use super::geom::{Aabb, intersects};
use super::state::{Facing, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Left held (ArrowLeft / KeyA)
    pub left: bool,
    /// Right held (ArrowRight / KeyD)
    pub right: bool,
    /// Jump pressed since the last tick (one-shot)
    pub jump: bool,
    /// Start/restart pressed (one-shot)
    pub start: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// Advance the game state by one step, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start && state.start() {
        events.push(GameEvent::Started);
        // The start press doubles as a jump key; don't jump on the same press
        return events;
    }

    if input.pause {
        events.extend(state.toggle_pause());
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;

    if input.jump && state.player.grounded {
        state.player.vel.y = state.tuning.jump_velocity;
        state.player.grounded = false;
        events.push(GameEvent::Jumped);
    }

    if update_player(state, input, dt) {
        events.push(state.lose_life());
        return events;
    }

    if update_enemies(state, dt, &mut events) {
        events.push(state.lose_life());
        return events;
    }

    update_gems(state, &mut events);
    if state.all_gems_collected() {
        events.push(state.complete_level());
    }

    events
}

/// Move the player and resolve platform contacts. Returns true if the player
/// fell out of the world.
fn update_player(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    let catalog = state.catalog();
    let platforms = &catalog[state.level_index].platforms;
    let tuning = &state.tuning;
    let player = &mut state.player;

    let mut moving = false;
    if input.left {
        player.vel.x = -tuning.move_speed;
        player.facing = Facing::Left;
        moving = true;
    }
    if input.right {
        player.vel.x = tuning.move_speed;
        player.facing = Facing::Right;
        moving = true;
    }
    if !moving {
        player.vel.x *= tuning.damping.powf(dt);
        if player.vel.x.abs() < tuning.stop_threshold {
            player.vel.x = 0.0;
        }
    }

    player.vel.y += tuning.gravity * dt;
    player.pos += player.vel * dt;
    player.grounded = false;

    for plat in platforms {
        if !intersects(&*player, plat) {
            continue;
        }
        let overlap_y = player.bottom() - plat.y;
        // Approximation: assumes the whole move happened this tick
        let prev_y = player.pos.y - player.vel.y * dt;
        if prev_y + player.size.y <= plat.y + tuning.landing_tolerance && overlap_y >= 0.0 {
            player.pos.y = plat.y - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
        } else if player.pos.y <= plat.bottom() {
            if player.bounds().center_x() < plat.center_x() {
                player.pos.x = plat.x - player.size.x;
            } else {
                player.pos.x = plat.right();
            }
            player.vel.x = 0.0;
        }
    }

    if player.pos.y > WORLD_HEIGHT {
        log::debug!("Player fell out of the world at x={:.1}", player.pos.x);
        return true;
    }

    player.pos.x = player.pos.x.clamp(0.0, WORLD_WIDTH - player.size.x);
    false
}

/// Patrol enemies and resolve player contacts. Returns true on a hazard hit.
fn update_enemies(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> bool {
    let tuning = &state.tuning;
    let player = &mut state.player;
    let mut stomped = vec![false; state.enemies.len()];

    for (i, enemy) in state.enemies.iter_mut().enumerate() {
        enemy.patrol(dt);

        if !intersects(&*player, &*enemy) {
            continue;
        }
        let falling = player.vel.y > tuning.stomp_min_fall_speed;
        if falling && player.bottom() - enemy.pos.y < tuning.stomp_margin {
            stomped[i] = true;
            player.vel.y = tuning.jump_velocity * tuning.stomp_bounce;
            state.score += tuning.stomp_bonus;
            events.push(GameEvent::EnemyStomped);
            log::debug!("Enemy stomped at x={:.1}", enemy.pos.x);
        } else {
            log::debug!("Player hit by enemy at x={:.1}", enemy.pos.x);
            return true;
        }
    }

    let mut flags = stomped.into_iter();
    state.enemies.retain(|_| !flags.next().unwrap_or(false));
    false
}

/// Collect gems the player touches
fn update_gems(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for (index, gem) in state.gems.iter_mut().enumerate() {
        if !gem.collected && intersects(&state.player, &*gem) {
            gem.collected = true;
            state.score += state.tuning.gem_bonus;
            events.push(GameEvent::GemCollected { index });
            log::debug!("Gem {} collected", index);
        }
    }
}
