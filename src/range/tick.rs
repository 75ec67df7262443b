//! Shooting range tick

use glam::Vec2;

use super::state::*;
use super::timers::Deferred;
use crate::consts::REFERENCE_FRAME_MS;

/// Input collected since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeInput {
    /// Accumulated pointer movement (pixels) while locked
    pub look: Vec2,
    /// Pointer lock acquired (`Some(true)`) or released (`Some(false)`)
    pub pointer_lock: Option<bool>,
    /// Mouse button pressed
    pub fire: bool,
    pub reload: bool,
    /// Enter / first click
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
}

/// Advance the range by `dt` reference frames
pub fn tick(state: &mut RangeState, input: &RangeInput, dt: f32) -> Vec<RangeEvent> {
    let mut events = Vec::new();

    if let Some(locked) = input.pointer_lock {
        state.pointer_locked = locked;
        match (locked, state.phase) {
            (false, RangePhase::Running) => pause(state, &mut events),
            (true, RangePhase::Paused) => resume(state, &mut events),
            _ => {}
        }
    }

    if input.start {
        match state.phase {
            RangePhase::Idle => {
                state.phase = RangePhase::Running;
                state.status = STATUS_READY;
                events.push(RangeEvent::Started);
                log::info!("Range started");
            }
            RangePhase::Paused if state.pointer_locked => resume(state, &mut events),
            RangePhase::Paused | RangePhase::Running => {}
        }
    }

    if input.pause {
        match state.phase {
            RangePhase::Running => pause(state, &mut events),
            // Without the pointer there is nothing to aim with
            RangePhase::Paused if state.pointer_locked => resume(state, &mut events),
            RangePhase::Paused | RangePhase::Idle => {}
        }
    }

    if input.reset && state.phase != RangePhase::Idle {
        state.reset();
        state.status = STATUS_RESET;
        events.push(RangeEvent::Reset);
    }

    if state.phase != RangePhase::Running {
        return events;
    }

    state.clock_ms += dt as f64 * REFERENCE_FRAME_MS;

    if state.pointer_locked && input.look != Vec2::ZERO {
        let settings = state.settings.clone();
        state.camera.look(input.look.x, input.look.y, &settings);
    }

    for action in state.timers.drain_due(state.clock_ms, state.epoch) {
        match action {
            Deferred::Respawn { target } => {
                if let Some(t) = state.targets.get_mut(target) {
                    t.state = TargetState::Standing;
                    events.push(RangeEvent::TargetRespawned { index: target });
                    log::debug!("Target {} respawned", target);
                }
            }
            Deferred::ReloadDone => {
                state.ammo = state.tuning.magazine_size;
                state.reloading = false;
                state.status = STATUS_RELOADED;
                events.push(RangeEvent::Reloaded);
                log::debug!("Reload complete");
            }
        }
    }

    if !state.pointer_locked {
        return events;
    }

    if input.reload {
        start_reload(state, &mut events);
    }

    if input.fire {
        fire(state, &mut events);
    }

    events
}

fn pause(state: &mut RangeState, events: &mut Vec<RangeEvent>) {
    state.phase = RangePhase::Paused;
    state.status = STATUS_PAUSED;
    events.push(RangeEvent::Paused);
}

fn resume(state: &mut RangeState, events: &mut Vec<RangeEvent>) {
    state.phase = RangePhase::Running;
    state.status = STATUS_READY;
    events.push(RangeEvent::Resumed);
}

fn start_reload(state: &mut RangeState, events: &mut Vec<RangeEvent>) {
    if state.reloading || state.ammo == state.tuning.magazine_size {
        return;
    }
    state.reloading = true;
    state.status = STATUS_RELOADING;
    state.timers.schedule(
        state.clock_ms,
        state.tuning.reload_ms,
        state.epoch,
        Deferred::ReloadDone,
    );
    events.push(RangeEvent::ReloadStarted);
    log::debug!("Reload started");
}

fn fire(state: &mut RangeState, events: &mut Vec<RangeEvent>) {
    if state.reloading {
        state.status = STATUS_RELOADING;
        return;
    }
    if state.ammo == 0 {
        state.status = STATUS_OUT_OF_AMMO;
        events.push(RangeEvent::DryFire);
        return;
    }
    if let Some(last) = state.last_shot_ms {
        if state.clock_ms - last < state.tuning.fire_cooldown_ms {
            return;
        }
    }

    state.ammo -= 1;
    state.last_shot_ms = Some(state.clock_ms);

    let hit = state.cast();
    match hit {
        Some(index) => {
            state.targets[index].state = TargetState::Down;
            state.score += state.tuning.target_score;
            state.status = STATUS_HIT;
            state.timers.schedule(
                state.clock_ms,
                state.tuning.respawn_ms,
                state.epoch,
                Deferred::Respawn { target: index },
            );
            log::debug!("Target {} down, score {}", index, state.score);
        }
        None => state.status = STATUS_MISS,
    }
    events.push(RangeEvent::Shot { hit });
}
