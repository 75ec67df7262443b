//! Platformer presentation
//!
//! Pure projection of the session into a draw list. Runs after the
//! simulation step so it always shows the frame just simulated.

use glam::Vec2;

use super::draw::{Color, DrawList};
use crate::sim::{Enemy, Facing, GameState, Gem, Level, Player};

const SKY: Color = Color::hex(0x9fd3f5);
const STRIPE: Color = Color::hex(0x0b0c14).with_alpha(0.12);
const PLATFORM: Color = Color::hex(0x2d5e36);
const PLATFORM_LIP: Color = Color::hex(0x3d7a48);
const GEM: Color = Color::hex(0xffe27a);
const GEM_SHINE: Color = Color::hex(0xfff6c7);
const ENEMY: Color = Color::hex(0x6a4c93);
const ENEMY_EYE: Color = Color::hex(0xf7f4f8);
const ENEMY_MOUTH: Color = Color::hex(0x2b1d3a);
const PLAYER: Color = Color::hex(0xffcc6f);
const PLAYER_EYE: Color = Color::hex(0x30231c);
const PLAYER_MOUTH: Color = Color::hex(0xf07c5d);
const PLAYER_BELT: Color = Color::hex(0xe93d4b);
const PLAYER_HAND: Color = Color::hex(0x3b2f49);

/// Build the frame for the current state
pub fn draw(state: &GameState, level: &Level, reduced_motion: bool) -> DrawList {
    let mut list = DrawList::new();
    list.clear(SKY);
    if !reduced_motion {
        draw_background(&mut list);
    }
    draw_platforms(&mut list, level);
    for gem in state.gems.iter().filter(|g| !g.collected) {
        draw_gem(&mut list, gem);
    }
    for enemy in &state.enemies {
        draw_enemy(&mut list, enemy);
    }
    draw_player(&mut list, &state.player);
    list
}

fn draw_background(list: &mut DrawList) {
    for i in 0..20 {
        let x = i as f32 * 48.0;
        let y = 50.0 + (i % 2) as f32 * 10.0;
        list.rect(x, y, 30.0, 8.0, STRIPE);
    }
}

fn draw_platforms(list: &mut DrawList, level: &Level) {
    for p in &level.platforms {
        list.rect(p.x, p.y, p.w, p.h, PLATFORM);
        list.rect(p.x, p.y, p.w, 6.0, PLATFORM_LIP);
    }
}

fn draw_gem(list: &mut DrawList, gem: &Gem) {
    list.circle(gem.pos, gem.radius, GEM);
    list.circle(gem.pos - Vec2::splat(2.0), gem.radius / 2.0, GEM_SHINE);
}

fn draw_enemy(list: &mut DrawList, e: &Enemy) {
    let (x, y, w, h) = (e.pos.x, e.pos.y, e.size.x, e.size.y);
    list.rect(x, y, w, h, ENEMY);
    list.rect(x + 6.0, y + 6.0, 6.0, 6.0, ENEMY_EYE);
    list.rect(x + w - 12.0, y + 6.0, 6.0, 6.0, ENEMY_EYE);
    list.rect(x + 8.0, y + 18.0, w - 16.0, 4.0, ENEMY_MOUTH);
}

fn draw_player(list: &mut DrawList, p: &Player) {
    let (x, y) = (p.pos.x, p.pos.y);
    list.rect(x, y, p.size.x, p.size.y, PLAYER);
    list.rect(x + 6.0, y + 10.0, 6.0, 6.0, PLAYER_EYE);
    list.rect(x + 18.0, y + 10.0, 6.0, 6.0, PLAYER_EYE);
    list.rect(x + 10.0, y + 26.0, 12.0, 6.0, PLAYER_MOUTH);
    list.rect(x + 4.0, y + 34.0, 24.0, 4.0, PLAYER_BELT);
    let hand_x = match p.facing {
        Facing::Right => x + 22.0,
        Facing::Left => x + 4.0,
    };
    list.rect(hand_x, y + 22.0, 6.0, 6.0, PLAYER_HAND);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCommand;
    use crate::sim::{TickInput, catalog, tick};
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(catalog().unwrap().into(), Tuning::default(), 5);
        state.start();
        state
    }

    #[test]
    fn test_draw_is_idempotent() {
        let mut state = running();
        tick(&mut state, &TickInput::default(), 1.0);
        let a = draw(&state, state.level(), false);
        let b = draw(&state, state.level(), false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_reflects_latest_tick() {
        let mut state = running();
        let before = draw(&state, state.level(), false);
        tick(&mut state, &TickInput::default(), 1.0);
        let after = draw(&state, state.level(), false);
        assert_ne!(before, after);
    }

    #[test]
    fn test_collected_gems_are_hidden() {
        let mut state = running();
        let full = draw(&state, state.level(), true);
        state.gems[0].collected = true;
        let fewer = draw(&state, state.level(), true);
        let circles = |l: &DrawList| {
            l.commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
                .count()
        };
        assert_eq!(circles(&full), 10);
        assert_eq!(circles(&fewer), 8);
    }

    #[test]
    fn test_reduced_motion_skips_stripes() {
        let state = running();
        let full = draw(&state, state.level(), false);
        let reduced = draw(&state, state.level(), true);
        assert_eq!(full.len(), reduced.len() + 20);
    }
}
