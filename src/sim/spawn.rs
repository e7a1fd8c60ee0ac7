//! Stone spawning

use glam::Vec2;
use rand::Rng;

use super::state::{Session, Stone};
use super::style::style_for_level;
use crate::consts::*;

/// Roll one stone and append it to the session, fully above the visible
/// area (its center starts one edge-length over the top).
pub fn spawn_stone(session: &mut Session) {
    let palette = style_for_level(session.level).palette;
    let color = palette[session.rng.random_range(0..palette.len())];

    let size = session
        .rng
        .random_range(session.width * STONE_MIN_FRAC..=session.width * STONE_MAX_FRAC);
    // x so the full width fits on screen
    let x = session.rng.random_range(size / 2.0..=session.width - size / 2.0);
    let vx = session.rng.random_range(-STONE_DRIFT..=STONE_DRIFT);
    let vy = session.rng.random_range(STONE_FALL_MIN..=STONE_FALL_MAX);
    let rotation = session.rng.random_range(-0.5f32..=0.5);

    session.stones.push(Stone {
        pos: Vec2::new(x, -size),
        size,
        color,
        vel: Vec2::new(vx, vy),
        rotation,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_stones_stay_in_bounds() {
        let mut session = Session::begin(1, 1000.0, 1500.0, 99);
        for _ in 0..200 {
            spawn_stone(&mut session);
        }
        for stone in &session.stones {
            assert!(stone.size >= 1000.0 * STONE_MIN_FRAC);
            assert!(stone.size <= 1000.0 * STONE_MAX_FRAC);
            // Full width fits on screen
            assert!(stone.pos.x - stone.half() >= 0.0);
            assert!(stone.pos.x + stone.half() <= 1000.0);
            // Fully above view
            assert_eq!(stone.pos.y, -stone.size);
            assert!(stone.vel.x >= -STONE_DRIFT && stone.vel.x <= STONE_DRIFT);
            assert!(stone.vel.y >= STONE_FALL_MIN && stone.vel.y <= STONE_FALL_MAX);
            assert!(stone.rotation >= -0.5 && stone.rotation <= 0.5);
        }
    }

    #[test]
    fn spawn_colors_come_from_the_level_palette() {
        let mut session = Session::begin(2, 500.0, 750.0, 3);
        let palette = style_for_level(2).palette;
        for _ in 0..50 {
            spawn_stone(&mut session);
        }
        assert!(session.stones.iter().all(|s| palette.contains(&s.color)));
    }

    #[test]
    fn same_seed_spawns_identically() {
        let mut a = Session::begin(1, 800.0, 1200.0, 1234);
        let mut b = Session::begin(1, 800.0, 1200.0, 1234);
        for _ in 0..20 {
            spawn_stone(&mut a);
            spawn_stone(&mut b);
        }
        for (sa, sb) in a.stones.iter().zip(&b.stones) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.size, sb.size);
            assert_eq!(sa.color, sb.color);
            assert_eq!(sa.vel, sb.vel);
        }
    }
}
