//! Power-up spawning and effects

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::state::{Paddle, PowerUp, PowerUpKind};
use crate::tuning::{PowerUpWeights, Tuning};

/// Decide whether a destroyed brick drops a power-up, and which one.
///
/// One draw against the summed weights decides whether anything drops; a
/// second, weighted draw picks the kind.
pub fn roll_spawn<R: Rng + ?Sized>(weights: &PowerUpWeights, rng: &mut R) -> Option<PowerUpKind> {
    let total = weights.total();
    if total <= 0.0 {
        return None;
    }
    if rng.random::<f32>() >= total.min(1.0) {
        return None;
    }
    let table = [
        weights.wide_paddle,
        weights.extra_life,
        weights.sticky_paddle,
        weights.shooting_paddle,
    ];
    let index = WeightedIndex::new(table).ok()?;
    Some(PowerUpKind::ALL[index.sample(rng)])
}

/// A power-up centered on a destroyed brick, kept clear of the side walls
pub fn spawn_at(
    kind: PowerUpKind,
    brick_center: Vec2,
    tuning: &Tuning,
    arena_width: f32,
) -> PowerUp {
    let margin = tuning.powerup_edge_margin;
    let x = brick_center.x.clamp(margin, (arena_width - margin).max(margin));
    PowerUp {
        kind,
        pos: Vec2::new(x, brick_center.y),
        size: tuning.powerup_size,
        speed: tuning.powerup_fall_speed,
    }
}

/// Apply a caught power-up. Returns the new life count.
///
/// Paddle power-ups replace whatever paddle effect was active; extra lives
/// stack without touching the paddle.
pub fn apply_effect(
    kind: PowerUpKind,
    paddle: &mut Paddle,
    lives: u32,
    now_ms: u64,
    tuning: &Tuning,
) -> u32 {
    if kind.affects_paddle() {
        paddle.reset_effects();
    }

    match kind {
        PowerUpKind::WidePaddle => {
            let width = (paddle.rect.w + tuning.wide_paddle_bonus).min(tuning.wide_paddle_max);
            // Grows around the center rather than from the left edge
            paddle.rect.set_width_centered(width);
            paddle.rect.clamp_x(crate::consts::ARENA_WIDTH);
            lives
        }
        PowerUpKind::ExtraLife => lives.saturating_add(tuning.extra_lives),
        PowerUpKind::StickyPaddle => {
            paddle.activate_sticky(now_ms, tuning.sticky_duration_ms);
            lives
        }
        PowerUpKind::ShootingPaddle => {
            paddle.activate_shooting(now_ms, tuning.shoot_cooldown_ms);
            lives
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ARENA_WIDTH;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_spawn_rate_matches_weight_total() {
        let weights = PowerUpWeights::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let trials = 100_000;
        let spawned = (0..trials)
            .filter(|_| roll_spawn(&weights, &mut rng).is_some())
            .count();
        let rate = spawned as f64 / trials as f64;
        assert!((rate - 0.40).abs() < 0.01, "spawn rate {rate}");
    }

    #[test]
    fn test_kind_distribution_follows_weights() {
        let weights = PowerUpWeights::default();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut counts: HashMap<PowerUpKind, usize> = HashMap::new();
        let mut spawned = 0usize;
        for _ in 0..200_000 {
            if let Some(kind) = roll_spawn(&weights, &mut rng) {
                *counts.entry(kind).or_default() += 1;
                spawned += 1;
            }
        }
        let share = |kind: PowerUpKind| {
            counts.get(&kind).copied().unwrap_or(0) as f64 / spawned as f64
        };
        assert!((share(PowerUpKind::WidePaddle) - 0.375).abs() < 0.01);
        assert!((share(PowerUpKind::ExtraLife) - 0.125).abs() < 0.01);
        assert!((share(PowerUpKind::StickyPaddle) - 0.25).abs() < 0.01);
        assert!((share(PowerUpKind::ShootingPaddle) - 0.25).abs() < 0.01);
    }

    #[test]
    fn test_zero_weights_never_spawn() {
        let weights = PowerUpWeights {
            wide_paddle: 0.0,
            extra_life: 0.0,
            sticky_paddle: 0.0,
            shooting_paddle: 0.0,
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..1000).all(|_| roll_spawn(&weights, &mut rng).is_none()));
    }

    #[test]
    fn test_spawn_position_clamped() {
        let tuning = Tuning::default();
        let left = spawn_at(PowerUpKind::ExtraLife, Vec2::new(5.0, 60.0), &tuning, ARENA_WIDTH);
        assert_eq!(left.pos, Vec2::new(20.0, 60.0));
        let right = spawn_at(PowerUpKind::ExtraLife, Vec2::new(798.0, 60.0), &tuning, ARENA_WIDTH);
        assert_eq!(right.pos.x, 780.0);
        let mid = spawn_at(PowerUpKind::ExtraLife, Vec2::new(400.0, 60.0), &tuning, ARENA_WIDTH);
        assert_eq!(mid.pos.x, 400.0);
    }

    #[test]
    fn test_wide_paddle_caps_width() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &tuning);
        assert_eq!(paddle.rect.w, 175.0);
        // Reset-then-apply: a second wide power-up does not stack
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &tuning);
        assert_eq!(paddle.rect.w, 175.0);

        let mut big = tuning.clone();
        big.paddle_width = 200.0;
        let mut paddle = Paddle::new(&big);
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &big);
        assert_eq!(paddle.rect.w, 250.0);
    }

    #[test]
    fn test_wide_paddle_grows_around_center() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.rect.x = 200.0;
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &tuning);
        assert_eq!(paddle.rect.center_x(), 250.0);
        assert_eq!(paddle.rect.left(), 162.5);

        // Near a wall the grown paddle is pushed back inside
        paddle.reset_effects();
        paddle.rect.set_right(ARENA_WIDTH);
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &tuning);
        assert_eq!(paddle.rect.right(), ARENA_WIDTH);
        assert_eq!(paddle.rect.w, 175.0);
    }

    #[test]
    fn test_extra_life_leaves_paddle_alone() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.activate_sticky(0, 15_000);
        let lives = apply_effect(PowerUpKind::ExtraLife, &mut paddle, 1, 100, &tuning);
        assert_eq!(lives, 3);
        assert!(paddle.sticky);
    }

    #[test]
    fn test_paddle_effects_are_exclusive() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        apply_effect(PowerUpKind::WidePaddle, &mut paddle, 3, 0, &tuning);
        apply_effect(PowerUpKind::StickyPaddle, &mut paddle, 3, 1_000, &tuning);
        assert_eq!(paddle.rect.w, tuning.paddle_width);
        assert!(paddle.sticky);
        assert_eq!(paddle.sticky_since_ms, 1_000);
        assert_eq!(paddle.sticky_duration_ms, 15_000);

        apply_effect(PowerUpKind::ShootingPaddle, &mut paddle, 3, 2_000, &tuning);
        assert!(!paddle.sticky);
        assert!(paddle.shooting);
        assert_eq!(paddle.shooting_since_ms, 2_000);
        assert_eq!(paddle.shoot_cooldown_ms, 500);
    }
}
