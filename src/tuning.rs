//! Data-driven game balance
//!
//! Every gameplay number lives here so a settings file can rebalance the game
//! without touching the simulation. Distances are pixels, speeds are pixels per
//! tick, durations are milliseconds of simulation time.

use serde::{Deserialize, Serialize};

/// Relative spawn weights for each power-up kind.
///
/// The sum is also the chance that a destroyed brick drops anything at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpWeights {
    pub wide_paddle: f32,
    pub extra_life: f32,
    pub sticky_paddle: f32,
    pub shooting_paddle: f32,
}

impl Default for PowerUpWeights {
    fn default() -> Self {
        Self {
            wide_paddle: 0.15,
            extra_life: 0.05,
            sticky_paddle: 0.10,
            shooting_paddle: 0.10,
        }
    }
}

impl PowerUpWeights {
    pub fn total(&self) -> f32 {
        self.wide_paddle + self.extra_life + self.sticky_paddle + self.shooting_paddle
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Distance from the arena bottom to the paddle top
    pub paddle_bottom_offset: f32,
    pub wide_paddle_bonus: f32,
    pub wide_paddle_max: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    /// Added to the ball speed each time a level is cleared
    pub ball_speed_per_level: f32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_spacing: f32,
    pub brick_height: f32,
    pub brick_top: f32,
    pub tough_chance_base: f64,
    pub tough_chance_per_level: f64,
    pub tough_chance_max: f64,
    pub normal_points: u64,
    pub tough_points: u64,

    // === Power-ups ===
    pub powerup_weights: PowerUpWeights,
    pub powerup_size: f32,
    pub powerup_fall_speed: f32,
    pub powerup_edge_margin: f32,
    pub extra_lives: u32,
    pub sticky_duration_ms: u64,
    pub shooting_duration_ms: u64,
    pub shoot_cooldown_ms: u64,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub max_bullets: usize,

    // === Round ===
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width: 100.0,
            paddle_height: 10.0,
            paddle_speed: 7.0,
            paddle_bottom_offset: 30.0,
            wide_paddle_bonus: 75.0,
            wide_paddle_max: 250.0,

            ball_radius: 8.0,
            ball_speed: 5.0,
            ball_speed_per_level: 0.5,

            brick_rows: 5,
            brick_cols: 10,
            brick_spacing: 5.0,
            brick_height: 20.0,
            brick_top: 50.0,
            tough_chance_base: 0.10,
            tough_chance_per_level: 0.05,
            tough_chance_max: 0.40,
            normal_points: 10,
            tough_points: 20,

            powerup_weights: PowerUpWeights::default(),
            powerup_size: 20.0,
            powerup_fall_speed: 3.0,
            powerup_edge_margin: 20.0,
            extra_lives: 2,
            sticky_duration_ms: 15_000,
            shooting_duration_ms: 7_000,
            shoot_cooldown_ms: 500,

            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 8.0,
            max_bullets: 3,

            starting_lives: 3,
        }
    }
}

impl Tuning {
    /// Chance that a non-top-row brick is Tough on the given level
    pub fn tough_chance(&self, level: u32) -> f64 {
        (self.tough_chance_base + self.tough_chance_per_level * level as f64)
            .min(self.tough_chance_max)
    }
}
