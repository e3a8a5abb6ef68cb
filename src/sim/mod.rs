//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (generation order for bricks, spawn order for power-ups)
//! - No rendering, audio or file access

pub mod collision;
pub mod level;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ball_bounds, first_overlap, intersects, steer_from_offset};
pub use level::generate_level;
pub use powerup::{apply_effect, roll_spawn, spawn_at};
pub use rect::Rect;
pub use state::{
    Ball, Brick, BrickColor, BrickKind, Bullet, GameEvent, GamePhase, GameState, Paddle, PowerUp,
    PowerUpKind, REST_GAP,
};
pub use tick::{TickInput, resume, tick};
