//! Renderer interface
//!
//! The core hands a `Frame` to the renderer once per tick. Renderers only
//! read it; nothing they do feeds back into the simulation.

use serde::Serialize;

use crate::sim::{BrickColor, BrickKind, GamePhase, GameState, PowerUpKind, Rect};

// ============================================================================
// FRAME DATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PaddleView {
    pub rect: Rect,
    pub sticky: bool,
    pub shooting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub pos: [f32; 2],
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickView {
    pub rect: Rect,
    pub kind: BrickKind,
    pub hits: u8,
    pub color: BrickColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: [f32; 2],
    pub size: f32,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
}

/// Remaining time of active paddle effects, None when inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusEffects {
    pub sticky_ms: Option<u64>,
    pub shooting_ms: Option<u64>,
}

/// Everything a renderer needs for one frame, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Simulation clock at capture
    pub time_ms: u64,
    pub phase: GamePhase,
    pub paddle: PaddleView,
    pub ball: BallView,
    pub bricks: Vec<BrickView>,
    pub powerups: Vec<PowerUpView>,
    pub bullets: Vec<Rect>,
    pub hud: Hud,
    pub effects: StatusEffects,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let now = state.time_ms();
        let paddle = &state.paddle;

        Self {
            time_ms: now,
            phase: state.phase,
            paddle: PaddleView {
                rect: paddle.rect,
                sticky: paddle.sticky,
                shooting: paddle.shooting,
            },
            ball: BallView {
                pos: state.ball.pos.to_array(),
                radius: state.ball.radius,
            },
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    rect: b.rect,
                    kind: b.kind,
                    hits: b.hits,
                    color: b.color(),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos.to_array(),
                    size: p.size,
                    kind: p.kind,
                })
                .collect(),
            bullets: paddle.bullets.iter().map(|b| b.rect).collect(),
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
            },
            effects: StatusEffects {
                sticky_ms: paddle.sticky_remaining_ms(now),
                shooting_ms: paddle.shooting_remaining_ms(now, state.tuning.shooting_duration_ms),
            },
        }
    }
}

/// Passive frame consumer
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}
