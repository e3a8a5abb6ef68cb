//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Step order matters and is part of the game's
//! behavior: power-ups are caught before the ball moves, the paddle is tested
//! before bricks, the ball before bullets, life loss before level completion.

use std::cmp::Ordering;

use super::collision::{first_overlap, intersects, steer_from_offset};
use super::level::generate_level;
use super::powerup::{apply_effect, roll_spawn, spawn_at};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick, sampled as held/not-held
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Launch a resting ball, release a stuck one, or fire bullets
    pub launch_or_fire: bool,
    /// Pause toggle (edge-triggered by the caller)
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the round by one tick of `dt_us` simulation microseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_us: u64) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Ready | GamePhase::InPlay => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => resume(state),
            _ => {}
        }
    }

    // Don't tick if paused or game over; the clock stays frozen
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };
    let fire_pressed = input.launch_or_fire && !state.fire_was_held;
    state.fire_was_held = input.launch_or_fire;

    state.time_us += dt_us;
    let now = state.time_ms();

    // Paddle movement, effect timers, bullets
    state
        .paddle
        .advance(input.move_left, input.move_right, ARENA_WIDTH);
    let sticky_expired = state
        .paddle
        .expire_effects(now, state.tuning.shooting_duration_ms);
    if input.launch_or_fire && state.phase == GamePhase::InPlay {
        state.paddle.try_fire(now, &state.tuning);
    }
    state.paddle.advance_bullets();

    // Power-ups fall; catching one applies before the ball moves
    update_powerups(state, now);

    // A stuck ball leaves when sticky runs out (or was replaced) or on a fresh press
    let sticky_gone = sticky_expired || !state.paddle.sticky;
    if state.ball.stuck_to_paddle && (sticky_gone || fire_pressed) {
        state.ball.follow(&state.paddle.rect);
        state.ball.release(&state.paddle.rect);
        state.events.push(GameEvent::BallReleased);
    }

    match state.phase {
        GamePhase::Ready => {
            state.reset_ball();
            if input.launch_or_fire {
                state.ball.launch(&mut state.rng);
                state.phase = GamePhase::InPlay;
                state.events.push(GameEvent::BallLaunched);
            }
        }
        GamePhase::InPlay => {
            if state.ball.stuck_to_paddle {
                state.ball.follow(&state.paddle.rect);
            } else {
                state.ball.advance(ARENA_WIDTH);
            }
        }
        _ => {}
    }

    if state.phase == GamePhase::InPlay {
        resolve_ball_paddle(state);
        resolve_ball_bricks(state);
    }
    resolve_bullet_bricks(state);

    // Ball fell out of the arena
    if state.phase == GamePhase::InPlay && state.ball.pos.y - state.ball.radius > ARENA_HEIGHT {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        state.phase = GamePhase::LifeLost;
        settle_transient(state);
    }

    // Level cleared
    if state.phase != GamePhase::GameOver && state.bricks.is_empty() {
        state.phase = GamePhase::LevelComplete;
        settle_transient(state);
    }
}

/// Leave pause, back to whatever the ball was doing
pub fn resume(state: &mut GameState) {
    if state.phase != GamePhase::Paused {
        return;
    }
    state.phase = if state.ball.started {
        GamePhase::InPlay
    } else {
        GamePhase::Ready
    };
    state.events.push(GameEvent::Resumed);
}

/// Resolve LifeLost / LevelComplete into the next stable phase
fn settle_transient(state: &mut GameState) {
    if !state.phase.is_transient() {
        return;
    }
    match state.phase {
        GamePhase::LifeLost => {
            if state.lives == 0 {
                state.phase = GamePhase::GameOver;
                log::info!("Game over: score {}, level {}", state.score, state.level);
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    level: state.level,
                });
            } else {
                state.paddle.reset_effects();
                state.paddle.recenter(ARENA_WIDTH);
                state.reset_ball();
                state.phase = GamePhase::Ready;
                log::info!("Life lost, {} left", state.lives);
            }
        }
        GamePhase::LevelComplete => {
            let completed = state.level;
            state.level += 1;
            state.ball.speed += state.tuning.ball_speed_per_level;
            state.bricks = generate_level(state.level, &state.tuning, &mut state.rng);
            state.reset_ball();
            state.phase = GamePhase::Ready;
            log::info!(
                "Level {} complete, starting level {} (ball speed {:.1})",
                completed,
                state.level,
                state.ball.speed
            );
            state.events.push(GameEvent::LevelComplete { level: completed });
            state.events.push(GameEvent::LevelStarted { level: state.level });
        }
        _ => {}
    }
}

fn update_powerups(state: &mut GameState, now: u64) {
    let paddle_rect = state.paddle.rect;
    let mut caught = Vec::new();
    state.powerups.retain_mut(|powerup| {
        powerup.advance();
        if powerup.is_below(ARENA_HEIGHT) {
            false
        } else if intersects(&powerup.rect(), &paddle_rect) {
            caught.push(powerup.kind);
            false
        } else {
            true
        }
    });

    for kind in caught {
        state.lives = apply_effect(
            kind,
            &mut state.paddle,
            state.lives,
            now,
            &state.tuning,
        );
        log::debug!("Caught {:?} (lives {})", kind, state.lives);
        state.events.push(GameEvent::PowerUpCaught(kind));
    }
}

fn resolve_ball_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;
    if ball.stuck_to_paddle || !intersects(&ball.bounds(), &paddle.rect) {
        return;
    }

    if paddle.sticky {
        ball.stick_to(&paddle.rect);
        state.events.push(GameEvent::BallCaught);
    } else {
        ball.vel.y = -ball.vel.y.abs();
        ball.vel.x = steer_from_offset(ball.pos.x, &paddle.rect, ball.speed);
    }
}

fn resolve_ball_bricks(state: &mut GameState) {
    let bounds = state.ball.bounds();
    if let Some(index) = first_overlap(&bounds, &state.bricks, |b| &b.rect) {
        hit_brick(state, index);
        state.ball.vel.y = -state.ball.vel.y;
    }
}

fn resolve_bullet_bricks(state: &mut GameState) {
    let mut i = 0;
    while i < state.paddle.bullets.len() {
        let bounds = state.paddle.bullets[i].rect;
        match first_overlap(&bounds, &state.bricks, |b| &b.rect) {
            Some(index) => {
                state.paddle.bullets.remove(i);
                hit_brick(state, index);
            }
            None => i += 1,
        }
    }
}

/// Register a hit on `state.bricks[index]`, scoring and maybe dropping a
/// power-up if it breaks. Returns true if the brick was destroyed.
fn hit_brick(state: &mut GameState, index: usize) -> bool {
    let brick = &mut state.bricks[index];
    let destroyed = brick.register_hit();
    let kind = brick.kind;

    if destroyed {
        let brick = state.bricks.remove(index);
        state.score += brick.points(&state.tuning);
        if let Some(dropped) = roll_spawn(&state.tuning.powerup_weights, &mut state.rng) {
            let powerup = spawn_at(dropped, brick.rect.center(), &state.tuning, ARENA_WIDTH);
            log::debug!(
                "{:?} dropped at ({:.0}, {:.0})",
                dropped,
                powerup.pos.x,
                powerup.pos.y
            );
            state.powerups.push(powerup);
            state.events.push(GameEvent::PowerUpSpawned(dropped));
        }
    }

    state.events.push(GameEvent::BrickHit { kind, destroyed });
    destroyed
}

/// Demo player: chases power-ups while the ball is safely high, otherwise
/// keeps the paddle under the ball with a slow wobble so bounces vary.
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let paddle = &state.paddle.rect;
    let ball = &state.ball;

    // Alternate the button so every other tick is a fresh press
    input.launch_or_fire = !state.fire_was_held;

    let ball_safe = ball.vel.y < 0.0 && ball.pos.y < ARENA_HEIGHT / 2.0;
    let lowest_powerup = state
        .powerups
        .iter()
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal));

    let target_x = match lowest_powerup {
        Some(powerup) if ball_safe || !ball.started => powerup.pos.x,
        _ => {
            let time_factor = state.time_ms() as f32 * 0.001;
            let wobble = time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15;
            ball.pos.x + wobble * paddle.w * 0.5
        }
    };

    let dead_zone = state.paddle.speed;
    input.move_left = target_x < paddle.center_x() - dead_zone;
    input.move_right = target_x > paddle.center_x() + dead_zone;
    input
}
