//! Game state and core simulation types
//!
//! Everything a round needs lives in one `GameState`, owned by whoever drives
//! `tick`. Timed effects are stamped with `time_ms()`, read off the microsecond
//! simulation clock, which only advances while the round is unpaused.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{ball_bounds, steer_from_offset};
use super::level::generate_level;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Gap between a resting ball and the paddle top, so a pinned ball never
/// counts as touching the paddle.
pub const REST_GAP: f32 = 1.0;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch input
    Ready,
    /// Ball in motion
    InPlay,
    /// Ball fell out; resolved within the same tick to Ready or GameOver
    LifeLost,
    /// Last brick destroyed; resolved within the same tick to Ready
    LevelComplete,
    /// Simulation clock frozen
    Paused,
    /// Round ended
    GameOver,
}

impl GamePhase {
    /// Phases that are passed through inside a single tick
    pub fn is_transient(&self) -> bool {
        matches!(self, GamePhase::LifeLost | GamePhase::LevelComplete)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed; launch and bounce velocities are derived from it
    pub speed: f32,
    /// False while resting on the paddle before launch
    pub started: bool,
    /// Captured by a sticky paddle
    pub stuck_to_paddle: bool,
    /// Horizontal offset from paddle center while stuck
    pub stick_offset: f32,
}

impl Ball {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
            speed,
            started: false,
            stuck_to_paddle: false,
            stick_offset: 0.0,
        }
    }

    /// Bounding square used for every collision test
    pub fn bounds(&self) -> Rect {
        ball_bounds(self.pos, self.radius)
    }

    /// Launch upward, randomly left or right
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(dir * self.speed, -self.speed);
        self.started = true;
        self.stuck_to_paddle = false;
    }

    /// Move one tick and bounce off the side and top walls.
    ///
    /// There is no bottom wall: falling out is detected by the tick.
    pub fn advance(&mut self, arena_width: f32) {
        if self.stuck_to_paddle {
            return;
        }
        self.pos += self.vel;

        let r = self.radius;
        if self.pos.x - r <= 0.0 || self.pos.x + r >= arena_width {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(r, (arena_width - r).max(r));
        }
        if self.pos.y - r <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = r;
        }
    }

    /// Put the ball back on the paddle, unlaunched
    pub fn rest_on(&mut self, paddle: &Rect) {
        self.started = false;
        self.stuck_to_paddle = false;
        self.stick_offset = 0.0;
        self.vel = Vec2::ZERO;
        self.pos = Vec2::new(paddle.center_x(), paddle.top() - self.radius - REST_GAP);
    }

    /// Capture on a sticky paddle, remembering where along the paddle it landed
    pub fn stick_to(&mut self, paddle: &Rect) {
        self.stuck_to_paddle = true;
        self.vel = Vec2::ZERO;
        self.stick_offset = self.pos.x - paddle.center_x();
        self.follow(paddle);
    }

    /// Track the paddle while stuck
    pub fn follow(&mut self, paddle: &Rect) {
        self.pos = Vec2::new(
            paddle.center_x() + self.stick_offset,
            paddle.top() - self.radius - REST_GAP,
        );
    }

    /// Leave a sticky paddle, steered by where the ball sits on it
    pub fn release(&mut self, paddle: &Rect) {
        self.stuck_to_paddle = false;
        self.started = true;
        self.vel = Vec2::new(steer_from_offset(self.pos.x, paddle, self.speed), -self.speed.abs());
    }
}

/// A bullet fired by a shooting paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: f32,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.rect.y -= self.speed;
    }

    pub fn is_off_top(&self) -> bool {
        self.rect.bottom() < 0.0
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: f32,
    pub original_width: f32,

    pub sticky: bool,
    pub sticky_since_ms: u64,
    pub sticky_duration_ms: u64,

    pub shooting: bool,
    pub shooting_since_ms: u64,
    pub shoot_cooldown_ms: u64,
    pub last_shot_ms: Option<u64>,

    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
}

impl Paddle {
    /// Paddle centered at the bottom of the arena
    pub fn new(tuning: &Tuning) -> Self {
        let rect = Rect::new(
            (ARENA_WIDTH - tuning.paddle_width) / 2.0,
            ARENA_HEIGHT - tuning.paddle_bottom_offset,
            tuning.paddle_width,
            tuning.paddle_height,
        );
        Self {
            rect,
            speed: tuning.paddle_speed,
            original_width: tuning.paddle_width,
            sticky: false,
            sticky_since_ms: 0,
            sticky_duration_ms: tuning.sticky_duration_ms,
            shooting: false,
            shooting_since_ms: 0,
            shoot_cooldown_ms: tuning.shoot_cooldown_ms,
            last_shot_ms: None,
            bullets: Vec::new(),
        }
    }

    /// Apply left/right input; both keys held cancel out
    pub fn advance(&mut self, left: bool, right: bool, arena_width: f32) {
        if left {
            self.rect.x -= self.speed;
        }
        if right {
            self.rect.x += self.speed;
        }
        self.rect.clamp_x(arena_width);
    }

    /// Move back to the arena center
    pub fn recenter(&mut self, arena_width: f32) {
        self.rect.x = (arena_width - self.rect.w) / 2.0;
    }

    /// Drop every active effect and restore the original width
    pub fn reset_effects(&mut self) {
        self.rect.set_width_centered(self.original_width);
        self.rect.clamp_x(ARENA_WIDTH);
        self.sticky = false;
        self.shooting = false;
        self.last_shot_ms = None;
        self.bullets.clear();
    }

    pub fn activate_sticky(&mut self, now_ms: u64, duration_ms: u64) {
        self.sticky = true;
        self.sticky_since_ms = now_ms;
        self.sticky_duration_ms = duration_ms;
    }

    pub fn activate_shooting(&mut self, now_ms: u64, cooldown_ms: u64) {
        self.shooting = true;
        self.shooting_since_ms = now_ms;
        self.shoot_cooldown_ms = cooldown_ms;
        self.last_shot_ms = None;
    }

    /// Expire timed effects. Returns true if sticky ran out this call.
    pub fn expire_effects(&mut self, now_ms: u64, shooting_duration_ms: u64) -> bool {
        let mut sticky_expired = false;
        if self.sticky && now_ms.saturating_sub(self.sticky_since_ms) >= self.sticky_duration_ms {
            self.sticky = false;
            sticky_expired = true;
        }
        if self.shooting && now_ms.saturating_sub(self.shooting_since_ms) >= shooting_duration_ms {
            self.shooting = false;
            self.last_shot_ms = None;
            self.bullets.clear();
        }
        sticky_expired
    }

    pub fn sticky_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.sticky
            .then(|| (self.sticky_since_ms + self.sticky_duration_ms).saturating_sub(now_ms))
    }

    pub fn shooting_remaining_ms(&self, now_ms: u64, shooting_duration_ms: u64) -> Option<u64> {
        self.shooting
            .then(|| (self.shooting_since_ms + shooting_duration_ms).saturating_sub(now_ms))
    }

    /// Fire from the paddle's top-center if the cooldown has elapsed and
    /// there is room for another bullet. Returns true if a bullet was spawned.
    pub fn try_fire(&mut self, now_ms: u64, tuning: &Tuning) -> bool {
        if !self.shooting || self.bullets.len() >= tuning.max_bullets {
            return false;
        }
        let cooling_down = self
            .last_shot_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.shoot_cooldown_ms);
        if cooling_down {
            return false;
        }
        let rect = Rect::new(
            self.rect.center_x() - tuning.bullet_width / 2.0,
            self.rect.top() - tuning.bullet_height,
            tuning.bullet_width,
            tuning.bullet_height,
        );
        self.bullets.push(Bullet {
            rect,
            speed: tuning.bullet_speed,
        });
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Move bullets up and drop the ones that left the arena
    pub fn advance_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| !b.is_off_top());
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Takes two hits
    Tough,
}

/// Display colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Red,
    Green,
    Blue,
}

/// A brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub kind: BrickKind,
    pub hits: u8,
    /// Color picked at creation; only Normal bricks show it
    pub base_color: BrickColor,
}

impl Brick {
    pub fn new(rect: Rect, kind: BrickKind, base_color: BrickColor) -> Self {
        Self {
            rect,
            kind,
            hits: 0,
            base_color,
        }
    }

    pub fn hits_required(&self) -> u8 {
        match self.kind {
            BrickKind::Normal => 1,
            BrickKind::Tough => 2,
        }
    }

    /// Count a hit. Returns true once the brick should be destroyed.
    pub fn register_hit(&mut self) -> bool {
        self.hits = self.hits.saturating_add(1);
        self.hits >= self.hits_required()
    }

    pub fn color(&self) -> BrickColor {
        match self.kind {
            BrickKind::Tough if self.hits == 0 => BrickColor::Blue,
            BrickKind::Tough => BrickColor::Green,
            BrickKind::Normal => self.base_color,
        }
    }

    pub fn points(&self, tuning: &Tuning) -> u64 {
        match self.kind {
            BrickKind::Normal => tuning.normal_points,
            BrickKind::Tough => tuning.tough_points,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    WidePaddle,
    ExtraLife,
    StickyPaddle,
    ShootingPaddle,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::WidePaddle,
        PowerUpKind::ExtraLife,
        PowerUpKind::StickyPaddle,
        PowerUpKind::ShootingPaddle,
    ];

    /// Kinds that change the paddle (and so reset its other effects)
    pub fn affects_paddle(&self) -> bool {
        !matches!(self, PowerUpKind::ExtraLife)
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Center
    pub pos: Vec2,
    pub size: f32,
    /// Pixels per tick, downward
    pub speed: f32,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn is_below(&self, arena_height: f32) -> bool {
        self.rect().top() > arena_height
    }
}

/// Things that happened during a tick, for audio, persistence and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    BallLaunched,
    BallCaught,
    BallReleased,
    BrickHit { kind: BrickKind, destroyed: bool },
    PowerUpSpawned(PowerUpKind),
    PowerUpCaught(PowerUpKind),
    LifeLost { lives_left: u32 },
    LevelComplete { level: u32 },
    GameOver { score: u64, level: u32 },
    Paused,
    Resumed,
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation clock (microseconds); frozen while paused
    pub time_us: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks in generation order
    pub bricks: Vec<Brick>,
    /// Falling power-ups in spawn order
    pub powerups: Vec<PowerUp>,
    /// Fire input seen on the previous tick (for press detection)
    pub fire_was_held: bool,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New round with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// New round: level 1, full lives, ball resting on a centered paddle
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&tuning);
        let mut ball = Ball::new(tuning.ball_radius, tuning.ball_speed);
        ball.rest_on(&paddle.rect);
        let bricks = generate_level(1, &tuning, &mut rng);

        log::info!("New round (seed {}), {} bricks", seed, bricks.len());

        Self {
            seed,
            rng,
            lives: tuning.starting_lives,
            tuning,
            time_us: 0,
            phase: GamePhase::Ready,
            score: 0,
            level: 1,
            paddle,
            ball,
            bricks,
            powerups: Vec::new(),
            fire_was_held: false,
            events: vec![GameEvent::LevelStarted { level: 1 }],
        }
    }

    /// Simulation clock in whole milliseconds
    pub fn time_ms(&self) -> u64 {
        self.time_us / 1_000
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events accumulated so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rest the ball on the paddle, unlaunched
    pub fn reset_ball(&mut self) {
        self.ball.rest_on(&self.paddle.rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_phases() {
        assert!(GamePhase::LifeLost.is_transient());
        assert!(GamePhase::LevelComplete.is_transient());
        for phase in [
            GamePhase::Ready,
            GamePhase::InPlay,
            GamePhase::Paused,
            GamePhase::GameOver,
        ] {
            assert!(!phase.is_transient(), "{phase:?}");
        }
    }

    #[test]
    fn test_new_round_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.bricks.len(), 50);
        assert!(!state.ball.started);
        assert_eq!(state.events, vec![GameEvent::LevelStarted { level: 1 }]);
    }

    #[test]
    fn test_brick_hits_required() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut normal = Brick::new(rect, BrickKind::Normal, BrickColor::Red);
        assert!(normal.register_hit());

        let mut tough = Brick::new(rect, BrickKind::Tough, BrickColor::Red);
        assert_eq!(tough.color(), BrickColor::Blue);
        assert!(!tough.register_hit());
        assert_eq!(tough.hits, 1);
        assert_eq!(tough.color(), BrickColor::Green);
        assert!(tough.register_hit());
    }

    #[test]
    fn test_normal_brick_keeps_base_color() {
        let mut brick = Brick::new(Rect::default(), BrickKind::Normal, BrickColor::Red);
        assert_eq!(brick.color(), BrickColor::Red);
        brick.hits = 1;
        assert_eq!(brick.color(), BrickColor::Red);
    }

    #[test]
    fn test_ball_launch_direction() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..20 {
            let mut ball = Ball::new(8.0, 5.0);
            ball.launch(&mut rng);
            assert!(ball.started);
            assert_eq!(ball.vel.y, -5.0);
            assert_eq!(ball.vel.x.abs(), 5.0);
        }
    }

    #[test]
    fn test_ball_bounces_side_and_top_only() {
        let mut ball = Ball::new(8.0, 5.0);
        ball.pos = Vec2::new(795.0, 300.0);
        ball.vel = Vec2::new(5.0, 5.0);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.vel.x, -5.0);
        assert_eq!(ball.vel.y, 5.0);

        ball.pos = Vec2::new(400.0, 10.0);
        ball.vel = Vec2::new(0.0, -5.0);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.vel.y, 5.0);

        // Nothing stops it at the bottom
        ball.pos = Vec2::new(400.0, 598.0);
        ball.vel = Vec2::new(0.0, 5.0);
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.vel.y, 5.0);
        assert_eq!(ball.pos.y, 603.0);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let paddle = Paddle::new(&Tuning::default());
        let mut ball = Ball::new(8.0, 5.0);
        ball.pos = Vec2::new(420.0, 560.0);
        ball.vel = Vec2::new(3.0, 5.0);
        ball.stick_to(&paddle.rect);
        assert_eq!(ball.vel, Vec2::ZERO);
        let before = ball.pos;
        ball.advance(ARENA_WIDTH);
        assert_eq!(ball.pos, before);
        assert!((ball.stick_offset - 20.0).abs() < 1e-5);
    }

    #[test]
    fn test_release_uses_steering() {
        let paddle = Paddle::new(&Tuning::default());
        let mut ball = Ball::new(8.0, 5.0);
        ball.pos = Vec2::new(paddle.rect.center_x() + 25.0, 560.0);
        ball.stick_to(&paddle.rect);
        ball.release(&paddle.rect);
        assert!(!ball.stuck_to_paddle);
        assert!((ball.vel.x - 2.5).abs() < 1e-5);
        assert_eq!(ball.vel.y, -5.0);
    }

    #[test]
    fn test_paddle_clamped() {
        let mut paddle = Paddle::new(&Tuning::default());
        for _ in 0..200 {
            paddle.advance(true, false, ARENA_WIDTH);
        }
        assert_eq!(paddle.rect.left(), 0.0);
        for _ in 0..200 {
            paddle.advance(false, true, ARENA_WIDTH);
        }
        assert_eq!(paddle.rect.right(), ARENA_WIDTH);
    }

    #[test]
    fn test_sticky_expiry() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.activate_sticky(1_000, 15_000);
        assert!(!paddle.expire_effects(15_999, 7_000));
        assert_eq!(paddle.sticky_remaining_ms(15_999), Some(1));
        assert!(paddle.expire_effects(16_000, 7_000));
        assert!(!paddle.sticky);
        assert_eq!(paddle.sticky_remaining_ms(16_000), None);
    }

    #[test]
    fn test_shooting_expiry_clears_bullets() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.activate_shooting(0, 500);
        assert!(paddle.try_fire(0, &tuning));
        assert_eq!(paddle.bullets.len(), 1);
        paddle.expire_effects(7_000, tuning.shooting_duration_ms);
        assert!(!paddle.shooting);
        assert!(paddle.bullets.is_empty());
    }

    #[test]
    fn test_fire_cooldown_and_cap() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        assert!(!paddle.try_fire(0, &tuning), "not shooting yet");

        paddle.activate_shooting(0, 500);
        assert!(paddle.try_fire(0, &tuning));
        assert!(!paddle.try_fire(499, &tuning));
        assert!(paddle.try_fire(500, &tuning));
        assert!(paddle.try_fire(1_000, &tuning));
        assert_eq!(paddle.bullets.len(), 3);
        assert!(!paddle.try_fire(5_000, &tuning), "three bullets already live");

        let first = &paddle.bullets[0];
        assert_eq!(first.rect.center_x(), paddle.rect.center_x());
        assert_eq!(first.rect.bottom(), paddle.rect.top());
    }

    #[test]
    fn test_bullets_leave_top() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.activate_shooting(0, 500);
        paddle.try_fire(0, &tuning);
        for _ in 0..100 {
            paddle.advance_bullets();
        }
        assert!(paddle.bullets.is_empty());
    }

    #[test]
    fn test_reset_effects() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.rect.set_width_centered(175.0);
        paddle.activate_shooting(0, 500);
        paddle.try_fire(0, &tuning);
        paddle.activate_sticky(0, 15_000);
        paddle.reset_effects();
        assert_eq!(paddle.rect.w, tuning.paddle_width);
        assert!(!paddle.sticky && !paddle.shooting);
        assert!(paddle.bullets.is_empty());
    }
}
