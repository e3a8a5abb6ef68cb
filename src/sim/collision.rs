//! Collision detection for rectangles and the ball's bounding square
//!
//! Everything in the arena collides as an axis-aligned box. The ball is never
//! tested as a true circle: its box is the square of side `2 * radius` around
//! its center.

use glam::Vec2;

use super::rect::Rect;

/// AABB overlap test. Touching edges count as overlapping.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() <= b.right() && b.left() <= a.right() && a.top() <= b.bottom() && b.top() <= a.bottom()
}

/// Bounding square of a ball
#[inline]
pub fn ball_bounds(center: Vec2, radius: f32) -> Rect {
    Rect::from_center(center, radius * 2.0, radius * 2.0)
}

/// Index of the first rectangle (in slice order) that overlaps `target`.
///
/// Resolution is first-found, not nearest: with two overlapping bricks the one
/// earlier in the list wins.
pub fn first_overlap<'a, T: 'a>(
    target: &Rect,
    items: impl IntoIterator<Item = &'a T>,
    rect_of: impl Fn(&T) -> &Rect,
) -> Option<usize> {
    items
        .into_iter()
        .position(|item| intersects(target, rect_of(item)))
}

/// Steering law for paddle bounces: horizontal velocity proportional to the
/// contact offset from paddle center, `speed` at either edge, zero at center.
#[inline]
pub fn steer_from_offset(ball_x: f32, paddle: &Rect, speed: f32) -> f32 {
    let half_width = paddle.w / 2.0;
    if half_width <= 0.0 {
        return 0.0;
    }
    speed * (ball_x - paddle.center_x()) / half_width
}
