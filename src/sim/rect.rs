//! Axis-aligned rectangle geometry for paddle, bricks, bullets and power-ups
//!
//! Screen coordinates: x grows right, y grows down, origin at the arena's
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on a point
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.h / 2.0)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    /// Change width while keeping the center fixed
    pub fn set_width_centered(&mut self, w: f32) {
        let cx = self.center_x();
        self.w = w;
        self.x = cx - w / 2.0;
    }

    /// Clamp horizontally into `[0, width]`, left edge first then right
    pub fn clamp_x(&mut self, width: f32) {
        if self.left() < 0.0 {
            self.set_left(0.0);
        }
        if self.right() > width {
            self.set_right(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 10.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 30.0);
        assert_eq!(r.center(), Vec2::new(60.0, 25.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(r, Rect::new(40.0, 45.0, 20.0, 10.0));
    }

    #[test]
    fn test_set_width_centered() {
        let mut r = Rect::new(350.0, 570.0, 100.0, 10.0);
        r.set_width_centered(175.0);
        assert_eq!(r.center_x(), 400.0);
        assert_eq!(r.w, 175.0);
    }

    #[test]
    fn test_clamp_x_left_then_right() {
        let mut r = Rect::new(-15.0, 0.0, 100.0, 10.0);
        r.clamp_x(800.0);
        assert_eq!(r.left(), 0.0);

        let mut r = Rect::new(750.0, 0.0, 100.0, 10.0);
        r.clamp_x(800.0);
        assert_eq!(r.right(), 800.0);

        // Wider than the arena: the right clamp runs last and wins
        let mut r = Rect::new(-10.0, 0.0, 900.0, 10.0);
        r.clamp_x(800.0);
        assert_eq!(r.right(), 800.0);
    }
}
