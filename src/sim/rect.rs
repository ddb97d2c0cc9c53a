//! Axis-aligned rectangles in screen space
//!
//! Screen space has its origin at the top-left corner with y growing downward.
//! Every hitbox in the game is one of these, optionally shrunk ("inset") before
//! testing so collisions feel more forgiving than the raw sprite bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle defined by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Rectangle of the given size centered on `center`
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

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Grow (positive) or shrink (negative) by a total amount per axis, keeping
    /// the center fixed. Sizes never go below zero.
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        let w = (self.w + dw).max(0.0);
        let h = (self.h + dh).max(0.0);
        Self::from_center(self.center(), w, h)
    }

    /// Shrink symmetrically by `amount` in total on both axes
    pub fn inset(&self, amount: f32) -> Self {
        self.inflate(-amount, -amount)
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlap test against a circle
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.left(), self.right()),
            center.y.clamp(self.top(), self.bottom()),
        );
        center.distance_squared(closest) < radius * radius
    }

    /// Shift horizontally
    #[inline]
    pub fn shift_x(&mut self, dx: f32) {
        self.x += dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), 60.0, 40.0);
        assert_eq!(r.left(), 70.0);
        assert_eq!(r.right(), 130.0);
        assert_eq!(r.top(), 30.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_inset_keeps_center() {
        let r = Rect::new(0.0, 0.0, 60.0, 45.0);
        let shrunk = r.inset(15.0);
        assert_eq!(shrunk.w, 45.0);
        assert_eq!(shrunk.h, 30.0);
        assert_eq!(shrunk.center(), r.center());
    }

    #[test]
    fn test_inset_never_goes_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(30.0);
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }

    #[test]
    fn test_intersects_circle() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.intersects_circle(Vec2::new(5.0, 5.0), 1.0));
        assert!(r.intersects_circle(Vec2::new(14.0, 5.0), 5.0));
        assert!(!r.intersects_circle(Vec2::new(16.0, 5.0), 5.0));
    }
}
