//! Axis-aligned rectangles for hitboxes, obstacle bodies and UI buttons
//!
//! Screen space: x grows right, y grows down, `(x, y)` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test: rectangles that only touch along an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive point test (used for button hit-testing)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_zero_height_rect_never_overlaps() {
        // A gap starting at y = 0 leaves an empty top body
        let empty = Rect::new(0.0, 0.0, 70.0, 0.0);
        let player = Rect::new(10.0, 5.0, 32.0, 28.0);
        assert!(!empty.overlaps(&player));
    }

    #[test]
    fn test_contains_inclusive() {
        let r = Rect::new(170.0, 280.0, 200.0, 180.0);
        assert!(r.contains(Vec2::new(170.0, 280.0)));
        assert!(r.contains(Vec2::new(370.0, 460.0)));
        assert!(!r.contains(Vec2::new(371.0, 300.0)));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(120.0, 300.0), 32.0, 28.0);
        assert_eq!(r, Rect::new(104.0, 286.0, 32.0, 28.0));
        assert_eq!(r.center(), Vec2::new(120.0, 300.0));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..200.0, ah in 0.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..200.0, bh in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_positive_rect_overlaps_itself(
            x in -500.0f32..500.0, y in -500.0f32..500.0, w in 0.5f32..200.0, h in 0.5f32..200.0,
        ) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.overlaps(&r));
        }
    }
}
