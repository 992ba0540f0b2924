//! Axis-aligned rectangles in canvas space
//!
//! Canvas coordinates: origin top-left, x to the right, y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Wider than tall
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.width > self.height
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlap deeper than `tolerance` on both axes
    ///
    /// Layout math accumulates float error at shared edges; this treats
    /// rectangles that merely touch (up to the tolerance) as disjoint.
    pub fn overlaps(&self, other: &Rect, tolerance: f32) -> bool {
        self.x + tolerance < other.right()
            && self.right() > other.x + tolerance
            && self.y + tolerance < other.bottom()
            && self.bottom() > other.y + tolerance
    }

    /// Strict containment (points on the edge are outside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Grow every side by `margin`
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Closest point of the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }

    /// Euclidean distance from `p` to the rectangle (0 inside)
    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_overlaps_ignores_float_slop() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0 - 1e-5, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(!a.overlaps(&b, 1e-3));
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0), 1e-3));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let r = Rect::new(100.0, 580.0, 120.0, 20.0);
        assert!(r.contains_point(r.center()));
        assert!(!r.contains_point(Vec2::new(100.0, 590.0)));
    }

    #[test]
    fn test_distance_to_point() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(r.distance_to_point(Vec2::new(5.0, 5.0)), 0.0);
        assert!((r.distance_to_point(Vec2::new(13.0, 14.0)) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_orientation() {
        assert!(Rect::new(0.0, 0.0, 30.0, 5.0).is_horizontal());
        assert!(!Rect::new(0.0, 0.0, 5.0, 30.0).is_horizontal());
    }
}
