//! Axis-aligned rectangle geometry for fighters and projectile bounds
//!
//! Screen coordinates: `min` is the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, EDGE_MARGIN, MIDLINE_X};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Square bounding box around a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            min: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
        }
    }

    /// The whole arena
    pub fn arena() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT))
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Inclusive point containment (edges count)
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    /// Overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let min = self.min.max(other.min);
        let max = self.max().min(other.max());
        Some(Rect::new(min, max - min))
    }
}

/// Horizontal band a fighter's rectangle must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Smallest allowed left edge
    pub min_x: f32,
    /// Largest allowed right edge
    pub max_x: f32,
}

impl Lane {
    /// Left partition, kept clear of the outer edge and the midline
    pub fn left_half() -> Self {
        Self {
            min_x: EDGE_MARGIN,
            max_x: MIDLINE_X - EDGE_MARGIN,
        }
    }

    /// Right partition, kept clear of the midline and the outer edge
    pub fn right_half() -> Self {
        Self {
            min_x: MIDLINE_X + EDGE_MARGIN,
            max_x: ARENA_WIDTH - EDGE_MARGIN,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Clamp a left-edge x so a body of `width` stays inside the lane
    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        x.clamp(self.min_x, (self.max_x - width).max(self.min_x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(4.0, 6.0), Vec2::new(10.0, 10.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, Vec2::new(4.0, 6.0));
        assert_eq!(i.size, Vec2::new(6.0, 4.0));

        let far = Rect::new(Vec2::new(50.0, 50.0), Vec2::ONE);
        assert!(a.intersection(&far).is_none());
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(20.0, 30.0), 5.0);
        assert_eq!(r.min, Vec2::new(15.0, 25.0));
        assert_eq!(r.center(), Vec2::new(20.0, 30.0));
        assert!(r.contains_point(Vec2::new(25.0, 35.0)));
        assert!(!r.contains_point(Vec2::new(25.1, 30.0)));
    }

    #[test]
    fn test_lanes_split_arena() {
        let left = Lane::left_half();
        let right = Lane::right_half();
        assert_eq!(left.max_x, 350.0);
        assert_eq!(right.min_x, 450.0);
        assert_eq!(left.clamp_x(300.0, 200.0), 150.0);
        assert_eq!(right.clamp_x(0.0, 200.0), 450.0);
        assert_eq!(right.clamp_x(700.0, 200.0), 550.0);
    }
}
