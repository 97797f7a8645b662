//! Axis-aligned bounding box collision
//!
//! Everything in the lane is a rectangle in screen space (y grows downward),
//! so a single overlap test covers player vs obstacle and player vs pickup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Anything that occupies a rectangle in the world
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict overlap test. Touching edges do not count, so a zero-area
/// rectangle never intersects itself or a rectangle it only touches.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Overlap test between any two bounded entities
#[inline]
pub fn overlaps(a: &impl Bounds, b: &impl Bounds) -> bool {
    intersects(&a.bounds(), &b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_hits_spike() {
        let player = Rect::new(50.0, 320.0, 60.0, 80.0);
        let spike = Rect::new(80.0, 320.0, 40.0, 30.0);
        assert!(intersects(&player, &spike));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_degenerate_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let flat = Rect::new(50.0, 50.0, 0.0, 10.0);
        let point = Rect::new(50.0, 50.0, 0.0, 0.0);
        let on_edge = Rect::new(100.0, 20.0, 0.0, 10.0);

        // Strictly inside a positive rect still counts
        assert!(intersects(&a, &flat));
        assert!(intersects(&a, &point));

        assert!(!intersects(&a, &on_edge));
        assert!(!intersects(&flat, &flat));
        assert!(!intersects(&point, &point));
    }

    #[test]
    fn test_bird_passes_over_grounded_player() {
        let player = Rect::new(50.0, 320.0, 60.0, 80.0);
        let bird = Rect::new(60.0, 250.0, 50.0, 30.0);
        assert!(!intersects(&player, &bird));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersects_is_commutative(a in rect(), b in rect()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn positive_area_rect_intersects_itself(x in -500.0f32..500.0, y in -500.0f32..500.0,
                                                w in 0.5f32..200.0, h in 0.5f32..200.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(intersects(&r, &r));
        }
    }
}
