// src/geometry.rs

//! Unit-space geometry for the chaos game.
//!
//! The attractor lives in the unit square: the base triangle has vertices
//! `(0,0)`, `(1,0)` and `(0,1)`, and each contraction map moves a point
//! halfway toward one of them. Pixel mapping stretches `[0,1]` over the full
//! frame, clamping anything that strays outside.

use glam::{Affine2, Mat2, Vec2};
use std::ops::RangeInclusive;

/// Fraction of the distance to the chosen vertex covered by one move.
pub const CONTRACTION: f32 = 0.5;

/// A triangle in unit space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    /// The right triangle spanning the lower-left half of the unit square.
    pub const UNIT: Triangle = Triangle {
        a: Vec2::new(0.0, 0.0),
        b: Vec2::new(1.0, 0.0),
        c: Vec2::new(0.0, 1.0),
    };

    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns true if `point` lies inside the triangle or within `tolerance`
    /// of it, measured in barycentric weight.
    pub fn contains(&self, point: Vec2, tolerance: f32) -> bool {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let ap = point - self.a;

        let area = ab.perp_dot(ac);
        if area == 0.0 {
            return false;
        }

        let wb = ap.perp_dot(ac) / area;
        let wc = ab.perp_dot(ap) / area;
        let wa = 1.0 - wb - wc;

        wa >= -tolerance && wb >= -tolerance && wc >= -tolerance
    }
}

/// The three contraction maps of the chaos game, one per triangle vertex.
#[derive(Debug, Clone, Copy)]
pub struct ChaosMaps {
    maps: [Affine2; 3],
}

impl ChaosMaps {
    /// Builds maps that move a point `CONTRACTION` of the way toward each
    /// vertex of `triangle`.
    pub fn halfway_to(triangle: &Triangle) -> Self {
        let scale = Mat2::from_diagonal(Vec2::splat(1.0 - CONTRACTION));
        let maps = triangle
            .vertices()
            .map(|vertex| Affine2::from_mat2_translation(scale, vertex * CONTRACTION));
        Self { maps }
    }

    /// Number of maps, one per vertex.
    pub(crate) const fn len(&self) -> usize {
        self.maps.len()
    }

    /// Applies map `index` to `point`. Panics if `index` is not below `len()`.
    #[inline]
    pub fn apply(&self, index: usize, point: Vec2) -> Vec2 {
        self.maps[index].transform_point2(point)
    }
}

impl Default for ChaosMaps {
    fn default() -> Self {
        Self::halfway_to(&Triangle::UNIT)
    }
}

/// Clamps `value` into `from`, rescales it linearly onto `to` and clamps the
/// result again so float error can never leave the target range.
pub fn to_range(value: f32, from: RangeInclusive<f32>, to: RangeInclusive<f32>) -> f32 {
    let (from_min, from_max) = (*from.start(), *from.end());
    let (to_min, to_max) = (*to.start(), *to.end());

    let value = value.clamp(from_min, from_max);
    let from_len = from_max - from_min;
    let to_len = to_max - to_min;

    ((value - from_min) * to_len / from_len + to_min).clamp(to_min, to_max)
}

/// Maps a unit-space point onto integer pixel coordinates of a
/// `width` x `height` frame. Coordinates outside `[0,1]` are clamped onto
/// the nearest edge; the result always lies in `[0,width) x [0,height)`.
///
/// `width` and `height` must be non-zero.
pub fn unit_to_pixel(point: Vec2, width: u32, height: u32) -> (u32, u32) {
    let max_x = width.saturating_sub(1);
    let max_y = height.saturating_sub(1);

    let x = to_range(point.x, 0.0..=1.0, 0.0..=max_x as f32).floor() as u32;
    let y = to_range(point.y, 0.0..=1.0, 0.0..=max_y as f32).floor() as u32;

    (x.min(max_x), y.min(max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_to_range_rescales_linearly() {
        let from = 0.0..=1.0;
        let to = 2.0..=10.0;

        assert_close(to_range(0.1, from.clone(), to.clone()), 2.8);
        assert_close(to_range(0.5, from.clone(), to.clone()), 6.0);
        assert_close(to_range(0.8, from, to), 8.4);
    }

    #[test]
    fn test_to_range_clamps_out_of_range_input() {
        let from = 0.0..=1.0;
        let to = 2.0..=10.0;

        assert_eq!(to_range(1.1, from.clone(), to.clone()), 10.0);
        assert_eq!(to_range(-0.1, from, to), 2.0);
    }

    #[test]
    fn test_unit_to_pixel_centre() {
        // 0.5 * 99 = 49.5 -> 49, 0.5 * 199 = 99.5 -> 99
        assert_eq!(unit_to_pixel(Vec2::new(0.5, 0.5), 100, 200), (49, 99));
    }

    #[test]
    fn test_unit_to_pixel_clamps_to_edges() {
        assert_eq!(unit_to_pixel(Vec2::new(1.1, -1.0), 100, 200), (99, 0));
        assert_eq!(unit_to_pixel(Vec2::new(f32::MAX, 7.0), 100, 200), (99, 199));
    }

    #[test]
    fn test_unit_to_pixel_single_pixel_frame() {
        assert_eq!(unit_to_pixel(Vec2::new(0.7, 0.3), 1, 1), (0, 0));
    }

    #[test]
    fn test_triangle_contains() {
        let t = Triangle::UNIT;
        assert!(t.contains(Vec2::new(0.25, 0.25), 0.0));
        assert!(t.contains(Vec2::new(0.0, 0.0), 0.0));
        assert!(t.contains(Vec2::new(0.5, 0.5), 1e-6));
        assert!(!t.contains(Vec2::new(0.6, 0.6), 1e-6));
        assert!(!t.contains(Vec2::new(-0.1, 0.2), 1e-6));
    }

    #[test]
    fn test_maps_move_halfway_to_each_vertex() {
        let maps = ChaosMaps::default();
        let p = Vec2::new(0.2, 0.4);

        assert!(maps.apply(0, p).abs_diff_eq(Vec2::new(0.1, 0.2), 1e-6));
        assert!(maps.apply(1, p).abs_diff_eq(Vec2::new(0.6, 0.2), 1e-6));
        assert!(maps.apply(2, p).abs_diff_eq(Vec2::new(0.1, 0.7), 1e-6));
    }

    #[test]
    fn test_maps_keep_points_inside_triangle() {
        // Any sequence of moves from a point inside the hull stays inside it.
        let maps = ChaosMaps::default();
        let mut p = Vec2::new(0.3, 0.3);
        for step in 0..10_000usize {
            p = maps.apply((step * 7 + step / 3) % 3, p);
            assert!(Triangle::UNIT.contains(p, 1e-5), "left hull at {p:?}");
        }
    }
}
