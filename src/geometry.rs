//! Geometry helpers shared by shapes and the gizmo.
//!
//! Degenerate inputs (zero-length offsets, coincident anchors) are not
//! guarded: the resulting NaN or infinite values flow through to the caller,
//! and the next pointer event recomputes everything from the gesture snapshot.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Position and size of a rectangle-like extent. Width and height may be
/// negative until the owner normalizes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn origin(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        Vector::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in NW, SW, SE, NE order.
    #[must_use]
    pub fn corners(&self) -> [Vector; 4] {
        [
            Vector::new(self.x, self.y),
            Vector::new(self.x, self.y + self.height),
            Vector::new(self.x + self.width, self.y + self.height),
            Vector::new(self.x + self.width, self.y),
        ]
    }

    /// The same absolute rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let min_x = self.x.min(self.x + self.width);
        let max_x = self.x.max(self.x + self.width);
        let min_y = self.y.min(self.y + self.height);
        let max_y = self.y.max(self.y + self.height);
        Self { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
    }
}

/// Closest point to `p` on the segment `a`-`b`, clamped to the endpoints.
///
/// A zero-length segment projects everything onto `a`.
#[must_use]
pub fn project_point_on_segment(p: Vector, a: Vector, b: Vector) -> Vector {
    if a == b {
        return a;
    }
    let ab = b - a;
    let t = (p - a).dot(ab) / ab.dot(ab);
    a + ab * t.clamp(0.0, 1.0)
}

/// Whether `a` and `b` are at most `|threshold|` apart.
#[must_use]
pub fn is_distance_close(a: Vector, b: Vector, threshold: f64) -> bool {
    a.distance(b) <= threshold.abs()
}

/// Per-axis scale factor that carries `previous` onto `current` while
/// keeping `anchor` fixed.
#[must_use]
pub fn calculate_scale_factor(current: Vector, previous: Vector, anchor: Vector) -> Vector {
    (current - anchor).div_components(previous - anchor)
}

/// Scale the rectangle spanned by `nw`..`se` about `anchor` by `factor`.
///
/// Negative factors mirror the rectangle across the anchor and produce a
/// negative width or height.
#[must_use]
pub fn calculate_scaled_dimensions(nw: Vector, se: Vector, anchor: Vector, factor: Vector) -> Frame {
    Frame {
        x: (nw.x - anchor.x) * factor.x + anchor.x,
        y: (nw.y - anchor.y) * factor.y + anchor.y,
        width: (se.x - nw.x) * factor.x,
        height: (se.y - nw.y) * factor.y,
    }
}

/// Scale a single point about `anchor` by `factor`.
#[must_use]
pub fn scale_point_about(point: Vector, anchor: Vector, factor: Vector) -> Vector {
    (point - anchor).mul_components(factor) + anchor
}

/// Bring a fixed reference point and a live pointer, both in world space,
/// back into the unrotated frame of a shape rotated by `angle`.
///
/// The pivot is the midpoint between the two points, which is exactly where
/// the resized shape's center will be. Rotating both points by `-angle`
/// about it yields the new unrotated corners, and re-rotating the result by
/// `angle` about the new center reproduces `fixed` unchanged.
#[must_use]
pub fn unrotate_about_midpoint(fixed: Vector, pointer: Vector, angle: f64) -> (Vector, Vector) {
    let pivot = fixed.midpoint(pointer);
    (fixed.rotate(pivot, -angle), pointer.rotate(pivot, -angle))
}
