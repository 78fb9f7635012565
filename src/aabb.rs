#[cfg(test)]
#[path = "aabb_test.rs"]
mod aabb_test;

use serde::{Deserialize, Serialize};

use crate::vector::Vector;

/// Axis-aligned rectangle used for index regions and marquee ranges.
///
/// Width and height are never negative; constructors normalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let min_x = x.min(x + width);
        let min_y = y.min(y + height);
        Self { x: min_x, y: min_y, width: width.abs(), height: height.abs() }
    }

    /// Rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Vector, b: Vector) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    /// Smallest rectangle covering every point. `None` for an empty set.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        let points: Vec<Vector> = points.into_iter().collect();
        let min = Vector::min_of(points.iter().copied())?;
        let max = Vector::max_of(points)?;
        Some(Self::from_corners(min, max))
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Vector {
        Vector::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point test.
    #[must_use]
    pub fn contains(&self, p: Vector) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    #[must_use]
    pub fn contains_all(&self, points: &[Vector]) -> bool {
        points.iter().all(|p| self.contains(*p))
    }

    /// Whether the two rectangles overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.x > self.right() || other.right() < self.x || other.y > self.bottom() || other.bottom() < self.y)
    }

    #[must_use]
    pub fn union(&self, other: &Aabb) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Grow by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Self {
        Self::new(self.x - margin, self.y - margin, self.width + margin * 2.0, self.height + margin * 2.0)
    }

    /// Split into four equal quadrants in NE, NW, SE, SW order.
    #[must_use]
    pub fn quadrants(&self) -> [Aabb; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            Aabb::new(self.x + hw, self.y, hw, hh),
            Aabb::new(self.x, self.y, hw, hh),
            Aabb::new(self.x + hw, self.y + hh, hw, hh),
            Aabb::new(self.x, self.y + hh, hw, hh),
        ]
    }
}
