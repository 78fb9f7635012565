#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or displacement in world space.
///
/// Values are treated as immutable: every operation returns a new vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate this point by `angle` radians about `pivot`.
    ///
    /// A zero angle returns the point unchanged, bit for bit.
    #[must_use]
    pub fn rotate(self, pivot: Vector, angle: f64) -> Self {
        if angle == 0.0 {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul_components(self, other: Vector) -> Self {
        Self { x: self.x * other.x, y: self.y * other.y }
    }

    /// Component-wise quotient. Zero components yield infinities or NaN.
    #[must_use]
    pub fn div_components(self, other: Vector) -> Self {
        Self { x: self.x / other.x, y: self.y / other.y }
    }

    #[must_use]
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(self, other: Vector) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn midpoint(self, other: Vector) -> Self {
        (self + other) / 2.0
    }

    /// Angle of this displacement measured from the positive x axis.
    #[must_use]
    pub fn atan2(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Component-wise minimum over a set of points. `None` for an empty set.
    #[must_use]
    pub fn min_of<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        points
            .into_iter()
            .reduce(|acc, v| Self { x: acc.x.min(v.x), y: acc.y.min(v.y) })
    }

    /// Component-wise maximum over a set of points. `None` for an empty set.
    #[must_use]
    pub fn max_of<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector>,
    {
        points
            .into_iter()
            .reduce(|acc, v| Self { x: acc.x.max(v.x), y: acc.y.max(v.y) })
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}
