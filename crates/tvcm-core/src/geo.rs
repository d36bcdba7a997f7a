//! Planar geometry for the simulation area.
//!
//! Coordinates are metres in a flat local frame with the origin at the grid's
//! lower-left corner.  `f64` is used throughout: positions are integrated
//! every tick for days of simulated time and single precision drifts visibly
//! over that many Euler steps.

use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A 2-D point or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Squared distance.
    #[inline]
    pub fn distance_2(self, other: Vec2) -> f64 {
        let d = other - self;
        d.dot(d)
    }

    /// Unit vector in the same direction, or `None` if the length is below
    /// `eps`.
    #[inline]
    pub fn normalized(self, eps: f64) -> Option<Vec2> {
        let len = self.length();
        (len >= eps).then(|| self / len)
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2::new(x, y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Arithmetic mean of `points`, or `None` for an empty iterator.
pub fn centroid<I>(points: I) -> Option<Vec2>
where
    I: IntoIterator<Item = Vec2>,
{
    let (sum, n) = points
        .into_iter()
        .fold((Vec2::ZERO, 0usize), |(acc, n), p| (acc + p, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle `[min.x, max.x) × [min.y, max.y)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Half-open containment, matching how cells tile the grid.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Closed containment.  Uniform float sampling may land exactly on the
    /// upper edge after rounding, so bounds checks on sampled points use this.
    #[inline]
    pub fn contains_closed(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
