//! Fundamental geometric types and angle arithmetic.
//!
//! Bearings are in radians, 0 = the +y axis ("north"), increasing
//! clockwise. All distances are in battlefield units, all times in ticks.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// 2D position on the battlefield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared distance to another point.
    pub fn distance_sq_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Bearing to another point in radians (0 = north, clockwise).
    /// Coincident points yield 0, not NaN.
    pub fn bearing_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy)
    }

    /// The point reached by travelling `distance` along `bearing`.
    pub fn project(&self, bearing: f64, distance: f64) -> Point {
        Point {
            x: self.x + distance * bearing.sin(),
            y: self.y + distance * bearing.cos(),
        }
    }
}

/// Axis-aligned rectangle, used for the battlefield and its inset
/// safety region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// This rectangle shrunk by `margin` on every side.
    pub fn inset(&self, margin: f64) -> Rect {
        Rect {
            x: self.x + margin,
            y: self.y + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - 2.0 * margin).max(0.0),
        }
    }

    /// Whether the point lies inside the rectangle (edges included).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x <= self.x + self.width
            && p.y >= self.y
            && p.y <= self.y + self.height
    }

    /// The nearest point inside the rectangle.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: p.x.clamp(self.x, self.x + self.width),
            y: p.y.clamp(self.y, self.y + self.height),
        }
    }
}

/// Normalize an angle to the signed equivalent in (-PI, PI].
pub fn normalize_relative(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Normalize an angle to [0, TAU).
pub fn normalize_absolute(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}
