// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Two-dimensional vector
//!
//! `Vector` is the value type shared by positions, velocities, accelerations
//! and forces. It is `Copy`, so every binding holds an independent value and
//! aliasing between objects is impossible.

use std::fmt;
use std::ops::{AddAssign, Div, Mul, Sub};

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use canvas_sim::ecs::Vector;
///
/// let mut v = Vector::new(1.0, 2.0);
/// v.translate(0.5, -1.0);
/// assert_eq!(v, Vector::new(1.5, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// Horizontal component
    pub x: f64,
    /// Vertical component (canvas coordinates, positive is down)
    pub y: f64,
}

impl Vector {
    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector::new(0.0, 0.0)
    }

    /// Accumulate `other` into this vector in place
    pub fn add(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }

    /// Shift this vector by the given offsets
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Return `self - origin` without mutating either operand
    pub fn subtract(&self, origin: Vector) -> Vector {
        Vector::new(self.x - origin.x, self.y - origin.y)
    }

    /// Zero both axes
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Whether both components are exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        Vector::add(self, rhs);
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}
