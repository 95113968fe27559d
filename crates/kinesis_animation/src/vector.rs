//! Value types that second-order dynamics can drive
//!
//! [`Motion`] is the small set of operations the stepper needs: vector
//! arithmetic plus the per-axis wrap helpers for periodic domains. It is
//! implemented for plain `f64` scalars and for [`Vec2`].

use std::ops::{Add, Div, Mul, Neg, Sub};

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Vec2::new(x, y)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

/// A value that second-order dynamics can track
pub trait Motion:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + std::fmt::Debug
{
    const ZERO: Self;

    /// Shift `self` by whole multiples of `wrap` so it lies within half a
    /// wrap width of `previous`. Axes with a zero wrap are left alone.
    fn unwrap_near(self, previous: Self, wrap: Self) -> Self;

    /// Map `self` into `[0, wrap)` per axis. Axes with a zero wrap are left alone.
    fn wrap_into(self, wrap: Self) -> Self;

    /// True when any axis has a nonzero wrap width
    fn is_wrapping(self) -> bool;

    /// Euclidean size, used for settle checks
    fn magnitude(self) -> f64;
}

impl Motion for f64 {
    const ZERO: Self = 0.0;

    fn unwrap_near(self, previous: Self, wrap: Self) -> Self {
        unwrap_axis(self, previous, wrap)
    }

    fn wrap_into(self, wrap: Self) -> Self {
        wrap_axis(self, wrap)
    }

    fn is_wrapping(self) -> bool {
        self != 0.0
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }
}

impl Motion for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn unwrap_near(self, previous: Self, wrap: Self) -> Self {
        Vec2::new(
            unwrap_axis(self.x, previous.x, wrap.x),
            unwrap_axis(self.y, previous.y, wrap.y),
        )
    }

    fn wrap_into(self, wrap: Self) -> Self {
        Vec2::new(wrap_axis(self.x, wrap.x), wrap_axis(self.y, wrap.y))
    }

    fn is_wrapping(self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }

    fn magnitude(self) -> f64 {
        self.length()
    }
}

/// Pick the representative of `input` (mod `wrap`) closest to `previous`.
///
/// The result lies in `[previous - wrap/2, previous + wrap/2]` and differs
/// from `input` by an exact multiple of `wrap`. A zero `wrap` returns
/// `input` unchanged.
pub fn unwrap_axis(input: f64, previous: f64, wrap: f64) -> f64 {
    if wrap == 0.0 {
        return input;
    }
    let wrap = wrap.abs();
    let sign = (previous - input).signum();
    let steps = ((sign * (previous - input) - wrap / 2.0) / wrap).ceil();
    input + sign * wrap * steps
}

/// `value` modulo `wrap`, in `[0, wrap)`. A zero `wrap` returns `value`.
pub fn wrap_axis(value: f64, wrap: f64) -> f64 {
    if wrap == 0.0 {
        value
    } else {
        value.rem_euclid(wrap.abs())
    }
}
