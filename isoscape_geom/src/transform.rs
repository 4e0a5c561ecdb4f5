// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual and real coordinates and the isometric projection between them.

use core::ops::{Add, Sub};

/// A logical 3D position, in virtual tile units.
///
/// One tile spans [`TileMetrics::unit`](crate::TileMetrics::unit) units along
/// `x` and `y`. `z` grows upwards, in pixels of slope height.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VirtualPoint {
    /// Position along the virtual x axis (towards the screen's lower left).
    pub x: i32,
    /// Position along the virtual y axis (towards the screen's lower right).
    pub y: i32,
    /// Elevation above the ground plane.
    pub z: i32,
}

impl VirtualPoint {
    /// Creates a point from its three coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a point on the ground plane.
    #[must_use]
    pub const fn ground(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }
}

impl Add for VirtualPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for VirtualPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A 2D pixel position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RealPoint {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate, growing downwards.
    pub y: i32,
}

impl RealPoint {
    /// Creates a point from its pixel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a [`kurbo::Point`] for handing to a renderer.
    #[must_use]
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for RealPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for RealPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Projects a virtual point onto the screen plane.
///
/// `z` must not be negative.
#[must_use]
pub fn to_real(v: VirtualPoint) -> RealPoint {
    debug_assert!(v.z >= 0, "virtual z must not be negative, got {}", v.z);
    RealPoint::new((v.y - v.x) << 1, v.x + v.y - v.z)
}

/// Maps a pixel back onto the ground plane.
///
/// The result always has `z == 0`; for ground points this is the exact
/// inverse of [`to_real`].
#[must_use]
pub fn to_virtual(r: RealPoint) -> VirtualPoint {
    let x = (r.y >> 1) - (r.x >> 2);
    VirtualPoint::ground(x, x + (r.x >> 1))
}

/// Floor division returning `(quotient, remainder)` with `0 <= remainder < divisor`.
///
/// `divisor` must be positive.
#[must_use]
pub fn floor_div_rem(value: i32, divisor: i32) -> (i32, i32) {
    debug_assert!(divisor > 0, "divisor must be positive");
    if value >= 0 {
        (value / divisor, value % divisor)
    } else {
        // Work on the non-negative mirror to avoid truncation towards zero.
        let mirrored = -(value + 1);
        (
            -(mirrored / divisor + 1),
            (divisor - 1) - mirrored % divisor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_points_round_trip() {
        for x in -40..40 {
            for y in -40..40 {
                let v = VirtualPoint::ground(x, y);
                assert_eq!(to_virtual(to_real(v)), v, "round trip of {v:?}");
            }
        }
    }

    #[test]
    fn elevation_moves_points_up() {
        let low = to_real(VirtualPoint::new(3, 5, 0));
        let high = to_real(VirtualPoint::new(3, 5, 8));
        assert_eq!(low.x, high.x);
        assert_eq!(low.y - high.y, 8);
    }

    #[test]
    fn floor_div_rem_matches_euclid() {
        for value in -100..100 {
            for divisor in [1, 3, 32, 64] {
                assert_eq!(
                    floor_div_rem(value, divisor),
                    (value.div_euclid(divisor), value.rem_euclid(divisor)),
                    "{value} / {divisor}"
                );
            }
        }
    }
}
