// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heights of points on sloped tiles, and the inverse used for fine picking.

use core::fmt;

use crate::{Corners, RealPoint, Slope, TileMetrics, VirtualPoint};

/// A sub-tile coordinate outside `[0, unit)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutsideTile {
    /// Requested x offset inside the tile.
    pub x: i32,
    /// Requested y offset inside the tile.
    pub y: i32,
}

impl fmt::Display for OutsideTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "offset ({}, {}) lies outside the tile", self.x, self.y)
    }
}

impl core::error::Error for OutsideTile {}

/// `p / q` rounded half up, for `q > 0`.
fn round_div(p: i32, q: i32) -> i32 {
    (2 * p + q).div_euclid(2 * q)
}

/// `value` rounded half up, without `std`'s float intrinsics.
#[expect(
    clippy::cast_possible_truncation,
    reason = "fine offsets are a few dozen pixels; out of range values saturate and get clamped"
)]
fn round_half_up(value: f32) -> i32 {
    let shifted = value + 0.5;
    let truncated = shifted as i32;
    if (truncated as f32) > shifted {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "inputs are small pixel offsets"
)]
fn truncate(value: f32) -> i32 {
    value as i32
}

/// Plain isometric inverse with integer division, as used on flat faces.
fn flat_inverse(r_x: i32, r_y: i32) -> (f32, f32) {
    let fx = ((2 * r_y - r_x) / 4) as f32;
    let fy = (r_x as f32 + fx * 2.0) / 2.0;
    (fx, fy)
}

impl TileMetrics {
    /// Height of the surface at offset `(x, y)` inside a tile of the given slope,
    /// measured from the tile's lowest corner, in pixels.
    ///
    /// `(0, 0)` is the north corner; `x` runs towards the west corner and `y`
    /// towards the east corner. Both must be in `[0, unit)`.
    ///
    /// ```
    /// use isoscape_geom::{Slope, TileMetrics};
    ///
    /// let m = TileMetrics::new(64, 32, 8);
    /// assert_eq!(m.height_on_slope(Slope::Ne, 0, 0), Ok(8));
    /// assert_eq!(m.height_on_slope(Slope::Sw, 0, 0), Ok(0));
    /// assert!(m.height_on_slope(Slope::Flat, 16, 0).is_err());
    /// ```
    pub fn height_on_slope(&self, slope: Slope, x: i32, y: i32) -> Result<i32, OutsideTile> {
        let l = self.unit();
        if !(0..l).contains(&x) || !(0..l).contains(&y) {
            return Err(OutsideTile { x, y });
        }
        let h = self.slope_height();
        // Every face is planar, so each case is `numerator / l` rounded.
        let numerator = match slope {
            Slope::Flat => 0,
            Slope::Ne => h * l - h * x,
            Slope::Sw => h * x,
            Slope::Es => h * y,
            Slope::Wn => h * l - h * y,
            Slope::N => {
                if x + y >= l {
                    0
                } else {
                    h * l - h * x - h * y
                }
            }
            Slope::S => {
                if x + y <= l {
                    0
                } else {
                    h * x + h * y - h * l
                }
            }
            Slope::W => {
                if x < y {
                    0
                } else {
                    h * x - h * y
                }
            }
            Slope::E => {
                if x > y {
                    0
                } else {
                    h * y - h * x
                }
            }
            Slope::We => {
                if x + y >= l {
                    2 * h * l - h * x - h * y
                } else {
                    h * x + h * y
                }
            }
            Slope::Ns => {
                if x < y {
                    h * l - h * y + h * x
                } else {
                    h * l - h * x + h * y
                }
            }
            Slope::Nes => {
                if x <= y {
                    h * l
                } else {
                    h * l - h * x + h * y
                }
            }
            Slope::Swn => {
                if x >= y {
                    h * l
                } else {
                    h * l - h * y + h * x
                }
            }
            Slope::Esw => {
                if x + y <= l {
                    h * x + h * y
                } else {
                    h * l
                }
            }
            Slope::Wne => {
                if x + y <= l {
                    h * l
                } else {
                    2 * h * l - h * x - h * y
                }
            }
        };
        Ok(round_div(numerator, l))
    }

    /// Recovers the sub-tile position of a pixel already known to lie inside a tile.
    ///
    /// `point` is relative to the tile's bounding rectangle as used by
    /// [`SlopeGeometry::test`](crate::SlopeGeometry::test), before it is shifted
    /// down by the tile's elevation, and `min_height` is the height of the tile's
    /// lowest corner in steps. The
    /// result is clamped to the tile: `x` and `y` in `[0, unit)` and `z` in
    /// `[0, slope_height]`. Expect a pixel or two of error near edges.
    #[must_use]
    pub fn fine_position(&self, slope: Slope, point: RealPoint, min_height: i32) -> VirtualPoint {
        let sh = self.slope_height();
        let unit = self.unit();
        let r_x = point.x - self.tile_height();
        let r_y = point.y + (min_height + slope.corner_offset(Corners::N)) * sh;

        let h = sh as f32;
        let l = unit as f32;
        let a = l / h;
        let rx = r_x as f32;
        let ry = r_y as f32;
        let follow = |fx: f32| (rx + fx * 2.0) / 2.0;
        // Run along x when the face tilts along x, along y otherwise.
        let along_x = |ry: f32, tilt: f32, denominator: f32| {
            let fx = (2.0 * l * ry - l * rx + tilt * h * rx) / denominator;
            (fx, follow(fx))
        };

        let (fx, fy, fz) = match slope {
            Slope::Flat => {
                let (fx, fy) = flat_inverse(r_x, r_y);
                (fx, fy, 0.0)
            }
            Slope::Ne => {
                let fx = (2.0 * ry - rx) / ((4.0 * a + 2.0) / a);
                (fx, follow(fx), h - fx / a)
            }
            Slope::Sw => {
                let fx = (2.0 * ry - rx) / ((4.0 * a - 2.0) / a);
                (fx, follow(fx), fx / a)
            }
            Slope::Es => {
                let fy = (2.0 * ry + rx) / ((4.0 * a - 2.0) / a);
                ((-rx + fy * 2.0) / 2.0, fy, fy / a)
            }
            Slope::Wn => {
                let fy = (2.0 * ry + rx) / ((4.0 * a + 2.0) / a);
                ((-rx + fy * 2.0) / 2.0, fy, h - fy / a)
            }
            Slope::N => {
                if ry >= h + l {
                    let (fx, fy) = flat_inverse(r_x, r_y - sh);
                    (fx, fy, 0.0)
                } else {
                    let (fx, fy) = along_x(ry, -1.0, 4.0 * (l + h));
                    (fx, fy, (l * h - fx * h - h * fy) / l)
                }
            }
            Slope::S => {
                if ry >= l {
                    let ry = truncate(ry - l / 2.0) as f32;
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * (l - h));
                    (fx, fy, (l * h - fx * h - h * fy) / -l)
                } else {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, 0.0)
                }
            }
            Slope::W => {
                if r_x >= 0 {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, 0.0)
                } else {
                    let (fx, fy) = along_x(ry, -1.0, 4.0 * l);
                    (fx, fy, (h * fx - h * fy) / l)
                }
            }
            Slope::E => {
                if r_x <= 0 {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, 0.0)
                } else {
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * l);
                    (fx, fy, (h * fy - h * fx) / l)
                }
            }
            Slope::We => {
                if ry > h {
                    let (fx, fy) = along_x(ry + l, -1.0, 4.0 * (l + h));
                    (fx, fy, (h * fx + h * fy - 2.0 * h * l) / -l)
                } else {
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * (l - h));
                    (fx, fy, (h * fx + h * fy) / l)
                }
            }
            Slope::Ns => {
                if r_x <= 0 {
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * l);
                    (fx, fy, (l * h - h * fx + h * fy) / l)
                } else {
                    let (fx, fy) = along_x(ry, -1.0, 4.0 * l);
                    (fx, fy, (-l * h + h * fy - h * fx) / -l)
                }
            }
            Slope::Nes => {
                if r_x < 0 {
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * l);
                    (fx, fy, (l * h - h * fx + h * fy) / l)
                } else {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, h)
                }
            }
            Slope::Swn => {
                if r_x <= 0 {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, h)
                } else {
                    let (fx, fy) = along_x(ry, -1.0, 4.0 * l);
                    (fx, fy, (-l * h + h * fy - h * fx) / -l)
                }
            }
            Slope::Esw => {
                if ry >= h {
                    let (fx, fy) = flat_inverse(r_x, r_y + sh);
                    (fx, fy, h)
                } else {
                    let (fx, fy) = along_x(ry, 1.0, 4.0 * (l - h));
                    (fx, fy, (h * fx + h * fy) / l)
                }
            }
            Slope::Wne => {
                if ry <= l {
                    let (fx, fy) = flat_inverse(r_x, r_y);
                    (fx, fy, h)
                } else {
                    let (fx, fy) = along_x(ry + h, -1.0, 4.0 * (l + h));
                    (fx, fy, (h * fx + h * fy - 2.0 * h * l) / -l)
                }
            }
        };

        VirtualPoint::new(
            round_half_up(fx).clamp(0, unit - 1),
            round_half_up(fy).clamp(0, unit - 1),
            round_half_up(fz).clamp(0, sh),
        )
    }
}
