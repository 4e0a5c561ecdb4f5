// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile pixel metrics and the per-slope tile polygons.

use crate::{Corners, RealPoint, Slope};

/// Pixel dimensions of a tile.
///
/// Tiles are diamonds `tile_width` pixels wide and `tile_height` pixels tall,
/// where `tile_height == tile_width / 2`. Each height step lifts a corner by
/// `slope_height` pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileMetrics {
    tile_width: i32,
    tile_height: i32,
    slope_height: i32,
}

impl TileMetrics {
    /// Creates metrics for `tile_width` x `tile_height` tiles.
    ///
    /// Callers validate the dimensions beforehand; the engine configuration
    /// rejects widths that are not a multiple of 4 or heights that are not half
    /// the width.
    #[must_use]
    pub fn new(tile_width: i32, tile_height: i32, slope_height: i32) -> Self {
        debug_assert!(
            tile_width > 0 && tile_width % 4 == 0 && tile_height * 2 == tile_width,
            "tile must be a 2:1 diamond with a width divisible by 4"
        );
        debug_assert!(slope_height > 0, "slope height must be positive");
        Self {
            tile_width,
            tile_height,
            slope_height,
        }
    }

    /// Tile width in pixels.
    #[must_use]
    pub const fn tile_width(&self) -> i32 {
        self.tile_width
    }

    /// Tile height in pixels.
    #[must_use]
    pub const fn tile_height(&self) -> i32 {
        self.tile_height
    }

    /// Pixels a corner rises per height step.
    #[must_use]
    pub const fn slope_height(&self) -> i32 {
        self.slope_height
    }

    /// Size of a tile in virtual units, `tile_width / 4`.
    #[must_use]
    pub const fn unit(&self) -> i32 {
        self.tile_width >> 2
    }
}

/// Where a point lies relative to a tile polygon.
///
/// Edges are tested in the fixed order NE, ES, SW, WN and the first violated
/// edge is reported, so points exactly on a boundary always resolve the same way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeTest {
    /// The point is inside the polygon.
    Inside,
    /// Above the north-east edge: the tile at `x - 1` is a better candidate.
    AboveNe,
    /// Below the east-south edge: try `y + 1`.
    BelowEs,
    /// Below the south-west edge: try `x + 1`.
    BelowSw,
    /// Above the west-north edge: try `y - 1`.
    AboveWn,
}

/// A line through two integer points, kept as endpoint deltas so point tests
/// are exact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Line {
    x0: i32,
    y0: i32,
    dx: i32,
    dy: i32,
}

impl Line {
    fn through(a: RealPoint, b: RealPoint) -> Self {
        debug_assert!(a.x != b.x, "tile edges are never vertical");
        Self {
            x0: b.x,
            y0: b.y,
            dx: a.x - b.x,
            dy: a.y - b.y,
        }
    }

    /// Has the sign of `line_y(p.x) - p.y`: positive when the point is above
    /// the line in screen space.
    fn side(&self, p: RealPoint) -> i64 {
        let v = i64::from(self.y0 - p.y) * i64::from(self.dx)
            + i64::from(self.dy) * i64::from(p.x - self.x0);
        if self.dx < 0 { -v } else { v }
    }
}

/// Boundary lines of the tile polygon for each of the 15 slopes.
///
/// Polygon coordinates are relative to the tile's bounding rectangle with the
/// lowest corner resting on the ground: north at `(tile_height, 0)`, east at
/// `(tile_width, unit)`, south at `(tile_height, 2 * unit)` and west at
/// `(0, unit)`. Raised corners move up by one slope height.
#[derive(Clone, Debug)]
pub struct SlopeGeometry {
    metrics: TileMetrics,
    // NE, ES, SW, WN per slope.
    lines: [[Line; 4]; 15],
}

impl SlopeGeometry {
    /// Precomputes the polygons for tiles of the given size.
    #[must_use]
    pub fn new(metrics: TileMetrics) -> Self {
        let lines = Slope::ALL.map(|slope| {
            let [n, e, s, w] = Self::corner_points_for(&metrics, slope);
            [
                Line::through(n, e),
                Line::through(e, s),
                Line::through(s, w),
                Line::through(w, n),
            ]
        });
        Self { metrics, lines }
    }

    /// The metrics these polygons were built for.
    #[must_use]
    pub const fn metrics(&self) -> &TileMetrics {
        &self.metrics
    }

    /// Polygon corners of `slope` in N, E, S, W order.
    #[must_use]
    pub fn corner_points(&self, slope: Slope) -> [RealPoint; 4] {
        Self::corner_points_for(&self.metrics, slope)
    }

    fn corner_points_for(m: &TileMetrics, slope: Slope) -> [RealPoint; 4] {
        let lift = |corner| slope.corner_offset(corner) * m.slope_height;
        let unit = m.unit();
        [
            RealPoint::new(m.tile_height, -lift(Corners::N)),
            RealPoint::new(m.tile_width, unit - lift(Corners::E)),
            RealPoint::new(m.tile_height, 2 * unit - lift(Corners::S)),
            RealPoint::new(0, unit - lift(Corners::W)),
        ]
    }

    /// Locates `point`, relative to the tile rectangle, against the polygon of `slope`.
    #[must_use]
    pub fn test(&self, slope: Slope, point: RealPoint) -> EdgeTest {
        let [ne, es, sw, wn] = &self.lines[slope.index()];
        if ne.side(point) > 0 {
            EdgeTest::AboveNe
        } else if es.side(point) < 0 {
            EdgeTest::BelowEs
        } else if sw.side(point) <= 0 {
            EdgeTest::BelowSw
        } else if wn.side(point) > 0 {
            EdgeTest::AboveWn
        } else {
            EdgeTest::Inside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> SlopeGeometry {
        SlopeGeometry::new(TileMetrics::new(64, 32, 8))
    }

    #[test]
    fn flat_center_is_inside() {
        assert_eq!(
            geometry().test(Slope::Flat, RealPoint::new(32, 16)),
            EdgeTest::Inside
        );
    }

    #[test]
    fn rectangle_corners_fall_outside() {
        let g = geometry();
        assert_eq!(g.test(Slope::Flat, RealPoint::new(63, 0)), EdgeTest::AboveNe);
        assert_eq!(g.test(Slope::Flat, RealPoint::new(63, 31)), EdgeTest::BelowEs);
        assert_eq!(g.test(Slope::Flat, RealPoint::new(0, 31)), EdgeTest::BelowSw);
        assert_eq!(g.test(Slope::Flat, RealPoint::new(0, 0)), EdgeTest::AboveWn);
    }

    #[test]
    fn boundary_points_follow_edge_order() {
        let g = geometry();
        // The north vertex is on both NE and WN; neither counts as violated.
        assert_eq!(g.test(Slope::Flat, RealPoint::new(32, 0)), EdgeTest::Inside);
        // The west vertex lies on SW, which is exclusive.
        assert_eq!(g.test(Slope::Flat, RealPoint::new(0, 16)), EdgeTest::BelowSw);
    }

    #[test]
    fn raised_north_corner_extends_polygon_upwards() {
        let g = geometry();
        let above_flat_top = RealPoint::new(32, -4);
        assert_eq!(g.test(Slope::Flat, above_flat_top), EdgeTest::AboveNe);
        assert_eq!(g.test(Slope::N, above_flat_top), EdgeTest::Inside);
    }

    #[test]
    fn corner_points_lift_raised_corners() {
        let [n, e, s, w] = geometry().corner_points(Slope::Nes);
        assert_eq!(n, RealPoint::new(32, -8));
        assert_eq!(e, RealPoint::new(64, 8));
        assert_eq!(s, RealPoint::new(32, 24));
        assert_eq!(w, RealPoint::new(0, 16));
    }
}
