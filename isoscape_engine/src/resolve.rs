// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen point to tile resolution.
//!
//! The point is first mapped onto the flat tile grid, then walked across tile
//! edges until it lands inside the polygon of a tile as raised by its height.
//! Where slopes are steeper than half a tile, raised polygons fold over their
//! neighbours and the walk can circle between tiles; it stops at the first
//! tile it revisits.

use bitflags::bitflags;
use isoscape_geom::{EdgeTest, RealPoint, Slope, VirtualPoint, clamp, floor_div_rem};

use crate::Engine;

bitflags! {
    /// Map edges a resolved point was clamped against.
    ///
    /// Empty when the point lies on a tile of the map.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EdgeHits: u8 {
        /// Beyond the north-east edge (`x` too small).
        const NORTH_EAST = 1;
        /// Beyond the south-east edge (`y` too large).
        const SOUTH_EAST = 2;
        /// Beyond the south-west edge (`x` too large).
        const SOUTH_WEST = 4;
        /// Beyond the north-west edge (`y` too small).
        const NORTH_WEST = 8;
    }
}

/// The tile under a screen point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileHit {
    /// Logical column.
    pub x: i32,
    /// Logical row.
    pub y: i32,
    /// Edges the point was clamped against to stay on the map.
    pub edges: EdgeHits,
    /// Position inside the tile, when requested and the point is on the map.
    pub fine: Option<VirtualPoint>,
}

impl TileHit {
    /// Whether the point lies on the map, without clamping.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Result of the edge walk, in grid coordinates.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Located {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) edges: EdgeHits,
    /// Remainder inside the tile's bounding box, before the height shift.
    point: RealPoint,
    slope: Slope,
    min_height: i32,
}

/// Clamps grid `(x, y)` to `min..=max`, recording the edges hit.
fn clamp_to_grid(
    x: i32,
    y: i32,
    min: (i32, i32),
    max: (i32, i32),
    edges: &mut EdgeHits,
) -> (i32, i32) {
    let cx = clamp(x, min.0, max.0);
    if cx.to_min {
        edges.insert(EdgeHits::NORTH_EAST);
    } else if cx.to_max {
        edges.insert(EdgeHits::SOUTH_WEST);
    }
    let cy = clamp(y, min.1, max.1);
    if cy.to_min {
        edges.insert(EdgeHits::NORTH_WEST);
    } else if cy.to_max {
        edges.insert(EdgeHits::SOUTH_EAST);
    }
    (cx.value, cy.value)
}

impl<D, U, R, P> Engine<D, U, R, P> {
    /// Grid tile under viewport pixel `screen`, clamped to the padded grid.
    pub(crate) fn locate(&self, screen: RealPoint) -> Located {
        let tw = self.metrics.tile_width();
        let th = self.metrics.tile_height();
        let sh = self.metrics.slope_height();
        let (half_w, half_h) = (tw / 2, th / 2);

        let (col, rx) = floor_div_rem(screen.x + self.offset.x + half_w, tw);
        let (row, ry) = floor_div_rem(screen.y + self.offset.y, th);
        let mut y = col + row;
        let mut x = y - 2 * col;
        let mut point = RealPoint::new(rx, ry);

        let (last_x, last_y) = (self.map.last_x(), self.map.last_y());
        let surface = |x: i32, y: i32| match self.map.get(x, y) {
            Some(tile) if x <= last_x && y <= last_y => (tile.slope(), tile.min_height()),
            _ => (Slope::Flat, 0),
        };
        // The shift applied to the point depends only on the tile, so a
        // repeated tile repeats the walk. Brent's cycle detection stops there.
        let mut saved = (x, y);
        let (mut lap, mut power) = (0_u32, 1_u32);
        let (slope, min_height) = loop {
            let (slope, min_height) = surface(x, y);
            let lifted = point + RealPoint::new(0, min_height * sh);
            let step = match self.geometry.test(slope, lifted) {
                EdgeTest::Inside => break (slope, min_height),
                EdgeTest::AboveNe => {
                    x -= 1;
                    RealPoint::new(-half_w, half_h)
                }
                EdgeTest::BelowEs => {
                    y += 1;
                    RealPoint::new(-half_w, -half_h)
                }
                EdgeTest::BelowSw => {
                    x += 1;
                    RealPoint::new(half_w, -half_h)
                }
                EdgeTest::AboveWn => {
                    y -= 1;
                    RealPoint::new(half_w, half_h)
                }
            };
            point = point + step;
            lap += 1;
            if (x, y) == saved {
                tracing::trace!(x, y, "tile resolution circled");
                break surface(x, y);
            }
            if lap == power {
                saved = (x, y);
                power *= 2;
                lap = 0;
            }
        };

        let mut edges = EdgeHits::empty();
        let (x, y) = clamp_to_grid(x, y, (0, 0), (last_x, last_y), &mut edges);
        Located {
            x,
            y,
            edges,
            point,
            slope,
            min_height,
        }
    }

    fn resolve(&self, screen: RealPoint, fine: bool) -> TileHit {
        let located = self.locate(screen);
        let margin = self.config.max_height;
        let mut edges = located.edges;
        let max = (
            margin + self.config.map_width - 1,
            margin + self.config.map_height - 1,
        );
        let (gx, gy) = clamp_to_grid(located.x, located.y, (margin, margin), max, &mut edges);

        let fine = (fine && edges.is_empty()).then(|| {
            self.metrics
                .fine_position(located.slope, located.point, located.min_height)
        });
        let (x, y) = self.map.to_logical(gx, gy);
        TileHit { x, y, edges, fine }
    }

    /// The logical tile under viewport pixel `screen`.
    ///
    /// Points off the map resolve to the nearest edge tile, with
    /// [`TileHit::edges`] naming the edges crossed. Expect up to two pixels of
    /// error near tile boundaries. On slopes steeper than half a tile, where
    /// raised tiles overlap, the point resolves to one of the overlapping
    /// tiles.
    #[must_use]
    pub fn tile_at_screen(&self, screen: RealPoint) -> TileHit {
        self.resolve(screen, false)
    }

    /// Like [`tile_at_screen`](Self::tile_at_screen), also recovering the
    /// position inside the tile: `x` and `y` in `[0, L)` and the elevation
    /// above the tile's lowest corner in `z`.
    #[must_use]
    pub fn tile_at_screen_fine(&self, screen: RealPoint) -> TileHit {
        self.resolve(screen, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_names_the_crossed_edges() {
        let mut edges = EdgeHits::empty();
        assert_eq!(clamp_to_grid(3, 4, (0, 0), (9, 9), &mut edges), (3, 4));
        assert!(edges.is_empty());

        assert_eq!(clamp_to_grid(-1, 12, (0, 0), (9, 9), &mut edges), (0, 9));
        assert_eq!(edges, EdgeHits::NORTH_EAST | EdgeHits::SOUTH_EAST);

        let mut edges = EdgeHits::empty();
        assert_eq!(clamp_to_grid(10, -5, (0, 0), (9, 9), &mut edges), (9, 0));
        assert_eq!(edges, EdgeHits::SOUTH_WEST | EdgeHits::NORTH_WEST);
    }

    #[test]
    fn second_stage_keeps_first_stage_edges() {
        let mut edges = EdgeHits::NORTH_WEST;
        assert_eq!(clamp_to_grid(1, 2, (2, 2), (11, 11), &mut edges), (2, 2));
        assert_eq!(edges, EdgeHits::NORTH_WEST | EdgeHits::NORTH_EAST);
    }
}
