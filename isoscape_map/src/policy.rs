// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application hooks: building tiles and reacting to terrain edits.

use isoscape_geom::Slope;

use crate::Tile;

/// Builds the playable tiles of a new [`Map`](crate::Map).
///
/// Called once per tile, row by row, with logical coordinates. Tiles on the
/// far boundary row and column are hidden after construction whatever the
/// factory returns; they only carry the corners of the last playable row.
///
/// Implemented for closures:
///
/// ```
/// use isoscape_map::{Map, Tile};
///
/// let map = Map::new(4, 3, 1, &mut |x: i32, y: i32| Tile::new(x * 10 + y));
/// assert_eq!(map.tile(2, 1).unwrap().data, 21);
/// ```
pub trait TileFactory<D> {
    /// Creates the tile at logical `(x, y)`.
    fn build_tile(&mut self, x: i32, y: i32) -> Tile<D>;
}

impl<D, F> TileFactory<D> for F
where
    F: FnMut(i32, i32) -> Tile<D>,
{
    fn build_tile(&mut self, x: i32, y: i32) -> Tile<D> {
        self(x, y)
    }
}

/// Authorization and notification hooks for height edits.
///
/// Coordinates are logical. All hooks default to "allow, ignore".
///
/// Only [`Map::can_set_height`](crate::Map::can_set_height) consults
/// [`can_set_height`](Self::can_set_height); [`Map::set_height`](crate::Map::set_height)
/// trusts its caller. Notifications fire only for playable tiles, never for the
/// margin.
pub trait HeightPolicy<D> {
    /// Whether `tile` may be moved to `height`.
    fn can_set_height(&mut self, tile: &Tile<D>, x: i32, y: i32, height: i32) -> bool {
        let _ = (tile, x, y, height);
        true
    }

    /// `tile` changed height; `old_height` is the previous value.
    fn height_changed(&mut self, tile: &Tile<D>, x: i32, y: i32, old_height: i32) {
        let _ = (tile, x, y, old_height);
    }

    /// `tile` changed slope; `old_slope` is the previous value.
    fn slope_changed(&mut self, tile: &Tile<D>, x: i32, y: i32, old_slope: Slope) {
        let _ = (tile, x, y, old_slope);
    }
}

/// A policy that authorizes everything and ignores notifications.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<D> HeightPolicy<D> for AcceptAll {}
