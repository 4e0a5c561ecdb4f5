// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt;

use crate::{Tile, TileFactory};

/// A logical tile coordinate outside the map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileOutOfBounds {
    /// Requested logical column.
    pub x: i32,
    /// Requested logical row.
    pub y: i32,
}

impl fmt::Display for TileOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile ({}, {}) is outside the map", self.x, self.y)
    }
}

impl core::error::Error for TileOutOfBounds {}

/// A `W x H` tile grid padded by a margin of `max_height` tiles on every side,
/// plus one extra boundary row and column.
///
/// The grid has `W + 2 * max_height + 1` columns and `H + 2 * max_height + 1`
/// rows, at most 256 each. Logical tile `(0, 0)` sits at grid
/// `(max_height, max_height)`. Margin and boundary tiles are never visible.
#[derive(Clone, Debug)]
pub struct Map<D> {
    width: i32,
    height: i32,
    max_height: i32,
    columns: i32,
    rows: i32,
    tiles: Vec<Tile<D>>,
}

impl<D: Default> Map<D> {
    /// Builds a flat map, asking `factory` for every playable tile and the
    /// boundary row and column.
    ///
    /// Dimensions are validated by the caller: `width` and `height` positive,
    /// `max_height` at most 15 and each padded side at most 256 tiles.
    pub fn new<F: TileFactory<D> + ?Sized>(
        width: i32,
        height: i32,
        max_height: i32,
        factory: &mut F,
    ) -> Self {
        debug_assert!(width > 0 && height > 0, "map must not be empty");
        debug_assert!((0..=15).contains(&max_height), "max height out of range");
        let columns = width + 2 * max_height + 1;
        let rows = height + 2 * max_height + 1;
        debug_assert!(
            columns <= 256 && rows <= 256,
            "padded map exceeds 256 tiles per side"
        );

        let mut tiles = Vec::with_capacity((columns * rows) as usize);
        for y in 0..rows {
            for x in 0..columns {
                let margin = x < max_height
                    || y < max_height
                    || x > width + max_height
                    || y > height + max_height;
                let mut tile = if margin {
                    Tile::new(D::default()).with_visible(false)
                } else {
                    let tile = factory.build_tile(x - max_height, y - max_height);
                    if x == width + max_height || y == height + max_height {
                        tile.with_visible(false)
                    } else {
                        tile
                    }
                };
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "grid sides are at most 256 tiles"
                )]
                tile.place(x as u8, y as u8);
                tiles.push(tile);
            }
        }

        Self {
            width,
            height,
            max_height,
            columns,
            rows,
            tiles,
        }
    }
}

impl<D> Map<D> {
    /// Number of playable columns.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of playable rows.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Maximum tile height, which is also the margin width.
    #[must_use]
    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// Number of columns in the padded grid.
    #[must_use]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of rows in the padded grid.
    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Last grid column that takes part in height propagation and picking.
    ///
    /// The final column only provides corners and always stays at height 0.
    #[must_use]
    pub fn last_x(&self) -> i32 {
        self.columns - 2
    }

    /// Last grid row that takes part in height propagation and picking.
    #[must_use]
    pub fn last_y(&self) -> i32 {
        self.rows - 2
    }

    /// Converts logical coordinates to grid coordinates.
    #[must_use]
    pub fn to_grid(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.max_height, y + self.max_height)
    }

    /// Converts grid coordinates to logical coordinates.
    #[must_use]
    pub fn to_logical(&self, grid_x: i32, grid_y: i32) -> (i32, i32) {
        (grid_x - self.max_height, grid_y - self.max_height)
    }

    /// Whether logical `(x, y)` is addressable: the playable area plus the
    /// boundary row and column.
    #[must_use]
    pub fn is_valid_tile(&self, x: i32, y: i32) -> bool {
        (0..=self.width).contains(&x) && (0..=self.height).contains(&y)
    }

    /// Whether grid `(x, y)` is a playable tile. Notifications are limited to these.
    #[must_use]
    pub fn is_playable(&self, grid_x: i32, grid_y: i32) -> bool {
        let m = self.max_height;
        (m..m + self.width).contains(&grid_x) && (m..m + self.height).contains(&grid_y)
    }

    /// Whether grid `(x, y)` is subject to height authorization: the playable
    /// tiles plus the boundary row and column, whose heights shape the last
    /// playable corners.
    #[must_use]
    pub fn is_editable(&self, grid_x: i32, grid_y: i32) -> bool {
        let m = self.max_height;
        (m..=m + self.width).contains(&grid_x) && (m..=m + self.height).contains(&grid_y)
    }

    fn index(&self, grid_x: i32, grid_y: i32) -> Option<usize> {
        if (0..self.columns).contains(&grid_x) && (0..self.rows).contains(&grid_y) {
            Some((grid_y * self.columns + grid_x) as usize)
        } else {
            None
        }
    }

    /// Tile at grid `(x, y)`, margin included.
    #[must_use]
    pub fn get(&self, grid_x: i32, grid_y: i32) -> Option<&Tile<D>> {
        self.index(grid_x, grid_y).map(|i| &self.tiles[i])
    }

    /// Mutable tile at grid `(x, y)`, margin included.
    pub fn get_mut(&mut self, grid_x: i32, grid_y: i32) -> Option<&mut Tile<D>> {
        self.index(grid_x, grid_y).map(|i| &mut self.tiles[i])
    }

    /// Tile at logical `(x, y)`.
    pub fn tile(&self, x: i32, y: i32) -> Result<&Tile<D>, TileOutOfBounds> {
        if !self.is_valid_tile(x, y) {
            return Err(TileOutOfBounds { x, y });
        }
        let (gx, gy) = self.to_grid(x, y);
        self.get(gx, gy).ok_or(TileOutOfBounds { x, y })
    }

    /// Mutable tile at logical `(x, y)`.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Result<&mut Tile<D>, TileOutOfBounds> {
        if !self.is_valid_tile(x, y) {
            return Err(TileOutOfBounds { x, y });
        }
        let (gx, gy) = self.to_grid(x, y);
        self.get_mut(gx, gy).ok_or(TileOutOfBounds { x, y })
    }

    /// Height of grid `(x, y)`; tiles outside the grid count as ground level.
    #[must_use]
    pub fn height_at(&self, grid_x: i32, grid_y: i32) -> i32 {
        self.get(grid_x, grid_y).map_or(0, Tile::height)
    }

    /// All tiles of the padded grid, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile<D>> + '_ {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> Map<(i32, i32)> {
        Map::new(6, 4, 2, &mut |x: i32, y: i32| Tile::new((x, y)))
    }

    #[test]
    fn padded_dimensions() {
        let map = numbered();
        assert_eq!(map.columns(), 11);
        assert_eq!(map.rows(), 9);
        assert_eq!(map.tiles().count(), 99);
        assert_eq!(map.last_x(), 9);
    }

    #[test]
    fn factory_sees_logical_coordinates() {
        let map = numbered();
        assert_eq!(map.tile(0, 0).unwrap().data, (0, 0));
        assert_eq!(map.tile(5, 3).unwrap().data, (5, 3));
        let tile = map.tile(5, 3).unwrap();
        assert_eq!((tile.grid_x(), tile.grid_y()), (7, 5));
    }

    #[test]
    fn margin_and_boundary_are_hidden() {
        let map = numbered();
        assert!(map.tile(0, 0).unwrap().is_visible());
        assert!(map.tile(5, 3).unwrap().is_visible());
        // Boundary row and column come from the factory but stay hidden.
        assert!(!map.tile(6, 0).unwrap().is_visible());
        assert_eq!(map.tile(6, 0).unwrap().data, (6, 0));
        assert!(!map.tile(2, 4).unwrap().is_visible());
        // Margin tiles carry the default payload.
        assert_eq!(map.get(0, 0).unwrap().data, (0, 0));
        assert!(!map.get(0, 0).unwrap().is_visible());
        assert!(!map.get(10, 8).unwrap().is_visible());
    }

    #[test]
    fn logical_access_is_bounds_checked() {
        let map = numbered();
        assert_eq!(map.tile(-1, 0).unwrap_err(), TileOutOfBounds { x: -1, y: 0 });
        assert!(map.tile(7, 0).is_err());
        assert!(map.tile(6, 4).is_ok());
        assert!(map.get(11, 0).is_none());
        assert_eq!(map.height_at(-3, 2), 0);
    }

    #[test]
    fn playable_and_editable_regions() {
        let map = numbered();
        assert!(map.is_playable(2, 2));
        assert!(!map.is_playable(8, 2));
        assert!(map.is_editable(8, 2));
        assert!(!map.is_editable(9, 2));
        assert!(!map.is_editable(1, 2));
    }
}
