// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_geom::Slope;

/// One cell of the map.
///
/// A tile knows its position in the padded grid, its height (the height of its
/// north corner, in steps) and the slope formed with its forward neighbors.
/// Height and slope are owned by the [`Map`](crate::Map) and change only through
/// [`Map::set_height`](crate::Map::set_height); the payload is free for the
/// application to use.
#[derive(Clone, Debug)]
pub struct Tile<D> {
    x: u8,
    y: u8,
    height: u8,
    slope: Slope,
    visible: bool,
    needs_slope: bool,
    /// Application payload.
    pub data: D,
}

impl<D: Default> Default for Tile<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D> Tile<D> {
    /// Creates a visible, flat, ground-level tile.
    ///
    /// The position is assigned when the tile is placed in a map.
    pub fn new(data: D) -> Self {
        Self {
            x: 0,
            y: 0,
            height: 0,
            slope: Slope::Flat,
            visible: true,
            needs_slope: false,
            data,
        }
    }

    /// Builder-style visibility setter, handy in a [`TileFactory`](crate::TileFactory).
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Column in the padded grid.
    #[must_use]
    pub fn grid_x(&self) -> i32 {
        i32::from(self.x)
    }

    /// Row in the padded grid.
    #[must_use]
    pub fn grid_y(&self) -> i32 {
        i32::from(self.y)
    }

    /// Height of the north corner, in steps.
    #[must_use]
    pub fn height(&self) -> i32 {
        i32::from(self.height)
    }

    /// Height of the lowest corner, in steps.
    #[must_use]
    pub fn min_height(&self) -> i32 {
        self.height() + self.slope.min_height_offset()
    }

    /// Current surface shape.
    #[must_use]
    pub fn slope(&self) -> Slope {
        self.slope
    }

    /// Whether the tile is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the tile.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn place(&mut self, x: u8, y: u8) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_height(&mut self, height: u8) {
        self.height = height;
    }

    pub(crate) fn set_slope(&mut self, slope: Slope) {
        self.slope = slope;
    }

    pub(crate) fn needs_slope(&self) -> bool {
        self.needs_slope
    }

    pub(crate) fn mark_needs_slope(&mut self, needs: bool) {
        self.needs_slope = needs;
    }
}
