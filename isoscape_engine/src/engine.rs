// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use isoscape_geom::{Corners, OutsideTile, RealPoint, SlopeGeometry, TileMetrics, VirtualPoint};
use isoscape_index::SpatialIndex;
use isoscape_map::{HeightPolicy, Map, Tile, TileOutOfBounds};
use isoscape_render::{Drawable, SpriteList};
use isoscape_scene::{DrawOrder, SceneComposer};

use crate::EngineConfig;

/// Why an absolute height could not be computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeightError {
    /// The tile does not exist.
    Tile(TileOutOfBounds),
    /// The offset is outside the tile.
    Offset(OutsideTile),
}

impl fmt::Display for HeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile(err) => err.fmt(f),
            Self::Offset(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for HeightError {}

impl From<TileOutOfBounds> for HeightError {
    fn from(err: TileOutOfBounds) -> Self {
        Self::Tile(err)
    }
}

impl From<OutsideTile> for HeightError {
    fn from(err: OutsideTile) -> Self {
        Self::Offset(err)
    }
}

/// Tiles holding the four corners of a tile, relative to it.
const CORNER_TILES: [(i32, i32, Corners); 4] = [
    (0, 0, Corners::N),
    (0, 1, Corners::E),
    (1, 0, Corners::W),
    (1, 1, Corners::S),
];

/// A height-mapped isometric world with a scrollable viewport.
///
/// Built by [`EngineBuilder`](crate::EngineBuilder). Tiles are addressed with
/// logical coordinates, `(0, 0)` being the first playable tile; objects are
/// placed in logical virtual coordinates, `L = tile_width / 4` units per tile.
pub struct Engine<D, U, R, P> {
    pub(crate) config: EngineConfig,
    pub(crate) metrics: TileMetrics,
    pub(crate) geometry: SlopeGeometry,
    pub(crate) map: Map<D>,
    pub(crate) index: SpatialIndex<Drawable<U>>,
    pub(crate) scene: SceneComposer,
    pub(crate) renderer: R,
    pub(crate) policy: P,
    pub(crate) sprite_order: Box<dyn DrawOrder<U>>,
    pub(crate) text_order: Box<dyn DrawOrder<U>>,
    /// Viewport center on the ground plane, in the padded virtual frame.
    pub(crate) center: VirtualPoint,
    /// Absolute pixel of the viewport's top-left corner.
    pub(crate) offset: RealPoint,
    pub(crate) tile_sprites: SpriteList,
}

impl<D, U, R: fmt::Debug, P: fmt::Debug> fmt::Debug for Engine<D, U, R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("objects", &self.index.len())
            .field("renderer", &self.renderer)
            .field("policy", &self.policy)
            .field("center", &self.center)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl<D, U, R, P> Engine<D, U, R, P> {
    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tile pixel metrics.
    #[must_use]
    pub fn metrics(&self) -> &TileMetrics {
        &self.metrics
    }

    /// The padded tile grid.
    #[must_use]
    pub fn map(&self) -> &Map<D> {
        &self.map
    }

    /// The object index. Positions in it are in the padded virtual frame.
    #[must_use]
    pub fn index(&self) -> &SpatialIndex<Drawable<U>> {
        &self.index
    }

    /// The scene composed by the last [`draw`](Self::draw).
    #[must_use]
    pub fn scene(&self) -> &SceneComposer {
        &self.scene
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably, e.g. to change the sprites it hands out.
    ///
    /// Objects whose sprite size changes must be reported with
    /// [`object_resized`](Self::object_resized).
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The height policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The height policy, mutably.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Virtual units between the padded frame and the logical one.
    pub(crate) fn margin_units(&self) -> i32 {
        self.config.max_height * self.metrics.unit()
    }

    /// Whether logical `(x, y)` names a tile, boundary row and column included.
    #[must_use]
    pub fn is_valid_tile(&self, x: i32, y: i32) -> bool {
        self.map.is_valid_tile(x, y)
    }

    /// Tile at logical `(x, y)`.
    pub fn tile(&self, x: i32, y: i32) -> Result<&Tile<D>, TileOutOfBounds> {
        self.map.tile(x, y)
    }

    /// Mutable tile at logical `(x, y)`.
    ///
    /// Only the payload and visibility can change through it.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Result<&mut Tile<D>, TileOutOfBounds> {
        self.map.tile_mut(x, y)
    }

    /// Height of the lowest corner of logical tile `(x, y)`, in steps.
    pub fn tile_min_height(&self, x: i32, y: i32) -> Result<i32, TileOutOfBounds> {
        self.map.tile(x, y).map(Tile::min_height)
    }

    /// Elevation of the surface point `(fx, fy)` of logical tile `(x, y)`.
    ///
    /// `fx` and `fy` are virtual units inside the tile, in `[0, L)`. The result
    /// is in pixels of slope height above the ground plane.
    pub fn absolute_height(&self, x: i32, y: i32, fx: i32, fy: i32) -> Result<i32, HeightError> {
        let tile = self.map.tile(x, y)?;
        let relative = self.metrics.height_on_slope(tile.slope(), fx, fy)?;
        Ok(relative + tile.min_height() * self.metrics.slope_height())
    }
}

impl<D, U, R, P: HeightPolicy<D>> Engine<D, U, R, P> {
    /// Whether logical tile `(x, y)` can move to height `z`, neighbors and
    /// policy permitting.
    pub fn can_set_tile_height(&mut self, x: i32, y: i32, z: i32) -> Result<bool, TileOutOfBounds> {
        if !self.map.is_valid_tile(x, y) {
            return Err(TileOutOfBounds { x, y });
        }
        let (gx, gy) = self.map.to_grid(x, y);
        Ok(self.map.can_set_height(gx, gy, z, &mut self.policy))
    }

    /// Moves logical tile `(x, y)` to height `z`, adjusting neighbors and slopes.
    ///
    /// The policy is notified of every change but not asked for permission;
    /// see [`can_set_tile_height`](Self::can_set_tile_height).
    pub fn set_tile_height(&mut self, x: i32, y: i32, z: i32) -> Result<(), TileOutOfBounds> {
        if !self.map.is_valid_tile(x, y) {
            return Err(TileOutOfBounds { x, y });
        }
        let (gx, gy) = self.map.to_grid(x, y);
        self.map.set_height(gx, gy, z, &mut self.policy);
        Ok(())
    }

    /// Raises (or, with a negative `delta`, lowers) all four corners of
    /// logical tile `(x, y)` by `delta` steps, keeping its shape.
    ///
    /// Each corner is moved only if its target height is in range and the
    /// edit is allowed. Returns whether all four corners moved.
    pub fn shift_tile_corners(&mut self, x: i32, y: i32, delta: i32) -> Result<bool, TileOutOfBounds> {
        let tile = self.map.tile(x, y)?;
        let (slope, base) = (tile.slope(), tile.min_height());
        let targets = CORNER_TILES
            .map(|(dx, dy, corner)| (x + dx, y + dy, base + slope.corner_offset(corner) + delta));
        Ok(self.apply_corner_heights(targets))
    }

    /// Moves all four corners of logical tile `(x, y)` to height `z`,
    /// flattening it.
    ///
    /// Follows the same rules as [`shift_tile_corners`](Self::shift_tile_corners).
    pub fn level_tile_corners(&mut self, x: i32, y: i32, z: i32) -> Result<bool, TileOutOfBounds> {
        if !self.map.is_valid_tile(x, y) {
            return Err(TileOutOfBounds { x, y });
        }
        let targets = CORNER_TILES.map(|(dx, dy, _)| (x + dx, y + dy, z));
        Ok(self.apply_corner_heights(targets))
    }

    fn apply_corner_heights(&mut self, targets: [(i32, i32, i32); 4]) -> bool {
        let mut applied = true;
        for (x, y, z) in targets {
            if !(0..=self.config.max_height).contains(&z) || !self.map.is_valid_tile(x, y) {
                applied = false;
                continue;
            }
            let (gx, gy) = self.map.to_grid(x, y);
            if self.map.can_set_height(gx, gy, z, &mut self.policy) {
                self.map.set_height(gx, gy, z, &mut self.policy);
            } else {
                applied = false;
            }
        }
        applied
    }
}
