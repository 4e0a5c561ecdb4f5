// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Largest supported tile height, in steps.
pub const MAX_TILE_HEIGHT: i32 = 15;

/// Largest padded grid side, in tiles.
pub const MAX_GRID_SIDE: i32 = 256;

/// Engine settings.
///
/// Validated when the engine is built; see [`validate`](Self::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tile image width in pixels. Greater than 8 and a multiple of 4.
    pub tile_width: i32,
    /// Tile image height in pixels. Half the width.
    pub tile_height: i32,
    /// Highest tile height, in steps, at most 15.
    pub max_height: i32,
    /// Map width in tiles.
    pub map_width: i32,
    /// Map height in tiles.
    pub map_height: i32,
    /// Pixels per height step.
    pub slope_height: i32,
    /// Viewport width in pixels.
    pub viewport_width: i32,
    /// Viewport height in pixels.
    pub viewport_height: i32,
    /// Most sprite objects drawn per frame.
    pub sprite_capacity: usize,
    /// Most text objects drawn per frame.
    pub text_capacity: usize,
    /// Most sprites drawn per tile.
    pub sprites_per_tile: usize,
    /// Draws the debug overlay and checks object sizes against the index.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_width: 64,
            tile_height: 32,
            max_height: 4,
            map_width: 32,
            map_height: 32,
            slope_height: 8,
            viewport_width: 640,
            viewport_height: 480,
            sprite_capacity: 50,
            text_capacity: 10,
            sprites_per_tile: 2,
            debug: false,
        }
    }
}

impl EngineConfig {
    /// Checks the settings, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.tile_width, self.tile_height);
        if w <= 8 || w % 4 != 0 || h != w / 2 {
            return Err(ConfigError::TileSize {
                width: w,
                height: h,
            });
        }
        if !(0..=MAX_TILE_HEIGHT).contains(&self.max_height) {
            return Err(ConfigError::MaxHeight(self.max_height));
        }
        if self.map_width <= 0 || self.map_height <= 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map_width,
                height: self.map_height,
            });
        }
        let columns = self.map_width + 2 * self.max_height + 1;
        let rows = self.map_height + 2 * self.max_height + 1;
        if columns > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
            return Err(ConfigError::MapTooLarge { columns, rows });
        }
        if self.slope_height <= 0 {
            return Err(ConfigError::SlopeHeight(self.slope_height));
        }
        if self.viewport_width < 8 || self.viewport_height < 8 {
            return Err(ConfigError::ViewportTooSmall {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }
}

/// A collaborator the engine cannot run without.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Collaborator {
    /// The [`Renderer`](isoscape_render::Renderer).
    Renderer,
    /// The [`HeightPolicy`](isoscape_map::HeightPolicy).
    HeightPolicy,
    /// The [`TileFactory`](isoscape_map::TileFactory).
    TileFactory,
    /// The draw order for sprite objects.
    SpriteOrder,
    /// The draw order for text objects.
    TextOrder,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Renderer => "renderer",
            Self::HeightPolicy => "height policy",
            Self::TileFactory => "tile factory",
            Self::SpriteOrder => "sprite draw order",
            Self::TextOrder => "text draw order",
        })
    }
}

/// Why an engine could not be built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Tile width not above 8, not a multiple of 4, or height not half of it.
    TileSize {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
    },
    /// Max height outside `0..=15`.
    MaxHeight(i32),
    /// Map without tiles.
    EmptyMap {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
    },
    /// Padded grid larger than 256 tiles on a side.
    MapTooLarge {
        /// Padded column count.
        columns: i32,
        /// Padded row count.
        rows: i32,
    },
    /// Slope height not positive.
    SlopeHeight(i32),
    /// Viewport narrower or shorter than 8 pixels.
    ViewportTooSmall {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
    },
    /// A required collaborator was not supplied.
    MissingCollaborator(Collaborator),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileSize { width, height } => write!(
                f,
                "tile size {width}x{height} must be wider than 8, a multiple of 4 and twice as wide as high"
            ),
            Self::MaxHeight(z) => {
                write!(f, "max height {z} is outside 0..={MAX_TILE_HEIGHT}")
            }
            Self::EmptyMap { width, height } => write!(f, "map size {width}x{height} is empty"),
            Self::MapTooLarge { columns, rows } => write!(
                f,
                "padded map of {columns}x{rows} tiles exceeds {MAX_GRID_SIDE} per side"
            ),
            Self::SlopeHeight(h) => write!(f, "slope height {h} must be positive"),
            Self::ViewportTooSmall { width, height } => {
                write!(f, "viewport {width}x{height} is smaller than 8x8")
            }
            Self::MissingCollaborator(c) => write!(f, "no {c} was supplied"),
        }
    }
}

impl core::error::Error for ConfigError {}
