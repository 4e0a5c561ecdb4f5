// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape recording renderer.
//!
//! This crate provides [`RecordingRenderer`], an implementation of
//! [`Renderer`] for **draw call recording**:
//! - It does **not** rasterize to pixels.
//! - It serves sprites from tables filled in by the caller, keyed by tile grid
//!   position and by object id, with defaults for anything not listed.
//! - It measures text as fixed-size monospace glyphs.
//!
//! It is intended for tests and debugging that want to assert on the draw calls
//! an engine emits and the order it emits them in.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_map::Tile;
//! use isoscape_render::{ImageId, Renderer, Sprite, SpriteList};
//! use isoscape_render_ref::{Command, RecordingRenderer};
//! use kurbo::Point;
//!
//! let grass = Sprite::new(ImageId(1), 64, 32);
//! let mut renderer = RecordingRenderer::new().with_default_tile_sprite(grass);
//!
//! let mut sprites = SpriteList::new();
//! Renderer::<(), ()>::tile_sprites(&renderer, &Tile::new(()), &mut sprites);
//! assert_eq!(sprites.as_slice(), [grass]);
//!
//! Renderer::<(), ()>::draw_image(&mut renderer, ImageId(1), Point::new(3.0, 4.0));
//! assert_eq!(
//!     renderer.commands(),
//!     [Command::DrawImage { image: ImageId(1), at: Point::new(3.0, 4.0) }],
//! );
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use isoscape_index::ObjectId;
use isoscape_map::Tile;
use isoscape_render::{FontId, ImageId, Renderer, SceneObject, Sprite, SpriteList};
use kurbo::{Line, Point, Rect, Size, Vec2};
use peniko::Color;

/// Call recorded by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// [`Renderer::begin_frame`].
    BeginFrame,
    /// [`Renderer::end_frame`].
    EndFrame,
    /// [`Renderer::clear`].
    Clear,
    /// [`Renderer::clear_rect`].
    ClearRect(Rect),
    /// [`Renderer::set_clip`].
    SetClip(Rect),
    /// [`Renderer::draw_image`].
    DrawImage {
        /// Image drawn.
        image: ImageId,
        /// Top-left pixel.
        at: Point,
    },
    /// [`Renderer::draw_line`].
    DrawLine {
        /// Line drawn.
        line: Line,
        /// Requested color.
        color: Option<Color>,
    },
    /// [`Renderer::draw_text`].
    DrawText {
        /// Text drawn.
        text: String,
        /// Top-left corner.
        at: Point,
        /// Requested font.
        font: Option<FontId>,
        /// Requested color.
        color: Option<Color>,
    },
    /// [`Renderer::copy_area`].
    CopyArea {
        /// Source rectangle.
        src: Rect,
        /// Offset the pixels were moved by.
        delta: Vec2,
    },
}

/// Renderer that records every call as a [`Command`].
#[derive(Clone, Debug)]
pub struct RecordingRenderer {
    tile_sprites: HashMap<(i32, i32), SpriteList>,
    object_sprites: HashMap<ObjectId, Sprite>,
    default_tile_sprite: Option<Sprite>,
    default_object_sprite: Option<Sprite>,
    glyph: Size,
    commands: Vec<Command>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    /// Glyph size used by [`new`](Self::new).
    pub const GLYPH: Size = Size::new(8.0, 12.0);

    /// Creates a renderer with no sprites and 8x12 glyphs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tile_sprites: HashMap::new(),
            object_sprites: HashMap::new(),
            default_tile_sprite: None,
            default_object_sprite: None,
            glyph: Self::GLYPH,
            commands: Vec::new(),
        }
    }

    /// Sets the sprite used for tiles without their own entry.
    #[must_use]
    pub fn with_default_tile_sprite(mut self, sprite: Sprite) -> Self {
        self.default_tile_sprite = Some(sprite);
        self
    }

    /// Sets the sprite used for sprite objects without their own entry.
    #[must_use]
    pub fn with_default_object_sprite(mut self, sprite: Sprite) -> Self {
        self.default_object_sprite = Some(sprite);
        self
    }

    /// Sets the glyph size text is measured with.
    #[must_use]
    pub fn with_glyph_size(mut self, glyph: Size) -> Self {
        self.glyph = glyph;
        self
    }

    /// Replaces the sprite stack of the tile at padded grid position `(x, y)`.
    pub fn set_tile_sprites(&mut self, x: i32, y: i32, sprites: impl IntoIterator<Item = Sprite>) {
        self.tile_sprites.insert((x, y), sprites.into_iter().collect());
    }

    /// Sets the sprite of one object.
    pub fn set_object_sprite(&mut self, id: ObjectId, sprite: Sprite) {
        self.object_sprites.insert(id, sprite);
    }

    /// Returns the recorded commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Clears the recorded commands but keeps the sprite tables.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Removes and returns the recorded commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    /// Images drawn so far, with their positions, in order.
    pub fn drawn_images(&self) -> impl Iterator<Item = (ImageId, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::DrawImage { image, at } => Some((*image, *at)),
            _ => None,
        })
    }

    /// Text drawn so far, in order.
    pub fn drawn_text(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<D, U> Renderer<D, U> for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.commands.push(Command::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.commands.push(Command::EndFrame);
    }

    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(Command::ClearRect(rect));
    }

    fn set_clip(&mut self, rect: Rect) {
        self.commands.push(Command::SetClip(rect));
    }

    fn draw_image(&mut self, image: ImageId, at: Point) {
        self.commands.push(Command::DrawImage { image, at });
    }

    fn draw_line(&mut self, line: Line, color: Option<Color>) {
        self.commands.push(Command::DrawLine { line, color });
    }

    fn draw_text(&mut self, text: &str, at: Point, font: Option<FontId>, color: Option<Color>) {
        self.commands.push(Command::DrawText {
            text: text.to_string(),
            at,
            font,
            color,
        });
    }

    fn measure_text(&self, text: &str, _font: Option<FontId>) -> Size {
        let glyphs = text.chars().count() as f64;
        Size::new(glyphs * self.glyph.width, self.glyph.height)
    }

    fn copy_area(&mut self, src: Rect, delta: Vec2) {
        self.commands.push(Command::CopyArea { src, delta });
    }

    fn tile_sprites(&self, tile: &Tile<D>, out: &mut SpriteList) {
        match self.tile_sprites.get(&(tile.grid_x(), tile.grid_y())) {
            Some(sprites) => out.extend_from_slice(sprites),
            None => out.extend(self.default_tile_sprite),
        }
    }

    fn object_sprite(&self, id: ObjectId, _object: &SceneObject<U>) -> Option<Sprite> {
        self.object_sprites
            .get(&id)
            .copied()
            .or(self.default_object_sprite)
    }
}
