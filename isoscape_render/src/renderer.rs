// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_index::ObjectId;
use isoscape_map::Tile;
use kurbo::{Line, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::{FontId, ImageId, SceneObject, Sprite, SpriteList};

/// Drawing backend and sprite source for an engine.
///
/// `D` is the tile payload and `U` the scene object data. Everything is drawn
/// in viewport pixels, with the origin at the viewport's top-left corner.
///
/// The sprite queries must give the same answers throughout one draw pass, and
/// [`measure_text`](Self::measure_text) may overestimate but never underestimate,
/// since its result decides whether a label is culled.
pub trait Renderer<D, U> {
    /// Called before anything is drawn for a frame.
    fn begin_frame(&mut self) {}

    /// Called after everything is drawn for a frame.
    fn end_frame(&mut self) {}

    /// Clears the whole target.
    fn clear(&mut self);

    /// Clears one rectangle.
    fn clear_rect(&mut self, rect: Rect);

    /// Restricts drawing to `rect` until the next call.
    fn set_clip(&mut self, rect: Rect);

    /// Draws an image with its top-left pixel at `at`.
    fn draw_image(&mut self, image: ImageId, at: Point);

    /// Draws a one pixel line; `None` uses the default color.
    fn draw_line(&mut self, line: Line, color: Option<Color>);

    /// Draws text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Point, font: Option<FontId>, color: Option<Color>);

    /// Size `text` takes when drawn in `font`.
    fn measure_text(&self, text: &str, font: Option<FontId>) -> Size;

    /// Copies the pixels under `src` by `delta`. Overlapping areas must work.
    fn copy_area(&mut self, src: Rect, delta: Vec2);

    /// Appends the sprites stacked on `tile`, bottom first.
    ///
    /// Only the first few entries are drawn; the engine truncates the list to
    /// its per-tile capacity.
    fn tile_sprites(&self, tile: &Tile<D>, out: &mut SpriteList);

    /// Sprite for a sprite object, or `None` to skip it.
    fn object_sprite(&self, id: ObjectId, object: &SceneObject<U>) -> Option<Sprite>;
}
