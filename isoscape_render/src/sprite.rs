// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_geom::RealPoint;
use isoscape_index::ScreenRect;
use smallvec::SmallVec;

/// Handle to an image owned by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Handle to a font owned by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// An image plus the pixel size and anchor used to place it.
///
/// The anchor is the pixel inside the image that sits on the projected
/// position of whatever the sprite depicts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sprite {
    /// Image to draw.
    pub image: ImageId,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Offset of the anchor pixel from the image's top-left corner.
    pub anchor: RealPoint,
}

impl Sprite {
    /// Creates a sprite anchored at its top-left corner.
    #[must_use]
    pub const fn new(image: ImageId, width: i32, height: i32) -> Self {
        Self {
            image,
            width,
            height,
            anchor: RealPoint::new(0, 0),
        }
    }

    /// Returns the sprite with its anchor moved to `(x, y)`.
    #[must_use]
    pub const fn with_anchor(mut self, x: i32, y: i32) -> Self {
        self.anchor = RealPoint::new(x, y);
        self
    }

    /// Screen rectangle covered when the anchor sits on `at`.
    #[must_use]
    pub const fn bounds_at(&self, at: RealPoint) -> ScreenRect {
        ScreenRect::from_origin_size(
            at.x - self.anchor.x,
            at.y - self.anchor.y,
            self.width,
            self.height,
        )
    }
}

/// Sprites stacked on one tile, bottom first.
pub type SpriteList = SmallVec<[Sprite; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_subtract_the_anchor() {
        let sprite = Sprite::new(ImageId(3), 64, 40).with_anchor(32, 36);
        let rect = sprite.bounds_at(RealPoint::new(100, 50));
        assert_eq!(rect, ScreenRect::from_origin_size(68, 14, 64, 40));
    }
}
