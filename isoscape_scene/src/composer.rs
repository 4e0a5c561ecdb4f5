// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::vec::Vec;

use isoscape_geom::{RealPoint, to_real};
use isoscape_index::{CellId, ObjectId, ScreenRect, SpatialIndex};
use isoscape_render::{Drawable, ImageId, ObjectKind, Renderer, SceneObject};
use kurbo::{Line, Point};
use peniko::Color;
use smallvec::SmallVec;

use crate::DrawOrder;
use crate::order::selection_sort;

const TEXT_BOX_COLOR: Color = Color::from_rgba8(255, 80, 80, 220);

/// Where an object lands on screen, in absolute pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Footprint {
    /// A sprite object and the image it draws.
    Sprite {
        /// Image to draw.
        image: ImageId,
        /// Covered rectangle.
        bounds: ScreenRect,
    },
    /// A text object, centered on its position.
    Text {
        /// Covered rectangle.
        bounds: ScreenRect,
    },
}

impl Footprint {
    /// Covered rectangle.
    #[must_use]
    pub const fn bounds(&self) -> ScreenRect {
        match self {
            Self::Sprite { bounds, .. } | Self::Text { bounds } => *bounds,
        }
    }
}

/// Computes where `object` is drawn, or `None` if the renderer has no sprite
/// for it.
///
/// Sprites hang from their anchor at the projected position. Text is centered
/// on it, using the measured size rounded up.
pub fn footprint<D, U, R>(renderer: &R, id: ObjectId, object: &SceneObject<U>) -> Option<Footprint>
where
    R: Renderer<D, U> + ?Sized,
{
    let at = to_real(object.position());
    match &object.payload.kind {
        ObjectKind::Sprite => renderer.object_sprite(id, object).map(|sprite| Footprint::Sprite {
            image: sprite.image,
            bounds: sprite.bounds_at(at),
        }),
        ObjectKind::Text(label) => {
            let size = renderer.measure_text(&label.text, label.font).ceil();
            #[expect(
                clippy::cast_possible_truncation,
                reason = "text extents are small whole pixel counts after ceil"
            )]
            let (width, height) = (size.width as i32, size.height as i32);
            Some(Footprint::Text {
                bounds: ScreenRect::from_origin_size(
                    at.x - width / 2,
                    at.y - height / 2,
                    width,
                    height,
                ),
            })
        }
    }
}

fn draws_before<U>(
    index: &SpatialIndex<Drawable<U>>,
    order: &(impl DrawOrder<U> + ?Sized),
    a: ObjectId,
    b: ObjectId,
) -> bool {
    match (index.get(a), index.get(b)) {
        (Some(a), Some(b)) => order.draws_before(a, b),
        _ => false,
    }
}

/// A collected sprite object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteEntry {
    /// Object drawn.
    pub object: ObjectId,
    /// Image drawn.
    pub image: ImageId,
    /// Viewport-relative top-left pixel.
    pub position: RealPoint,
    /// Viewport-relative projection of the object's position.
    pub anchor: RealPoint,
}

/// A collected text object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextEntry {
    /// Object drawn.
    pub object: ObjectId,
    /// Viewport-relative box of the text.
    pub bounds: ScreenRect,
}

/// Per-frame collection and ordering of the scene objects in view.
///
/// Buffers are allocated once with fixed capacities. Objects that do not fit
/// are dropped for the frame with a warning.
#[derive(Clone, Debug)]
pub struct SceneComposer {
    sprites: Vec<SpriteEntry>,
    texts: Vec<TextEntry>,
    sprite_capacity: usize,
    text_capacity: usize,
    dropped: usize,
}

impl SceneComposer {
    /// Creates a composer holding at most `sprite_capacity` sprites and
    /// `text_capacity` texts per frame.
    #[must_use]
    pub fn new(sprite_capacity: usize, text_capacity: usize) -> Self {
        Self {
            sprites: Vec::with_capacity(sprite_capacity),
            texts: Vec::with_capacity(text_capacity),
            sprite_capacity,
            text_capacity,
            dropped: 0,
        }
    }

    /// Sprites of the last composed frame, in draw order.
    #[must_use]
    pub fn sprites(&self) -> &[SpriteEntry] {
        &self.sprites
    }

    /// Texts of the last composed frame, in draw order.
    #[must_use]
    pub fn texts(&self) -> &[TextEntry] {
        &self.texts
    }

    /// Number of objects dropped from the last frame for lack of room.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Collects and orders the objects visible in `viewport`.
    ///
    /// `viewport` is in absolute pixels. Hidden objects, objects without a
    /// sprite and objects entirely outside the viewport are skipped. Selection
    /// flags are used to visit each object once and are all cleared again
    /// before this returns.
    pub fn compose<D, U, R>(
        &mut self,
        index: &mut SpatialIndex<Drawable<U>>,
        renderer: &R,
        viewport: ScreenRect,
        sprite_order: &(impl DrawOrder<U> + ?Sized),
        text_order: &(impl DrawOrder<U> + ?Sized),
    ) where
        R: Renderer<D, U> + ?Sized,
    {
        self.sprites.clear();
        self.texts.clear();
        self.dropped = 0;

        let cells: SmallVec<[CellId; 16]> = index
            .layout()
            .cells_in(viewport.x0, viewport.y0, viewport.x1 - 1, viewport.y1 - 1)
            .collect();
        let origin = RealPoint::new(viewport.x0, viewport.y0);
        for &cell in &cells {
            let mut cursor = index.cell_head(cell);
            while let Some((id, role)) = cursor {
                cursor = index.next_in_cell(id, role);
                self.collect(index, renderer, viewport, origin, id);
            }
        }
        for &cell in &cells {
            let mut cursor = index.cell_head(cell);
            while let Some((id, role)) = cursor {
                cursor = index.next_in_cell(id, role);
                index.set_selected(id, false);
            }
        }

        let index = &*index;
        selection_sort(&mut self.sprites, |a, b| {
            draws_before(index, sprite_order, a.object, b.object)
        });
        selection_sort(&mut self.texts, |a, b| {
            draws_before(index, text_order, a.object, b.object)
        });
    }

    /// Adds object `id` to the frame if it is visible, not yet collected and
    /// touches the viewport.
    fn collect<D, U, R>(
        &mut self,
        index: &mut SpatialIndex<Drawable<U>>,
        renderer: &R,
        viewport: ScreenRect,
        origin: RealPoint,
        id: ObjectId,
    ) where
        R: Renderer<D, U> + ?Sized,
    {
        let Some(object) = index.get(id) else {
            return;
        };
        if !object.is_visible() || object.is_selected() {
            return;
        }
        let Some(footprint) = footprint(renderer, id, object) else {
            return;
        };
        let anchor = to_real(object.position()) - origin;
        let bounds = footprint.bounds().relative_to(origin);
        if !bounds.touches_viewport(viewport.width(), viewport.height()) {
            return;
        }
        index.set_selected(id, true);
        match footprint {
            Footprint::Sprite { image, .. } if self.sprites.len() < self.sprite_capacity => {
                self.sprites.push(SpriteEntry {
                    object: id,
                    image,
                    position: RealPoint::new(bounds.x0, bounds.y0),
                    anchor,
                });
            }
            Footprint::Text { .. } if self.texts.len() < self.text_capacity => {
                self.texts.push(TextEntry { object: id, bounds });
            }
            Footprint::Sprite { .. } => {
                self.dropped += 1;
                tracing::warn!(
                    capacity = self.sprite_capacity,
                    ?id,
                    "sprite buffer full, object not drawn"
                );
            }
            Footprint::Text { .. } => {
                self.dropped += 1;
                tracing::warn!(
                    capacity = self.text_capacity,
                    ?id,
                    "text buffer full, object not drawn"
                );
            }
        }
    }

    /// Draws the composed frame: sprites first, then texts.
    ///
    /// With `debug` set, each sprite is labelled with its draw index at its
    /// object's projected position and text boxes are outlined.
    pub fn draw<D, U, R>(&self, index: &SpatialIndex<Drawable<U>>, renderer: &mut R, debug: bool)
    where
        R: Renderer<D, U> + ?Sized,
    {
        for entry in &self.sprites {
            renderer.draw_image(entry.image, entry.position.to_kurbo());
        }
        for entry in &self.texts {
            let Some(label) = index.get(entry.object).and_then(|o| o.payload.label()) else {
                continue;
            };
            let at = Point::new(f64::from(entry.bounds.x0), f64::from(entry.bounds.y0));
            renderer.draw_text(&label.text, at, label.font, label.color);
        }
        if !debug {
            return;
        }
        for (i, entry) in self.sprites.iter().enumerate() {
            renderer.draw_text(&format!("{i}"), entry.anchor.to_kurbo(), None, None);
        }
        for (i, entry) in self.texts.iter().enumerate() {
            let r = entry.bounds;
            let (x0, y0) = (f64::from(r.x0), f64::from(r.y0));
            let (x1, y1) = (f64::from(r.x1), f64::from(r.y1));
            for line in [
                Line::new((x0, y0), (x1, y0)),
                Line::new((x1, y0), (x1, y1)),
                Line::new((x1, y1), (x0, y1)),
                Line::new((x0, y1), (x0, y0)),
            ] {
                renderer.draw_line(line, Some(TEXT_BOX_COLOR));
            }
            renderer.draw_text(&format!("{i}"), Point::new(x1, y0), None, Some(TEXT_BOX_COLOR));
        }
    }
}
