// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_geom::{VirtualPoint, floor_div_rem};
use isoscape_index::ObjectId;
use isoscape_render::{Drawable, ObjectKind, Renderer, SceneObject};
use isoscape_scene::footprint;

use crate::Engine;

impl<D, U, R, P> Engine<D, U, R, P> {
    fn to_padded(&self, position: VirtualPoint) -> VirtualPoint {
        let margin = self.margin_units();
        position + VirtualPoint::ground(margin, margin)
    }

    /// The object for `id`, if live.
    ///
    /// Its [`position`](isoscape_index::IsoObject::position) is in the padded
    /// frame; use [`object_position`](Self::object_position) for the logical one.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject<U>> {
        self.index.get(id)
    }

    /// The object's drawable payload, mutably.
    ///
    /// Call [`object_resized`](Self::object_resized) after changes that alter
    /// what is drawn, such as a new text.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Drawable<U>> {
        self.index.payload_mut(id)
    }

    /// Logical virtual position of an object.
    #[must_use]
    pub fn object_position(&self, id: ObjectId) -> Option<VirtualPoint> {
        let margin = self.margin_units();
        self.index
            .get(id)
            .map(|o| o.position() - VirtualPoint::ground(margin, margin))
    }

    /// Logical tile the object stands on.
    ///
    /// Objects off the map report tiles off the map.
    #[must_use]
    pub fn object_tile(&self, id: ObjectId) -> Option<(i32, i32)> {
        let unit = self.metrics.unit();
        self.object_position(id)
            .map(|p| (floor_div_rem(p.x, unit).0, floor_div_rem(p.y, unit).0))
    }

    /// Shows or hides an object. Returns `false` for stale ids.
    pub fn set_object_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        self.index.set_visible(id, visible)
    }

    /// Removes an object, returning its payload.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Drawable<U>> {
        self.index.remove(id)
    }
}

impl<D, U, R: Renderer<D, U>, P> Engine<D, U, R, P> {
    /// Adds an object at logical virtual `position`.
    ///
    /// `position.z` must not be negative.
    pub fn insert_object(&mut self, position: VirtualPoint, kind: ObjectKind, data: U) -> ObjectId {
        let id = self
            .index
            .insert(self.to_padded(position), Drawable::new(kind, data));
        self.relink(id);
        id
    }

    /// Moves an object to logical virtual `position`. Returns `false` for
    /// stale ids.
    pub fn set_object_position(&mut self, id: ObjectId, position: VirtualPoint) -> bool {
        let padded = self.to_padded(position);
        self.index.set_position(id, padded) && self.relink(id)
    }

    /// Re-reads an object's sprite or text size from the renderer. Returns
    /// `false` for stale ids.
    pub fn object_resized(&mut self, id: ObjectId) -> bool {
        self.relink(id)
    }

    /// Links an object into the cells under its current footprint.
    ///
    /// Objects the renderer has no sprite for are unlinked and so never drawn.
    fn relink(&mut self, id: ObjectId) -> bool {
        let Some(object) = self.index.get(id) else {
            return false;
        };
        let Some(footprint) = footprint::<D, U, R>(&self.renderer, id, object) else {
            self.index.unlink(id);
            return true;
        };
        let bounds = footprint.bounds();
        if self.config.debug {
            self.index
                .layout()
                .check_object_limits(bounds.width(), bounds.height());
        }
        self.index.place(id, bounds)
    }
}
