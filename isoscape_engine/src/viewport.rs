// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_geom::{RealPoint, VirtualPoint, clamp, to_real, to_virtual};

use crate::{Engine, HeightError};

impl<D, U, R, P> Engine<D, U, R, P> {
    fn half_viewport(&self) -> RealPoint {
        RealPoint::new(
            self.config.viewport_width / 2,
            self.config.viewport_height / 2,
        )
    }

    /// Clamps a padded ground point to the map, reporting whether it moved.
    fn clamp_center(&self, v: VirtualPoint) -> (VirtualPoint, bool) {
        let unit = self.metrics.unit();
        let margin = self.margin_units();
        let x = clamp(v.x, margin, margin + self.config.map_width * unit - 1);
        let y = clamp(v.y, margin, margin + self.config.map_height * unit - 1);
        (
            VirtualPoint::ground(x.value, y.value),
            x.was_clamped() || y.was_clamped(),
        )
    }

    fn center_on(&mut self, center: VirtualPoint) {
        self.center = center;
        self.offset = to_real(center) - self.half_viewport();
        self.check_viewport();
    }

    fn check_viewport(&self) {
        debug_assert!(
            self.index
                .layout()
                .is_viewport_position_valid(self.offset.x, self.offset.y),
            "viewport at {:?} leaves the object grid",
            self.offset
        );
    }

    /// Ground point under the middle of the viewport, in logical virtual
    /// coordinates.
    #[must_use]
    pub fn viewport_center(&self) -> VirtualPoint {
        let v = to_virtual(self.offset + self.half_viewport());
        let margin = self.margin_units();
        VirtualPoint::ground(v.x - margin, v.y - margin)
    }

    /// Absolute pixel at the viewport's top-left corner.
    #[must_use]
    pub fn viewport_offset(&self) -> RealPoint {
        self.offset
    }

    /// Moves the viewport by `(dx, dy)` pixels.
    ///
    /// The center stays on the map. A move that would leave it is cut short,
    /// and one that cannot move it at all is dropped.
    pub fn scroll_by_screen_delta(&mut self, dx: i32, dy: i32) {
        let half = self.half_viewport();
        let delta = RealPoint::new(dx, dy);
        let before = to_virtual(self.offset + half);
        self.offset = self.offset + delta;
        let (center, clamped) = self.clamp_center(to_virtual(self.offset + half));
        self.center = center;
        if clamped {
            if center == before {
                self.offset = self.offset - delta;
            } else {
                self.offset = to_real(center) - half;
            }
        }
        self.check_viewport();
    }

    /// Moves the viewport center by `(dx, dy)` virtual units.
    pub fn scroll_by_virtual_delta(&mut self, dx: i32, dy: i32) {
        let (center, _) = self.clamp_center(self.center + VirtualPoint::ground(dx, dy));
        self.center_on(center);
    }

    /// Centers the viewport on logical virtual point `target`.
    ///
    /// The point is projected onto the ground plane along the screen's
    /// vertical, so raised points are shown where they are drawn. `target.z`
    /// must not be negative.
    pub fn scroll_to(&mut self, target: VirtualPoint) {
        let margin = self.margin_units();
        let padded = target + VirtualPoint::ground(margin, margin);
        let (center, _) = self.clamp_center(to_virtual(to_real(padded)));
        self.center_on(center);
    }

    /// Centers the viewport on the middle of logical tile `(x, y)`, at its
    /// surface height.
    pub fn scroll_to_tile(&mut self, x: i32, y: i32) -> Result<(), HeightError> {
        let unit = self.metrics.unit();
        let half = unit / 2;
        let z = self.absolute_height(x, y, half, half)?;
        let (gx, gy) = self.map.to_grid(x, y);
        let surface = VirtualPoint::new(gx * unit + half, gy * unit + half, z);
        let (center, _) = self.clamp_center(to_virtual(to_real(surface)));
        self.center_on(center);
        Ok(())
    }
}
