// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;

use isoscape_geom::{RealPoint, VirtualPoint, to_real};
use isoscape_index::ScreenRect;
use isoscape_render::Renderer;
use kurbo::{Line, Point, Rect};
use peniko::Color;

use crate::Engine;

/// Arm length of the debug cross at the viewport center, end to end.
const CROSS_SIZE: f64 = 12.0;

const GRID_COLOR: Color = Color::from_rgba8(80, 200, 255, 160);
const CROSS_COLOR: Color = Color::from_rgba8(255, 255, 0, 255);

/// Slack around the viewport when looking for visible tiles; resolution is
/// only accurate to a couple of pixels.
const TILE_SLACK: i32 = 2;

impl<D, U, R: Renderer<D, U>, P> Engine<D, U, R, P> {
    /// Draws one frame: tiles, then scene objects, then the debug overlay if
    /// enabled.
    pub fn draw(&mut self) {
        let (vw, vh) = (self.config.viewport_width, self.config.viewport_height);
        self.renderer.begin_frame();
        self.renderer
            .set_clip(Rect::new(0.0, 0.0, f64::from(vw), f64::from(vh)));
        self.renderer.clear();

        self.draw_tiles();

        let viewport = ScreenRect::from_origin_size(self.offset.x, self.offset.y, vw, vh);
        self.scene.compose::<D, U, R>(
            &mut self.index,
            &self.renderer,
            viewport,
            &*self.sprite_order,
            &*self.text_order,
        );
        self.scene
            .draw::<D, U, R>(&self.index, &mut self.renderer, self.config.debug);

        if self.config.debug {
            self.draw_overlay();
        }
        self.renderer.end_frame();
    }

    /// Grid range of the tiles that may show in the viewport, inclusive.
    fn visible_tiles(&self) -> (RealPoint, RealPoint) {
        let (vw, vh) = (self.config.viewport_width, self.config.viewport_height);
        let (near, far) = (-TILE_SLACK, TILE_SLACK - 1);
        let margin = self.config.max_height;
        let min_y = self.locate(RealPoint::new(near, near)).y.max(margin);
        let min_x = self.locate(RealPoint::new(vw + far, near)).x.max(margin);
        let max_y = self
            .locate(RealPoint::new(vw + far, vh + far))
            .y
            .min(margin + self.config.map_height - 1);
        let max_x = self
            .locate(RealPoint::new(near, vh + far))
            .x
            .min(margin + self.config.map_width - 1);
        (RealPoint::new(min_x, min_y), RealPoint::new(max_x, max_y))
    }

    fn draw_tiles(&mut self) {
        let (vw, vh) = (self.config.viewport_width, self.config.viewport_height);
        let unit = self.metrics.unit();
        let sh = self.metrics.slope_height();
        let (min, max) = self.visible_tiles();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let Some(tile) = self.map.get(x, y) else {
                    continue;
                };
                if !tile.is_visible() {
                    continue;
                }
                self.tile_sprites.clear();
                self.renderer.tile_sprites(tile, &mut self.tile_sprites);
                self.tile_sprites.truncate(self.config.sprites_per_tile);
                let at = to_real(VirtualPoint::new(x * unit, y * unit, tile.height() * sh));
                for sprite in &self.tile_sprites {
                    let bounds = sprite.bounds_at(at).relative_to(self.offset);
                    if !bounds.touches_viewport(vw, vh) {
                        continue;
                    }
                    let origin = RealPoint::new(bounds.x0, bounds.y0);
                    self.renderer.draw_image(sprite.image, origin.to_kurbo());
                }
            }
        }
    }

    fn draw_overlay(&mut self) {
        let (vw, vh) = (self.config.viewport_width, self.config.viewport_height);
        for (_, (column, row), bounds) in self.index.layout().cells() {
            let cell = bounds.relative_to(self.offset);
            if !cell.touches_viewport(vw, vh) {
                continue;
            }
            let (x0, y0) = (f64::from(cell.x0), f64::from(cell.y0));
            let (x1, y1) = (f64::from(cell.x1), f64::from(cell.y1));
            self.renderer
                .draw_line(Line::new((x0, y0), (x1, y0)), Some(GRID_COLOR));
            self.renderer
                .draw_line(Line::new((x0, y0), (x0, y1)), Some(GRID_COLOR));
            self.renderer.draw_text(
                &format!("({column},{row})"),
                Point::new(x0 + 2.0, y0 + 2.0),
                None,
                Some(GRID_COLOR),
            );
        }

        let (cx, cy) = (f64::from(vw / 2), f64::from(vh / 2));
        let arm = CROSS_SIZE / 2.0;
        self.renderer
            .draw_line(Line::new((cx - arm, cy), (cx + arm, cy)), Some(CROSS_COLOR));
        self.renderer
            .draw_line(Line::new((cx, cy - arm), (cx, cy + arm)), Some(CROSS_COLOR));

        let center = self.viewport_center();
        let offset = self.offset;
        let status = format!(
            "offset [{}, {}] to [{}, {}] center [{}, {}]",
            offset.x,
            offset.y,
            offset.x + vw - 1,
            offset.y + vh - 1,
            center.x,
            center.y
        );
        self.renderer.draw_text(&status, Point::ORIGIN, None, None);
    }
}
