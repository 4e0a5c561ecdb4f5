// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition of the reachable screen area into grid cells.
//!
//! The viewport center can roam over the whole map diamond, so the pixels any
//! valid viewport may cover form an octagon: the map diamond grown by half a
//! viewport on every side. The octagon's bounding box is cut into square cells
//! and, per row, only the columns the octagon reaches are kept.

use alloc::vec::Vec;

use isoscape_geom::{RealPoint, VirtualPoint, to_real};

use crate::{CellId, ScreenRect};

/// Slack, in pixels, added around the reachable area for sloped tiles.
const PADDING: i32 = 2;

/// Smallest cell side, in pixels.
const MIN_CELL_SIZE: i32 = 200;

/// Screen positions of the extreme corners of the playable map diamond.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapCorners {
    /// Topmost corner.
    pub north: RealPoint,
    /// Rightmost corner.
    pub east: RealPoint,
    /// Bottom corner.
    pub south: RealPoint,
    /// Leftmost corner.
    pub west: RealPoint,
}

impl MapCorners {
    /// Corners of a `width x height` map of `unit`-sized tiles whose playable
    /// area starts `margin` tiles into the padded grid.
    #[must_use]
    pub fn for_map(unit: i32, margin: i32, width: i32, height: i32) -> Self {
        let lo = margin * unit;
        let hi_x = (margin + width) * unit - 1;
        let hi_y = (margin + height) * unit - 1;
        Self {
            north: to_real(VirtualPoint::ground(lo, lo)),
            east: to_real(VirtualPoint::ground(lo, hi_y)),
            south: to_real(VirtualPoint::ground(hi_x, hi_y)),
            west: to_real(VirtualPoint::ground(hi_x, lo)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct RowSpan {
    /// First column present in the row.
    first: i32,
    /// Number of columns present.
    len: i32,
    /// Dense index of the row's first cell.
    start: u32,
}

/// The octagon reachable by the viewport, counter-clockwise from the top-left.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Octagon {
    /// Left end of the top edge.
    a: RealPoint,
    /// Right end of the top edge.
    b: RealPoint,
    /// Top of the right edge.
    c: RealPoint,
    /// Bottom of the right edge.
    d: RealPoint,
    /// Right end of the bottom edge.
    e: RealPoint,
    /// Top of the left edge.
    h: RealPoint,
    /// Bottom of the left edge.
    g: RealPoint,
}

impl Octagon {
    fn new(corners: &MapCorners, viewport_width: i32, viewport_height: i32) -> Self {
        let half_w = viewport_width / 2;
        let half_h = viewport_height / 2;
        let right = viewport_width - 1 + PADDING;
        let bottom = viewport_height - 1 + PADDING;
        let MapCorners {
            north,
            east,
            south,
            west,
        } = *corners;
        let c = RealPoint::new(east.x - half_w + right, east.y - half_h - PADDING);
        let h = RealPoint::new(west.x - half_w - PADDING, west.y - half_h - PADDING);
        Self {
            a: RealPoint::new(north.x - half_w - PADDING, north.y - half_h - PADDING),
            b: RealPoint::new(north.x - half_w + right, north.y - half_h - PADDING),
            c,
            d: RealPoint::new(c.x, east.y - half_h + bottom),
            e: RealPoint::new(south.x - half_w + right, south.y - half_h + bottom),
            h,
            g: RealPoint::new(h.x, west.y - half_h + bottom),
        }
    }

    fn top(&self) -> i32 {
        self.a.y
    }

    fn bottom(&self) -> i32 {
        self.e.y
    }

    /// Leftmost covered x on scanline `y`. Edges rise two pixels per row.
    fn left(&self, y: i32) -> i32 {
        if y < self.h.y {
            self.h.x + 2 * (self.h.y - y)
        } else if y <= self.g.y {
            self.h.x
        } else {
            self.g.x + 2 * (y - self.g.y)
        }
    }

    /// Rightmost covered x on scanline `y`.
    fn right(&self, y: i32) -> i32 {
        if y < self.c.y {
            self.b.x + 2 * (y - self.b.y)
        } else if y <= self.d.y {
            self.c.x
        } else {
            self.d.x - 2 * (y - self.d.y)
        }
    }

    /// Smallest `left` over the scanlines `lo..=hi`.
    fn min_left(&self, lo: i32, hi: i32) -> i32 {
        if hi < self.h.y {
            self.left(hi)
        } else if lo > self.g.y {
            self.left(lo)
        } else {
            self.h.x
        }
    }

    /// Largest `right` over the scanlines `lo..=hi`.
    fn max_right(&self, lo: i32, hi: i32) -> i32 {
        if hi < self.c.y {
            self.right(hi)
        } else if lo > self.d.y {
            self.right(lo)
        } else {
            self.c.x
        }
    }

    fn contains(&self, p: RealPoint) -> bool {
        (self.top()..=self.bottom()).contains(&p.y)
            && (self.left(p.y)..=self.right(p.y)).contains(&p.x)
    }
}

/// Grid of square cells covering every pixel a valid viewport can show.
///
/// Point lookup is O(1): the cell row and column come from one division each,
/// and each row records the span of columns it keeps.
#[derive(Clone, Debug)]
pub struct GridLayout {
    octagon: Octagon,
    origin: RealPoint,
    extent: RealPoint,
    cell_size: i32,
    viewport_width: i32,
    viewport_height: i32,
    rows: Vec<RowSpan>,
    cell_count: u32,
}

impl GridLayout {
    /// Lays out cells for a map with the given corners, seen through a
    /// `viewport_width x viewport_height` viewport.
    ///
    /// Cells are at least half the viewport on each side, and never smaller than
    /// 200 pixels.
    #[must_use]
    pub fn new(corners: &MapCorners, viewport_width: i32, viewport_height: i32) -> Self {
        let octagon = Octagon::new(corners, viewport_width, viewport_height);
        let origin = RealPoint::new(octagon.h.x, octagon.top());
        let extent = RealPoint::new(octagon.c.x, octagon.bottom());
        let cell_size = (viewport_width / 2)
            .max(viewport_height / 2)
            .max(MIN_CELL_SIZE);

        let row_count = (extent.y - origin.y) / cell_size + 1;
        let mut rows = Vec::with_capacity(row_count as usize);
        let mut start = 0_u32;
        for row in 0..row_count {
            let lo = origin.y + row * cell_size;
            let hi = (lo + cell_size - 1).min(extent.y);
            let first = (octagon.min_left(lo, hi) - origin.x) / cell_size;
            let last = (octagon.max_right(lo, hi) - origin.x) / cell_size;
            let len = last - first + 1;
            rows.push(RowSpan { first, len, start });
            start += len as u32;
        }

        let layout = Self {
            octagon,
            origin,
            extent,
            cell_size,
            viewport_width,
            viewport_height,
            rows,
            cell_count: start,
        };
        tracing::debug!(
            cells = layout.cell_count,
            rows = row_count,
            cell_size,
            "object grid laid out"
        );
        layout
    }

    /// Side length of a cell, in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of cells that exist.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    /// Top-left corner of the covered bounding box.
    #[must_use]
    pub const fn origin(&self) -> RealPoint {
        self.origin
    }

    /// Bottom-right corner of the covered bounding box, inclusive.
    #[must_use]
    pub const fn extent(&self) -> RealPoint {
        self.extent
    }

    /// Cell `(column, row)` containing `p`, if it lies in the bounding box.
    fn grid_coords(&self, p: RealPoint) -> Option<(i32, i32)> {
        if p.x < self.origin.x || p.y < self.origin.y || p.x > self.extent.x || p.y > self.extent.y
        {
            return None;
        }
        Some((
            (p.x - self.origin.x) / self.cell_size,
            (p.y - self.origin.y) / self.cell_size,
        ))
    }

    fn cell(&self, column: i32, row: i32) -> Option<CellId> {
        let span = self.rows.get(usize::try_from(row).ok()?)?;
        (span.first..span.first + span.len)
            .contains(&column)
            .then(|| CellId(span.start + (column - span.first) as u32))
    }

    /// The cell containing screen point `p`, if any.
    #[must_use]
    pub fn cell_at(&self, p: RealPoint) -> Option<CellId> {
        let (column, row) = self.grid_coords(p)?;
        self.cell(column, row)
    }

    /// Cells overlapping the inclusive pixel rectangle `x0..=x1`, `y0..=y1`.
    pub fn cells_in(
        &self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> impl Iterator<Item = CellId> + '_ {
        let clamp_x = |x: i32| x.clamp(self.origin.x, self.extent.x);
        let clamp_y = |y: i32| y.clamp(self.origin.y, self.extent.y);
        let overlaps = x1 >= self.origin.x
            && y1 >= self.origin.y
            && x0 <= self.extent.x
            && y0 <= self.extent.y;
        let range = overlaps.then(|| {
            let first_col = (clamp_x(x0) - self.origin.x) / self.cell_size;
            let last_col = (clamp_x(x1) - self.origin.x) / self.cell_size;
            let first_row = (clamp_y(y0) - self.origin.y) / self.cell_size;
            let last_row = (clamp_y(y1) - self.origin.y) / self.cell_size;
            (first_row..=last_row).flat_map(move |row| {
                (first_col..=last_col).filter_map(move |column| self.cell(column, row))
            })
        });
        range.into_iter().flatten()
    }

    /// Every cell with its `(column, row)` and pixel bounds.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, (i32, i32), ScreenRect)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(row, span)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "row count is bounded by the map's pixel height"
            )]
            let row = row as i32;
            (0..span.len).map(move |i| {
                let column = span.first + i;
                let bounds = ScreenRect::from_origin_size(
                    self.origin.x + column * self.cell_size,
                    self.origin.y + row * self.cell_size,
                    self.cell_size,
                    self.cell_size,
                );
                (CellId(span.start + i as u32), (column, row), bounds)
            })
        })
    }

    /// Whether a viewport whose top-left corner is `(x, y)` lies entirely
    /// inside the covered bounding box.
    #[must_use]
    pub fn is_viewport_position_valid(&self, x: i32, y: i32) -> bool {
        x >= self.origin.x
            && y >= self.origin.y
            && x + self.viewport_width - 1 <= self.extent.x
            && y + self.viewport_height - 1 <= self.extent.y
    }

    /// Stricter form of [`is_viewport_position_valid`](Self::is_viewport_position_valid)
    /// that tests the viewport's corners against the reachable octagon itself.
    #[must_use]
    pub fn polygon_contains_viewport(&self, x: i32, y: i32) -> bool {
        let x1 = x + self.viewport_width - 1;
        let y1 = y + self.viewport_height - 1;
        [(x, y), (x1, y), (x1, y1), (x, y1)]
            .into_iter()
            .all(|(px, py)| self.octagon.contains(RealPoint::new(px, py)))
    }

    /// Checks that an object footprint fits the corner-linking scheme.
    ///
    /// An object is found only through the cells its corners fall in, so one
    /// wider or taller than the cells guaranteed under the viewport may vanish
    /// while still partly on screen. Logs a warning and returns `false` in that
    /// case; nothing else is affected.
    pub fn check_object_limits(&self, width: i32, height: i32) -> bool {
        let max_width = ((self.viewport_width / self.cell_size).max(1) + 1) * self.cell_size;
        let max_height = ((self.viewport_height / self.cell_size).max(1) + 1) * self.cell_size;
        if width > max_width || height > max_height {
            tracing::warn!(
                width,
                height,
                max_width,
                max_height,
                "object is larger than the index supports and may vanish near the viewport edges"
            );
            return false;
        }
        true
    }
}
