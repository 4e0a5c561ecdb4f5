// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the index: object and cell identifiers, corner roles, flags
//! and screen rectangles.

use isoscape_geom::RealPoint;

/// Identifier for an object in a [`SpatialIndex`](crate::SpatialIndex).
///
/// A slot index plus a generation counter. Removing an object frees its slot;
/// when the slot is reused the generation is bumped, so stale identifiers never
/// alias a newer object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(pub(crate) u32, pub(crate) u32);

impl ObjectId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a grid cell of a [`GridLayout`](crate::GridLayout).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CellId(pub(crate) u32);

impl CellId {
    /// Dense index of the cell, `0..layout.cell_count()`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The corner roles under which an object is linked into grid cells.
///
/// Corners are linked in this priority order; a corner landing in a cell that an
/// earlier corner already claimed is skipped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Corner {
    /// Top-left corner of the bounding box.
    Nw = 0,
    /// Top-right corner.
    Ne = 1,
    /// Bottom-right corner.
    Es = 2,
    /// Bottom-left corner.
    Ws = 3,
}

impl Corner {
    /// All roles in linking priority order.
    pub const ALL: [Self; 4] = [Self::Nw, Self::Ne, Self::Es, Self::Ws];

    pub(crate) const fn idx(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// Object flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// Object is drawn.
        const VISIBLE  = 0b0000_0001;
        /// Object was already collected for the frame being composed.
        const SELECTED = 0b0000_0010;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// A pixel rectangle given by its top-left and bottom-right corners.
///
/// `x1` and `y1` are one past the covered pixels, as produced by
/// [`from_origin_size`](Self::from_origin_size).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenRect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge.
    pub x1: i32,
    /// Bottom edge.
    pub y1: i32,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// The corner playing `role`.
    #[must_use]
    pub const fn corner(&self, role: Corner) -> RealPoint {
        match role {
            Corner::Nw => RealPoint::new(self.x0, self.y0),
            Corner::Ne => RealPoint::new(self.x1, self.y0),
            Corner::Es => RealPoint::new(self.x1, self.y1),
            Corner::Ws => RealPoint::new(self.x0, self.y1),
        }
    }

    /// Moves the rectangle by `-origin`, e.g. to make it viewport relative.
    #[must_use]
    pub const fn relative_to(&self, origin: RealPoint) -> Self {
        Self {
            x0: self.x0 - origin.x,
            y0: self.y0 - origin.y,
            x1: self.x1 - origin.x,
            y1: self.y1 - origin.y,
        }
    }

    /// Whether the rectangle shows inside a `width` x `height` viewport at the origin.
    #[must_use]
    pub const fn touches_viewport(&self, width: i32, height: i32) -> bool {
        !(self.y1 < 0 || self.y0 >= height || self.x1 < 0 || self.x0 >= width)
    }
}
