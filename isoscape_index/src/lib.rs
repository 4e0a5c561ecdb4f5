// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Index: a screen-space spatial index for isometric scene objects.
//!
//! Objects on an isometric map are drawn as screen rectangles. To find the
//! objects a viewport shows without scanning all of them, the screen area any
//! viewport can reach is split into square cells ([`GridLayout`]) and each
//! object is linked into the cells that its bounding-box corners fall in
//! ([`SpatialIndex`]).
//!
//! - [`GridLayout`]: jagged grid of cells covering the octagon reachable by the
//!   viewport over a map; O(1) point to cell lookup.
//! - [`SpatialIndex`]: generational arena of [`IsoObject`]s; each object is
//!   linked into up to four cells, one per distinct corner cell, with
//!   doubly linked chains so relinking is O(1) per corner.
//! - [`ObjectId`]: generational handle of an object.
//! - [`ScreenRect`], [`Corner`], [`ObjectFlags`]: supporting types.
//!
//! Cells are at least half a viewport on each side, so any object whose size is
//! within [`GridLayout::check_object_limits`] and which overlaps the viewport has
//! a corner in a cell that overlaps it too.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_geom::{RealPoint, VirtualPoint};
//! use isoscape_index::{GridLayout, MapCorners, ScreenRect, SpatialIndex};
//!
//! // A 20x20 map of 16 pixel tile units seen through a 400x300 viewport.
//! let layout = GridLayout::new(&MapCorners::for_map(16, 0, 20, 20), 400, 300);
//! let mut index = SpatialIndex::new(layout);
//!
//! let tree = index.insert(VirtualPoint::ground(40, 40), "tree");
//! index.place(tree, ScreenRect::from_origin_size(-32, 40, 64, 48));
//!
//! let cell = index.cell_at(RealPoint::new(0, 60)).unwrap();
//! let found: Vec<_> = index.objects_in_cell(cell).map(|(_, o)| o.payload).collect();
//! assert_eq!(found, ["tree"]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod layout;
mod types;

pub use index::{CellObjects, IsoObject, SpatialIndex};
pub use layout::{GridLayout, MapCorners};
pub use types::{CellId, Corner, ObjectFlags, ObjectId, ScreenRect};
