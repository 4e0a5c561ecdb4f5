// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Map: a padded tile grid whose heights stay locally consistent.
//!
//! A [`Map`] stores `W x H` playable tiles surrounded by an invisible margin as
//! wide as the maximum tile height. The margin absorbs the ramps that height
//! edits push outwards, so every pair of 8-adjacent tiles, margin included,
//! differs by at most one height step.
//!
//! - [`Tile`]: per-cell record with grid position, height, [`Slope`](isoscape_geom::Slope),
//!   visibility and an application payload.
//! - [`TileFactory`]: builds the playable tiles once, when the map is created.
//! - [`Map::set_height`] / [`Map::can_set_height`]: the same outward propagation
//!   walk, applied or dry-run. The dry run asks a [`HeightPolicy`] to authorize
//!   every height it would change.
//! - After an applied edit the slopes of all touched tiles are recomputed and
//!   the policy is notified of height and slope changes on playable tiles.
//!
//! Grid coordinates (`grid_x`, `grid_y`) include the margin. Logical
//! coordinates start at the first playable tile; [`Map::to_grid`] converts.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_geom::Slope;
//! use isoscape_map::{AcceptAll, Map, Tile};
//!
//! let mut map = Map::new(10, 10, 2, &mut |_x: i32, _y: i32| Tile::new(()));
//! let (gx, gy) = map.to_grid(5, 5);
//!
//! assert!(map.can_set_height(gx, gy, 2, &mut AcceptAll));
//! map.set_height(gx, gy, 2, &mut AcceptAll);
//!
//! assert_eq!(map.tile(5, 5).unwrap().height(), 2);
//! // Neighbors are pulled up to keep the ramp walkable.
//! assert_eq!(map.tile(4, 5).unwrap().height(), 1);
//! assert_eq!(map.tile(5, 5).unwrap().slope(), Slope::N);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod height;
mod map;
mod policy;
mod tile;

pub use map::{Map, TileOutOfBounds};
pub use policy::{AcceptAll, HeightPolicy, TileFactory};
pub use tile::Tile;
