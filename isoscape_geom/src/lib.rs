// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Geom: projection and slope geometry for height-mapped isometric tiles.
//!
//! This crate holds the integer geometry every other Isoscape crate builds on:
//!
//! - **Projection** ([`to_real`], [`to_virtual`]): maps logical 3D
//!   [`VirtualPoint`]s onto 2D pixel [`RealPoint`]s and back. The inverse
//!   assumes ground level (`z == 0`); heights are resolved by tile lookup.
//! - **Slopes** ([`Slope`], [`Corners`]): the 15 corner-height patterns a tile
//!   can take, and the corner bits that describe them.
//! - **Slope polygons** ([`SlopeGeometry`]): per-slope boundary lines of the tile
//!   diamond, used to decide whether a pixel belongs to a tile or to one of its
//!   neighbors ([`EdgeTest`]).
//! - **Tile metrics** ([`TileMetrics`]): tile pixel sizes plus the closed-form
//!   height of a point on a sloped tile and its inverse.
//! - **Clamping** ([`clamp`], [`Clamped`]): a clamp that reports which bound it hit.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_geom::{RealPoint, Slope, TileMetrics, VirtualPoint, to_real, to_virtual};
//!
//! let v = VirtualPoint::ground(12, 7);
//! let r = to_real(v);
//! assert_eq!(r, RealPoint::new(-10, 19));
//! assert_eq!(to_virtual(r), v);
//!
//! // 64x32 pixel tiles, 8 pixels per height step.
//! let metrics = TileMetrics::new(64, 32, 8);
//! assert_eq!(metrics.unit(), 16);
//! assert_eq!(metrics.height_on_slope(Slope::Ne, 0, 0), Ok(8));
//! assert_eq!(metrics.height_on_slope(Slope::Flat, 8, 8), Ok(0));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and does not allocate.

#![no_std]

mod clamp;
mod geometry;
mod height;
mod slope;
mod transform;

pub use clamp::{Clamped, clamp};
pub use geometry::{EdgeTest, SlopeGeometry, TileMetrics};
pub use height::OutsideTile;
pub use slope::{Corners, Slope};
pub use transform::{RealPoint, VirtualPoint, floor_div_rem, to_real, to_virtual};
