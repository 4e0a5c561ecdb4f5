// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Render: the drawing capability an Isoscape engine renders through.
//!
//! The engine never touches pixels itself. It hands viewport-relative draw
//! calls to a [`Renderer`] supplied by the embedder, and asks that renderer
//! which [`Sprite`]s make up each tile and each scene object.
//!
//! - [`Renderer`]: draw calls, text measurement and sprite lookup.
//! - [`Sprite`], [`ImageId`], [`FontId`]: image handles plus placement anchors.
//! - [`Drawable`], [`ObjectKind`], [`TextLabel`]: the payload of a scene object,
//!   which is either a sprite or a text label.
//!
//! Geometry types are `kurbo`'s and colors are `peniko`'s.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_geom::RealPoint;
//! use isoscape_index::ScreenRect;
//! use isoscape_render::{Drawable, ImageId, ObjectKind, Sprite, TextLabel};
//!
//! // A 64x40 tree whose trunk base is 32 pixels in and 36 down.
//! let tree = Sprite::new(ImageId(7), 64, 40).with_anchor(32, 36);
//! assert_eq!(
//!     tree.bounds_at(RealPoint::new(0, 0)),
//!     ScreenRect::from_origin_size(-32, -36, 64, 40),
//! );
//!
//! let sign = Drawable::new(ObjectKind::Text(TextLabel::new("Harbor")), 42_u32);
//! assert_eq!(sign.label().map(|l| l.text.as_str()), Some("Harbor"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std`.

#![no_std]

extern crate alloc;

mod drawable;
mod renderer;
mod sprite;

pub use drawable::{Drawable, ObjectKind, SceneObject, TextLabel};
pub use renderer::Renderer;
pub use sprite::{FontId, ImageId, Sprite, SpriteList};
