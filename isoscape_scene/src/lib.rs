// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Scene: per-frame composition of the objects in view.
//!
//! Each frame, a [`SceneComposer`]:
//!
//! 1. walks the [`SpatialIndex`](isoscape_index::SpatialIndex) cells under the
//!    viewport and collects every visible object whose [`Footprint`] overlaps
//!    it, once, into fixed-capacity sprite and text buffers;
//! 2. orders each buffer with a [`DrawOrder`], keeping collection order between
//!    objects the order does not rank;
//! 3. draws sprites, then texts, through a [`Renderer`](isoscape_render::Renderer).
//!
//! [`DepthOrder`] is the usual back-to-front order for isometric scenes.
//!
//! ## Example
//!
//! ```rust
//! use isoscape_geom::VirtualPoint;
//! use isoscape_index::{GridLayout, MapCorners, ScreenRect, SpatialIndex};
//! use isoscape_render::{Drawable, ImageId, ObjectKind, Sprite};
//! use isoscape_render_ref::RecordingRenderer;
//! use isoscape_scene::{DepthOrder, SceneComposer, footprint};
//!
//! let layout = GridLayout::new(&MapCorners::for_map(16, 0, 20, 20), 400, 300);
//! let mut index = SpatialIndex::new(layout);
//! let renderer = RecordingRenderer::new()
//!     .with_default_object_sprite(Sprite::new(ImageId(1), 32, 32).with_anchor(16, 28));
//!
//! let near = index.insert(VirtualPoint::ground(40, 40), Drawable::new(ObjectKind::Sprite, "near"));
//! let far = index.insert(VirtualPoint::ground(8, 8), Drawable::new(ObjectKind::Sprite, "far"));
//! for id in [near, far] {
//!     let object = index.get(id).unwrap();
//!     let bounds = footprint::<(), _, _>(&renderer, id, object).unwrap().bounds();
//!     index.place(id, bounds);
//! }
//!
//! let mut scene = SceneComposer::new(50, 10);
//! let viewport = ScreenRect::from_origin_size(-200, -20, 400, 300);
//! scene.compose::<(), _, _>(&mut index, &renderer, viewport, &DepthOrder, &DepthOrder);
//!
//! let order: Vec<_> = scene.sprites().iter().map(|e| e.object).collect();
//! assert_eq!(order, [far, near]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod composer;
mod order;

pub use composer::{Footprint, SceneComposer, SpriteEntry, TextEntry, footprint};
pub use order::{DepthOrder, DrawOrder};
