// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Isoscape Engine: a height-mapped isometric world behind a scrollable viewport.
//!
//! An [`Engine`] ties the other Isoscape crates together:
//!
//! - **Terrain**: a padded [`Map`](isoscape_map::Map) whose tile heights are
//!   edited with [`set_tile_height`](Engine::set_tile_height) and the terraform
//!   helpers [`shift_tile_corners`](Engine::shift_tile_corners) and
//!   [`level_tile_corners`](Engine::level_tile_corners), all vetted by a
//!   [`HeightPolicy`](isoscape_map::HeightPolicy).
//! - **Picking**: [`tile_at_screen`](Engine::tile_at_screen) resolves a viewport
//!   pixel to the tile drawn there, slopes and heights included, and reports
//!   clamping against the map edges as [`EdgeHits`].
//! - **Viewport**: scrolling by pixels, by virtual units, or straight to a point
//!   or tile, always keeping the center on the map.
//! - **Objects**: sprite and text objects kept in a
//!   [`SpatialIndex`](isoscape_index::SpatialIndex) so that each frame only
//!   visits the cells under the viewport.
//! - **Drawing**: [`draw`](Engine::draw) emits tiles, then objects in
//!   [`DrawOrder`](isoscape_scene::DrawOrder), then an optional debug overlay,
//!   through the embedder's [`Renderer`](isoscape_render::Renderer).
//!
//! Engines are assembled with an [`EngineBuilder`] from an [`EngineConfig`].
//!
//! ## Example
//!
//! ```rust
//! use isoscape_engine::{EngineBuilder, EngineConfig};
//! use isoscape_geom::{RealPoint, VirtualPoint};
//! use isoscape_map::{AcceptAll, Tile};
//! use isoscape_render::{ImageId, ObjectKind, Sprite};
//! use isoscape_render_ref::RecordingRenderer;
//! use isoscape_scene::DepthOrder;
//!
//! let config = EngineConfig {
//!     map_width: 10,
//!     map_height: 10,
//!     max_height: 2,
//!     ..EngineConfig::default()
//! };
//! let renderer = RecordingRenderer::new()
//!     .with_default_tile_sprite(Sprite::new(ImageId(1), 64, 32).with_anchor(32, 0))
//!     .with_default_object_sprite(Sprite::new(ImageId(2), 32, 48).with_anchor(16, 44));
//! let mut engine = EngineBuilder::<(), &str, _, _>::new(config)
//!     .renderer(renderer)
//!     .policy(AcceptAll)
//!     .tile_factory(|_x: i32, _y: i32| Tile::new(()))
//!     .sprite_order(DepthOrder)
//!     .text_order(DepthOrder)
//!     .build()
//!     .expect("valid configuration");
//!
//! // Look at the middle of the map and pick the tile under the screen center.
//! engine.scroll_to_tile(5, 5).unwrap();
//! let hit = engine.tile_at_screen(RealPoint::new(320, 240));
//! assert_eq!((hit.x, hit.y), (5, 5));
//! assert!(hit.is_inside());
//!
//! // Raise a hill and plant a tree on it.
//! assert!(engine.can_set_tile_height(5, 5, 2).unwrap());
//! engine.set_tile_height(5, 5, 2).unwrap();
//! let tree = engine.insert_object(VirtualPoint::new(88, 88, 16), ObjectKind::Sprite, "tree");
//! assert_eq!(engine.object_tile(tree), Some((5, 5)));
//!
//! engine.draw();
//! assert_eq!(engine.scene().sprites().len(), 1);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std`.

#![no_std]

extern crate alloc;

mod builder;
mod config;
mod draw;
mod engine;
mod objects;
mod resolve;
mod viewport;

pub use builder::EngineBuilder;
pub use config::{Collaborator, ConfigError, EngineConfig, MAX_GRID_SIDE, MAX_TILE_HEIGHT};
pub use engine::{Engine, HeightError};
pub use resolve::{EdgeHits, TileHit};
