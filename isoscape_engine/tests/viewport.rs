// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for viewport scrolling in `isoscape_engine`.
//!
//! The map is 10x10 tiles of 16 units behind a two-tile margin, so the
//! viewport center may roam over logical virtual coordinates `0..=159` on
//! both axes. The viewport is 640x480.

use isoscape_engine::{Engine, EngineBuilder, EngineConfig, HeightError};
use isoscape_geom::{RealPoint, VirtualPoint};
use isoscape_map::{AcceptAll, Tile, TileOutOfBounds};
use isoscape_render_ref::RecordingRenderer;
use isoscape_scene::DepthOrder;

type TestEngine = Engine<(), u32, RecordingRenderer, AcceptAll>;

fn engine() -> TestEngine {
    let config = EngineConfig {
        map_width: 10,
        map_height: 10,
        max_height: 2,
        ..EngineConfig::default()
    };
    EngineBuilder::new(config)
        .renderer(RecordingRenderer::new())
        .policy(AcceptAll)
        .tile_factory(|_x: i32, _y: i32| Tile::new(()))
        .sprite_order(DepthOrder)
        .text_order(DepthOrder)
        .build()
        .unwrap()
}

#[test]
fn starts_on_the_north_corner() {
    let engine = engine();
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(0, 0));
    assert_eq!(engine.viewport_offset(), RealPoint::new(-320, -176));
}

#[test]
fn virtual_scrolling_moves_the_center() {
    let mut engine = engine();
    engine.scroll_by_virtual_delta(40, 24);
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(40, 24));
    assert_eq!(engine.viewport_offset(), RealPoint::new(-352, -112));

    engine.scroll_by_virtual_delta(-1000, 1000);
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(0, 159));
}

#[test]
fn screen_scrolling_off_the_map_is_dropped() {
    let mut engine = engine();
    engine.scroll_by_screen_delta(0, -100);
    assert_eq!(engine.viewport_offset(), RealPoint::new(-320, -176));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(0, 0));
}

#[test]
fn screen_scrolling_follows_the_pointer() {
    let mut engine = engine();
    engine.scroll_by_screen_delta(0, 40);
    assert_eq!(engine.viewport_offset(), RealPoint::new(-320, -136));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(20, 20));
}

#[test]
fn screen_scrolling_past_the_edge_stops_at_it() {
    let mut engine = engine();
    engine.scroll_by_screen_delta(1000, 1000);
    // The south corner of the map, (159, 159), ends up in the middle.
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(159, 159));
    assert_eq!(engine.viewport_offset(), RealPoint::new(-320, 142));
}

#[test]
fn scroll_to_projects_raised_points_onto_the_ground() {
    let mut engine = engine();
    engine.scroll_to(VirtualPoint::ground(80, 80));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(80, 80));

    // 16 units up is 16 pixels up the screen, i.e. 8 units back on both axes.
    engine.scroll_to(VirtualPoint::new(80, 80, 16));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(72, 72));

    engine.scroll_to(VirtualPoint::ground(-50, 500));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(0, 159));
}

#[test]
fn scroll_to_tile_centers_on_its_surface() {
    let mut engine = engine();
    engine.scroll_to_tile(5, 5).unwrap();
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(88, 88));
    assert_eq!(engine.viewport_offset(), RealPoint::new(-320, 0));

    // A tile one step up is shown 8 pixels higher.
    assert!(engine.level_tile_corners(5, 5, 1).unwrap());
    assert_eq!(engine.absolute_height(5, 5, 8, 8), Ok(8));
    engine.scroll_to_tile(5, 5).unwrap();
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(84, 84));
}

#[test]
fn scroll_to_missing_tile_is_an_error() {
    let mut engine = engine();
    let err = engine.scroll_to_tile(11, 0).unwrap_err();
    assert_eq!(err, HeightError::Tile(TileOutOfBounds { x: 11, y: 0 }));
    assert_eq!(engine.viewport_center(), VirtualPoint::ground(0, 0));
}
