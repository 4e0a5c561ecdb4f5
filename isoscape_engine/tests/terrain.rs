// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for height edits and the terraform helpers in `isoscape_engine`.
//!
//! The map is 10x10 with a two-tile margin, so heights range over `0..=2`.
//! The policy refuses heights above a limit and keeps a journal of changes.

use isoscape_engine::{Engine, EngineBuilder, EngineConfig, HeightError};
use isoscape_geom::{OutsideTile, Slope};
use isoscape_map::{HeightPolicy, Tile, TileOutOfBounds};
use isoscape_render_ref::RecordingRenderer;
use isoscape_scene::DepthOrder;

#[derive(Debug, Default)]
struct Journal {
    limit: i32,
    changes: Vec<(i32, i32, i32)>,
}

impl HeightPolicy<()> for Journal {
    fn can_set_height(&mut self, _tile: &Tile<()>, _x: i32, _y: i32, height: i32) -> bool {
        height <= self.limit
    }

    fn height_changed(&mut self, _tile: &Tile<()>, x: i32, y: i32, old_height: i32) {
        self.changes.push((x, y, old_height));
    }
}

type TestEngine = Engine<(), u32, RecordingRenderer, Journal>;

fn engine(limit: i32) -> TestEngine {
    let config = EngineConfig {
        map_width: 10,
        map_height: 10,
        max_height: 2,
        ..EngineConfig::default()
    };
    EngineBuilder::new(config)
        .renderer(RecordingRenderer::new())
        .policy(Journal {
            limit,
            changes: Vec::new(),
        })
        .tile_factory(|_x: i32, _y: i32| Tile::new(()))
        .sprite_order(DepthOrder)
        .text_order(DepthOrder)
        .build()
        .unwrap()
}

fn height(engine: &TestEngine, x: i32, y: i32) -> i32 {
    engine.tile(x, y).unwrap().height()
}

struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next_u32() % (hi - lo) as u32) as i32
    }
}

#[test]
fn leveling_flattens_a_tile() {
    let mut engine = engine(2);
    assert_eq!(engine.level_tile_corners(3, 3, 1), Ok(true));
    for (x, y) in [(3, 3), (3, 4), (4, 3), (4, 4)] {
        assert_eq!(height(&engine, x, y), 1);
    }
    let tile = engine.tile(3, 3).unwrap();
    assert_eq!(tile.slope(), Slope::Flat);
    assert_eq!(engine.tile_min_height(3, 3), Ok(1));
    assert_eq!(engine.absolute_height(3, 3, 4, 12), Ok(8));
}

#[test]
fn shifting_keeps_the_tile_shape() {
    let mut engine = engine(2);
    engine.set_tile_height(3, 3, 1).unwrap();
    assert_eq!(engine.tile(3, 3).unwrap().slope(), Slope::N);
    assert_eq!(engine.tile_min_height(3, 3), Ok(0));

    assert_eq!(engine.shift_tile_corners(3, 3, 1), Ok(true));
    let tile = engine.tile(3, 3).unwrap();
    assert_eq!(tile.height(), 2);
    assert_eq!(tile.slope(), Slope::N);
    assert_eq!(tile.min_height(), 1);
    assert_eq!(height(&engine, 4, 4), 1);
}

#[test]
fn shifting_past_the_height_range_does_nothing() {
    let mut engine = engine(2);
    assert_eq!(engine.level_tile_corners(3, 3, 2), Ok(true));
    assert_eq!(engine.shift_tile_corners(3, 3, 1), Ok(false));
    assert_eq!(engine.shift_tile_corners(8, 0, -1), Ok(false));
    for (x, y) in [(3, 3), (3, 4), (4, 3), (4, 4)] {
        assert_eq!(height(&engine, x, y), 2);
    }
}

#[test]
fn refused_edits_leave_the_map_alone() {
    let mut engine = engine(1);
    assert_eq!(engine.can_set_tile_height(3, 3, 2), Ok(false));
    assert_eq!(engine.level_tile_corners(3, 3, 2), Ok(false));
    assert_eq!(height(&engine, 3, 3), 0);
    assert!(engine.policy().changes.is_empty());
}

#[test]
fn repeated_edits_notify_once() {
    let mut engine = engine(2);
    engine.set_tile_height(2, 2, 1).unwrap();
    let changes = engine.policy().changes.len();
    assert!(changes > 0);
    assert!(engine.policy().changes.contains(&(2, 2, 0)));
    engine.set_tile_height(2, 2, 1).unwrap();
    assert_eq!(engine.policy().changes.len(), changes);
}

#[test]
fn boundary_corners_are_editable() {
    let mut engine = engine(2);
    // The last playable tile takes three of its corners from the boundary.
    assert_eq!(engine.level_tile_corners(9, 9, 1), Ok(true));
    assert_eq!(height(&engine, 10, 10), 1);
    // The boundary tile itself has no corners beyond the boundary.
    assert_eq!(engine.level_tile_corners(10, 10, 2), Ok(false));
    assert_eq!(height(&engine, 10, 10), 2);
}

#[test]
fn out_of_range_tiles_are_errors() {
    let mut engine = engine(2);
    assert_eq!(
        engine.can_set_tile_height(-1, 0, 1),
        Err(TileOutOfBounds { x: -1, y: 0 })
    );
    assert_eq!(
        engine.set_tile_height(0, 11, 1),
        Err(TileOutOfBounds { x: 0, y: 11 })
    );
    assert_eq!(
        engine.shift_tile_corners(20, 20, 1),
        Err(TileOutOfBounds { x: 20, y: 20 })
    );
    assert_eq!(
        engine.absolute_height(0, 0, 16, 0),
        Err(HeightError::Offset(OutsideTile { x: 16, y: 0 }))
    );
    assert!(!engine.is_valid_tile(11, 0));
    assert!(engine.is_valid_tile(10, 10));
}

#[test]
fn random_terraforming_keeps_neighbors_within_one_step() {
    let mut engine = engine(2);
    let mut rng = Lcg(0x5eed);
    for _ in 0..300 {
        let (x, y) = (rng.range(0, 10), rng.range(0, 10));
        match rng.range(0, 3) {
            0 => {
                let delta = if rng.range(0, 2) == 0 { -1 } else { 1 };
                engine.shift_tile_corners(x, y, delta).unwrap();
            }
            1 => {
                engine.level_tile_corners(x, y, rng.range(0, 3)).unwrap();
            }
            _ => {
                let z = rng.range(0, 3);
                if engine.can_set_tile_height(x, y, z).unwrap() {
                    engine.set_tile_height(x, y, z).unwrap();
                }
            }
        }
    }

    let map = engine.map();
    for tile in map.tiles() {
        let (x, y) = (tile.grid_x(), tile.grid_y());
        for (dx, dy) in [(1, 0), (0, 1), (1, 1), (1, -1)] {
            if let Some(other) = map.get(x + dx, y + dy) {
                assert!(
                    (tile.height() - other.height()).abs() <= 1,
                    "grid ({x}, {y}) and its neighbor ({dx}, {dy}) are more than one step apart"
                );
            }
        }
    }
}
