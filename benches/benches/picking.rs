// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isoscape_engine::{Engine, EngineBuilder, EngineConfig};
use isoscape_geom::RealPoint;
use isoscape_map::{AcceptAll, Tile};
use isoscape_render_ref::RecordingRenderer;
use isoscape_scene::DepthOrder;

#[derive(Clone)]
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

fn engine(side: i32, max_height: i32) -> Engine<(), (), RecordingRenderer, AcceptAll> {
    let config = EngineConfig {
        map_width: side,
        map_height: side,
        max_height,
        ..EngineConfig::default()
    };
    EngineBuilder::new(config)
        .renderer(RecordingRenderer::new())
        .policy(AcceptAll)
        .tile_factory(|_x: i32, _y: i32| Tile::new(()))
        .sprite_order(DepthOrder)
        .text_order(DepthOrder)
        .build()
        .expect("bench configuration is valid")
}

/// Scatters random hills so that resolution has slopes to walk across.
fn roughen(engine: &mut Engine<(), (), RecordingRenderer, AcceptAll>, edits: usize, seed: u64) {
    let side = engine.config().map_width;
    let top = engine.config().max_height + 1;
    let mut rng = Lcg(seed);
    for _ in 0..edits {
        let (x, y, z) = (rng.range(0, side), rng.range(0, side), rng.range(0, top));
        engine.set_tile_height(x, y, z).expect("tile is on the map");
    }
}

fn bench_picking(c: &mut Criterion) {
    let mut group = c.benchmark_group("isoscape_picking");
    for &max_height in &[0, 4, 15] {
        let mut engine = engine(64, max_height);
        roughen(&mut engine, 400, 0xfeed);
        engine.scroll_to_tile(32, 32).expect("tile is on the map");

        let mut rng = Lcg(0x1234);
        let points: Vec<RealPoint> = (0..1024)
            .map(|_| RealPoint::new(rng.range(0, 640), rng.range(0, 480)))
            .collect();

        group.bench_function(BenchmarkId::new("tile_at_screen", max_height), |b| {
            b.iter(|| {
                for &p in &points {
                    black_box(engine.tile_at_screen(black_box(p)));
                }
            });
        });
        group.bench_function(BenchmarkId::new("tile_at_screen_fine", max_height), |b| {
            b.iter(|| {
                for &p in &points {
                    black_box(engine.tile_at_screen_fine(black_box(p)));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_picking);
criterion_main!(benches);
