// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isoscape_geom::VirtualPoint;
use isoscape_index::{GridLayout, MapCorners, ScreenRect, SpatialIndex};
use isoscape_render::{Drawable, ImageId, ObjectKind, Sprite};
use isoscape_render_ref::RecordingRenderer;
use isoscape_scene::{DepthOrder, SceneComposer, footprint};

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

/// A 64x64 map of 16 unit tiles with `n` objects scattered over it.
fn populated(n: usize, seed: u64) -> (SpatialIndex<Drawable<u32>>, RecordingRenderer) {
    let layout = GridLayout::new(&MapCorners::for_map(16, 0, 64, 64), 640, 480);
    let mut index = SpatialIndex::new(layout);
    let renderer = RecordingRenderer::new()
        .with_default_object_sprite(Sprite::new(ImageId(1), 32, 48).with_anchor(16, 44));
    let mut rng = Lcg(seed);
    for tag in 0..n {
        let at = VirtualPoint::ground(rng.range(0, 1024), rng.range(0, 1024));
        let id = index.insert(at, Drawable::new(ObjectKind::Sprite, tag as u32));
        let object = index.get(id).expect("just inserted");
        let bounds = footprint::<(), _, _>(&renderer, id, object)
            .expect("default sprite")
            .bounds();
        index.place(id, bounds);
    }
    (index, renderer)
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("isoscape_scene");
    // Centered on the middle of the map.
    let viewport = ScreenRect::from_origin_size(-320, 784, 640, 480);
    for &n in &[100_usize, 1_000, 10_000] {
        let (mut index, renderer) = populated(n, 0xbeef);
        let mut scene = SceneComposer::new(256, 16);
        group.bench_function(BenchmarkId::new("compose", n), |b| {
            b.iter(|| {
                scene.compose::<(), _, _>(
                    &mut index,
                    &renderer,
                    black_box(viewport),
                    &DepthOrder,
                    &DepthOrder,
                );
                black_box(scene.sprites().len())
            });
        });

        let mut rng = Lcg(0xcafe);
        let moves: Vec<_> = index
            .iter()
            .map(|(id, _)| (id, VirtualPoint::ground(rng.range(0, 1024), rng.range(0, 1024))))
            .take(256)
            .collect();
        group.bench_function(BenchmarkId::new("move_256", n), |b| {
            b.iter(|| {
                for &(id, to) in &moves {
                    index.set_position(id, to);
                    let object = index.get(id).expect("live object");
                    let bounds = footprint::<(), _, _>(&renderer, id, object)
                        .expect("default sprite")
                        .bounds();
                    index.place(id, bounds);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scene);
criterion_main!(benches);
