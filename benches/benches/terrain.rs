// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use isoscape_map::{AcceptAll, Map, Tile};

fn flat_map(side: i32, max_height: i32) -> Map<()> {
    Map::new(side, side, max_height, &mut |_x: i32, _y: i32| Tile::new(()))
}

fn bench_terrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("isoscape_terrain");
    for &max_height in &[2, 8, 15] {
        let side = 64;
        let (cx, cy) = (max_height + side / 2, max_height + side / 2);

        // Raising one tile to the top drags a cone of neighbors along.
        group.bench_function(BenchmarkId::new("raise_peak", max_height), |b| {
            b.iter_batched(
                || flat_map(side, max_height),
                |mut map| {
                    map.set_height(cx, cy, max_height, &mut AcceptAll);
                    black_box(map)
                },
                BatchSize::SmallInput,
            );
        });

        let mut peak = flat_map(side, max_height);
        peak.set_height(cx, cy, max_height, &mut AcceptAll);
        group.bench_function(BenchmarkId::new("dry_run_dig", max_height), |b| {
            b.iter(|| black_box(peak.can_set_height(cx, cy, 0, &mut AcceptAll)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_terrain);
criterion_main!(benches);
