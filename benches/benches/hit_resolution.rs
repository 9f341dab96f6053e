// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use choro_geom::{Feature, Geometry, Polygon};
use choro_hit::{BackendKind, IndexParams, PlaneBounds, RegionIndex};
use choro_index::{Aabb2D, Index};
use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// An `n` by `n` tessellation of `cell`-sized quadrilaterals whose shared
/// corners are jittered, so regions tile the plane without gaps but their
/// boxes overlap like real administrative boundaries.
fn gen_jittered_regions(n: usize, cell: f64) -> Vec<Feature<u32>> {
    let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
    let side = n + 1;
    let corners: Vec<Point> = (0..side * side)
        .map(|i| {
            let (x, y) = ((i % side) as f64, (i / side) as f64);
            let interior = |v: f64| v > 0.0 && v < n as f64;
            let jx = if interior(x) { (rng.next_f64() - 0.5) * 0.6 } else { 0.0 };
            let jy = if interior(y) { (rng.next_f64() - 0.5) * 0.6 } else { 0.0 };
            Point::new((x + jx) * cell, (y + jy) * cell)
        })
        .collect();
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let at = |cx: usize, cy: usize| corners[cy * side + cx];
            let ring = vec![at(x, y), at(x + 1, y), at(x + 1, y + 1), at(x, y + 1)];
            out.push(Feature::new(
                (y * n + x) as u32,
                Geometry::Polygon(Polygon::from_rings(vec![ring])),
            ));
        }
    }
    out
}

fn gen_pointer_path(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn params_for(kind: BackendKind, cell: f64) -> IndexParams {
    IndexParams {
        backend: kind,
        grid_cell_size: cell,
        ..IndexParams::default()
    }
}

const KINDS: [BackendKind; 3] = [BackendKind::PackedRTree, BackendKind::Grid, BackendKind::Linear];

fn bench_build(c: &mut Criterion) {
    let cell = 10.0;
    let mut group = c.benchmark_group("region_index_build");
    for &n in &[16_usize, 32, 64] {
        let features = gen_jittered_regions(n, cell);
        group.throughput(Throughput::Elements(features.len() as u64));
        for kind in KINDS {
            let params = params_for(kind, cell);
            group.bench_function(BenchmarkId::new(format!("{kind:?}"), n), |b| {
                b.iter_batched(
                    || features.clone(),
                    |features| RegionIndex::build_with_params(features, &PlaneBounds, &params),
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let cell = 10.0;
    let mut group = c.benchmark_group("region_index_resolve");
    for &n in &[16_usize, 32, 64] {
        let features = gen_jittered_regions(n, cell);
        let points = gen_pointer_path(1024, n as f64 * cell);
        group.throughput(Throughput::Elements(points.len() as u64));
        for kind in KINDS {
            let idx =
                RegionIndex::build_with_params(features.clone(), &PlaneBounds, &params_for(kind, cell));
            group.bench_function(BenchmarkId::new(format!("{kind:?}"), n), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    for &pt in &points {
                        if idx.resolve(pt).is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits);
                });
            });
        }
    }
    group.finish();
}

fn bench_node_capacity(c: &mut Criterion) {
    let n = 64;
    let cell = 10.0;
    let boxes: Vec<(Aabb2D<f64>, u32)> = gen_jittered_regions(n, cell)
        .into_iter()
        .filter_map(|f| {
            let r = f.geometry.bounding_box()?;
            Some((Aabb2D::new(r.x0, r.y0, r.x1, r.y1), f.id))
        })
        .collect();
    let points = gen_pointer_path(1024, n as f64 * cell);
    let mut group = c.benchmark_group("packed_rtree_point_query");
    group.throughput(Throughput::Elements(points.len() as u64));
    for &capacity in &[4_usize, 8, 16, 32] {
        let idx = Index::with_node_capacity(capacity, boxes.iter().copied());
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                let mut candidates = 0_usize;
                for pt in &points {
                    candidates += idx.query_point(pt.x, pt.y).count();
                }
                black_box(candidates);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_resolve, bench_node_capacity);
criterion_main!(benches);
