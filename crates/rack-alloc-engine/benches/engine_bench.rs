// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rack_alloc_core::unit::{RackUnit, UnitCount};
use rack_alloc_engine::prelude::*;
use rack_alloc_model::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::{env, hint::black_box};

#[inline]
fn len(x: usize) -> UnitCount {
    UnitCount::new(x)
}

fn gen_layouts(rack_size: usize, n: usize, seed: u64) -> Vec<RackLayout> {
    (0..n as u64)
        .map(|i| {
            let config = RackGenConfigBuilder::new()
                .rack_size(len(rack_size))
                .max_devices(rack_size / 2)
                .device_size_range(len(1), len(4.min(rack_size)))
                .fill_ratio(0.75)
                .seed(seed ^ i)
                .build()
                .expect("valid bench config");
            RackGenerator::new(config).generate()
        })
        .collect()
}

fn register_gaps(c: &mut Criterion, rack_size: usize, layouts: &[RackLayout]) {
    let mut group = c.benchmark_group("gaps");
    group.throughput(Throughput::Elements(layouts.len() as u64));
    group.bench_function(BenchmarkId::new("find_available_spaces", rack_size), |b| {
        b.iter(|| {
            let mut blocks = 0usize;
            for l in layouts {
                blocks += find_available_spaces(l.devices(), l.rack(), None).len();
            }
            black_box(blocks)
        })
    });
    group.finish();
}

fn register_validate(c: &mut Criterion, rack_size: usize, layouts: &[RackLayout]) {
    let mut group = c.benchmark_group("validate");
    let mut rng = ChaCha8Rng::seed_from_u64(0xBADC_0FFE_E0DD_F00D);
    let candidates: Vec<(RackUnit, UnitCount)> = (0..256)
        .map(|_| {
            (
                RackUnit::new(rng.random_range(0..=rack_size)),
                len(rng.random_range(1..=4)),
            )
        })
        .collect();
    group.throughput(Throughput::Elements((layouts.len() * candidates.len()) as u64));
    group.bench_function(BenchmarkId::new("validate_placement", rack_size), |b| {
        b.iter(|| {
            let mut ok = 0usize;
            for l in layouts {
                for &(p, n) in &candidates {
                    if validate_placement(p, n, l.rack(), l.devices(), None).is_ok() {
                        ok += 1;
                    }
                }
            }
            black_box(ok)
        })
    });
    group.finish();
}

fn register_strategies(c: &mut Criterion, rack_size: usize, layouts: &[RackLayout]) {
    let mut group = c.benchmark_group("suggest");
    group.throughput(Throughput::Elements(layouts.len() as u64));
    for strategy in PlacementStrategy::ALL {
        group.bench_function(BenchmarkId::new(strategy.name(), rack_size), |b| {
            b.iter(|| {
                let mut placed = 0usize;
                for l in layouts {
                    if suggest_placement(len(2), l.devices(), l.rack(), strategy).is_some() {
                        placed += 1;
                    }
                }
                black_box(placed)
            })
        });
    }
    group.finish();
}

fn register_reorg(c: &mut Criterion, rack_size: usize, layouts: &[RackLayout]) {
    let mut group = c.benchmark_group("reorg");
    group.throughput(Throughput::Elements(layouts.len() as u64));
    group.bench_function(BenchmarkId::new("compact", rack_size), |b| {
        b.iter(|| {
            for l in layouts {
                black_box(compact_devices(l.devices(), CompactDirection::Top));
            }
        })
    });
    group.bench_function(BenchmarkId::new("distribute", rack_size), |b| {
        b.iter(|| {
            for l in layouts {
                let _ = black_box(distribute_devices_evenly(l.devices(), l.rack()));
            }
        })
    });
    group.finish();
}

fn engine_benches(c: &mut Criterion) {
    // Defaults (override with env)
    let rack_size = env::var("RACK_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(48usize);
    let racks = env::var("RACK_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(512usize);

    let layouts = gen_layouts(rack_size, racks, 0xA11C_E5EE_D000_0001);
    register_gaps(c, rack_size, &layouts);
    register_validate(c, rack_size, &layouts);
    register_strategies(c, rack_size, &layouts);
    register_reorg(c, rack_size, &layouts);
}

criterion_group!(benches, engine_benches);
criterion_main!(benches);
