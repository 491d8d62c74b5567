// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_tooltip::intent::{Tick, VelocityTracker};
use understory_tooltip::placement::resolve;
use understory_tooltip::types::{Placement, PointerSample};

/// A pointer sweeping right and decelerating, one sample per 100ms tick.
fn gen_sweep(n: usize) -> Vec<PointerSample> {
    let mut out = Vec::with_capacity(n);
    let mut x = 0.0;
    for i in 0..n {
        let step = 200.0 / (i as f64 + 1.0);
        x += step;
        out.push(PointerSample::at(x, 40.0, (i as u64 + 1) * 100));
    }
    out
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_tracker");
    for &n in &[16usize, 256, 4096] {
        let samples = gen_sweep(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("record_tick_n{}", n), |b| {
            b.iter_batched(
                || VelocityTracker::new(0.1),
                |mut t| {
                    t.begin(PointerSample::at(0.0, 40.0, 0));
                    let mut settled = 0_u32;
                    for s in samples.iter().copied() {
                        // Reopen after each settle so every sample is ticked.
                        if !t.is_sampling() {
                            t.begin(s);
                        }
                        t.record(s);
                        if t.tick() == Tick::Settled {
                            settled += 1;
                        }
                    }
                    black_box(settled);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let triggers: Vec<Rect> = (0..1024)
        .map(|i| {
            let top = i as f64 - 200.0;
            Rect::new(0.0, top, 24.0, top + 24.0)
        })
        .collect();
    group.throughput(Throughput::Elements(triggers.len() as u64));
    group.bench_function("resolve_scroll_sweep", |b| {
        b.iter(|| {
            let flipped = triggers
                .iter()
                .filter(|r| resolve(Placement::Top, Some(**r), Some(80.0)) == Placement::Bottom)
                .count();
            black_box(flipped);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_tracker, bench_placement);
criterion_main!(benches);
