// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use stagerail_guard::guard::{FaceGuard, GuardInput};
use stagerail_guard::viewport::{KeyboardInset, ViewportMetrics};

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

// Phone-to-desktop sized stages with a canvas somewhere in the upper half.
fn gen_inputs(count: usize, seed: u64) -> Vec<GuardInput> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let w = 320.0 + rng.next_f64() * 1600.0;
            let h = 560.0 + rng.next_f64() * 880.0;
            let canvas_top = rng.next_f64() * h * 0.5;
            let canvas_h = rng.next_f64() * h;
            GuardInput {
                stage: Rect::new(0.0, 0.0, w, h),
                canvas: Rect::new(0.0, canvas_top, w, canvas_top + canvas_h),
                rail_height: rng.next_f64() * h * 0.5,
                safe_top: rng.next_f64() * 48.0,
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("face_guard");
    for &n in &[64usize, 1024] {
        let inputs = gen_inputs(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("resolve_n{}", n), |b| {
            let guard = FaceGuard::new(0.25);
            b.iter(|| {
                let mut acc = 0.0;
                for input in &inputs {
                    acc += guard.resolve(black_box(input)).top;
                }
                black_box(acc);
            });
        });
    }
    let degenerate = vec![
        GuardInput {
            stage: Rect::ZERO,
            canvas: Rect::ZERO,
            rail_height: f64::NAN,
            safe_top: f64::INFINITY,
        };
        256
    ];
    group.bench_function("resolve_degenerate", |b| {
        let guard = FaceGuard::default();
        b.iter(|| {
            for input in &degenerate {
                black_box(guard.resolve(black_box(input)));
            }
        });
    });
    group.finish();
}

fn bench_keyboard(c: &mut Criterion) {
    let mut rng = Rng::new(7);
    let metrics: Vec<ViewportMetrics> = (0..1024)
        .map(|_| ViewportMetrics {
            inner_height: 844.0,
            height: 400.0 + rng.next_f64() * 444.0,
            offset_top: rng.next_f64() * 20.0,
        })
        .collect();
    c.bench_function("keyboard_inset_measure_1024", |b| {
        b.iter(|| {
            let raised = metrics
                .iter()
                .filter(|m| KeyboardInset::measure(black_box(m)).is_raised())
                .count();
            black_box(raised);
        });
    });
}

criterion_group!(benches, bench_resolve, bench_keyboard);
criterion_main!(benches);
