// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stagerail_stage::{
    Element, EventKind, HeadlessSurface, HostHooks, Stage, StageConfig, Target,
};
use stagerail_visibility::{VisibilityMachine, VisibilityMode};

const IDLE: Duration = Duration::from_secs(2);

fn bench_machine(c: &mut Criterion) {
    let mut group = c.benchmark_group("visibility_machine");
    for &n in &[100usize, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        // Interactions closer together than the idle period: every one supersedes the last.
        group.bench_function(format!("interaction_churn_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut m = VisibilityMachine::new(VisibilityMode::Auto, IDLE);
                    let _ = m.mount(Duration::ZERO);
                    m
                },
                |mut m| {
                    for i in 0..n as u64 {
                        let now = Duration::from_millis(i * 500);
                        let _ = m.advance(now);
                        let _ = m.interaction(now);
                    }
                    black_box(m.state());
                },
                BatchSize::SmallInput,
            );
        });
        // Interactions spaced past the hide delay: full show → peek → hidden cycles.
        group.bench_function(format!("full_cycles_n{}", n), |b| {
            b.iter_batched(
                || {
                    let mut m = VisibilityMachine::new(VisibilityMode::Auto, IDLE);
                    let _ = m.mount(Duration::ZERO);
                    m
                },
                |mut m| {
                    let mut transitions = 0;
                    for i in 0..n as u64 {
                        let now = Duration::from_secs(i * 5);
                        transitions += m.advance(now).len();
                        let _ = m.interaction(now);
                    }
                    black_box(transitions);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_stage_routing(c: &mut Criterion) {
    let signals = [
        (Target::Element(Element::CanvasHost), EventKind::PointerDown),
        (Target::Element(Element::MessagesScroll), EventKind::Wheel),
        (Target::Element(Element::Rail), EventKind::PointerLeave),
        (Target::Window, EventKind::Resize),
        (Target::Element(Element::EmptyTitle), EventKind::Click),
    ];
    c.bench_function("stage_handle_event_1000", |b| {
        b.iter_batched(
            || {
                let mut stage = Stage::new(
                    HeadlessSurface::new(),
                    StageConfig::default(),
                    "en-US",
                    HostHooks::new(),
                )
                .unwrap();
                let _ = stage.init(Duration::ZERO).unwrap();
                stage
            },
            |mut stage| {
                for i in 0..1000_u64 {
                    let (target, event) = signals[(i as usize) % signals.len()];
                    black_box(stage.handle_event(target, event, Duration::from_millis(i * 10)));
                }
                stage
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_machine, bench_stage_routing);
criterion_main!(benches);
