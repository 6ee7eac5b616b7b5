// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track an on-screen keyboard through the visual viewport.
//!
//! The stage publishes the inset as a custom property and flags the root once the keyboard
//! covers more than a small threshold.
//!
//! Run:
//! - `cargo run -p stagerail_demos --example keyboard_inset`

use std::time::Duration;

use stagerail_guard::viewport::ViewportMetrics;
use stagerail_stage::css::{DATA_KEYBOARD, KEYBOARD_OFFSET};
use stagerail_stage::{Element, EventKind, HeadlessSurface, HostHooks, Stage, StageConfig, Target};

fn metrics(visual_height: f64) -> ViewportMetrics {
    ViewportMetrics {
        inner_height: 844.0,
        height: visual_height,
        offset_top: 0.0,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut surface = HeadlessSurface::new();
    surface.set_viewport(Some(metrics(844.0)));
    let mut stage = Stage::new(surface, StageConfig::default(), "zh-HK", HostHooks::new())
        .expect("surface has a root");
    let _ = stage.init(Duration::ZERO).expect("fresh stage mounts");

    let steps = [(844.0, false), (830.0, false), (508.0, true), (844.0, false)];
    for (i, (visual_height, raised)) in steps.into_iter().enumerate() {
        stage.surface_mut().set_viewport(Some(metrics(visual_height)));
        let _ = stage.handle_event(
            Target::VisualViewport,
            EventKind::Resize,
            Duration::from_millis(100 * i as u64),
        );
        let s = stage.surface();
        println!(
            "== visual height {visual_height} ==\n  {KEYBOARD_OFFSET}: {:?}\n  data-{DATA_KEYBOARD}: {:?}",
            s.style(Element::Root, KEYBOARD_OFFSET),
            s.data(Element::Root, DATA_KEYBOARD),
        );
        assert_eq!(stage.keyboard_offset().is_raised(), raised);
    }
    assert_eq!(stage.keyboard_offset().offset(), 0.0);
}
