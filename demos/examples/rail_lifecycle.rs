// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mount a stage on a headless surface and walk the rail through its idle lifecycle.
//!
//! The rail starts hidden, a tap shows it, one idle period dims it, a second hides it.
//! A pointer leaving the rail restarts the countdown without showing it again.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p stagerail_demos --example rail_lifecycle`

use std::time::Duration;

use stagerail_stage::{
    Element, EventKind, HeadlessSurface, HostHooks, Stage, StageConfig, Target,
};
use stagerail_visibility::RailVisibility;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StageConfig::from_json(r#"{ "IDLE_DIM_SECONDS": 3, "visibilityMode": "auto" }"#)
        .expect("options parse");
    let mut stage = Stage::new(HeadlessSurface::new(), config, "en-US", HostHooks::new())
        .expect("surface has a root");
    let _ = stage.init(Duration::ZERO).expect("fresh stage mounts");

    let attr = |stage: &Stage<HeadlessSurface>| {
        stage
            .surface()
            .data(Element::Root, "rail-visibility")
            .unwrap_or("-")
            .to_owned()
    };
    println!("== Mounted ==\n  rail: {}", attr(&stage));
    assert_eq!(stage.visibility(), RailVisibility::Hidden);

    let tap_at = Duration::from_millis(250);
    let route = stage.handle_event(
        Target::Element(Element::CanvasHost),
        EventKind::PointerDown,
        tap_at,
    );
    println!("== Tap on the avatar ==\n  route: {route:?}\n  rail: {}", attr(&stage));
    assert_eq!(stage.visibility(), RailVisibility::Show);

    // The pointer drifts off the rail a second later: countdown restarts, rail stays shown.
    let leave_at = tap_at + Duration::from_secs(1);
    let _ = stage.handle_event(
        Target::Element(Element::Rail),
        EventKind::PointerLeave,
        leave_at,
    );
    println!("  next deadline: {:?}", stage.next_deadline());
    assert_eq!(stage.next_deadline(), Some(leave_at + Duration::from_secs(3)));

    while let Some(deadline) = stage.next_deadline() {
        for t in stage.advance(deadline) {
            println!("== {deadline:?} ==\n  {} -> {}", t.from, t.to);
        }
    }
    assert_eq!(stage.visibility(), RailVisibility::Hidden);
    assert_eq!(attr(&stage), "hidden");

    stage.destroy();
    println!("== Destroyed ==\n  listeners left: {}", stage.surface().listener_count());
    assert_eq!(stage.surface().listener_count(), 0);
    assert_eq!(stage.surface().node_count(), 0);
}
