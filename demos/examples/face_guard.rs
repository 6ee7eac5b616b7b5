// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face-guard placement for a few stage and canvas geometries.
//!
//! Prints the candidate limits and the published top for each case, and checks that the
//! placement never rises above the safe-top floor.
//!
//! Run:
//! - `cargo run -p stagerail_demos --example face_guard`

use kurbo::Rect;
use stagerail_guard::guard::{FaceGuard, GuardInput, SAFE_TOP_MARGIN};

fn main() {
    let guard = FaceGuard::new(0.25);
    let stage = Rect::new(0.0, 0.0, 390.0, 844.0);

    let cases = [
        ("tall avatar", Rect::new(0.0, 100.0, 390.0, 500.0), 150.0, 0.0),
        ("notched phone", Rect::new(0.0, 0.0, 390.0, 844.0), 300.0, 47.0),
        ("rail taller than face band", Rect::new(0.0, 40.0, 390.0, 440.0), 400.0, 0.0),
        ("canvas not laid out yet", Rect::ZERO, 200.0, 0.0),
    ];

    for (name, canvas, rail_height, safe_top) in cases {
        let placement = guard.resolve(&GuardInput {
            stage,
            canvas,
            rail_height,
            safe_top,
        });
        println!(
            "== {name} ==\n  strict: {:?}\n  wide: {:?}\n  floor: {}\n  top: {}",
            placement.strict_limit, placement.wide_limit, placement.floor, placement.top
        );
        assert_eq!(placement.floor, safe_top + SAFE_TOP_MARGIN);
        assert!(placement.top >= placement.floor);
        if canvas.height() == 0.0 {
            assert_eq!(placement.strict_limit, None);
            assert_eq!(placement.top, placement.floor);
        }
    }
}
