// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! On-screen keyboard inset derived from visual viewport geometry.

/// Inset, in pixels, above which the keyboard counts as raised.
pub const KEYBOARD_RAISED_THRESHOLD: f64 = 20.0;

/// Snapshot of the layout and visual viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMetrics {
    /// Layout viewport height (`window.innerHeight`).
    pub inner_height: f64,
    /// Visual viewport height.
    pub height: f64,
    /// Visual viewport offset from the top of the layout viewport.
    pub offset_top: f64,
}

/// Distance between the bottom of the layout viewport and the bottom of the visual viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardInset(f64);

impl KeyboardInset {
    /// No keyboard displacement.
    pub const NONE: Self = Self(0.0);

    /// Measure the inset for `metrics`. Never negative; non-finite measurements read as zero.
    pub fn measure(metrics: &ViewportMetrics) -> Self {
        let visual_bottom = metrics.height + metrics.offset_top;
        let offset = metrics.inner_height - visual_bottom;
        if offset.is_finite() {
            Self(offset.max(0.0))
        } else {
            Self::NONE
        }
    }

    /// Inset in pixels.
    pub fn offset(self) -> f64 {
        self.0
    }

    /// True when the inset exceeds [`KEYBOARD_RAISED_THRESHOLD`].
    pub fn is_raised(self) -> bool {
        self.0 > KEYBOARD_RAISED_THRESHOLD
    }
}
