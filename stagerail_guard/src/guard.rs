// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Face-guard placement: keep the rail clear of the avatar's face band.
//!
//! ## Algorithm
//!
//! 1. Start from the floor: the safe-top inset plus [`SAFE_TOP_MARGIN`].
//! 2. When both the stage and the canvas have a non-zero height, compute two limits for the
//!    rail's top edge, each `canvas_top + canvas_height * fraction - rail_height` relative to
//!    the stage: a strict one using the configured fraction and a wide one using
//!    [`WIDE_FACE_GUARD_FRACTION`].
//! 3. Take the minimum of the floor and every finite limit, then raise it back to the floor
//!    and clamp at zero.
//! 4. A non-finite candidate is dropped; a non-finite result becomes the floor.
//!
//! The floor always wins step 3, so a published top never rises above the safe-top inset.

use kurbo::Rect;

/// Fraction of the canvas height reserved for the face when none is configured.
pub const DEFAULT_FACE_GUARD_FRACTION: f64 = 0.25;

/// Wider fraction used for the secondary limit.
pub const WIDE_FACE_GUARD_FRACTION: f64 = 0.30;

/// Fixed margin added below the safe-top inset.
pub const SAFE_TOP_MARGIN: f64 = 12.0;

/// Geometry sampled from the surface for one placement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuardInput {
    /// Bounding box of the stage root.
    pub stage: Rect,
    /// Bounding box of the canvas host.
    pub canvas: Rect,
    /// Rendered height of the rail.
    pub rail_height: f64,
    /// Safe-top inset read from the stage (for example a notch inset).
    pub safe_top: f64,
}

/// Result of a placement pass.
///
/// `top` is what gets published; the remaining fields record the candidates that took part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Rail top offset relative to the stage, in pixels.
    pub top: f64,
    /// Safe-top inset plus margin.
    pub floor: f64,
    /// Limit derived from the configured fraction, if it could be computed.
    pub strict_limit: Option<f64>,
    /// Limit derived from [`WIDE_FACE_GUARD_FRACTION`], if it could be computed.
    pub wide_limit: Option<f64>,
}

impl Placement {
    /// Returns true when a rail of `rail_height` placed at [`Placement::top`] ends at or above
    /// `canvas_top + canvas_height * fraction`.
    pub fn clears_face(
        &self,
        canvas_top: f64,
        canvas_height: f64,
        fraction: f64,
        rail_height: f64,
    ) -> bool {
        self.top + rail_height <= canvas_top + canvas_height * fraction
    }
}

/// Pull-based face-guard resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGuard {
    fraction: f64,
}

impl Default for FaceGuard {
    fn default() -> Self {
        Self::new(DEFAULT_FACE_GUARD_FRACTION)
    }
}

impl FaceGuard {
    /// Create a guard for `fraction` of the canvas height.
    ///
    /// Non-finite fractions use [`DEFAULT_FACE_GUARD_FRACTION`]; others are clamped to `0..=1`.
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            DEFAULT_FACE_GUARD_FRACTION
        };
        Self { fraction }
    }

    /// The configured face-guard fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Compute the rail's top offset for `input`.
    pub fn resolve(&self, input: &GuardInput) -> Placement {
        let safe_top = finite_or_zero(input.safe_top);
        let mut floor = safe_top + SAFE_TOP_MARGIN;
        if !floor.is_finite() {
            floor = SAFE_TOP_MARGIN;
        }
        let rail_height = finite_or_zero(input.rail_height);

        let mut top = floor;
        let mut strict_limit = None;
        let mut wide_limit = None;

        let canvas_height = input.canvas.height();
        if is_nonzero(canvas_height) && is_nonzero(input.stage.height()) {
            let canvas_top = input.canvas.y0 - input.stage.y0;
            strict_limit = top_limit(canvas_top, canvas_height, self.fraction, rail_height);
            wide_limit = top_limit(
                canvas_top,
                canvas_height,
                WIDE_FACE_GUARD_FRACTION,
                rail_height,
            );
            for limit in [strict_limit, wide_limit].into_iter().flatten() {
                top = top.min(limit);
            }
        }

        if !top.is_finite() {
            top = floor;
        }
        top = top.max(floor);
        if top < 0.0 {
            top = 0.0;
        }

        Placement {
            top,
            floor,
            strict_limit,
            wide_limit,
        }
    }
}

fn top_limit(canvas_top: f64, canvas_height: f64, fraction: f64, rail_height: f64) -> Option<f64> {
    let bottom = canvas_top + canvas_height * fraction;
    if !bottom.is_finite() {
        return None;
    }
    let limit = bottom - rail_height;
    limit.is_finite().then_some(limit)
}

// Zero and NaN both count as "no height".
fn is_nonzero(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
