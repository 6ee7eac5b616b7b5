// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage options.
//!
//! Options arrive as a flat JSON object. Every key is optional and both camelCase and the legacy
//! upper-snake spellings are accepted; when both spellings of one option are present the
//! camelCase one wins. A `null` value behaves as in a script host: numbers read as unset,
//! booleans as false, and the visibility mode as always-on. Unrecognized keys are kept in
//! [`StageConfig::extra`] untouched.
//!
//! The stored values are never mutated; the accessor methods return normalized values.

use core::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use stagerail_guard::guard::DEFAULT_FACE_GUARD_FRACTION;
use stagerail_visibility::VisibilityMode;

use crate::error::Result;

const DEFAULT_RAIL_MAX_VH: f64 = 38.0;
const RAIL_MAX_VH_RANGE: (f64, f64) = (30.0, 50.0);
const DEFAULT_RAIL_WIDTH_MAX_PX: f64 = 880.0;
const DEFAULT_FADE_MS: f64 = 180.0;
const DEFAULT_IDLE_DIM_SECONDS: f64 = 2.0;
const MIN_IDLE_DIM_SECONDS: f64 = 1.0;
const DEFAULT_HISTORY_LIMIT: u32 = 50;
const DEFAULT_RECENT_VISIBLE: u32 = 8;

/// Options for one mounted stage.
#[derive(Clone, Debug, PartialEq)]
pub struct StageConfig {
    /// Maximum rail height as a percentage of the viewport height (`railMaxHeightVh`,
    /// `RAIL_MAX_VH`).
    pub rail_max_height_vh: f64,
    /// Maximum rail width in pixels (`railWidthMaxPx`, `RAIL_WIDTH_MAX`).
    pub rail_width_max_px: f64,
    /// Render the rail without container chrome (`chromeless`, `RAIL_CHROMELESS`).
    pub chromeless: bool,
    /// `"auto"` or anything else, which is always on (`visibilityMode`, `VISIBILITY_MODE`).
    pub visibility_mode: VisibilityMode,
    /// Seconds without interaction before the rail dims (`idleDimSeconds`, `IDLE_DIM_SECONDS`).
    pub idle_dim_seconds: f64,
    /// Fade transition length in milliseconds (`fadeMs`, `FADE_MS`).
    pub fade_ms: f64,
    /// Fraction of the canvas height kept clear for the face (`faceGuardFraction`,
    /// `FACE_GUARD_PCT`).
    pub face_guard_fraction: f64,
    /// Request backdrop blur when the surface supports it (`blurEnabled`, `BLUR_ENABLED`).
    pub blur_enabled: bool,
    /// Transcript history size, for the host (`historyLimit`, `HISTORY_LIMIT`).
    pub history_limit: u32,
    /// Messages visible before "load older", for the host (`recentVisible`, `RECENT_VISIBLE`).
    pub recent_visible: u32,
    /// Unrecognized keys, passed through untouched.
    pub extra: Map<String, Value>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            rail_max_height_vh: DEFAULT_RAIL_MAX_VH,
            rail_width_max_px: DEFAULT_RAIL_WIDTH_MAX_PX,
            chromeless: true,
            visibility_mode: VisibilityMode::Auto,
            idle_dim_seconds: DEFAULT_IDLE_DIM_SECONDS,
            fade_ms: DEFAULT_FADE_MS,
            face_guard_fraction: DEFAULT_FACE_GUARD_FRACTION,
            blur_enabled: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            recent_visible: DEFAULT_RECENT_VISIBLE,
            extra: Map::new(),
        }
    }
}

impl StageConfig {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rail height cap in `vh`, clamped to 30..=50.
    pub fn rail_max_height_vh(&self) -> f64 {
        let vh = if self.rail_max_height_vh.is_finite() {
            self.rail_max_height_vh
        } else {
            DEFAULT_RAIL_MAX_VH
        };
        vh.clamp(RAIL_MAX_VH_RANGE.0, RAIL_MAX_VH_RANGE.1)
    }

    /// Rail width cap in pixels.
    pub fn rail_width_max_px(&self) -> f64 {
        or_default(self.rail_width_max_px, DEFAULT_RAIL_WIDTH_MAX_PX)
    }

    /// Fade transition length.
    pub fn fade(&self) -> Duration {
        let ms = or_default(self.fade_ms, DEFAULT_FADE_MS).max(0.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate; absurd fades become very long ones."
        )]
        Duration::from_micros((ms * 1000.0).round() as u64)
    }

    /// Dim delay; never shorter than one second.
    pub fn idle_dim(&self) -> Duration {
        let secs = or_default(self.idle_dim_seconds, DEFAULT_IDLE_DIM_SECONDS);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float-to-int casts saturate; absurd delays become very long ones."
        )]
        Duration::from_millis((secs.max(MIN_IDLE_DIM_SECONDS) * 1000.0).round() as u64)
    }

    /// Face-guard fraction in `0..=1`.
    pub fn face_guard_fraction(&self) -> f64 {
        if self.face_guard_fraction.is_finite() {
            self.face_guard_fraction.clamp(0.0, 1.0)
        } else {
            DEFAULT_FACE_GUARD_FRACTION
        }
    }
}

// Zero and non-finite values mean "unset".
fn or_default(v: f64, default: f64) -> f64 {
    if v != 0.0 && v.is_finite() { v } else { default }
}

impl<'de> Deserialize<'de> for StageConfig {
    fn deserialize<D: Deserializer<'de>>(d: D) -> core::result::Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(d)?;
        let defaults = Self::default();
        let mut take = |key: &str, legacy: &str| {
            let legacy = map.remove(legacy);
            map.remove(key).or(legacy)
        };
        let number = |v: Option<Value>, default: f64| v.map_or(default, |v| as_number(&v));
        let flag = |v: Option<Value>, default: bool| v.map_or(default, |v| is_truthy(&v));
        let count = |v: Option<Value>, default: u32| {
            v.and_then(|v| v.as_u64())
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(default)
        };

        let rail_max_height_vh = number(
            take("railMaxHeightVh", "RAIL_MAX_VH"),
            defaults.rail_max_height_vh,
        );
        let rail_width_max_px = number(
            take("railWidthMaxPx", "RAIL_WIDTH_MAX"),
            defaults.rail_width_max_px,
        );
        let chromeless = flag(take("chromeless", "RAIL_CHROMELESS"), defaults.chromeless);
        let visibility_mode = match take("visibilityMode", "VISIBILITY_MODE") {
            None => defaults.visibility_mode,
            Some(Value::String(mode)) if mode == "auto" => VisibilityMode::Auto,
            Some(_) => VisibilityMode::AlwaysOn,
        };
        let idle_dim_seconds = number(
            take("idleDimSeconds", "IDLE_DIM_SECONDS"),
            defaults.idle_dim_seconds,
        );
        let fade_ms = number(take("fadeMs", "FADE_MS"), defaults.fade_ms);
        let face_guard_fraction = number(
            take("faceGuardFraction", "FACE_GUARD_PCT"),
            defaults.face_guard_fraction,
        );
        let blur_enabled = flag(take("blurEnabled", "BLUR_ENABLED"), defaults.blur_enabled);
        let history_limit = count(take("historyLimit", "HISTORY_LIMIT"), defaults.history_limit);
        let recent_visible = count(
            take("recentVisible", "RECENT_VISIBLE"),
            defaults.recent_visible,
        );

        Ok(Self {
            rail_max_height_vh,
            rail_width_max_px,
            chromeless,
            visibility_mode,
            idle_dim_seconds,
            fade_ms,
            face_guard_fraction,
            blur_enabled,
            history_limit,
            recent_visible,
            extra: map,
        })
    }
}

// Anything that is not a number, or a string holding one, reads as NaN (unset).
fn as_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
