// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagerail Guard: Kurbo-native placement math for a conversation rail drawn over an avatar canvas.
//!
//! ## Overview
//!
//! A conversation rail (transcript plus composer) floats above an animated avatar.
//! The avatar's face occupies the upper band of the canvas, so the rail must never be pushed into it.
//! This crate answers two pull-based layout questions and holds no state of its own:
//!
//! - [`guard`]: where the top edge of the rail may sit, given the stage and canvas bounding boxes,
//!   the rail's rendered height and a face-guard fraction of the canvas height.
//! - [`viewport`]: how far an on-screen keyboard has pushed the visual viewport up from the layout
//!   viewport, and whether that counts as a raised keyboard.
//!
//! Both operate on plain numbers and [`kurbo::Rect`] values supplied by the caller.
//! They never fail: degenerate inputs (zero-sized or non-finite boxes) fall back to a safe default.
//!
//! ## Face-guard placement
//!
//! ```
//! use kurbo::Rect;
//! use stagerail_guard::guard::{FaceGuard, GuardInput};
//!
//! let guard = FaceGuard::new(0.25);
//! let placement = guard.resolve(&GuardInput {
//!     stage: Rect::new(0.0, 0.0, 800.0, 1000.0),
//!     canvas: Rect::new(0.0, 100.0, 800.0, 500.0),
//!     rail_height: 150.0,
//!     safe_top: 0.0,
//! });
//!
//! // Face band ends at 100 + 400 * 0.25 = 200, so the rail may start no lower than 50.
//! assert_eq!(placement.strict_limit, Some(50.0));
//! // The safe-top floor (0 + 12) is the most restrictive candidate.
//! assert_eq!(placement.top, 12.0);
//! ```
//!
//! ## Keyboard inset
//!
//! ```
//! use stagerail_guard::viewport::{KeyboardInset, ViewportMetrics};
//!
//! let inset = KeyboardInset::measure(&ViewportMetrics {
//!     inner_height: 800.0,
//!     height: 500.0,
//!     offset_top: 0.0,
//! });
//! assert_eq!(inset.offset(), 300.0);
//! assert!(inset.is_raised());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod guard;
pub mod viewport;

pub use guard::{FaceGuard, GuardInput, Placement};
pub use viewport::{KeyboardInset, ViewportMetrics};
