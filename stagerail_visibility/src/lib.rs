// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagerail Visibility: a deterministic, `no_std` hidden → peek → show lifecycle for overlay rails.
//!
//! ## Overview
//!
//! A conversation rail drawn over an avatar should get out of the way when nobody is using it.
//! [`VisibilityMachine`](crate::machine::VisibilityMachine) owns that decision:
//!
//! - Intent signals (taps, typing, scrolling) call `interaction`, which shows the rail and
//!   restarts the idle countdown.
//! - After one idle period the rail dims to `Peek`; after two it is `Hidden`.
//! - Softer signals (pointer leaving, focus leaving) call `idle_countdown`, which restarts the
//!   countdown without forcing the rail visible.
//! - Hosts can force a state with `flash`.
//!
//! ## Time
//!
//! The machine never reads a clock and never spawns anything. Each call that can schedule takes
//! the current time as a [`Duration`](core::time::Duration) on the caller's monotonic clock, and
//! expired timers are delivered by calling `advance(now)`. Tests fast-forward by passing a later
//! `now`; real hosts call `advance` from their timer or frame callback, using `next_deadline`
//! to decide when.
//!
//! ## Output
//!
//! Every operation returns the [`Transition`](crate::machine::Transition)s it committed.
//! Applying them (writing an attribute, re-running layout when `relayout` is set) is the
//! caller's job.
//!
//! ```
//! use core::time::Duration;
//! use stagerail_visibility::machine::{RailVisibility, VisibilityMachine, VisibilityMode};
//!
//! let mut rail = VisibilityMachine::new(VisibilityMode::Auto, Duration::from_secs(2));
//! let _ = rail.mount(Duration::ZERO);
//! assert_eq!(rail.state(), RailVisibility::Hidden);
//!
//! let _ = rail.interaction(Duration::from_secs(1));
//! assert_eq!(rail.state(), RailVisibility::Show);
//!
//! let _ = rail.advance(Duration::from_secs(3));
//! assert_eq!(rail.state(), RailVisibility::Peek);
//!
//! let _ = rail.advance(Duration::from_secs(5));
//! assert_eq!(rail.state(), RailVisibility::Hidden);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod machine;
pub mod timer;

pub use machine::{Commit, IdleTimer, RailVisibility, Transition, VisibilityMachine, VisibilityMode};
pub use timer::{TimerId, TimerQueue};
