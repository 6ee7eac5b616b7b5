// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rail visibility state machine.
//!
//! ## Transitions (auto mode)
//!
//! - [`VisibilityMachine::interaction`]: `Show`, forced, and both idle timers re-armed.
//! - Peek timer (`idle` after the last re-arm): `Show` → `Peek`. No effect from other states.
//! - Hide timer (`2 × idle` after the same re-arm): any non-hidden state → `Hidden`.
//! - [`VisibilityMachine::flash`]: force the named state. `Show` behaves like an interaction;
//!   `Peek` leaves pending timers untouched; `Hidden` clears them.
//!
//! Entering `Hidden` always clears both timers, and nothing re-arms them while hidden, so the
//! only ways out of `Hidden` are an interaction or a flash.
//!
//! ## Always-on mode
//!
//! [`VisibilityMode::AlwaysOn`] mounts straight into `Show` and never schedules a timer.

use alloc::vec::Vec;
use core::time::Duration;

use crate::timer::{TimerId, TimerQueue};

/// Visibility of the conversation rail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RailVisibility {
    /// Invisible and untappable.
    Hidden,
    /// Dimmed but still interactive.
    Peek,
    /// Fully visible and interactive.
    Show,
}

impl RailVisibility {
    /// The attribute value written for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Peek => "peek",
            Self::Show => "show",
        }
    }

    /// Parse an attribute value. Anything unrecognized reads as [`RailVisibility::Show`].
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "hidden" => Self::Hidden,
            "peek" => Self::Peek,
            _ => Self::Show,
        }
    }
}

impl core::fmt::Display for RailVisibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How visibility is driven.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum VisibilityMode {
    /// Interactions show the rail; idle timers dim and hide it.
    #[default]
    Auto,
    /// The rail is shown once at mount and stays shown.
    AlwaysOn,
}

bitflags::bitflags! {
    /// Options for [`VisibilityMachine::set`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Commit: u8 {
        /// Re-apply even when the state is unchanged.
        const FORCE        = 0b0000_0001;
        /// Skip the relayout that normally follows a commit.
        const IMMEDIATE    = 0b0000_0010;
        /// Re-arm the idle timers when entering a visible state.
        const RESET_TIMERS = 0b0000_0100;
    }
}

/// Which idle timer expired.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IdleTimer {
    /// `Show` → `Peek` after one idle period.
    Peek,
    /// Anything visible → `Hidden` after two idle periods.
    Hide,
}

/// A committed state change for the owner to apply.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// State before the commit.
    pub from: RailVisibility,
    /// State after the commit. May equal `from` for forced commits.
    pub to: RailVisibility,
    /// The owner should re-run layout (the commit was not [`Commit::IMMEDIATE`]).
    pub relayout: bool,
}

/// Hidden/peek/show lifecycle for one mounted rail.
///
/// Time is supplied by the caller on every call that can schedule, and expired timers are
/// delivered through [`VisibilityMachine::advance`]. The machine never reads a clock itself.
#[derive(Clone)]
pub struct VisibilityMachine {
    mode: VisibilityMode,
    idle: Duration,
    state: RailVisibility,
    peek_timer: Option<TimerId>,
    hide_timer: Option<TimerId>,
    timers: TimerQueue<IdleTimer>,
    live: bool,
}

impl core::fmt::Debug for VisibilityMachine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityMachine")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("idle", &self.idle)
            .field("peek_timer", &self.peek_timer)
            .field("hide_timer", &self.hide_timer)
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}

impl VisibilityMachine {
    /// Create a machine in `Hidden` with no timers.
    ///
    /// `idle` is the dim delay; the hide delay is twice that. Callers are expected to have
    /// normalized it already.
    pub fn new(mode: VisibilityMode, idle: Duration) -> Self {
        Self {
            mode,
            idle,
            state: RailVisibility::Hidden,
            peek_timer: None,
            hide_timer: None,
            timers: TimerQueue::new(),
            live: true,
        }
    }

    /// Current state.
    pub fn state(&self) -> RailVisibility {
        self.state
    }

    /// Configured mode.
    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    /// Dim delay.
    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Handle of the pending peek timer.
    pub fn peek_timer(&self) -> Option<TimerId> {
        self.peek_timer
    }

    /// Handle of the pending hide timer.
    pub fn hide_timer(&self) -> Option<TimerId> {
        self.hide_timer
    }

    /// True while either idle timer is pending.
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// When [`VisibilityMachine::advance`] next has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// False after [`VisibilityMachine::shutdown`].
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Apply the initial state: `Hidden` (forced, immediate), then `Show` in always-on mode.
    pub fn mount(&mut self, now: Duration) -> Vec<Transition> {
        let mut out = Vec::new();
        out.extend(self.set(RailVisibility::Hidden, Commit::FORCE | Commit::IMMEDIATE, now));
        if self.mode != VisibilityMode::Auto {
            out.extend(self.set(RailVisibility::Show, Commit::FORCE | Commit::IMMEDIATE, now));
        }
        out
    }

    /// Commit `target`.
    ///
    /// Without [`Commit::FORCE`], setting the current state again is a no-op.
    pub fn set(&mut self, target: RailVisibility, commit: Commit, now: Duration) -> Option<Transition> {
        if !self.live {
            return None;
        }
        if self.state == target && !commit.contains(Commit::FORCE) {
            return None;
        }

        let from = self.state;
        self.state = target;

        if target == RailVisibility::Hidden {
            self.clear_timers();
        } else if commit.contains(Commit::RESET_TIMERS) {
            self.schedule_timers(now);
        }

        let relayout = !commit.contains(Commit::IMMEDIATE);
        log::debug!("rail visibility {from} -> {target} (commit={commit:?})");
        Some(Transition {
            from,
            to: target,
            relayout,
        })
    }

    /// An intent signal: show immediately and restart the idle countdown.
    pub fn interaction(&mut self, now: Duration) -> Option<Transition> {
        let transition = self.set(RailVisibility::Show, Commit::FORCE | Commit::IMMEDIATE, now);
        self.schedule_timers(now);
        transition
    }

    /// Restart the idle countdown without changing state.
    ///
    /// Ignored while hidden and outside auto mode. Returns whether the timers were re-armed.
    pub fn idle_countdown(&mut self, now: Duration) -> bool {
        if !self.live || self.mode != VisibilityMode::Auto || self.state == RailVisibility::Hidden
        {
            return false;
        }
        self.schedule_timers(now);
        true
    }

    /// Force `target` from outside the interaction flow.
    pub fn flash(&mut self, target: RailVisibility, now: Duration) -> Option<Transition> {
        match target {
            RailVisibility::Show => self.interaction(now),
            RailVisibility::Peek | RailVisibility::Hidden => self.set(target, Commit::FORCE, now),
        }
    }

    /// Fire every idle timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Duration) -> Vec<Transition> {
        let mut out = Vec::new();
        while let Some((id, timer)) = self.timers.pop_due(now) {
            log::trace!("idle timer {timer:?} fired");
            match timer {
                IdleTimer::Peek => {
                    if self.peek_timer == Some(id) {
                        self.peek_timer = None;
                    }
                    if self.state == RailVisibility::Show {
                        out.extend(self.set(
                            RailVisibility::Peek,
                            Commit::FORCE | Commit::IMMEDIATE,
                            now,
                        ));
                    }
                }
                IdleTimer::Hide => {
                    if self.hide_timer == Some(id) {
                        self.hide_timer = None;
                    }
                    if self.state != RailVisibility::Hidden {
                        out.extend(self.set(
                            RailVisibility::Hidden,
                            Commit::FORCE | Commit::IMMEDIATE,
                            now,
                        ));
                    }
                }
            }
        }
        out
    }

    /// Cancel both idle timers.
    pub fn clear_timers(&mut self) {
        for id in [self.peek_timer.take(), self.hide_timer.take()]
            .into_iter()
            .flatten()
        {
            if self.timers.cancel(id) {
                log::trace!("idle timer {id:?} cancelled");
            }
        }
    }

    /// Cancel everything and stop responding. Idempotent.
    pub fn shutdown(&mut self) {
        self.clear_timers();
        self.timers.clear();
        self.live = false;
    }

    // Clear-then-reschedule: there is never a window where an old and a new timer coexist.
    fn schedule_timers(&mut self, now: Duration) {
        if !self.live || self.mode != VisibilityMode::Auto {
            return;
        }
        self.clear_timers();
        let peek_at = now.saturating_add(self.idle);
        let hide_at = now.saturating_add(self.idle.saturating_mul(2));
        self.peek_timer = Some(self.timers.schedule(peek_at, IdleTimer::Peek));
        self.hide_timer = Some(self.timers.schedule(hide_at, IdleTimer::Hide));
        log::trace!("idle timers armed: peek at {peek_at:?}, hide at {hide_at:?}");
    }
}
