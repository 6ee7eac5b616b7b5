// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagerail Stage: the controller for a conversation rail drawn over an animated avatar.
//!
//! ## Overview
//!
//! A [`Stage`] mounts a fixed scaffold (canvas host, transcript rail, composer) under a root
//! element and keeps three things current for as long as it is mounted:
//!
//! - Rail visibility, driven by a [`VisibilityMachine`](stagerail_visibility::VisibilityMachine):
//!   intent signals show the rail and idle timers dim and hide it.
//! - Rail placement, from [`FaceGuard`](stagerail_guard::FaceGuard): the rail's top edge never
//!   intrudes into the face band of the avatar canvas.
//! - The on-screen keyboard inset, from the visual viewport.
//!
//! The stage never touches a document directly. It talks to a [`Surface`], addressing nodes by
//! [`Element`], and the host forwards subscribed signals back through
//! [`Stage::handle_event`], frames through [`Stage::animation_frame`], and the passage of time
//! through [`Stage::advance`]. [`HeadlessSurface`] is an in-memory surface for tests and
//! renderer-free hosts.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use stagerail_stage::{
//!     Element, EventKind, HeadlessSurface, HostHooks, Stage, StageConfig, Target,
//! };
//! use stagerail_visibility::RailVisibility;
//!
//! let mut stage = Stage::new(
//!     HeadlessSurface::new(),
//!     StageConfig::default(),
//!     "en-US",
//!     HostHooks::new(),
//! )
//! .unwrap();
//! stage.init(Duration::ZERO).unwrap();
//! assert_eq!(stage.visibility(), RailVisibility::Hidden);
//!
//! // A tap on the avatar shows the rail.
//! let t = Duration::from_millis(500);
//! stage.handle_event(Target::Element(Element::CanvasHost), EventKind::PointerDown, t);
//! assert_eq!(stage.visibility(), RailVisibility::Show);
//!
//! // Two seconds of quiet dim it; two more hide it.
//! stage.advance(t + Duration::from_secs(2));
//! assert_eq!(stage.visibility(), RailVisibility::Peek);
//! stage.advance(t + Duration::from_secs(4));
//! assert_eq!(stage.visibility(), RailVisibility::Hidden);
//!
//! stage.destroy();
//! assert_eq!(stage.surface().listener_count(), 0);
//! ```
//!
//! ## Options
//!
//! [`StageConfig`] deserializes from a flat JSON object with `serde`; see its docs for the keys.
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade. Install any logger to see them.

pub mod config;
pub mod copy;
pub mod css;
pub mod error;
pub mod headless;
pub mod hooks;
pub mod listeners;
pub mod router;
pub mod scaffold;
pub mod stage;
pub mod surface;

pub use config::StageConfig;
pub use error::{Result, StageError};
pub use headless::HeadlessSurface;
pub use hooks::{HostHooks, Sender};
pub use listeners::{EventKind, ListenerOptions, ListenerRegistry, Registration, Target};
pub use router::Route;
pub use scaffold::{Element, NodeSpec, Scaffold};
pub use stage::Stage;
pub use surface::{Capabilities, FrameHandle, Surface};
