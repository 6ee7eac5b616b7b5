// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registrations and their teardown.

use crate::router::Route;
use crate::scaffold::Element;
use crate::surface::Surface;

/// Where a signal comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// A scaffold node.
    Element(Element),
    /// The window.
    Window,
    /// The visual viewport.
    VisualViewport,
}

/// Platform signals the stage subscribes to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// `pointerdown`
    PointerDown,
    /// `pointerenter`
    PointerEnter,
    /// `pointerleave`
    PointerLeave,
    /// `touchstart`
    TouchStart,
    /// `wheel`
    Wheel,
    /// `scroll`
    Scroll,
    /// `focusin`
    FocusIn,
    /// `focusout`
    FocusOut,
    /// `focus`
    Focus,
    /// `blur`
    Blur,
    /// `submit`
    Submit,
    /// `click`
    Click,
    /// `resize`
    Resize,
    /// `orientationchange`
    OrientationChange,
}

impl EventKind {
    /// DOM event type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::TouchStart => "touchstart",
            Self::Wheel => "wheel",
            Self::Scroll => "scroll",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::Click => "click",
            Self::Resize => "resize",
            Self::OrientationChange => "orientationchange",
        }
    }
}

bitflags::bitflags! {
    /// Listener options, as passed to `addEventListener`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerOptions: u8 {
        /// The handler never cancels the event.
        const PASSIVE = 0b0000_0001;
        /// Listen in the capture phase.
        const CAPTURE = 0b0000_0010;
    }
}

/// One subscription and what it routes to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Registration {
    /// Signal source.
    pub target: Target,
    /// Signal type.
    pub event: EventKind,
    /// Subscription options.
    pub options: ListenerOptions,
    /// What the signal means to the stage.
    pub route: Route,
}

impl Registration {
    /// A non-passive registration.
    pub const fn new(target: Target, event: EventKind, route: Route) -> Self {
        Self {
            target,
            event,
            options: ListenerOptions::empty(),
            route,
        }
    }

    /// A passive registration.
    pub const fn passive(target: Target, event: EventKind, route: Route) -> Self {
        Self {
            target,
            event,
            options: ListenerOptions::PASSIVE,
            route,
        }
    }

    // Mirrors `addEventListener` identity: same type, handler and capture flag.
    fn same_listener(&self, other: &Self) -> bool {
        self.target == other.target
            && self.event == other.event
            && self.route == other.route
            && self.options.contains(ListenerOptions::CAPTURE)
                == other.options.contains(ListenerOptions::CAPTURE)
    }
}

/// Ordered registrations owned by one stage.
///
/// Everything added here is removed from the surface by [`ListenerRegistry::dispose`].
#[derive(Clone, Debug, Default)]
pub struct ListenerRegistry {
    entries: Vec<Registration>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `registration` on `surface`. Returns false for an exact duplicate, which is ignored.
    pub fn add<S: Surface + ?Sized>(&mut self, surface: &mut S, registration: Registration) -> bool {
        if self.entries.iter().any(|r| r.same_listener(&registration)) {
            return false;
        }
        surface.add_listener(registration.target, registration.event, registration.options);
        self.entries.push(registration);
        true
    }

    /// Route for a signal, if something here listens for it.
    pub fn route(&self, target: Target, event: EventKind) -> Option<Route> {
        self.entries
            .iter()
            .find(|r| r.target == target && r.event == event)
            .map(|r| r.route)
    }

    /// Registrations in subscription order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unsubscribe everything, in subscription order.
    pub fn dispose<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for r in self.entries.drain(..) {
            surface.remove_listener(r.target, r.event, r.options);
        }
    }
}
