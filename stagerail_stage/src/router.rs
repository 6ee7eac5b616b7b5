// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction routing: which signals the stage listens to and what each one means.
//!
//! Visibility reacts to intent (tapping, typing, scrolling), not to a pointer merely resting
//! nearby. Intent signals route to [`Route::Interaction`], which shows the rail and restarts the
//! idle countdown. Signals that mark the end of engagement (focus or pointer leaving) route to
//! [`Route::IdleCountdown`], which restarts the countdown without forcing the rail visible, so
//! the rail can still decay while a pointer lingers.

use crate::listeners::{EventKind, Registration, Target};
use crate::scaffold::Element;

/// What a routed signal does.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Route {
    /// Show the rail and restart the idle countdown.
    Interaction,
    /// Restart the idle countdown only.
    IdleCountdown,
    /// Re-run face-guard placement.
    FaceGuard,
    /// Re-measure the keyboard inset.
    Viewport,
    /// Submit the composer. Hosts suppress the native form submission themselves.
    Submit,
}

/// Nodes whose pointer and touch activity counts as interaction.
pub const INTERACTIVE_ELEMENTS: [Element; 9] = [
    Element::Rail,
    Element::MessagesScroll,
    Element::Composer,
    Element::TextInput,
    Element::MicButton,
    Element::TtsButton,
    Element::ClearButton,
    Element::SendButton,
    Element::CanvasHost,
];

/// Visibility bindings, registered only in auto mode.
pub fn interaction_bindings() -> Vec<Registration> {
    use EventKind::*;
    use Route::*;
    let el = Target::Element;

    let mut out = Vec::new();
    for element in INTERACTIVE_ELEMENTS {
        for event in [PointerDown, PointerEnter, TouchStart] {
            out.push(Registration::passive(el(element), event, Interaction));
        }
    }
    out.extend([
        Registration::passive(el(Element::MessagesScroll), Wheel, Interaction),
        Registration::passive(el(Element::MessagesScroll), Scroll, Interaction),
        Registration::new(el(Element::Composer), FocusIn, Interaction),
        Registration::new(el(Element::Composer), FocusOut, IdleCountdown),
        Registration::passive(el(Element::Composer), PointerLeave, IdleCountdown),
        Registration::new(el(Element::Rail), FocusIn, Interaction),
        Registration::passive(el(Element::Rail), PointerLeave, IdleCountdown),
        Registration::new(el(Element::TextInput), Focus, Interaction),
        Registration::new(el(Element::TextInput), Blur, IdleCountdown),
        Registration::passive(el(Element::CanvasHost), PointerLeave, IdleCountdown),
        Registration::passive(el(Element::Root), PointerLeave, IdleCountdown),
    ]);
    out
}

/// Composer bindings, registered in every mode.
pub fn composer_bindings() -> [Registration; 2] {
    [
        Registration::new(
            Target::Element(Element::Composer),
            EventKind::Submit,
            Route::Submit,
        ),
        Registration::new(
            Target::Element(Element::SendButton),
            EventKind::Click,
            Route::Submit,
        ),
    ]
}

/// Window signals that invalidate face-guard placement.
pub fn face_guard_bindings() -> [Registration; 2] {
    [
        Registration::new(Target::Window, EventKind::Resize, Route::FaceGuard),
        Registration::new(Target::Window, EventKind::OrientationChange, Route::FaceGuard),
    ]
}

/// Visual viewport signals that move the keyboard inset.
pub fn viewport_bindings() -> [Registration; 2] {
    [
        Registration::new(Target::VisualViewport, EventKind::Resize, Route::Viewport),
        Registration::new(Target::VisualViewport, EventKind::Scroll, Route::Viewport),
    ]
}
