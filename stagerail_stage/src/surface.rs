// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the stage and whatever renders it.
//!
//! A [`Surface`] is the stage's only view of the document: it creates the scaffold nodes,
//! applies attribute and style writes, reports geometry, and subscribes to platform signals.
//! Nodes are addressed by [`Element`]; the surface maps them to its own handles.
//!
//! Subscriptions are only bookkeeping on the surface side. When a subscribed signal occurs, the
//! host forwards it to [`Stage::handle_event`](crate::stage::Stage::handle_event), and the
//! stage decides what it means.

use kurbo::Rect;
use stagerail_guard::viewport::ViewportMetrics;

use crate::listeners::{EventKind, ListenerOptions, Target};
use crate::scaffold::{Element, NodeSpec};

bitflags::bitflags! {
    /// Optional platform features. Each one missing disables its feature without error.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Backdrop blur can be rendered.
        const BACKDROP_BLUR   = 0b0000_0001;
        /// Visual viewport geometry and events are available.
        const VISUAL_VIEWPORT = 0b0000_0010;
        /// Element resize observation is available.
        const RESIZE_OBSERVER = 0b0000_0100;
    }
}

/// Handle to a requested animation frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameHandle(pub u64);

/// Document operations the stage needs.
pub trait Surface {
    /// Whether a mount root exists.
    fn has_root(&self) -> bool;

    /// Optional features available on this surface.
    fn capabilities(&self) -> Capabilities;

    /// Create `node` and append it to `node.parent`.
    fn create(&mut self, node: &NodeSpec);

    /// Append a text node with `class` under `parent`.
    fn append_text(&mut self, parent: Element, class: &str, text: &str);

    /// Remove every child of `element`.
    fn clear_children(&mut self, element: Element);

    /// Add `class` to `element`'s class list.
    fn add_class(&mut self, element: Element, class: &str);

    /// Set an inline style property (custom properties included).
    fn set_style(&mut self, element: Element, property: &str, value: &str);

    /// Set or remove a `data-*` attribute. `key` is the attribute name without the `data-` prefix.
    fn set_data(&mut self, element: Element, key: &str, value: Option<&str>);

    /// Bounding box of `element` in viewport coordinates.
    fn bounding_rect(&self, element: Element) -> Rect;

    /// Rendered height of `element`.
    fn offset_height(&self, element: Element) -> f64;

    /// Computed value of `property` on `element`, if set.
    fn computed_style(&self, element: Element, property: &str) -> Option<String>;

    /// Current visual viewport geometry.
    fn visual_viewport(&self) -> Option<ViewportMetrics>;

    /// Start forwarding `event` on `target`.
    fn add_listener(&mut self, target: Target, event: EventKind, options: ListenerOptions);

    /// Stop forwarding `event` on `target`.
    fn remove_listener(&mut self, target: Target, event: EventKind, options: ListenerOptions);

    /// Start reporting size changes of `element`.
    fn observe_resize(&mut self, element: Element);

    /// Stop reporting size changes of `element`.
    fn disconnect_resize(&mut self, element: Element);

    /// Request a one-shot callback before the next paint.
    fn request_animation_frame(&mut self) -> FrameHandle;

    /// Cancel a pending frame request.
    fn cancel_animation_frame(&mut self, handle: FrameHandle);
}
