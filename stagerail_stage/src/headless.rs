// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`Surface`].
//!
//! [`HeadlessSurface`] records every write the stage makes and answers geometry queries from
//! values scripted by the caller. It backs the unit tests and demos, and can drive a stage
//! without any renderer at all.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::Rect;
use stagerail_guard::viewport::ViewportMetrics;

use crate::listeners::{EventKind, ListenerOptions, Target};
use crate::scaffold::{Element, NodeSpec};
use crate::surface::{Capabilities, FrameHandle, Surface};

/// A text node appended by [`Surface::append_text`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    /// Parent node.
    pub parent: Element,
    /// Class list.
    pub class: String,
    /// Text content.
    pub text: String,
}

/// A recording surface with scripted geometry.
#[derive(Clone)]
pub struct HeadlessSurface {
    root: bool,
    capabilities: Capabilities,
    nodes: BTreeMap<Element, NodeSpec>,
    texts: Vec<TextNode>,
    classes: BTreeMap<Element, Vec<String>>,
    styles: BTreeMap<(Element, String), String>,
    data: BTreeMap<(Element, String), String>,
    listeners: Vec<(Target, EventKind, ListenerOptions)>,
    observed: BTreeSet<Element>,
    frames: BTreeSet<u64>,
    next_frame: u64,
    mutations: usize,
    rects: BTreeMap<Element, Rect>,
    heights: BTreeMap<Element, f64>,
    computed: BTreeMap<(Element, String), String>,
    viewport: Option<ViewportMetrics>,
}

impl core::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("root", &self.root)
            .field("capabilities", &self.capabilities)
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("observed", &self.observed)
            .field("frames", &self.frames)
            .field("mutations", &self.mutations)
            .finish_non_exhaustive()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// A surface with a mount root and every capability.
    pub fn new() -> Self {
        Self {
            root: true,
            capabilities: Capabilities::all(),
            nodes: BTreeMap::new(),
            texts: Vec::new(),
            classes: BTreeMap::new(),
            styles: BTreeMap::new(),
            data: BTreeMap::new(),
            listeners: Vec::new(),
            observed: BTreeSet::new(),
            frames: BTreeSet::new(),
            next_frame: 1,
            mutations: 0,
            rects: BTreeMap::new(),
            heights: BTreeMap::new(),
            computed: BTreeMap::new(),
            viewport: None,
        }
    }

    /// A surface without a mount root.
    pub fn detached() -> Self {
        Self {
            root: false,
            ..Self::new()
        }
    }

    /// Replace the capability set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Script the bounding box of `element`.
    pub fn set_rect(&mut self, element: Element, rect: Rect) {
        self.rects.insert(element, rect);
    }

    /// Script the rendered height of `element`.
    pub fn set_offset_height(&mut self, element: Element, height: f64) {
        self.heights.insert(element, height);
    }

    /// Script a computed style value.
    pub fn set_computed_style(&mut self, element: Element, property: &str, value: &str) {
        self.computed
            .insert((element, property.to_owned()), value.to_owned());
    }

    /// Script the visual viewport. `None` reports it as unavailable.
    pub fn set_viewport(&mut self, metrics: Option<ViewportMetrics>) {
        self.viewport = metrics;
    }

    /// Current value of `data-{key}` on `element`.
    pub fn data(&self, element: Element, key: &str) -> Option<&str> {
        self.data
            .get(&(element, key.to_owned()))
            .map(String::as_str)
    }

    /// Current inline value of `property` on `element`.
    pub fn style(&self, element: Element, property: &str) -> Option<&str> {
        self.styles
            .get(&(element, property.to_owned()))
            .map(String::as_str)
    }

    /// Whether `element` carries `class`.
    pub fn has_class(&self, element: Element, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|c| c.iter().any(|c| c == class))
    }

    /// Number of live listener subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether anything listens for `event` on `target`.
    pub fn is_listening(&self, target: Target, event: EventKind) -> bool {
        self.listeners
            .iter()
            .any(|(t, e, _)| *t == target && *e == event)
    }

    /// Options of the subscription for `event` on `target`.
    pub fn listener_options(&self, target: Target, event: EventKind) -> Option<ListenerOptions> {
        self.listeners
            .iter()
            .find(|(t, e, _)| *t == target && *e == event)
            .map(|(_, _, o)| *o)
    }

    /// Whether `element` is under resize observation.
    pub fn observed(&self, element: Element) -> bool {
        self.observed.contains(&element)
    }

    /// Pending animation frames, oldest first.
    pub fn pending_frames(&self) -> Vec<FrameHandle> {
        self.frames.iter().copied().map(FrameHandle).collect()
    }

    /// Drain the pending animation frames, oldest first.
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        let frames = self.pending_frames();
        self.frames.clear();
        frames
    }

    /// Number of document writes so far.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Number of mounted element nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The mounted node for `element`.
    pub fn node(&self, element: Element) -> Option<&NodeSpec> {
        self.nodes.get(&element)
    }

    /// Text nodes appended under `parent`, in order.
    pub fn texts(&self, parent: Element) -> impl Iterator<Item = &TextNode> {
        self.texts.iter().filter(move |t| t.parent == parent)
    }

    fn is_descendant(&self, element: Element, ancestor: Element) -> bool {
        let mut current = element;
        while let Some(node) = self.nodes.get(&current) {
            if node.parent == ancestor {
                return true;
            }
            current = node.parent;
        }
        false
    }
}

impl Surface for HeadlessSurface {
    fn has_root(&self) -> bool {
        self.root
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create(&mut self, node: &NodeSpec) {
        self.mutations += 1;
        self.nodes.insert(node.element, node.clone());
    }

    fn append_text(&mut self, parent: Element, class: &str, text: &str) {
        self.mutations += 1;
        self.texts.push(TextNode {
            parent,
            class: class.to_owned(),
            text: text.to_owned(),
        });
    }

    fn clear_children(&mut self, element: Element) {
        self.mutations += 1;
        let doomed: Vec<Element> = self
            .nodes
            .keys()
            .copied()
            .filter(|e| self.is_descendant(*e, element))
            .collect();
        self.texts
            .retain(|t| t.parent != element && !doomed.contains(&t.parent));
        for e in doomed {
            self.nodes.remove(&e);
            self.classes.remove(&e);
            self.styles.retain(|(el, _), _| *el != e);
            self.data.retain(|(el, _), _| *el != e);
        }
    }

    fn add_class(&mut self, element: Element, class: &str) {
        self.mutations += 1;
        let classes = self.classes.entry(element).or_default();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn set_style(&mut self, element: Element, property: &str, value: &str) {
        self.mutations += 1;
        self.styles
            .insert((element, property.to_owned()), value.to_owned());
    }

    fn set_data(&mut self, element: Element, key: &str, value: Option<&str>) {
        self.mutations += 1;
        match value {
            Some(v) => {
                self.data.insert((element, key.to_owned()), v.to_owned());
            }
            None => {
                self.data.remove(&(element, key.to_owned()));
            }
        }
    }

    fn bounding_rect(&self, element: Element) -> Rect {
        self.rects.get(&element).copied().unwrap_or(Rect::ZERO)
    }

    fn offset_height(&self, element: Element) -> f64 {
        self.heights.get(&element).copied().unwrap_or(0.0)
    }

    fn computed_style(&self, element: Element, property: &str) -> Option<String> {
        let key = (element, property.to_owned());
        self.computed
            .get(&key)
            .or_else(|| self.styles.get(&key))
            .cloned()
    }

    fn visual_viewport(&self) -> Option<ViewportMetrics> {
        if self.capabilities.contains(Capabilities::VISUAL_VIEWPORT) {
            self.viewport
        } else {
            None
        }
    }

    fn add_listener(&mut self, target: Target, event: EventKind, options: ListenerOptions) {
        let capture = options.contains(ListenerOptions::CAPTURE);
        let duplicate = self.listeners.iter().any(|(t, e, o)| {
            *t == target && *e == event && o.contains(ListenerOptions::CAPTURE) == capture
        });
        if !duplicate {
            self.listeners.push((target, event, options));
        }
    }

    fn remove_listener(&mut self, target: Target, event: EventKind, options: ListenerOptions) {
        let capture = options.contains(ListenerOptions::CAPTURE);
        self.listeners.retain(|(t, e, o)| {
            !(*t == target && *e == event && o.contains(ListenerOptions::CAPTURE) == capture)
        });
    }

    fn observe_resize(&mut self, element: Element) {
        self.observed.insert(element);
    }

    fn disconnect_resize(&mut self, element: Element) {
        self.observed.remove(&element);
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        let id = self.next_frame;
        self.next_frame += 1;
        self.frames.insert(id);
        FrameHandle(id)
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StageConfig;
    use crate::scaffold::Scaffold;

    #[test]
    fn clearing_the_root_removes_the_whole_tree() {
        let mut surface = HeadlessSurface::new();
        let scaffold = Scaffold::build(&StageConfig::default(), "en-US");
        for node in scaffold.nodes() {
            surface.create(node);
        }
        surface.append_text(Element::MessagesScroll, "message bot", "hi");
        surface.set_data(Element::Rail, "x", Some("1"));
        surface.set_data(Element::Root, "blur", Some("true"));
        assert_eq!(surface.node_count(), scaffold.nodes().len());

        surface.clear_children(Element::Root);
        assert_eq!(surface.node_count(), 0);
        assert_eq!(surface.texts(Element::MessagesScroll).count(), 0);
        assert_eq!(surface.data(Element::Rail, "x"), None);
        // The root itself keeps its attributes.
        assert_eq!(surface.data(Element::Root, "blur"), Some("true"));
    }

    #[test]
    fn viewport_requires_the_capability() {
        let metrics = ViewportMetrics {
            inner_height: 800.0,
            height: 800.0,
            offset_top: 0.0,
        };
        let mut surface = HeadlessSurface::new().with_capabilities(Capabilities::empty());
        surface.set_viewport(Some(metrics));
        assert_eq!(surface.visual_viewport(), None);

        let mut surface = HeadlessSurface::new();
        surface.set_viewport(Some(metrics));
        assert_eq!(surface.visual_viewport(), Some(metrics));
    }

    #[test]
    fn cancelled_frames_are_not_pending() {
        let mut surface = HeadlessSurface::new();
        let a = surface.request_animation_frame();
        let b = surface.request_animation_frame();
        surface.cancel_animation_frame(a);
        assert_eq!(surface.pending_frames(), vec![b]);
        assert_eq!(surface.take_frames(), vec![b]);
        assert!(surface.pending_frames().is_empty());
    }
}
