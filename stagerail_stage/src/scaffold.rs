// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted node tree and its naming contract.
//!
//! Node creation belongs to the [`Surface`](crate::surface::Surface); this module only decides
//! which nodes exist, how they nest, and the ids, classes and ARIA attributes they carry. The
//! ids are a binding contract with the chat/auth layer, which looks them up directly.

use crate::config::StageConfig;
use crate::copy::{CopyKey, copy_for};

/// Maximum composer input length.
pub const INPUT_MAX_LENGTH: usize = 2000;

/// Every node the stage mounts, plus the host-provided root.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Element {
    /// Host-provided mount root.
    Root,
    /// Layer holding the avatar canvas.
    CanvasLayer,
    /// Frame the avatar renderer draws into.
    CanvasHost,
    /// Speech-to-text status overlay.
    SttOverlay,
    /// Conversation rail.
    Rail,
    /// Transcript scroll area.
    MessagesScroll,
    /// Bar holding the "load older" button.
    LoadBar,
    /// "Load older" button.
    LoadOlder,
    /// Placeholder shown while the transcript is empty.
    EmptyState,
    /// Empty-state glyph.
    EmptyEmoji,
    /// Empty-state heading.
    EmptyTitle,
    /// Empty-state body.
    EmptyCopy,
    /// "Scroll to bottom" button.
    ScrollIndicator,
    /// Composer form.
    Composer,
    /// Microphone toggle.
    MicButton,
    /// Text-to-speech toggle.
    TtsButton,
    /// Clear-session button.
    ClearButton,
    /// Wrapper around the input and counter.
    TextareaContainer,
    /// Text input.
    TextInput,
    /// Character counter.
    CharCounter,
    /// Send button.
    SendButton,
}

impl Element {
    /// Element id, for nodes the host looks up by id.
    pub const fn id(self) -> Option<&'static str> {
        Some(match self {
            Self::CanvasHost => "live2dContainer",
            Self::SttOverlay => "sttOverlay",
            Self::MessagesScroll => "chatMessages",
            Self::LoadOlder => "loadOlderBtn",
            Self::EmptyState => "emptyState",
            Self::ScrollIndicator => "scrollToBottomBtn",
            Self::Composer => "inputArea",
            Self::MicButton => "micButton",
            Self::TtsButton => "ttsButton",
            Self::ClearButton => "clearSessionButton",
            Self::TextInput => "textInput",
            Self::CharCounter => "charCounter",
            _ => return None,
        })
    }

    /// Class list.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Root => "live2d-chat-stage",
            Self::CanvasLayer => "live2d-chat-stage__canvas",
            Self::CanvasHost => "live2d-chat-stage__canvas-frame",
            Self::SttOverlay => "live2d-chat-stage__stt",
            Self::Rail => "live2d-chat-stage__rail",
            Self::MessagesScroll => "live2d-chat-stage__rail-scroll",
            Self::LoadBar => "live2d-chat-stage__load-bar",
            Self::LoadOlder => "live2d-chat-stage__load-older",
            Self::EmptyState => "live2d-chat-stage__empty",
            Self::EmptyEmoji => "live2d-chat-stage__empty-emoji",
            Self::EmptyTitle | Self::EmptyCopy => "",
            Self::ScrollIndicator => "live2d-chat-stage__scroll-indicator",
            Self::Composer => "live2d-chat-stage__composer",
            Self::MicButton | Self::TtsButton => "voice-btn",
            Self::ClearButton => "clear-session-btn",
            Self::TextareaContainer => "textarea-container",
            Self::TextInput => "live2d-chat-stage__input",
            Self::CharCounter => "live2d-chat-stage__char-counter",
            Self::SendButton => "send-btn live2d-chat-stage__send",
        }
    }

    /// HTML tag name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Rail => "section",
            Self::LoadOlder
            | Self::ScrollIndicator
            | Self::MicButton
            | Self::TtsButton
            | Self::ClearButton
            | Self::SendButton => "button",
            Self::EmptyEmoji => "span",
            Self::EmptyTitle => "h3",
            Self::EmptyCopy => "p",
            Self::Composer => "form",
            Self::TextInput => "textarea",
            _ => "div",
        }
    }
}

/// One node to create.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
    /// Which node this is.
    pub element: Element,
    /// Node it is appended to. Always created earlier in the [`Scaffold`].
    pub parent: Element,
    /// Attributes besides id and class.
    pub attributes: Vec<(&'static str, String)>,
    /// Inline style declarations.
    pub style: Vec<(&'static str, &'static str)>,
    /// Text content.
    pub text: Option<String>,
}

impl NodeSpec {
    fn new(element: Element, parent: Element) -> Self {
        Self {
            element,
            parent,
            attributes: Vec::new(),
            style: Vec::new(),
            text: None,
        }
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    fn style(mut self, property: &'static str, value: &'static str) -> Self {
        self.style.push((property, value));
        self
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The full node tree, parents before children.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaffold {
    nodes: Vec<NodeSpec>,
}

impl Scaffold {
    /// Describe the tree for `config`, with display strings for `locale`.
    pub fn build(config: &StageConfig, locale: &str) -> Self {
        use Element::*;
        let copy = |key| copy_for(key, locale);

        let mut rail = NodeSpec::new(Rail, Root)
            .attr("aria-live", "polite")
            .attr("aria-label", copy(CopyKey::RailTitle));
        if config.chromeless {
            rail = rail.attr("data-chromeless", "true");
        }

        let icon = |element, glyph: &str, key| {
            NodeSpec::new(element, Composer)
                .attr("type", "button")
                .attr("title", copy(key))
                .text(glyph)
        };

        let nodes = vec![
            NodeSpec::new(CanvasLayer, Root),
            NodeSpec::new(CanvasHost, CanvasLayer),
            NodeSpec::new(SttOverlay, Root).attr("role", "status"),
            rail,
            NodeSpec::new(MessagesScroll, Rail)
                .attr("role", "log")
                .attr("aria-live", "polite")
                .attr("aria-relevant", "additions")
                .attr("tabindex", "0"),
            NodeSpec::new(LoadBar, MessagesScroll),
            NodeSpec::new(LoadOlder, LoadBar)
                .attr("type", "button")
                .attr("aria-label", copy(CopyKey::LoadOlder))
                .text(copy(CopyKey::LoadOlder)),
            NodeSpec::new(EmptyState, MessagesScroll).attr("data-role", "empty-state"),
            NodeSpec::new(EmptyEmoji, EmptyState).text("🤝"),
            NodeSpec::new(EmptyTitle, EmptyState).text(copy(CopyKey::EmptyTitle)),
            NodeSpec::new(EmptyCopy, EmptyState).text(copy(CopyKey::EmptySubtitle)),
            NodeSpec::new(ScrollIndicator, Root)
                .attr("type", "button")
                .text("⬇️"),
            NodeSpec::new(Composer, Root).attr("autocomplete", "off"),
            icon(MicButton, "🎤", CopyKey::MicTitle),
            icon(TtsButton, "🔊", CopyKey::TtsTitle),
            icon(ClearButton, "🗑️", CopyKey::ClearTitle),
            NodeSpec::new(TextareaContainer, Composer)
                .style("position", "relative")
                .style("display", "flex")
                .style("flex-direction", "column")
                .style("gap", "6px"),
            NodeSpec::new(TextInput, TextareaContainer)
                .attr("rows", "1")
                .attr("maxlength", INPUT_MAX_LENGTH.to_string())
                .attr("spellcheck", "true")
                .attr("placeholder", copy(CopyKey::ComposerPlaceholder)),
            NodeSpec::new(CharCounter, TextareaContainer)
                .style("display", "none")
                .text(format!("0/{INPUT_MAX_LENGTH}")),
            NodeSpec::new(SendButton, Composer)
                .attr("type", "button")
                .attr("title", copy(CopyKey::SendTitle))
                .attr("disabled", "")
                .text(copy(CopyKey::SendLabel)),
        ];
        Self { nodes }
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    /// The node for `element`, if it is part of the scaffold.
    pub fn get(&self, element: Element) -> Option<&NodeSpec> {
        self.nodes.iter().find(|n| n.element == element)
    }
}
