// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional callbacks into the host's chat layer.
//!
//! Each hook is optional. When one is missing the stage uses a local fallback: messages are
//! appended to the transcript directly, typing indicators are skipped, and submissions are
//! dropped.

/// Author of a transcript message.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Sender {
    /// The person using the stage.
    User,
    /// The assistant.
    Bot,
}

impl Sender {
    /// Class suffix for the message node.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

type Callback = Box<dyn FnMut()>;
type MessageCallback = Box<dyn FnMut(&str, Sender)>;

/// Host callbacks, injected at construction.
#[derive(Default)]
pub struct HostHooks {
    pub(crate) send_message: Option<Callback>,
    pub(crate) add_message: Option<MessageCallback>,
    pub(crate) show_typing_indicator: Option<Callback>,
    pub(crate) hide_typing_indicator: Option<Callback>,
}

impl core::fmt::Debug for HostHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostHooks")
            .field("send_message", &self.send_message.is_some())
            .field("add_message", &self.add_message.is_some())
            .field("show_typing_indicator", &self.show_typing_indicator.is_some())
            .field("hide_typing_indicator", &self.hide_typing_indicator.is_some())
            .finish()
    }
}

impl HostHooks {
    /// No hooks; every call uses its fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the composer is submitted or the send button is clicked.
    pub fn on_send_message(mut self, f: impl FnMut() + 'static) -> Self {
        self.send_message = Some(Box::new(f));
        self
    }

    /// Replaces the built-in transcript append.
    pub fn on_add_message(mut self, f: impl FnMut(&str, Sender) + 'static) -> Self {
        self.add_message = Some(Box::new(f));
        self
    }

    /// Called when a reply is pending.
    pub fn on_show_typing_indicator(mut self, f: impl FnMut() + 'static) -> Self {
        self.show_typing_indicator = Some(Box::new(f));
        self
    }

    /// Called when a pending reply arrives or fails.
    pub fn on_hide_typing_indicator(mut self, f: impl FnMut() + 'static) -> Self {
        self.hide_typing_indicator = Some(Box::new(f));
        self
    }
}
