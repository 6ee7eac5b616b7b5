// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display strings for the stage scaffold, keyed by locale tag.

/// Locale used when the requested one has no entry.
pub const FALLBACK_LOCALE: &str = "en-US";

/// A display string used by the scaffold or offered to the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CopyKey {
    /// Rail accessible label.
    RailTitle,
    /// Rail subtitle.
    RailSubtitle,
    /// "Load older" button.
    LoadOlder,
    /// Composer placeholder.
    ComposerPlaceholder,
    /// Empty transcript heading.
    EmptyTitle,
    /// Empty transcript body.
    EmptySubtitle,
    /// Admin entry label.
    AdminLabel,
    /// Send button label.
    SendLabel,
    /// Send button tooltip.
    SendTitle,
    /// Microphone button tooltip.
    MicTitle,
    /// Text-to-speech button tooltip.
    TtsTitle,
    /// Clear-session button tooltip.
    ClearTitle,
}

impl CopyKey {
    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::RailTitle => &[("en-US", "Conversation"), ("zh-HK", "對話")],
            Self::RailSubtitle => &[
                ("en-US", "Voice linked • Live2D active"),
                ("zh-HK", "語音已連線 • Live2D 已啟動"),
            ],
            Self::LoadOlder => &[
                ("en-US", "Load previous messages"),
                ("zh-HK", "載入較早訊息"),
            ],
            Self::ComposerPlaceholder => &[("en-US", "Type a message…"), ("zh-HK", "請輸入訊息…")],
            Self::EmptyTitle => &[
                ("en-US", "Start a health check-in"),
                ("zh-HK", "開始健康諮詢"),
            ],
            Self::EmptySubtitle => &[
                (
                    "en-US",
                    "Speak or type to begin — your Live2D nurse is ready.",
                ),
                ("zh-HK", "可以開口或輸入文字開始，Live2D 護理員隨時待命。"),
            ],
            Self::AdminLabel => &[("en-US", "⚙️ Admin"), ("zh-HK", "⚙️ 管理")],
            Self::SendLabel => &[("en-US", "Send"), ("zh-HK", "傳送")],
            Self::SendTitle => &[("en-US", "Send message"), ("zh-HK", "傳送訊息")],
            Self::MicTitle => &[("en-US", "Voice input"), ("zh-HK", "語音輸入")],
            Self::TtsTitle => &[
                ("en-US", "Text-to-Speech ON (click to disable)"),
                ("zh-HK", "語音播放開啟（點擊關閉）"),
            ],
            Self::ClearTitle => &[
                ("en-US", "Start new conversation"),
                ("zh-HK", "開始新對話"),
            ],
        }
    }
}

/// Look up `key` for `locale`, falling back to [`FALLBACK_LOCALE`], then to an empty string.
pub fn copy_for(key: CopyKey, locale: &str) -> &'static str {
    let entries = key.entries();
    let find = |tag: &str| entries.iter().find(|(l, _)| *l == tag).map(|(_, s)| *s);
    find(locale).or_else(|| find(FALLBACK_LOCALE)).unwrap_or("")
}
