//! Parsed message type and content classification.
//!
//! This module provides [`Message`], one parsed transcript entry, and
//! [`MessageKind`], the fixed content classification derived from the entry's
//! text.
//!
//! # Overview
//!
//! A message consists of:
//! - **`timestamp`** — always present; an entry whose timestamp fails to parse
//!   is never constructed
//! - **`sender`** — the authoring member's name
//! - **`content`** — raw text, possibly spanning multiple original lines
//! - **`kind`** — computed once at construction from the content, never
//!   re-derived
//!
//! # Content classification
//!
//! The export format flags non-text entries by embedding U+200E (LEFT-TO-RIGHT
//! MARK) in the content, immediately followed by the attachment kind:
//!
//! ```
//! use chatstat::message::{Message, MessageKind};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//!
//! let text = Message::new(ts, "Alice", "hello there");
//! assert_eq!(text.kind, MessageKind::Text);
//!
//! let photo = Message::new(ts, "Alice", "\u{200E}image omitted");
//! assert_eq!(photo.kind, MessageKind::Image);
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The invisible directional mark the exporter uses to flag system-generated
/// and non-text-authored content.
pub const MARKER: char = '\u{200E}';

/// Marker followed by a run of word characters names the attachment kind.
static KIND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\u{200E}(\w+)").unwrap());

/// Classification of a message's content.
///
/// Non-text entries carry a [`MARKER`]-prefixed token in their content
/// (`image`, `video`, ...). A token outside the fixed set is preserved
/// lowercased in [`Other`](MessageKind::Other) rather than discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Ordinary text, the default when no marker token is present.
    Text,
    /// Photo attachment placeholder.
    Image,
    /// Video attachment placeholder.
    Video,
    /// Animated GIF placeholder.
    Gif,
    /// Document attachment placeholder.
    Document,
    /// Shared location placeholder.
    Location,
    /// Shared contact card placeholder.
    Contact,
    /// Unrecognized marker token, lowercased verbatim.
    #[serde(untagged)]
    Other(String),
}

impl MessageKind {
    /// Classifies content by scanning for the marker token.
    ///
    /// The run of word characters immediately following the first [`MARKER`]
    /// occurrence, lowercased, names the kind; content without a marker is
    /// [`Text`](MessageKind::Text).
    pub fn classify(content: &str) -> Self {
        match KIND_PATTERN.captures(content) {
            Some(caps) => Self::from_token(&caps[1].to_lowercase()),
            None => MessageKind::Text,
        }
    }

    /// Maps a lowercased marker token to its kind.
    fn from_token(token: &str) -> Self {
        match token {
            "text" => MessageKind::Text,
            "image" => MessageKind::Image,
            "video" => MessageKind::Video,
            "gif" => MessageKind::Gif,
            "document" => MessageKind::Document,
            "location" => MessageKind::Location,
            "contact" => MessageKind::Contact,
            other => MessageKind::Other(other.to_string()),
        }
    }

    /// Returns the lowercase token for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Gif => "gif",
            MessageKind::Document => "document",
            MessageKind::Location => "location",
            MessageKind::Contact => "contact",
            MessageKind::Other(token) => token,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(&s.to_lowercase()))
    }
}

/// One parsed transcript entry.
///
/// Messages are produced by the classifier; both the chat-level message list
/// and the owning member's list share the same record via `Arc`.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | When the entry was written (export-local time) |
/// | `sender` | `String` | Authoring member's name |
/// | `content` | `String` | Raw text, may contain newlines |
/// | `kind` | `MessageKind` | Content classification, fixed at construction |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// When the entry was written. The export carries no timezone.
    pub timestamp: NaiveDateTime,

    /// Authoring member's name.
    pub sender: String,

    /// Raw text content. Multiline entries keep their original line breaks.
    pub content: String,

    /// Content classification, computed once by [`Message::new`].
    pub kind: MessageKind,
}

impl Message {
    /// Creates a message, classifying its content.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let kind = MessageKind::classify(&content);
        Self {
            timestamp,
            sender: sender.into(),
            content,
            kind,
        }
    }

    /// Returns the date component of the timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns the whitespace-split tokens of the content.
    ///
    /// Defined only for text messages; attachment placeholders yield `None`
    /// (their content is never tokenized).
    pub fn words(&self) -> Option<impl Iterator<Item = &str>> {
        (self.kind == MessageKind::Text).then(|| self.content.split_whitespace())
    }

    /// Number of words in a text message, `0` for any other kind.
    pub fn word_count(&self) -> usize {
        self.words().map_or(0, Iterator::count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(MessageKind::classify("hello there"), MessageKind::Text);
        assert_eq!(MessageKind::classify(""), MessageKind::Text);
    }

    #[test]
    fn test_classify_marker_kinds() {
        assert_eq!(
            MessageKind::classify("\u{200E}image omitted"),
            MessageKind::Image
        );
        assert_eq!(
            MessageKind::classify("\u{200E}video omitted"),
            MessageKind::Video
        );
        assert_eq!(
            MessageKind::classify("\u{200E}GIF omitted"),
            MessageKind::Gif
        );
        assert_eq!(
            MessageKind::classify("\u{200E}document omitted"),
            MessageKind::Document
        );
        assert_eq!(
            MessageKind::classify("\u{200E}Location: somewhere"),
            MessageKind::Location
        );
        assert_eq!(
            MessageKind::classify("\u{200E}Contact card omitted"),
            MessageKind::Contact
        );
    }

    #[test]
    fn test_classify_marker_mid_content() {
        // Caption before the marker still classifies by the marker token
        assert_eq!(
            MessageKind::classify("look at this \u{200E}image omitted"),
            MessageKind::Image
        );
    }

    #[test]
    fn test_classify_unrecognized_token() {
        assert_eq!(
            MessageKind::classify("\u{200E}Sticker omitted"),
            MessageKind::Other("sticker".to_string())
        );
    }

    #[test]
    fn test_kind_display_and_from_str() {
        assert_eq!(MessageKind::Image.to_string(), "image");
        assert_eq!("IMAGE".parse::<MessageKind>().unwrap(), MessageKind::Image);
        assert_eq!(
            "sticker".parse::<MessageKind>().unwrap(),
            MessageKind::Other("sticker".to_string())
        );
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&MessageKind::Image).unwrap();
        assert_eq!(json, "\"image\"");

        let parsed: MessageKind = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, MessageKind::Text);

        let other = serde_json::to_string(&MessageKind::Other("sticker".into())).unwrap();
        assert_eq!(other, "\"sticker\"");
    }

    #[test]
    fn test_message_new_classifies_once() {
        let msg = Message::new(ts(), "Alice", "\u{200E}image omitted");
        assert_eq!(msg.kind, MessageKind::Image);
        assert_eq!(msg.sender, "Alice");
    }

    #[test]
    fn test_words_text_only() {
        let text = Message::new(ts(), "Alice", "how are you");
        assert_eq!(text.words().unwrap().collect::<Vec<_>>(), vec![
            "how", "are", "you"
        ]);
        assert_eq!(text.word_count(), 3);

        let image = Message::new(ts(), "Alice", "\u{200E}image omitted");
        assert!(image.words().is_none());
        assert_eq!(image.word_count(), 0);
    }

    #[test]
    fn test_words_multiline() {
        let msg = Message::new(ts(), "Alice", "first line\nsecond line");
        assert_eq!(msg.word_count(), 4);
    }

    #[test]
    fn test_message_date() {
        let msg = Message::new(ts(), "Alice", "hi");
        assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_message_serde_round_trip() {
        let msg = Message::new(ts(), "Alice", "hello");
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, parsed);
    }
}
