//! Block classification: one segmented block into a structured [`Message`].
//!
//! The transcript grammar is fixed and case-sensitive:
//!
//! - Message line: `[DD/MM/YYYY, HH:MM:SS] sender: content` where neither
//!   sender nor content begins with U+200E (the exporter's system marker).
//! - System/info lines (encryption notices, subject changes, attachment
//!   headers without a true sender) fail that pattern and are silently
//!   skipped — this is the documented mechanism, not an error path.
//!
//! Subject extraction uses two system-line shapes the loader scans for:
//! the encryption notice on the first line (`[ts] name: \u{200E}...`) and
//! `\u{200E}name changed the subject to \u{201C}new subject\u{201D}` anywhere in the source
//! (curly quotes as emitted by the exporter).

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::message::Message;

/// Chrono format for the embedded two-digit day/month, four-digit year,
/// 24-hour timestamp.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Full message line: timestamp, sender, content. Sender and content must not
/// begin with the system marker. `(?s)` lets content span folded lines.
static MESSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^\[(?P<ts>\d{2}/\d{2}/\d{4}, \d{2}:\d{2}:\d{2})] (?P<sender>[^\u{200E}].*?): (?P<content>[^\u{200E}].*)",
    )
    .unwrap()
});

/// Encryption notice: a first line whose content is nothing but marker-flagged
/// system text. Captures the name the chat is addressed to.
static ENCRYPTION_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[\d{2}/\d{2}/\d{4}, \d{2}:\d{2}:\d{2}] (?P<name>[^\u{200E}].*?): \u{200E}",
    )
    .unwrap()
});

/// Subject change system line. The exporter emits curly quotes.
static SUBJECT_CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("\u{200E}(?P<name>.*?) changed the subject to \u{201C}(?P<subject>[^\u{201D}]*)\u{201D}")
        .unwrap()
});

/// Parses one segmented block into a [`Message`].
///
/// Returns `None` for any block that is not a message: system/info lines
/// failing the pattern, and the should-not-occur case of matching digits that
/// form no valid calendar date/time. Both are silent skips, never errors.
pub fn classify_block(block: &str) -> Option<Message> {
    let caps = MESSAGE_PATTERN.captures(block)?;
    let timestamp = NaiveDateTime::parse_from_str(&caps["ts"], TIMESTAMP_FORMAT).ok()?;
    Some(Message::new(timestamp, &caps["sender"], &caps["content"]))
}

/// Returns `true` if the line (or block) matches the full message pattern.
pub(crate) fn is_message_line(line: &str) -> bool {
    MESSAGE_PATTERN.is_match(line)
}

/// Extracts the chat subject from a first-line encryption notice, if present.
pub(crate) fn encryption_notice_subject(first_line: &str) -> Option<String> {
    ENCRYPTION_NOTICE
        .captures(first_line)
        .map(|caps| caps["name"].to_string())
}

/// Extracts the new subject from a subject-change system line, if present.
pub(crate) fn subject_change(block: &str) -> Option<String> {
    SUBJECT_CHANGE
        .captures(block)
        .map(|caps| caps["subject"].to_string())
}
