//! Aggregation queries over a loaded chat.
//!
//! Pure functions over anything implementing [`MessageContainer`] — the whole
//! [`Chat`] or a single [`Member`](crate::chat::Member). They never mutate the
//! model and are race-free against a completed chat, so any number may run
//! concurrently once the load has finished.
//!
//! # Example
//!
//! ```
//! use chatstat::load::Loader;
//! use chatstat::stats::{RankMetric, count_messages, rank};
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatstat::Result<()> {
//! let chat = Loader::new().load_str(
//!     "[01/01/2020, 10:00:00] Alice: hello\n\
//!      [01/01/2020, 10:00:05] Bob: hi there\n\
//!      [01/01/2020, 10:00:10] Alice: how are you",
//! )?;
//!
//! let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! assert_eq!(count_messages(&chat, day, day, None), 3);
//!
//! let ranking = rank(&chat, RankMetric::Messages, day, day, None);
//! assert_eq!(ranking[0], ("Alice".to_string(), 2));
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chat::{Chat, MessageContainer};
use crate::message::{Message, MessageKind};

/// Which per-member quantity a ranking is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMetric {
    /// Count of messages sent.
    #[default]
    Messages,
    /// Count of words across text messages.
    Words,
}

impl std::fmt::Display for RankMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankMetric::Messages => write!(f, "messages"),
            RankMetric::Words => write!(f, "words"),
        }
    }
}

/// Date-window check on the timestamp's date component, inclusive both ends.
fn in_range(message: &Message, start: NaiveDate, end: NaiveDate) -> bool {
    let date = message.date();
    start <= date && date <= end
}

/// Counts messages in `[start, end]`, optionally restricted to one kind.
pub fn count_messages<C: MessageContainer + ?Sized>(
    container: &C,
    start: NaiveDate,
    end: NaiveDate,
    kind: Option<&MessageKind>,
) -> usize {
    container
        .messages()
        .iter()
        .filter(|m| in_range(m, start, end))
        .filter(|m| kind.is_none_or(|k| m.kind == *k))
        .count()
}

/// Sums word counts over text messages in `[start, end]`.
///
/// Non-text messages contribute zero; their content is never tokenized.
pub fn count_words<C: MessageContainer + ?Sized>(
    container: &C,
    start: NaiveDate,
    end: NaiveDate,
) -> usize {
    container
        .messages()
        .iter()
        .filter(|m| in_range(m, start, end))
        .map(|m| m.word_count())
        .sum()
}

/// Ranks members by `metric` within `[start, end]`.
///
/// Members whose count is zero are excluded. Ordering: count descending,
/// ties broken by ascending member name — an explicit, deterministic rule.
/// The `kind` filter applies to [`RankMetric::Messages`] only; word counts
/// are inherently text-only.
pub fn rank(
    chat: &Chat,
    metric: RankMetric,
    start: NaiveDate,
    end: NaiveDate,
    kind: Option<&MessageKind>,
) -> Vec<(String, usize)> {
    let mut ranking: Vec<(String, usize)> = chat
        .members()
        .iter()
        .map(|member| {
            let count = match metric {
                RankMetric::Messages => count_messages(member, start, end, kind),
                RankMetric::Words => count_words(member, start, end),
            };
            (member.name().to_string(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    ranking.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranking
}
