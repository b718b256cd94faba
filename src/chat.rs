//! The chat model: members, message history, subject, and date span.
//!
//! A [`Chat`] is the aggregate produced by one completed load pass. Its
//! message list and each [`Member`]'s message list share the same underlying
//! [`Message`] records (`Arc`, no content copies): the member list is a
//! sender-constrained view of the history.
//!
//! [`MemberRegistry`] keeps members unique by exact, case-sensitive name and
//! iterates in first-seen order. Lookup goes through a name index rather than
//! a scan, so registration stays O(1) amortized at any member count.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::message::Message;

/// Capability needed by the aggregation queries: an ordered message sequence.
///
/// Both [`Chat`] (the whole history) and [`Member`] (one sender's view)
/// implement it, so every query runs unchanged against either.
pub trait MessageContainer {
    /// The ordered messages this container holds.
    fn messages(&self) -> &[Arc<Message>];
}

/// One participant: a name and every message it authored, in source order.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    messages: Vec<Arc<Message>>,
}

impl Member {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// The member's name, unique within its chat.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl MessageContainer for Member {
    fn messages(&self) -> &[Arc<Message>] {
        &self.messages
    }
}

/// Insertion-ordered, name-deduplicated collection of members.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: Vec<Member>,
    index: HashMap<String, usize>,
}

impl MemberRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attaches a message to its sender, creating the member on first sight.
    ///
    /// Registration order is first-seen order; lookup is exact and
    /// case-sensitive.
    pub(crate) fn record(&mut self, message: Arc<Message>) {
        let slot = *self
            .index
            .entry(message.sender.clone())
            .or_insert_with(|| {
                self.members.push(Member::new(&message.sender));
                self.members.len() - 1
            });
        self.members[slot].messages.push(message);
    }

    /// Looks up a member by exact name.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.index.get(name).map(|&slot| &self.members[slot])
    }

    /// Returns `true` if a member with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no member has been registered.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates members in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    /// Member names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(Member::name)
    }
}

impl<'a> IntoIterator for &'a MemberRegistry {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One imported transcript: ordered history, member registry, subject, and
/// the observed date span.
///
/// A `Chat` is only ever handed to the caller fully populated; a cancelled or
/// failed load yields an error instead. After load it is immutable except for
/// [`subject`](Chat::subject), which the caller may reassign.
#[derive(Debug, Clone)]
pub struct Chat {
    /// Chat subject, if the transcript revealed one. `None` means no subject
    /// was found; callers may set their own.
    pub subject: Option<String>,

    members: MemberRegistry,
    messages: Vec<Arc<Message>>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Chat {
    /// Assembles a chat from a completed load pass.
    ///
    /// Callers guarantee `messages` is non-empty and in source order; the
    /// date span derives from the first and last entries.
    pub(crate) fn assemble(
        subject: Option<String>,
        members: MemberRegistry,
        messages: Vec<Arc<Message>>,
    ) -> Self {
        debug_assert!(!messages.is_empty());
        let start_date = messages[0].date();
        let end_date = messages[messages.len() - 1].date();
        Self {
            subject,
            members,
            messages,
            start_date,
            end_date,
        }
    }

    /// The member registry, in first-seen order.
    pub fn members(&self) -> &MemberRegistry {
        &self.members
    }

    /// Date of the first message.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Date of the last message.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// A loaded chat always holds at least one message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageContainer for Chat {
    fn messages(&self) -> &[Arc<Message>] {
        &self.messages
    }
}
