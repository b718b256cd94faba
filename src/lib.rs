//! # Chatstat
//!
//! A Rust library for turning exported WhatsApp chat transcripts into a
//! structured in-memory model and deriving time-bounded, per-member
//! statistics from it.
//!
//! ## Overview
//!
//! An exported transcript is a loosely delimited text format: entries are
//! prefixed with `[DD/MM/YYYY, HH:MM:SS]`, long messages wrap across physical
//! lines, and system notices share the file with real messages. Chatstat
//! re-segments that format into discrete messages, classifies their content,
//! builds a deduplicated member registry, and answers ranking and counting
//! queries over the result — without blocking a responsive caller, and with
//! mid-parse cancellation and progress reporting.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let chat = Loader::new().load_str(
//!         "[01/01/2020, 10:00:00] Alice: hello\n\
//!          [01/01/2020, 10:00:05] Bob: hi there\n\
//!          [01/01/2020, 10:00:10] Alice: how are you",
//!     )?;
//!
//!     assert_eq!(chat.members().len(), 2);
//!
//!     let ranking = rank(
//!         &chat,
//!         RankMetric::Messages,
//!         chat.start_date(),
//!         chat.end_date(),
//!         None,
//!     );
//!     assert_eq!(ranking[0], ("Alice".to_string(), 2));
//!     Ok(())
//! }
//! ```
//!
//! ## Loading off the caller's thread
//!
//! For large transcripts, [`Loader::spawn`](load::Loader::spawn) runs the
//! whole pass on a worker and delivers the finished [`Chat`] over a one-shot
//! channel. The caller may attach a progress sink (reported once per 1000
//! blocks) and cancel cooperatively at any time:
//!
//! ```rust,no_run
//! use chatstat::prelude::*;
//! use chatstat::progress::stderr_progress;
//!
//! # fn main() -> chatstat::Result<()> {
//! let loader = Loader::new().with_progress(stderr_progress());
//! let token = loader.cancel_token();
//!
//! let handle = loader.spawn("chat_export.txt");
//! // token.cancel() from anywhere stops the worker within one block
//! let chat = handle.join()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`segment`] — raw lines into logical message blocks ([`segment::Blocks`])
//! - [`classify`] — one block into a [`Message`], or a silent skip
//! - [`chat`] — [`Chat`], [`Member`](chat::Member),
//!   [`MemberRegistry`](chat::MemberRegistry), [`MessageContainer`](chat::MessageContainer)
//! - [`load`] — [`validate`](load::validate), [`Loader`](load::Loader),
//!   [`LoadHandle`](load::LoadHandle)
//! - [`progress`] — [`Progress`](progress::Progress),
//!   [`CancelToken`](progress::CancelToken)
//! - [`stats`] — [`count_messages`](stats::count_messages),
//!   [`count_words`](stats::count_words), [`rank`](stats::rank)
//! - [`error`] — [`ChatstatError`], [`Result`]
//! - [`cli`] — CLI argument types (feature `cli`)
//! - [`prelude`] — convenient re-exports

pub mod chat;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod error;
pub mod load;
pub mod message;
pub mod progress;
pub mod segment;
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use chat::Chat;
pub use error::{ChatstatError, Result};
pub use message::{Message, MessageKind};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    // Model types
    pub use crate::chat::{Chat, Member, MemberRegistry, MessageContainer};
    pub use crate::message::{Message, MessageKind};

    // Error types
    pub use crate::error::{ChatstatError, Result};

    // Loading
    pub use crate::load::{LoadHandle, Loader, validate, validate_str};
    pub use crate::progress::{CancelToken, Progress, ProgressCallback};

    // Aggregation
    pub use crate::stats::{RankMetric, count_messages, count_words, rank};
}
