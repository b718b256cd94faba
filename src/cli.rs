//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Metric`] - Rankable quantities, mirroring [`RankMetric`]
//! - [`Report`] - The `--json` output shape
//!
//! # Using Metric in Libraries
//!
//! [`Metric`] converts into the library's [`RankMetric`]:
//!
//! ```rust
//! use chatstat::cli::Metric;
//! use chatstat::stats::RankMetric;
//!
//! let metric: RankMetric = Metric::Words.into();
//! assert_eq!(metric, RankMetric::Words);
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::error::{ChatstatError, Result};
use crate::message::MessageKind;
use crate::stats::RankMetric;

/// Parse a WhatsApp chat export and print per-member statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat chat_export.txt
    chatstat chat_export.txt --metric words
    chatstat chat_export.txt --after 2020-01-01 --before 2020-06-30
    chatstat chat_export.txt --kind image --json")]
pub struct Args {
    /// Path to the exported transcript
    pub input: String,

    /// Count only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Count only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Restrict counts and ranking to one message kind
    /// (text, image, video, gif, document, location, contact, ...)
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<MessageKind>,

    /// Quantity to rank members by
    #[arg(short, long, value_enum, default_value = "messages")]
    pub metric: Metric,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Suppress the progress line on stderr
    #[arg(long)]
    pub no_progress: bool,
}

/// Rankable quantities.
///
/// CLI-side mirror of [`RankMetric`] so clap value parsing stays out of the
/// library types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum Metric {
    /// Rank members by messages sent
    #[default]
    Messages,

    /// Rank members by words across text messages
    Words,
}

impl From<Metric> for RankMetric {
    fn from(metric: Metric) -> RankMetric {
        match metric {
            Metric::Messages => RankMetric::Messages,
            Metric::Words => RankMetric::Words,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Messages => write!(f, "messages"),
            Metric::Words => write!(f, "words"),
        }
    }
}

/// Parses a CLI date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ChatstatError::invalid_date(input))
}

/// One ranking row in the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    /// Member name.
    pub name: String,
    /// Metric value within the queried window.
    pub count: usize,
}

/// The `--json` report shape.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Chat subject, if the transcript revealed one.
    pub subject: Option<String>,
    /// First day of the queried window.
    pub start_date: NaiveDate,
    /// Last day of the queried window.
    pub end_date: NaiveDate,
    /// Distinct members in the chat.
    pub members: usize,
    /// Messages within the window (after any kind filter).
    pub messages: usize,
    /// Words within the window, text messages only.
    pub words: usize,
    /// Quantity the ranking is ordered by.
    pub metric: RankMetric,
    /// Ranking rows, already ordered.
    pub ranking: Vec<RankEntry>,
}
