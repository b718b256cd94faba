//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - Single-block parse anomalies are *not* errors: a block that fails the
//!   message pattern is a system/info line and is silently skipped

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::Chat;
///
/// fn my_function() -> Result<Option<Chat>> {
///     // ... operations that may fail
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
///
/// This enum represents all possible errors that can occur when loading a
/// transcript or configuring a query. Parse-level anomalies (a single block
/// that is not a message) are recovered locally and never surface here;
/// source-level anomalies do.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - The source disappears mid-read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source does not look like a chat transcript.
    ///
    /// Raised by the validity probe when the first non-empty line carries no
    /// timestamp prefix, or when no line in the source matches the message
    /// pattern. No partial chat is ever produced alongside this error.
    #[error("Invalid transcript format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// The load was aborted by cooperative cancellation.
    ///
    /// Any partially built chat has been discarded; the caller must not
    /// expect a usable model.
    #[error("Load cancelled")]
    Cancelled,

    /// Invalid date string in a query or CLI argument.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error.
    ///
    /// This can occur when writing the `--json` report.
    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatError {
    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        ChatstatError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatError::InvalidFormat { .. })
    }

    /// Returns `true` if the load was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatstatError::Cancelled)
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
