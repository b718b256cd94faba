//! Progress reporting and cooperative cancellation for transcript loads.
//!
//! This module provides a callback-based progress mechanism for callers who
//! want push-based updates while a load runs on a worker, plus the shared
//! [`CancelToken`] the loader checks between blocks.
//!
//! # Example
//!
//! ```rust
//! use chatstat::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     eprintln!("Loading: {:.0}%", progress.percentage());
//! });
//!
//! callback(Progress::new(500, 1000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress of an in-flight load, measured in logical blocks.
///
/// The loader establishes `total_blocks` with a dedicated counting pass
/// before parsing, so percentages are exact rather than byte estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    /// Number of blocks processed so far.
    pub blocks_processed: usize,

    /// Total blocks in the source.
    pub total_blocks: usize,
}

impl Progress {
    /// Creates a new progress instance.
    pub fn new(blocks_processed: usize, total_blocks: usize) -> Self {
        Self {
            blocks_processed,
            total_blocks,
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// An empty source reports 100.0. Successive reports from one load pass
    /// are monotonically non-decreasing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstat::progress::Progress;
    ///
    /// assert_eq!(Progress::new(500, 1000).percentage(), 50.0);
    /// assert_eq!(Progress::new(0, 0).percentage(), 100.0);
    /// ```
    pub fn percentage(&self) -> f64 {
        if self.total_blocks == 0 {
            100.0
        } else {
            (self.blocks_processed as f64 / self.total_blocks as f64) * 100.0
        }
    }

    /// Returns whether the load has processed every block.
    pub fn is_complete(&self) -> bool {
        self.blocks_processed >= self.total_blocks
    }
}

/// Callback type for receiving progress updates.
///
/// Thread-safe: the loader invokes it from the worker the load runs on.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
///
/// Useful when an API wants a callback but the caller has no use for updates.
/// Note that handing the loader any callback, including this one, still incurs
/// the block-counting pass.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
///
/// # Example
///
/// ```rust
/// use chatstat::progress::{Progress, stderr_progress};
///
/// let callback = stderr_progress();
/// callback(Progress::new(500, 1000)); // prints "Progress: 50.0%"
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        eprintln!("Progress: {:.1}%", progress.percentage());
    })
}

/// Shared cancellation signal between a loader and its caller.
///
/// Cloning yields a handle to the same flag. The loader checks the token
/// before each block, so cancellation takes effect within one
/// block-processing step; it also raises the flag itself on abort so every
/// other observer stops waiting.
///
/// # Example
///
/// ```rust
/// use chatstat::progress::CancelToken;
///
/// let token = CancelToken::new();
/// let shared = token.clone();
///
/// assert!(!shared.is_cancelled());
/// token.cancel();
/// assert!(shared.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, unraised token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once any holder has cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
