//! Transcript validation and the load controller.
//!
//! [`validate`] probes a source cheaply before any parse work; [`Loader`]
//! drives the full Segmenter → Classifier → Registry pipeline, optionally on
//! a worker thread with progress reporting and cooperative cancellation.
//!
//! # Passes over the source
//!
//! Each pass opens and releases the source independently; no handle outlives
//! its own traversal:
//!
//! 1. validation probe (always),
//! 2. block-counting pass (only when a progress callback is attached — one
//!    extra traversal buys exact percentages),
//! 3. the parse pass.
//!
//! # Example
//!
//! ```no_run
//! use chatstat::load::Loader;
//! use chatstat::progress::stderr_progress;
//!
//! # fn main() -> chatstat::Result<()> {
//! let loader = Loader::new().with_progress(stderr_progress());
//! let token = loader.cancel_token();
//!
//! let handle = loader.spawn("chat_export.txt");
//! // ... the caller stays responsive; token.cancel() aborts within one block
//! let chat = handle.join()?;
//! println!("{} messages", chat.len());
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::chat::{Chat, MemberRegistry};
use crate::classify;
use crate::error::{ChatstatError, Result};
use crate::message::Message;
use crate::progress::{CancelToken, Progress, ProgressCallback};
use crate::segment::{Blocks, is_block_start};

/// Progress is reported to the sink once per this many processed blocks.
const PROGRESS_INTERVAL: usize = 1000;

/// Probes a transcript file without parsing it.
///
/// Accepts iff the first non-empty line carries the timestamp prefix and at
/// least one line matches the full message pattern. On rejection returns
/// [`ChatstatError::InvalidFormat`] and no partial state exists anywhere.
pub fn validate(path: impl AsRef<Path>) -> Result<()> {
    let file = File::open(path)?;
    validate_reader(BufReader::new(file))
}

/// [`validate`] against in-memory content.
pub fn validate_str(content: &str) -> Result<()> {
    validate_reader(Cursor::new(content))
}

fn validate_reader<R: BufRead>(reader: R) -> Result<()> {
    let mut checked_first = false;

    for line in reader.lines() {
        let line = line?;
        if !checked_first {
            if line.trim().is_empty() {
                continue;
            }
            if !is_block_start(&line) {
                return Err(ChatstatError::invalid_format(
                    "first line carries no timestamp prefix",
                ));
            }
            checked_first = true;
        }
        if classify::is_message_line(&line) {
            return Ok(());
        }
    }

    if checked_first {
        Err(ChatstatError::invalid_format(
            "source contains no message lines, only system entries",
        ))
    } else {
        Err(ChatstatError::invalid_format("source is empty"))
    }
}

/// Drives one full ingestion pass over a transcript.
///
/// A `Loader` is cheap to clone (the callback and token are shared handles)
/// and reusable across sources. At most one load per chat under construction;
/// the resulting [`Chat`] is handed over only when fully populated.
#[derive(Clone, Default)]
pub struct Loader {
    progress: Option<ProgressCallback>,
    cancel: CancelToken,
}

impl Loader {
    /// Creates a loader with no progress sink and a fresh cancel token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a progress sink.
    ///
    /// Costs one extra counting traversal of the source per load, so the
    /// reported percentages are exact.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Shares a caller-owned cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle to this loader's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Validates, then loads the transcript at `path` on the calling thread.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Chat> {
        let path = path.as_ref();
        validate(path)?;

        let total_blocks = match &self.progress {
            Some(_) => Some(count_blocks(BufReader::new(File::open(path)?))?),
            None => None,
        };

        self.run(BufReader::new(File::open(path)?), total_blocks)
    }

    /// Validates, then loads in-memory transcript content.
    pub fn load_str(&self, content: &str) -> Result<Chat> {
        validate_str(content)?;

        let total_blocks = match &self.progress {
            Some(_) => Some(count_blocks(Cursor::new(content))?),
            None => None,
        };

        self.run(Cursor::new(content), total_blocks)
    }

    /// Runs the load on a worker thread and returns immediately.
    ///
    /// The outcome arrives on the handle's one-shot channel; the caller's
    /// thread is never blocked by parsing. Cancel through the shared token
    /// (or [`LoadHandle::cancel`]) and the worker stops within one block.
    pub fn spawn(&self, path: impl Into<PathBuf>) -> LoadHandle {
        let path = path.into();
        let loader = self.clone();
        let (sender, receiver) = mpsc::sync_channel(1);

        let worker = thread::spawn(move || {
            // A gone receiver means the caller stopped waiting
            let _ = sender.send(loader.load(&path));
        });

        LoadHandle {
            receiver,
            worker,
            cancel: self.cancel.clone(),
        }
    }

    fn run<R: BufRead>(&self, reader: R, total_blocks: Option<usize>) -> Result<Chat> {
        let mut registry = MemberRegistry::new();
        let mut messages: Vec<Arc<Message>> = Vec::new();
        let mut notice_subject: Option<String> = None;
        let mut changed_subject: Option<String> = None;
        let mut processed = 0usize;

        for block in Blocks::new(reader) {
            if self.cancel.is_cancelled() {
                // Leave the shared signal raised for every other observer
                self.cancel.cancel();
                return Err(ChatstatError::Cancelled);
            }
            let block = block?;

            if processed == 0 {
                notice_subject =
                    classify::encryption_notice_subject(block.lines().next().unwrap_or(""));
            }
            if let Some(subject) = classify::subject_change(&block) {
                changed_subject = Some(subject);
            }

            if let Some(message) = classify::classify_block(&block) {
                let message = Arc::new(message);
                registry.record(Arc::clone(&message));
                messages.push(message);
            }

            processed += 1;
            if processed % PROGRESS_INTERVAL == 0 {
                self.report(processed, total_blocks);
            }
        }

        if messages.is_empty() {
            // validate() precludes this for well-formed callers; guards a
            // source that changed between passes
            return Err(ChatstatError::invalid_format(
                "transcript contains no messages",
            ));
        }

        self.report(processed, total_blocks);

        let subject = notice_subject.or(changed_subject);
        Ok(Chat::assemble(subject, registry, messages))
    }

    fn report(&self, processed: usize, total_blocks: Option<usize>) {
        if let (Some(callback), Some(total)) = (&self.progress, total_blocks) {
            callback(Progress::new(processed, total));
        }
    }
}

/// Counting pass: number of blocks the parse pass will see.
fn count_blocks<R: BufRead>(reader: R) -> Result<usize> {
    let mut count = 0usize;
    for block in Blocks::new(reader) {
        block?;
        count += 1;
    }
    Ok(count)
}

/// Handle to a load running on a worker thread.
///
/// The worker delivers exactly one outcome; a fully populated chat or a
/// distinguishable failure. A partially built model is never exposed.
pub struct LoadHandle {
    receiver: mpsc::Receiver<Result<Chat>>,
    worker: thread::JoinHandle<()>,
    cancel: CancelToken,
}

impl LoadHandle {
    /// Raises the shared cancellation signal.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns a handle to the shared cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Blocks until the load finishes and returns its outcome.
    ///
    /// A worker that disappeared without reporting (it panicked) surfaces as
    /// [`ChatstatError::Cancelled`]: the caller-visible contract is the same
    /// — no chat, stop waiting.
    pub fn join(self) -> Result<Chat> {
        let outcome = self
            .receiver
            .recv()
            .unwrap_or(Err(ChatstatError::Cancelled));
        let _ = self.worker.join();
        outcome
    }

    /// Non-blocking poll for the outcome.
    pub fn try_result(&self) -> Option<Result<Chat>> {
        self.receiver.try_recv().ok()
    }
}
