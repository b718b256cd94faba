//! Transcript segmentation: raw lines into logical message blocks.
//!
//! Exported transcripts wrap long messages, attachment captions, and
//! multi-line text across several physical lines with no delimiter other than
//! the next entry's timestamp prefix. [`Blocks`] recovers message boundaries
//! with a look-ahead-by-one-line rule: a line starting with
//! `[DD/MM/YYYY, HH:MM:SS]` opens a new block, anything else folds into the
//! current one.
//!
//! # Example
//!
//! ```
//! use std::io::{BufReader, Cursor};
//! use chatstat::segment::Blocks;
//!
//! let source = "[01/01/2020, 10:00:00] Alice: hello\nstill hello\n\
//!               [01/01/2020, 10:00:05] Bob: hi";
//! let blocks: Vec<String> = Blocks::new(BufReader::new(Cursor::new(source)))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0], "[01/01/2020, 10:00:00] Alice: hello\nstill hello");
//! ```

use std::io::{self, BufRead};
use std::sync::LazyLock;

use regex::Regex;

/// Timestamp prefix opening a new logical block.
static TIMESTAMP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d{2}/\d{2}/\d{4}, \d{2}:\d{2}:\d{2}]").unwrap());

/// Returns `true` if the line opens a new logical block.
pub fn is_block_start(line: &str) -> bool {
    TIMESTAMP_PREFIX.is_match(line)
}

/// Lazy iterator over logical message blocks.
///
/// Yields `io::Result<String>`: one block per timestamp-prefixed line, with
/// continuation lines folded in (original line breaks preserved, the block's
/// own trailing newline trimmed). The first line of the source always opens
/// the first block, even if malformed — the classifier rejects it later. An
/// empty source yields nothing. The iterator is finite and non-restartable;
/// an I/O error ends it after the `Err` item.
pub struct Blocks<R> {
    reader: R,
    current: Option<String>,
    line: String,
    done: bool,
}

impl<R: BufRead> Blocks<R> {
    /// Wraps a line source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current: None,
            line: String::with_capacity(256),
            done: false,
        }
    }
}

/// Trims the trailing line break a block inherits from its last physical line.
fn trim_newline(mut block: String) -> String {
    if block.ends_with('\n') {
        block.pop();
        if block.ends_with('\r') {
            block.pop();
        }
    }
    block
}

impl<R: BufRead> Iterator for Blocks<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
                // Source exhausted: flush the final block
                Ok(0) => {
                    self.done = true;
                    return self.current.take().map(|block| Ok(trim_newline(block)));
                }
                Ok(_) => {
                    if is_block_start(&self.line) {
                        if let Some(finished) = self.current.replace(self.line.clone()) {
                            return Some(Ok(trim_newline(finished)));
                        }
                    } else if let Some(current) = self.current.as_mut() {
                        current.push_str(&self.line);
                    } else {
                        // First line of the source, malformed or not
                        self.current = Some(self.line.clone());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn blocks_of(source: &str) -> Vec<String> {
        Blocks::new(BufReader::new(Cursor::new(source.to_string())))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert!(blocks_of("").is_empty());
    }

    #[test]
    fn test_single_line_single_block() {
        let blocks = blocks_of("[01/01/2020, 10:00:00] Alice: hello");
        assert_eq!(blocks, vec!["[01/01/2020, 10:00:00] Alice: hello"]);
    }

    #[test]
    fn test_trailing_newline_trimmed() {
        let blocks = blocks_of("[01/01/2020, 10:00:00] Alice: hello\n");
        assert_eq!(blocks, vec!["[01/01/2020, 10:00:00] Alice: hello"]);
    }

    #[test]
    fn test_continuation_lines_folded() {
        let blocks = blocks_of(
            "[01/01/2020, 10:00:00] Alice: first\nsecond line\nthird line\n\
             [01/01/2020, 10:00:05] Bob: reply",
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "[01/01/2020, 10:00:00] Alice: first\nsecond line\nthird line"
        );
        assert_eq!(blocks[1], "[01/01/2020, 10:00:05] Bob: reply");
    }

    #[test]
    fn test_malformed_first_line_still_opens_block() {
        let blocks = blocks_of("no timestamp here\n[01/01/2020, 10:00:00] Alice: hello");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "no timestamp here");
    }

    #[test]
    fn test_one_block_per_timestamp_line() {
        let source = "[01/01/2020, 10:00:00] Alice: a\n\
                      [01/01/2020, 10:00:01] Bob: b\n\
                      [01/01/2020, 10:00:02] Alice: c\n";
        assert_eq!(blocks_of(source).len(), 3);
    }

    #[test]
    fn test_rejoined_blocks_reproduce_source() {
        let source = "[01/01/2020, 10:00:00] Alice: first\nwrapped\n\
                      [01/01/2020, 10:00:05] Bob: second\n\
                      [01/01/2020, 10:00:10] Alice: third\nalso wrapped\ntwice";
        assert_eq!(blocks_of(source).join("\n"), source);
    }

    #[test]
    fn test_crlf_lines() {
        let blocks = blocks_of(
            "[01/01/2020, 10:00:00] Alice: hello\r\n[01/01/2020, 10:00:05] Bob: hi\r\n",
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], "[01/01/2020, 10:00:05] Bob: hi");
    }

    #[test]
    fn test_is_block_start() {
        assert!(is_block_start("[01/01/2020, 10:00:00] Alice: hello"));
        assert!(is_block_start("[31/12/1999, 23:59:59]"));
        assert!(!is_block_start("1/1/2020, 10:00:00 Alice: hello"));
        assert!(!is_block_start("continuation line"));
        assert!(!is_block_start(" [01/01/2020, 10:00:00] indented"));
    }

    #[test]
    fn test_blank_lines_fold_into_block() {
        let blocks = blocks_of(
            "[01/01/2020, 10:00:00] Alice: first\n\nstill first\n\
             [01/01/2020, 10:00:05] Bob: second",
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "[01/01/2020, 10:00:00] Alice: first\n\nstill first");
    }
}
