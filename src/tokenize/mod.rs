//! Tokenizing transform
//!
//! Turns a batch of sentences into cleaned, space-separated token lines.
//!
//! ## Module Structure
//!
//! - **external.rs**: Adapter that shells out to a PTB tokenizer process
//! - **builtin.rs**: In-process PTB-style tokenizer
//! - **punctuation.rs**: Punctuation set applied to tokenizer output
//!
//! The rest of the pipeline only sees the [`Tokenizer`] trait, so adapters
//! can be swapped without touching the reader or writer.

use std::io;
use std::process::ExitStatus;
use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

use crate::engine::config::{TokenizerConfig, TokenizerKind};
use crate::input::Batch;

pub mod builtin;
pub mod external;
pub mod punctuation;

pub use builtin::BuiltinTokenizer;
pub use external::ExternalTokenizer;
pub use punctuation::{PunctuationSet, DEFAULT_PUNCTUATION};

#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Exited {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("failed to prepare tokenizer input: {0}")]
    TempFile(#[source] io::Error),

    #[error("tokenizer I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("tokenizer output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error("tokenizer returned {actual} lines for {expected} sentences")]
    LineCountMismatch { expected: usize, actual: usize },
}

/// One line of tokenizer output, held as its space-separated tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    tokens: Vec<String>,
}

impl TokenizedLine {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Split a raw output line on single spaces after trimming its end.
    pub fn from_raw(line: &str) -> Self {
        Self {
            tokens: line.trim_end().split(' ').map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Adapter boundary around a PTB-style tokenizer.
///
/// `text` holds one sentence per line. Implementations must lower-case and
/// return exactly one [`TokenizedLine`] per input line, in order.
pub trait Tokenizer {
    fn name(&self) -> &str;

    fn tokenize(&self, text: &str) -> Result<Vec<TokenizedLine>, TokenizeError>;
}

/// Build the adapter selected by the tokenizer config.
pub fn build_tokenizer(config: &TokenizerConfig) -> Box<dyn Tokenizer> {
    match config.kind {
        TokenizerKind::External => Box::new(ExternalTokenizer::from_config(config)),
        TokenizerKind::Builtin => Box::new(BuiltinTokenizer::new()),
    }
}

/// Tokenizer plus punctuation filter, applied to a whole batch at once.
pub struct TokenizingTransform {
    tokenizer: Box<dyn Tokenizer>,
    punctuation: PunctuationSet,
}

impl TokenizingTransform {
    pub fn new(tokenizer: Box<dyn Tokenizer>, punctuation: PunctuationSet) -> Self {
        Self {
            tokenizer,
            punctuation,
        }
    }

    /// Returns one cleaned line per record, in batch order.
    ///
    /// An empty batch never reaches the tokenizer.
    pub fn apply(&self, batch: &Batch) -> Result<Vec<String>, TokenizeError> {
        if batch.is_empty() {
            tracing::debug!("empty batch, skipping tokenizer");
            return Ok(Vec::new());
        }

        tracing::info!(
            tokenizer = self.tokenizer.name(),
            sentences = batch.len(),
            "tokenizing batch"
        );

        let lines = self.tokenizer.tokenize(&batch.text())?;

        if lines.len() != batch.len() {
            return Err(TokenizeError::LineCountMismatch {
                expected: batch.len(),
                actual: lines.len(),
            });
        }

        Ok(lines
            .iter()
            .map(|line| self.punctuation.filter_line(line))
            .collect())
    }
}
