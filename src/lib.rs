//! labeltok: PTB-tokenize `id<TAB>sentence` label files.
//!
//! Reads every record of an input file, runs the sentences through a
//! tokenizer as one batch, drops punctuation tokens and writes
//! `id<TAB>tokenized_sentence` lines in input order.

pub mod cli;
pub mod engine;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod tokenize;

pub use engine::{Config, LabelError};
pub use pipeline::{Pipeline, RunSummary};
