use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing tab delimiter in {content:?}")]
    MissingDelimiter { line: usize, content: String },

    #[error("line {line}: empty record id")]
    EmptyId { line: usize },
}

pub mod batch;
pub mod record;

pub use batch::{load_batch, Batch};
pub use record::{parse_records, Record};
