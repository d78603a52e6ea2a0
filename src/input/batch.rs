use std::path::Path;

use super::record::{parse_records, Record};
use crate::engine::error::{read_input_file, LabelError};

/// All records of one run, in file order.
///
/// The batch text is the sentences joined by newlines with no leading blank
/// line, so tokenizer output line `i` belongs to record `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<Record>,
}

impl Batch {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn sentences(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.sentence.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One sentence per line, joined by `\n`.
    pub fn text(&self) -> String {
        self.sentences().join("\n")
    }
}

/// Read and parse an input file into a batch.
pub fn load_batch(path: &Path) -> Result<Batch, LabelError> {
    let content = read_input_file(path)?;
    let records = parse_records(&content)?;

    tracing::info!(path = %path.display(), records = records.len(), "loaded input records");

    Ok(Batch::new(records))
}
