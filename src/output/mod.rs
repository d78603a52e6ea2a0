use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{ids} ids but {lines} tokenized lines")]
    LengthMismatch { ids: usize, lines: usize },

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One `id<TAB>tokenized_sentence` line of the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub id: String,
    pub tokenized_sentence: String,
}

/// Pair ids with tokenized lines by position.
pub fn pair_records<I, L>(ids: &[I], lines: &[L]) -> Result<Vec<OutputRecord>, WriteError>
where
    I: AsRef<str>,
    L: AsRef<str>,
{
    if ids.len() != lines.len() {
        return Err(WriteError::LengthMismatch {
            ids: ids.len(),
            lines: lines.len(),
        });
    }

    Ok(ids
        .iter()
        .zip(lines)
        .map(|(id, line)| OutputRecord {
            id: id.as_ref().to_string(),
            tokenized_sentence: line.as_ref().to_string(),
        })
        .collect())
}

/// Render records as output file content, one line each.
pub fn render(records: &[OutputRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&record.id);
        out.push('\t');
        out.push_str(&record.tokenized_sentence);
        out.push('\n');
    }
    out
}

/// Write records to `path`.
///
/// Content goes to a temporary file next to `path` first and is then renamed
/// over it, so a failed run never leaves a partial output file behind.
pub fn write_output(path: &Path, records: &[OutputRecord]) -> Result<(), WriteError> {
    let io_err = |source: io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".labeltok-")
        .tempfile_in(dir)
        .map_err(io_err)?;
    file.write_all(render(records).as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;

    tracing::info!(path = %path.display(), records = records.len(), "wrote output");
    Ok(())
}
