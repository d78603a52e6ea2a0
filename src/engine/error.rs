use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::config::ConfigError;
use crate::input::ParseError;
use crate::output::WriteError;
use crate::tokenize::TokenizeError;

/// Top-level error for a labeltok run.
///
/// Every variant aborts the run; nothing here is retried.
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("malformed input: {0}")]
    Parse(#[from] ParseError),

    #[error("tokenizer failed: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("failed to write output: {0}")]
    Write(#[from] WriteError),
}

/// Read a whole input file, tagging I/O failures with the path.
///
/// An empty file is not an error here: zero records produce an empty output.
pub fn read_input_file(path: &Path) -> Result<String, LabelError> {
    let content = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        tracing::warn!(path = %path.display(), "input file has no records");
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("empty.txt");
        File::create(&test_file).unwrap();

        let result = read_input_file(&test_file);
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_nonexistent_file_error() {
        let result = read_input_file(Path::new("nonexistent_file_12345.txt"));
        match result {
            Err(LabelError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("nonexistent_file_12345.txt"))
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_valid_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("valid.txt");
        let mut file = File::create(&test_file).unwrap();
        file.write_all(b"1\thello world").unwrap();

        let result = read_input_file(&test_file);
        assert_eq!(result.unwrap(), "1\thello world");
    }

    #[test]
    fn test_io_error_message_names_path() {
        let err = read_input_file(Path::new("/nonexistent/labels.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/labels.txt"));
    }
}
