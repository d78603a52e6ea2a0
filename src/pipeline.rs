// Pipeline - one run from input file to output file

use std::path::PathBuf;

use crate::engine::config::Config;
use crate::engine::error::LabelError;
use crate::input::load_batch;
use crate::output::{pair_records, write_output};
use crate::tokenize::{build_tokenizer, PunctuationSet, Tokenizer, TokenizingTransform};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records: usize,
    pub output: PathBuf,
}

/// Reader -> tokenizing transform -> writer, run to completion.
///
/// Nothing is written unless every earlier step succeeded.
pub struct Pipeline {
    config: Config,
    transform: TokenizingTransform,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let tokenizer = build_tokenizer(&config.tokenizer);
        Self::with_tokenizer(config, tokenizer)
    }

    /// Use a specific tokenizer instead of the one the config selects.
    pub fn with_tokenizer(config: Config, tokenizer: Box<dyn Tokenizer>) -> Self {
        let punctuation = PunctuationSet::new(config.punctuation.tokens.iter().cloned());
        Self {
            transform: TokenizingTransform::new(tokenizer, punctuation),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self) -> Result<RunSummary, LabelError> {
        let batch = load_batch(&self.config.io.input)?;
        let lines = self.transform.apply(&batch)?;
        let records = pair_records(&batch.ids(), &lines)?;
        write_output(&self.config.io.output, &records)?;

        Ok(RunSummary {
            records: records.len(),
            output: self.config.io.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::TokenizerKind;
    use crate::tokenize::TokenizeError;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.io.input = dir.join("label_simple.txt");
        config.io.output = dir.join("tokenized_label.txt");
        config.tokenizer.kind = TokenizerKind::Builtin;
        config
    }

    #[test]
    fn test_run_with_builtin_tokenizer() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.io.input, "42\tThe cat sat.\n7\tA dog (barked)!\n").unwrap();

        let summary = Pipeline::new(config.clone()).run().unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(
            fs::read_to_string(&config.io.output).unwrap(),
            "42\tthe cat sat\n7\ta dog barked\n"
        );
    }

    #[test]
    fn test_malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(&config.io.input, "1\tfine\nno_tab_here\n").unwrap();

        let result = Pipeline::new(config.clone()).run();
        assert!(matches!(result, Err(LabelError::Parse(_))));
        assert!(!config.io.output.exists());
    }

    #[test]
    fn test_custom_punctuation_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.punctuation.tokens = vec!["!".to_string()];
        fs::write(&config.io.input, "1\tHi, there!\n").unwrap();

        Pipeline::new(config.clone()).run().unwrap();
        assert_eq!(
            fs::read_to_string(&config.io.output).unwrap(),
            "1\thi , there\n"
        );
    }

    #[test]
    fn test_empty_input_writes_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        // Never invoked for an empty batch.
        config.tokenizer.kind = TokenizerKind::External;
        config.tokenizer.program = "labeltok-no-such-tool-12345".to_string();
        fs::write(&config.io.input, "\n").unwrap();

        let summary = Pipeline::new(config.clone()).run().unwrap();
        assert_eq!(summary.records, 0);
        assert_eq!(fs::read_to_string(&config.io.output).unwrap(), "");
    }

    #[test]
    fn test_missing_tool_is_tokenize_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.tokenizer.kind = TokenizerKind::External;
        config.tokenizer.program = "labeltok-no-such-tool-12345".to_string();
        fs::write(&config.io.input, "1\thello\n").unwrap();

        let result = Pipeline::new(config.clone()).run();
        assert!(matches!(
            result,
            Err(LabelError::Tokenize(TokenizeError::Spawn { .. }))
        ));
        assert!(!config.io.output.exists());
    }
}
