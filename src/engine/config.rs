// Configuration for the labeltok pipeline
// Defaults reproduce the stock CoreNLP PTBTokenizer run over label_simple.txt

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::tokenize::punctuation::DEFAULT_PUNCTUATION;

/// Jar the default tokenizer command loads from its working directory.
pub const STANFORD_CORENLP_JAR: &str = "stanford-corenlp-3.4.1.jar";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ::config::ConfigError,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which adapter sits behind the tokenizing transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Shell out to an external PTB tokenizer process.
    External,
    /// In-process approximation of PTB tokenization.
    Builtin,
}

/// Input and output file locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// `id<TAB>sentence` records (default `label_simple.txt`)
    pub input: PathBuf,

    /// `id<TAB>tokenized_sentence` records (default `tokenized_label.txt`)
    pub output: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("label_simple.txt"),
            output: PathBuf::from("tokenized_label.txt"),
        }
    }
}

/// Tokenizer adapter settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Adapter selection (default external)
    pub kind: TokenizerKind,

    /// Program to execute (default `java`)
    pub program: String,

    /// Arguments placed before the temporary input file path.
    /// Default selects PTBTokenizer with `-preserveLines -lowerCase`.
    pub args: Vec<String>,

    /// Working directory for the tool and its temporary file (default: none)
    pub workdir: Option<PathBuf>,

    /// Seconds to wait before killing the tool (default 120)
    pub timeout_secs: u64,
}

impl TokenizerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            kind: TokenizerKind::External,
            program: "java".to_string(),
            args: vec![
                "-cp".to_string(),
                STANFORD_CORENLP_JAR.to_string(),
                "edu.stanford.nlp.process.PTBTokenizer".to_string(),
                "-preserveLines".to_string(),
                "-lowerCase".to_string(),
            ],
            workdir: None,
            timeout_secs: 120,
        }
    }
}

/// Tokens dropped from tokenizer output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PunctuationConfig {
    pub tokens: Vec<String>,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_PUNCTUATION.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Master configuration for one run
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub tokenizer: TokenizerConfig,
    pub punctuation: PunctuationConfig,
}

impl Config {
    /// Load a TOML config file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let load_err = |source: ::config::ConfigError| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Toml)
                    .required(true),
            )
            .build()
            .map_err(load_err)?;

        let cfg: Config = settings.try_deserialize().map_err(load_err)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tokenizer.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "tokenizer.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.tokenizer.kind == TokenizerKind::External && self.tokenizer.program.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "tokenizer.program must not be empty".to_string(),
            ));
        }

        // Output lines are split on single spaces, so such tokens could never match.
        if let Some(bad) = self
            .punctuation
            .tokens
            .iter()
            .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
        {
            return Err(ConfigError::Invalid(format!(
                "punctuation token {bad:?} is empty or contains whitespace"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_command_preserves_lines_and_lowercases() {
        let cfg = TokenizerConfig::default();
        assert_eq!(cfg.program, "java");
        assert!(cfg.args.contains(&"-preserveLines".to_string()));
        assert!(cfg.args.contains(&"-lowerCase".to_string()));
        assert_eq!(cfg.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_default_punctuation_matches_constant() {
        let cfg = PunctuationConfig::default();
        assert_eq!(cfg.tokens.len(), DEFAULT_PUNCTUATION.len());
        assert!(cfg.tokens.contains(&"-LRB-".to_string()));
        assert!(cfg.tokens.contains(&"\\".to_string()));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeltok.toml");
        fs::write(
            &path,
            "[tokenizer]\nkind = \"builtin\"\ntimeout_secs = 5\n\n[io]\ninput = \"in.tsv\"\n",
        )
        .unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.tokenizer.kind, TokenizerKind::Builtin);
        assert_eq!(cfg.tokenizer.timeout_secs, 5);
        assert_eq!(cfg.tokenizer.program, "java");
        assert_eq!(cfg.io.input, PathBuf::from("in.tsv"));
        assert_eq!(cfg.io.output, PathBuf::from("tokenized_label.txt"));
        assert_eq!(cfg.punctuation, PunctuationConfig::default());
    }

    #[test]
    fn test_load_punctuation_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeltok.toml");
        fs::write(&path, "[punctuation]\ntokens = [\".\", \"¿\"]\n").unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.punctuation.tokens, vec![".".to_string(), "¿".to_string()]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/labeltok.toml"));
        assert!(matches!(result, Err(ConfigError::Load { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut cfg = Config::default();
        cfg.tokenizer.timeout_secs = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_whitespace_punctuation_rejected() {
        let mut cfg = Config::default();
        cfg.punctuation.tokens.push("a b".to_string());
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("a b")));
    }

    #[test]
    fn test_empty_program_ok_for_builtin() {
        let mut cfg = Config::default();
        cfg.tokenizer.program = String::new();
        assert!(cfg.validate().is_err());

        cfg.tokenizer.kind = TokenizerKind::Builtin;
        assert!(cfg.validate().is_ok());
    }
}
