use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::filter::LevelFilter;

use crate::engine::config::{Config, ConfigError, TokenizerKind};

/// Command-line entry point.
#[derive(Debug, Parser)]
#[command(
    name = "labeltok",
    version,
    about = "PTB-tokenize id<TAB>sentence label files and strip punctuation"
)]
pub struct Cli {
    /// Input records, one `id<TAB>sentence` per line.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output file for `id<TAB>tokenized_sentence` lines.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML config file; flags override its values.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tokenizer adapter to use.
    #[arg(long, value_enum)]
    pub tokenizer: Option<TokenizerKind>,

    /// External tokenizer program.
    #[arg(long, value_name = "PROGRAM")]
    pub program: Option<String>,

    /// Argument for the external program (repeat; replaces the default list).
    #[arg(long = "tool-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Working directory for the external program.
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Kill the external program after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Punctuation token to drop (repeat; replaces the default set).
    #[arg(long, value_name = "TOKEN", allow_hyphen_values = true)]
    pub punctuation: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(input) = &self.input {
            config.io.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.io.output = output.clone();
        }
        if let Some(kind) = self.tokenizer {
            config.tokenizer.kind = kind;
        }
        if let Some(program) = &self.program {
            config.tokenizer.program = program.clone();
        }
        if !self.tool_args.is_empty() {
            config.tokenizer.args = self.tool_args.clone();
        }
        if let Some(dir) = &self.workdir {
            config.tokenizer.workdir = Some(dir.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.tokenizer.timeout_secs = secs;
        }
        if !self.punctuation.is_empty() {
            config.punctuation.tokens = self.punctuation.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
