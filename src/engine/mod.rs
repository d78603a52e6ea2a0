pub mod config;
pub mod error;

pub use config::{Config, ConfigError, TokenizerKind};
pub use error::{read_input_file, LabelError};
