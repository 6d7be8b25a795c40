//! Error types and result aliases for sqlprettier.
//!
//! Malformed SQL never produces an error: the tokenizer and the layout engine
//! degrade to best-effort output. The only failures are configuration
//! problems, rule sets that do not compile, and I/O in the stream helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported SQL dialect: {0}")]
    UnsupportedDialect(String),

    #[error("dialect `{dialect}` does not declare {kind} placeholders")]
    UnsupportedParams { dialect: String, kind: &'static str },

    #[error("invalid value for `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("failed to compile token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to load {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
