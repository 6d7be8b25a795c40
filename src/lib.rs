//! sqlprettier - dialect-aware SQL pretty-printer
//!
//! Tokenizes SQL with per-dialect rule tables and lays the tokens out as
//! consistently indented, consistently cased text.
//!
//! ```
//! let config = sqlprettier::Config::default();
//! let sql = sqlprettier::format("SELECT a,b FROM t", &config).unwrap();
//! assert_eq!(sql, "SELECT\n  a,\n  b\nFROM\n  t");
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod dialect;
pub mod error;
pub mod format;
pub mod lexer;
pub mod process;

use tracing::debug;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{AliasAs, Config, IndentStyle, LogicalOperatorNewline, MultilineLists};
pub use dialect::{Dialect, DialectRules};
pub use error::{FormatError, Result};
pub use format::{KeywordCase, Params};
pub use lexer::{Token, TokenKind, Tokenizer};

/// Format `sql` with one of the built-in dialects (`config.language`).
///
/// # Errors
///
/// [`FormatError::InvalidOption`] for out-of-range options and
/// [`FormatError::UnsupportedParams`] when the params do not fit the dialect.
/// Malformed SQL is never an error.
pub fn format(sql: &str, config: &Config) -> Result<String> {
    config.validate()?;
    let rules = config.language.rules();
    let tokenizer = Tokenizer::for_dialect(config.language)?;
    layout(sql, config, rules, tokenizer)
}

/// Format `sql` with a caller-supplied rule set; `config.language` is ignored.
///
/// # Errors
///
/// As [`format`], plus [`FormatError::Pattern`] if the rule set does not
/// compile.
pub fn format_with_rules(sql: &str, config: &Config, rules: &DialectRules) -> Result<String> {
    config.validate()?;
    let tokenizer = Tokenizer::new(rules)?;
    layout(sql, config, rules, &tokenizer)
}

fn layout(sql: &str, config: &Config, rules: &DialectRules, tokenizer: &Tokenizer) -> Result<String> {
    if let Some(params) = &config.params {
        params.validate_for(rules)?;
    }
    let tokens = tokenizer.tokenize(sql);
    debug!(dialect = rules.name, tokens = tokens.len(), "tokenized");
    let tokens = format::normalize_keywords(tokens, config.keyword_case);
    Ok(format::Formatter::new(config, rules).format(tokens))
}
