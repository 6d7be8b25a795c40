//! Configuration management for sqlprettier.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`sqlprettier.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dialect::Dialect;
use crate::error::{FormatError, Result};
use crate::format::aligner::TABULAR_INDENT;
use crate::format::case_convert::KeywordCase;
use crate::format::params::Params;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["sqlprettier.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn invalid(option: &'static str, expected: &str, got: &str) -> FormatError {
    FormatError::InvalidOption {
        option,
        reason: format!("expected {expected}, got `{got}`"),
    }
}

/// Layout of clause keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    /// Keyword on its own line, body indented one unit
    #[default]
    Standard,
    /// Keywords left-aligned in a fixed ten-column gutter
    TabularLeft,
    /// Keywords right-aligned in a fixed ten-column gutter
    TabularRight,
}

impl IndentStyle {
    #[must_use]
    pub fn is_tabular(self) -> bool {
        self != IndentStyle::Standard
    }
}

impl FromStr for IndentStyle {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(IndentStyle::Standard),
            "tabular_left" | "tabularleft" => Ok(IndentStyle::TabularLeft),
            "tabular_right" | "tabularright" => Ok(IndentStyle::TabularRight),
            _ => Err(invalid(
                "indent_style",
                "standard, tabular_left or tabular_right",
                s,
            )),
        }
    }
}

/// Where a broken `AND`/`OR` goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperatorNewline {
    /// Operator starts the new line
    #[default]
    Before,
    /// Operator ends the previous line
    After,
}

impl FromStr for LogicalOperatorNewline {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(LogicalOperatorNewline::Before),
            "after" => Ok(LogicalOperatorNewline::After),
            _ => Err(invalid("logical_operator_newline", "before or after", s)),
        }
    }
}

/// When a clause's comma-separated items go one per line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultilineLists {
    #[default]
    Always,
    Avoid,
    /// Break when the clause is longer than `expression_width`
    ExpressionWidth,
    /// Break when the clause has more than this many items
    ItemCount(usize),
}

impl FromStr for MultilineLists {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "always" => Ok(MultilineLists::Always),
            "avoid" => Ok(MultilineLists::Avoid),
            "expression_width" => Ok(MultilineLists::ExpressionWidth),
            other => other
                .parse::<usize>()
                .map(MultilineLists::ItemCount)
                .map_err(|_| {
                    invalid(
                        "multiline_lists",
                        "always, avoid, expression_width or an item count",
                        s,
                    )
                }),
        }
    }
}

/// Alias keyword policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasAs {
    #[default]
    Preserve,
    /// Insert `AS` before bare aliases
    Always,
    /// Drop `AS` before aliases (kept inside `CAST`)
    Never,
}

impl FromStr for AliasAs {
    type Err = FormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preserve" => Ok(AliasAs::Preserve),
            "always" => Ok(AliasAs::Always),
            "never" => Ok(AliasAs::Never),
            _ => Err(invalid("alias_as", "preserve, always or never", s)),
        }
    }
}

impl fmt::Display for IndentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndentStyle::Standard => "standard",
            IndentStyle::TabularLeft => "tabular_left",
            IndentStyle::TabularRight => "tabular_right",
        })
    }
}

// Serde default functions
fn default_tab_width() -> usize {
    2
}
fn default_expression_width() -> usize {
    50
}
fn default_lines_between_queries() -> usize {
    1
}

/// Main configuration struct for sqlprettier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQL dialect (default: sql)
    #[serde(default)]
    pub language: Dialect,

    /// Keyword case (default: preserve)
    #[serde(default)]
    pub keyword_case: KeywordCase,

    /// Clause keyword layout (default: standard)
    #[serde(default)]
    pub indent_style: IndentStyle,

    /// Spaces per indent level (default: 2)
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Indent with tabs instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Placement of broken `AND`/`OR` (default: before)
    #[serde(default)]
    pub logical_operator_newline: LogicalOperatorNewline,

    /// Maximum width of a parenthesised expression kept on one line (default: 50)
    #[serde(default = "default_expression_width")]
    pub expression_width: usize,

    /// Newlines after each `;` (default: 1)
    #[serde(default = "default_lines_between_queries")]
    pub lines_between_queries: usize,

    /// No spaces around operators (default: false)
    #[serde(default)]
    pub dense_operators: bool,

    /// Put `;` on its own line (default: false)
    #[serde(default)]
    pub newline_before_semicolon: bool,

    /// Short-clause rule (default: always)
    #[serde(default)]
    pub multiline_lists: MultilineLists,

    /// Alias keyword policy (default: preserve)
    #[serde(default)]
    pub alias_as: AliasAs,

    /// Placeholder values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub language: Option<Dialect>,
    pub keyword_case: Option<KeywordCase>,
    pub indent_style: Option<IndentStyle>,
    pub tab_width: Option<usize>,
    pub use_tabs: Option<bool>,
    pub logical_operator_newline: Option<LogicalOperatorNewline>,
    pub expression_width: Option<usize>,
    pub lines_between_queries: Option<usize>,
    pub dense_operators: Option<bool>,
    pub newline_before_semicolon: Option<bool>,
    pub multiline_lists: Option<MultilineLists>,
    pub alias_as: Option<AliasAs>,
    pub params: Option<Params>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: Dialect::Sql,
            keyword_case: KeywordCase::Preserve,
            indent_style: IndentStyle::Standard,
            tab_width: 2,
            use_tabs: false,
            logical_operator_newline: LogicalOperatorNewline::Before,
            expression_width: 50,
            lines_between_queries: 1,
            dense_operators: false,
            newline_before_semicolon: false,
            multiline_lists: MultilineLists::Always,
            alias_as: AliasAs::Preserve,
            params: None,
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_TAB_WIDTH: usize = 20;
    /// Maximum blank lines between statements
    const MAX_LINES_BETWEEN_QUERIES: usize = 10;

    /// Validate configuration values are within reasonable bounds
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidOption`] naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        if !self.use_tabs && self.tab_width == 0 {
            return Err(FormatError::InvalidOption {
                option: "tab_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tab_width > Self::MAX_TAB_WIDTH {
            return Err(FormatError::InvalidOption {
                option: "tab_width",
                reason: format!(
                    "{} exceeds maximum of {}",
                    self.tab_width,
                    Self::MAX_TAB_WIDTH
                ),
            });
        }
        if self.expression_width == 0 {
            return Err(FormatError::InvalidOption {
                option: "expression_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.lines_between_queries == 0
            || self.lines_between_queries > Self::MAX_LINES_BETWEEN_QUERIES
        {
            return Err(FormatError::InvalidOption {
                option: "lines_between_queries",
                reason: format!(
                    "{} is outside 1..={}",
                    self.lines_between_queries,
                    Self::MAX_LINES_BETWEEN_QUERIES
                ),
            });
        }
        if self.multiline_lists == MultilineLists::ItemCount(0) {
            return Err(FormatError::InvalidOption {
                option: "multiline_lists",
                reason: "item count must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whitespace for one indent level
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.indent_style.is_tabular() {
            TABULAR_INDENT.to_string()
        } else if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width)
        }
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::ConfigFile`] if the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let partial = read_partial(path)?;
        let mut config = Self::default();
        config.apply_partial(partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(v) = partial.language {
            self.language = v;
        }
        if let Some(v) = partial.keyword_case {
            self.keyword_case = v;
        }
        if let Some(v) = partial.indent_style {
            self.indent_style = v;
        }
        if let Some(v) = partial.tab_width {
            self.tab_width = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = partial.logical_operator_newline {
            self.logical_operator_newline = v;
        }
        if let Some(v) = partial.expression_width {
            self.expression_width = v;
        }
        if let Some(v) = partial.lines_between_queries {
            self.lines_between_queries = v;
        }
        if let Some(v) = partial.dense_operators {
            self.dense_operators = v;
        }
        if let Some(v) = partial.newline_before_semicolon {
            self.newline_before_semicolon = v;
        }
        if let Some(v) = partial.multiline_lists {
            self.multiline_lists = v;
        }
        if let Some(v) = partial.alias_as {
            self.alias_as = v;
        }
        if partial.params.is_some() {
            self.params = partial.params;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Returns the home directory config first, then configs from the root down
    /// to the file's directory (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values). Files
    /// that fail to load are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in Self::discover_config_files(start_path) {
            match read_partial(&path) {
                Ok(partial) => config.apply_partial(partial),
                Err(e) => warn!("{e}"),
            }
        }
        config
    }
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let config_error = |message: String| FormatError::ConfigFile {
        path: path.to_path_buf(),
        message,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    toml::from_str(&contents).map_err(|e| config_error(e.to_string()))
}
