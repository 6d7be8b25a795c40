//! Dialect rule sets
//!
//! A dialect is plain data: the reserved word lists and symbol sets the rule
//! compiler turns into token patterns, plus one optional override hook for
//! contextual reclassification.
//!
//! # Modules
//!
//! - [`standard`]: ANSI-flavoured default
//! - [`sqlite`], [`mysql`], [`plsql`], [`hive`], [`n1ql`]: vendor variants

pub mod hive;
pub mod mysql;
pub mod n1ql;
pub mod plsql;
pub mod sqlite;
pub mod standard;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::lexer::Token;

/// Quoting styles a dialect accepts for string literals and quoted names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringType {
    /// `"text"`, doubled-quote or backslash escapes
    DoubleQuote,
    /// `'text'`, doubled-quote or backslash escapes
    SingleQuote,
    /// `N'text'`
    NationalQuote,
    /// `X'0F'` hex blob
    HexQuote,
    /// `` `name` ``, doubled-backtick escape
    Backtick,
    /// `[name]`, doubled-bracket escape
    Bracket,
}

/// Extra characters allowed in identifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordChars {
    /// Allowed anywhere in the word
    pub any: &'static str,
    /// Allowed only at the start
    pub prefix: &'static str,
    /// Allowed only at the end
    pub suffix: &'static str,
}

impl WordChars {
    /// Characters that continue a word after a reserved keyword match
    #[must_use]
    pub fn continues_word(&self, c: char) -> bool {
        self.any.contains(c) || self.suffix.contains(c)
    }
}

/// Neighbourhood handed to a [`TokenOverride`].
///
/// `ahead` and `behind` are the raw neighbouring tokens; `previous_reserved`
/// is the last reserved token the layout engine has emitted.
#[derive(Debug, Clone, Copy)]
pub struct OverrideContext<'a> {
    pub ahead: Option<&'a Token>,
    pub behind: Option<&'a Token>,
    pub previous_reserved: Option<&'a Token>,
}

/// Contextual reclassification applied to each token before layout
pub type TokenOverride = fn(Token, &OverrideContext<'_>) -> Token;

/// Everything the tokenizer needs to know about a dialect.
///
/// The reserved classes are expected to be disjoint; run [`DialectRules::dedupe`]
/// after assembling a custom rule set.
#[derive(Debug, Clone)]
pub struct DialectRules {
    pub name: &'static str,
    pub reserved_commands: Vec<&'static str>,
    pub reserved_binary_commands: Vec<&'static str>,
    pub reserved_dependent_clauses: Vec<&'static str>,
    pub reserved_join_conditions: Vec<&'static str>,
    pub reserved_logical_operators: Vec<&'static str>,
    pub reserved_keywords: Vec<&'static str>,
    pub string_types: Vec<StringType>,
    pub block_start: Vec<&'static str>,
    pub block_end: Vec<&'static str>,
    pub indexed_placeholder_types: Vec<&'static str>,
    pub named_placeholder_types: Vec<&'static str>,
    pub line_comment_types: Vec<&'static str>,
    pub special_word_chars: WordChars,
    pub operators: Vec<&'static str>,
    pub token_override: Option<TokenOverride>,
}

impl Default for DialectRules {
    fn default() -> Self {
        Self {
            name: "custom",
            reserved_commands: Vec::new(),
            reserved_binary_commands: Vec::new(),
            reserved_dependent_clauses: vec!["WHEN", "ELSE"],
            reserved_join_conditions: vec!["ON", "USING"],
            reserved_logical_operators: vec!["AND", "OR"],
            reserved_keywords: Vec::new(),
            string_types: vec![StringType::DoubleQuote, StringType::SingleQuote],
            block_start: vec!["(", "CASE"],
            block_end: vec![")", "END"],
            indexed_placeholder_types: vec!["?"],
            named_placeholder_types: Vec::new(),
            line_comment_types: vec!["--"],
            special_word_chars: WordChars::default(),
            operators: Vec::new(),
            token_override: None,
        }
    }
}

impl DialectRules {
    /// Make the reserved classes disjoint.
    ///
    /// Each word is kept in the highest-priority class that lists it
    /// (commands, binary commands, dependent clauses, join conditions, logical
    /// operators, block words, keywords). Duplicates inside a class are dropped.
    #[must_use]
    pub fn dedupe(mut self) -> Self {
        let mut seen: Vec<String> = Vec::new();
        for words in [
            &mut self.reserved_commands,
            &mut self.reserved_binary_commands,
            &mut self.reserved_dependent_clauses,
            &mut self.reserved_join_conditions,
            &mut self.reserved_logical_operators,
        ] {
            *words = dedupe_against(words, &mut seen);
        }
        // block words only shadow keywords; they stay in their own lists
        for word in self.block_start.iter().chain(self.block_end.iter()) {
            seen.push(normalize_word(word));
        }
        self.reserved_keywords = dedupe_against(&self.reserved_keywords, &mut seen);
        self
    }

    /// Whether any placeholder syntax is recognised
    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        !self.indexed_placeholder_types.is_empty() || !self.named_placeholder_types.is_empty()
    }
}

/// Drop duplicate words (case-insensitive), keeping first occurrences
#[must_use]
pub fn dedupe(words: &[&'static str]) -> Vec<&'static str> {
    dedupe_against(words, &mut Vec::new())
}

fn dedupe_against(words: &[&'static str], seen: &mut Vec<String>) -> Vec<&'static str> {
    let mut kept = Vec::with_capacity(words.len());
    for word in words {
        let key = normalize_word(word);
        if !seen.contains(&key) {
            seen.push(key);
            kept.push(*word);
        }
    }
    kept
}

fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Built-in dialects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sql,
    Sqlite,
    Mysql,
    Plsql,
    Hive,
    N1ql,
}

static STANDARD_RULES: LazyLock<DialectRules> = LazyLock::new(standard::rules);
static SQLITE_RULES: LazyLock<DialectRules> = LazyLock::new(sqlite::rules);
static MYSQL_RULES: LazyLock<DialectRules> = LazyLock::new(mysql::rules);
static PLSQL_RULES: LazyLock<DialectRules> = LazyLock::new(plsql::rules);
static HIVE_RULES: LazyLock<DialectRules> = LazyLock::new(hive::rules);
static N1QL_RULES: LazyLock<DialectRules> = LazyLock::new(n1ql::rules);

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Sql,
        Dialect::Sqlite,
        Dialect::Mysql,
        Dialect::Plsql,
        Dialect::Hive,
        Dialect::N1ql,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Sql => "sql",
            Dialect::Sqlite => "sqlite",
            Dialect::Mysql => "mysql",
            Dialect::Plsql => "plsql",
            Dialect::Hive => "hive",
            Dialect::N1ql => "n1ql",
        }
    }

    /// Shared, deduplicated rule set for this dialect
    #[must_use]
    pub fn rules(self) -> &'static DialectRules {
        match self {
            Dialect::Sql => &STANDARD_RULES,
            Dialect::Sqlite => &SQLITE_RULES,
            Dialect::Mysql => &MYSQL_RULES,
            Dialect::Plsql => &PLSQL_RULES,
            Dialect::Hive => &HIVE_RULES,
            Dialect::N1ql => &N1QL_RULES,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" | "standard" => Ok(Dialect::Sql),
            "sqlite" => Ok(Dialect::Sqlite),
            "mysql" => Ok(Dialect::Mysql),
            "plsql" | "pl/sql" => Ok(Dialect::Plsql),
            "hive" => Ok(Dialect::Hive),
            "n1ql" => Ok(Dialect::N1ql),
            _ => Err(FormatError::UnsupportedDialect(s.to_string())),
        }
    }
}
