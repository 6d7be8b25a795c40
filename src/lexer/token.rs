//! Token model: the lexical units produced by the tokenizer and consumed by
//! the case normalizer and the layout engine.

use std::fmt;

/// Token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Statement-opening keyword (`SELECT`, `FROM`, `GROUP BY`)
    ReservedCommand,
    /// Set operators and joins (`UNION ALL`, `LEFT JOIN`)
    ReservedBinaryCommand,
    /// `WHEN`, `ELSE`
    ReservedDependentClause,
    /// `ON`, `USING`
    ReservedJoinCondition,
    /// `AND`, `OR`, `XOR`
    ReservedLogicalOperator,
    /// Any other reserved word or built-in function name
    ReservedKeyword,
    BlockStart,
    BlockEnd,
    String,
    LineComment,
    BlockComment,
    IndexedPlaceholder,
    NamedPlaceholder,
    Number,
    Operator,
    Identifier,
    /// A character no rule recognised
    Unknown,
}

impl TokenKind {
    /// Reserved word classes (block markers excluded)
    #[must_use]
    pub fn is_reserved(self) -> bool {
        matches!(
            self,
            TokenKind::ReservedCommand
                | TokenKind::ReservedBinaryCommand
                | TokenKind::ReservedDependentClause
                | TokenKind::ReservedJoinCondition
                | TokenKind::ReservedLogicalOperator
                | TokenKind::ReservedKeyword
        )
    }

    /// Kinds whose text is subject to keyword case conversion
    #[must_use]
    pub fn is_case_sensitive_keyword(self) -> bool {
        self.is_reserved() || matches!(self, TokenKind::BlockStart | TokenKind::BlockEnd)
    }

    #[must_use]
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            TokenKind::IndexedPlaceholder | TokenKind::NamedPlaceholder
        )
    }

    /// Kinds that end an operand: a `-` after one of these is binary minus.
    #[must_use]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::BlockEnd
                | TokenKind::IndexedPlaceholder
                | TokenKind::NamedPlaceholder
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::ReservedCommand => "reserved command",
            TokenKind::ReservedBinaryCommand => "reserved binary command",
            TokenKind::ReservedDependentClause => "dependent clause",
            TokenKind::ReservedJoinCondition => "join condition",
            TokenKind::ReservedLogicalOperator => "logical operator",
            TokenKind::ReservedKeyword => "reserved keyword",
            TokenKind::BlockStart => "block start",
            TokenKind::BlockEnd => "block end",
            TokenKind::String => "string",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::IndexedPlaceholder => "indexed placeholder",
            TokenKind::NamedPlaceholder => "named placeholder",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Identifier => "identifier",
            TokenKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A lexical unit.
///
/// `whitespace_before` holds the exact source text between the previous token
/// and this one, so the token stream reproduces its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub whitespace_before: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            whitespace_before: String::new(),
        }
    }

    #[must_use]
    pub fn with_whitespace(mut self, whitespace: impl Into<String>) -> Self {
        self.whitespace_before = whitespace.into();
        self
    }

    /// Case-insensitive comparison against a keyword (internal spaces collapsed)
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        let mut parts = self.text.split_whitespace();
        let mut expected = word.split(' ');
        loop {
            match (parts.next(), expected.next()) {
                (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => {}
                (None, None) => return true,
                _ => return false,
            }
        }
    }

    #[must_use]
    pub fn is_as(&self) -> bool {
        self.kind == TokenKind::ReservedKeyword && self.is_word("AS")
    }

    #[must_use]
    pub fn is_case(&self) -> bool {
        self.kind == TokenKind::BlockStart && self.is_word("CASE")
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::BlockEnd && self.is_word("END")
    }

    /// Whether the source put a line break between this token and the previous one
    #[must_use]
    pub fn starts_line(&self) -> bool {
        self.whitespace_before.contains('\n')
    }

    /// Parameter key embedded in a placeholder (`:name` → `name`, `?3` → `3`).
    ///
    /// Returns `None` for bare indexed placeholders and non-placeholder tokens.
    #[must_use]
    pub fn placeholder_key(&self) -> Option<&str> {
        if !self.kind.is_placeholder() {
            return None;
        }
        let key = self
            .text
            .trim_start_matches(|c: char| matches!(c, '?' | ':' | '@' | '$'));
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}
