//! Keyword case normalization
//!
//! Reserved words and block keywords are rewritten to the configured case.
//! Identifiers, strings and comments are never touched. With `preserve`, the
//! `AS` keyword is the exception: its case is detected from the whole input so
//! every alias in a statement reads the same.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::lexer::{Token, TokenKind};

/// Keyword case mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCase {
    Upper,
    Lower,
    #[default]
    Preserve,
}

impl KeywordCase {
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            KeywordCase::Upper => text.to_uppercase(),
            KeywordCase::Lower => text.to_lowercase(),
            KeywordCase::Preserve => text.to_string(),
        }
    }
}

impl fmt::Display for KeywordCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeywordCase::Upper => "upper",
            KeywordCase::Lower => "lower",
            KeywordCase::Preserve => "preserve",
        })
    }
}

impl FromStr for KeywordCase {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upper" => Ok(KeywordCase::Upper),
            "lower" => Ok(KeywordCase::Lower),
            "preserve" => Ok(KeywordCase::Preserve),
            _ => Err(FormatError::InvalidOption {
                option: "keyword_case",
                reason: format!("expected upper, lower or preserve, got `{s}`"),
            }),
        }
    }
}

fn is_upper(text: &str) -> bool {
    text == text.to_uppercase()
}

/// Dominant case among the tokens selected by `matches`.
///
/// `Upper` only when strictly more than half of them are uppercase; a tie or
/// an empty selection gives `Lower`.
pub fn detect_dominant_case<F>(tokens: &[Token], matches: F) -> KeywordCase
where
    F: Fn(&Token) -> bool,
{
    let (upper, total) = tokens
        .iter()
        .filter(|token| matches(*token))
        .fold((0usize, 0usize), |(upper, total), token| {
            (upper + usize::from(is_upper(&token.text)), total + 1)
        });
    if upper * 2 > total {
        KeywordCase::Upper
    } else {
        KeywordCase::Lower
    }
}

/// Case used for `AS` tokens, existing or synthesized
#[must_use]
pub fn alias_case(tokens: &[Token], keyword_case: KeywordCase) -> KeywordCase {
    match keyword_case {
        KeywordCase::Preserve => detect_dominant_case(tokens, Token::is_as),
        resolved => resolved,
    }
}

/// Builds the `AS` token inserted by the alias policy
#[derive(Debug, Clone, Copy)]
pub struct AliasKeyword {
    case: KeywordCase,
}

impl AliasKeyword {
    #[must_use]
    pub fn new(tokens: &[Token], keyword_case: KeywordCase) -> Self {
        Self {
            case: alias_case(tokens, keyword_case),
        }
    }

    #[must_use]
    pub fn token(&self) -> Token {
        Token::new(TokenKind::ReservedKeyword, self.case.apply("AS"))
    }
}

/// Rewrite keyword tokens to the resolved case.
///
/// Multi-word keywords also get their internal whitespace collapsed.
#[must_use]
pub fn normalize_keywords(mut tokens: Vec<Token>, keyword_case: KeywordCase) -> Vec<Token> {
    let as_case = alias_case(&tokens, keyword_case);
    for token in &mut tokens {
        if !token.kind.is_case_sensitive_keyword() {
            continue;
        }
        let case = if token.is_as() { as_case } else { keyword_case };
        let collapsed = if token.text.contains(char::is_whitespace) {
            token.text.split_whitespace().collect::<Vec<_>>().join(" ")
        } else {
            std::mem::take(&mut token.text)
        };
        token.text = case.apply(&collapsed);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(text: &str) -> Token {
        Token::new(TokenKind::ReservedKeyword, text)
    }

    #[test]
    fn test_detect_strict_majority() {
        let tokens = vec![keyword("AS"), keyword("AS"), keyword("as")];
        assert_eq!(detect_dominant_case(&tokens, Token::is_as), KeywordCase::Upper);
    }

    #[test]
    fn test_detect_tie_is_lower() {
        let tokens = vec![keyword("AS"), keyword("as")];
        assert_eq!(detect_dominant_case(&tokens, Token::is_as), KeywordCase::Lower);
    }

    #[test]
    fn test_detect_none_is_lower() {
        let tokens = vec![Token::new(TokenKind::Identifier, "a")];
        assert_eq!(detect_dominant_case(&tokens, Token::is_as), KeywordCase::Lower);
    }

    #[test]
    fn test_normalize_upper_leaves_identifiers() {
        let tokens = vec![
            Token::new(TokenKind::ReservedCommand, "select"),
            Token::new(TokenKind::Identifier, "Col"),
            Token::new(TokenKind::String, "'abc'"),
            Token::new(TokenKind::BlockStart, "case"),
        ];
        let out = normalize_keywords(tokens, KeywordCase::Upper);
        let texts: Vec<&str> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["SELECT", "Col", "'abc'", "CASE"]);
    }

    #[test]
    fn test_normalize_collapses_phrase_whitespace() {
        let tokens = vec![Token::new(TokenKind::ReservedCommand, "Group\n  By")];
        let out = normalize_keywords(tokens, KeywordCase::Preserve);
        assert_eq!(out[0].text, "Group By");
    }

    #[test]
    fn test_preserve_unifies_as() {
        let tokens = vec![
            keyword("AS"),
            keyword("as"),
            keyword("as"),
            Token::new(TokenKind::ReservedCommand, "Select"),
        ];
        let out = normalize_keywords(tokens, KeywordCase::Preserve);
        let texts: Vec<&str> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["as", "as", "as", "Select"]);
    }

    #[test]
    fn test_alias_keyword_follows_configured_case() {
        assert_eq!(AliasKeyword::new(&[], KeywordCase::Upper).token().text, "AS");
        assert_eq!(AliasKeyword::new(&[], KeywordCase::Preserve).token().text, "as");
        let upper = vec![keyword("AS")];
        assert_eq!(AliasKeyword::new(&upper, KeywordCase::Preserve).token().text, "AS");
    }

    #[test]
    fn test_keyword_case_from_str() {
        assert_eq!("UPPER".parse::<KeywordCase>().unwrap(), KeywordCase::Upper);
        assert!("title".parse::<KeywordCase>().is_err());
    }
}
