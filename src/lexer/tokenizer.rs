//! Single left-to-right scanner over compiled rules.

use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::dialect::{Dialect, DialectRules, WordChars};
use crate::error::{FormatError, Result};
use crate::lexer::patterns::{compile_rules, Rule};
use crate::lexer::{Token, TokenKind};

/// Compiled rules for every built-in dialect, indexed by `Dialect as usize`
static BUILTIN: LazyLock<Vec<std::result::Result<Tokenizer, regex::Error>>> =
    LazyLock::new(|| {
        Dialect::ALL
            .iter()
            .map(|dialect| Tokenizer::compile(dialect.rules()))
            .collect()
    });

/// Immutable tokenizer for one dialect. Cheap to share between threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    rules: Vec<Rule>,
    word_chars: WordChars,
}

impl Tokenizer {
    /// Compile a tokenizer for an arbitrary rule set.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Pattern`] if a word or symbol list produces an
    /// invalid pattern.
    pub fn new(rules: &DialectRules) -> Result<Self> {
        Ok(Self::compile(rules)?)
    }

    fn compile(rules: &DialectRules) -> std::result::Result<Self, regex::Error> {
        let compiled = compile_rules(rules)?;
        debug!(dialect = rules.name, rules = compiled.len(), "compiled tokenizer");
        Ok(Self {
            rules: compiled,
            word_chars: rules.special_word_chars,
        })
    }

    /// Shared tokenizer of a built-in dialect, compiled on first use.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Pattern`] if the built-in rules fail to compile.
    pub fn for_dialect(dialect: Dialect) -> Result<&'static Tokenizer> {
        match &BUILTIN[dialect as usize] {
            Ok(tokenizer) => Ok(tokenizer),
            Err(err) => Err(FormatError::Pattern(err.clone())),
        }
    }

    /// Split `input` into tokens.
    ///
    /// Never fails: a character no rule accepts becomes a one-character
    /// [`TokenKind::Unknown`] token. Concatenating `whitespace_before` and
    /// `text` of every token reproduces `input` up to trailing whitespace.
    #[must_use]
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut rest = input;
        loop {
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                break;
            }
            let whitespace = &rest[..rest.len() - trimmed.len()];
            let token = self
                .next_token(trimmed, tokens.last())
                .with_whitespace(whitespace);
            rest = &trimmed[token.text.len()..];
            tokens.push(token);
        }
        trace!(tokens = tokens.len(), "tokenized input");
        tokens
    }

    fn next_token(&self, input: &str, previous: Option<&Token>) -> Token {
        let after_dot = previous.is_some_and(|t| t.text == ".");
        for rule in &self.rules {
            if rule.word && after_dot {
                continue;
            }
            let Some(found) = rule.regex.find(input) else {
                continue;
            };
            let text = found.as_str();
            if text.is_empty() {
                continue;
            }
            if rule.word
                && input[found.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| self.word_chars.continues_word(c))
            {
                continue;
            }
            if rule.kind == TokenKind::Number
                && text.starts_with('-')
                && previous.is_some_and(|t| t.kind.is_value())
            {
                continue;
            }
            return Token::new(rule.kind, text);
        }
        let width = input.chars().next().map_or(input.len(), char::len_utf8);
        Token::new(TokenKind::Unknown, &input[..width])
    }
}
