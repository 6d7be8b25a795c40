//! Placeholder substitution
//!
//! Bare indexed placeholders (`?`) take positional values in order of
//! appearance. Numbered (`?2`, `$1`) and named (`:id`, `@id`) placeholders are
//! looked up by key. Anything without a value is left as written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::DialectRules;
use crate::error::{FormatError, Result};
use crate::lexer::Token;

/// Caller-supplied placeholder values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    Positional(Vec<String>),
    Named(HashMap<String, String>),
}

impl Params {
    /// Check that the dialect can express these params.
    ///
    /// # Errors
    ///
    /// [`FormatError::UnsupportedParams`] for named values in a dialect
    /// without named placeholders, or any values in a dialect without
    /// placeholders at all.
    pub fn validate_for(&self, rules: &DialectRules) -> Result<()> {
        match self {
            Params::Named(_) if rules.named_placeholder_types.is_empty() => {
                Err(FormatError::UnsupportedParams {
                    dialect: rules.name.to_string(),
                    kind: "named",
                })
            }
            Params::Positional(_) if !rules.has_placeholders() => {
                Err(FormatError::UnsupportedParams {
                    dialect: rules.name.to_string(),
                    kind: "indexed",
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<Vec<String>> for Params {
    fn from(values: Vec<String>) -> Self {
        Params::Positional(values)
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(values: HashMap<String, String>) -> Self {
        Params::Named(values)
    }
}

/// Hands out placeholder values during one formatting run
#[derive(Debug)]
pub struct ParamResolver<'a> {
    params: Option<&'a Params>,
    index: usize,
}

impl<'a> ParamResolver<'a> {
    #[must_use]
    pub fn new(params: Option<&'a Params>) -> Self {
        Self { params, index: 0 }
    }

    /// Replacement text for a placeholder token
    pub fn resolve(&mut self, token: &Token) -> String {
        let value = match (self.params, token.placeholder_key()) {
            (Some(Params::Positional(values)), None) => {
                let value = values.get(self.index);
                self.index += 1;
                value
            }
            (Some(Params::Positional(values)), Some(key)) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| values.get(index)),
            (Some(Params::Named(values)), Some(key)) => values.get(key),
            _ => None,
        };
        match value {
            Some(value) => value.clone(),
            None => {
                if self.params.is_some() {
                    debug!(placeholder = %token.text, "no value for placeholder");
                }
                token.text.clone()
            }
        }
    }
}
