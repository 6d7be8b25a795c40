//! Lexical analysis
//!
//! - [`token`]: token kinds and classification predicates
//! - [`patterns`]: compiles a dialect rule set into ordered matching rules
//! - [`tokenizer`]: scans source text into tokens

pub mod patterns;
pub mod token;
pub mod tokenizer;

pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
