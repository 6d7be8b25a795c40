//! SQL layout.
//!
//! This module turns a token sequence into formatted text:
//! - [`case_convert`]: Keyword case normalization and `AS` case detection
//! - [`layout`]: The single-pass layout engine
//! - [`indenter`]: Clause and block frame stack deciding line indents
//! - [`inline_block`]: Keeps short parenthesised blocks on one line
//! - [`aligner`]: Tabular keyword padding
//! - [`whitespace`]: Output buffer with trim helpers and pending pads
//! - [`params`]: Placeholder substitution

pub mod aligner;
pub mod case_convert;
pub mod indenter;
pub mod inline_block;
pub mod layout;
pub mod params;
pub mod whitespace;

pub use case_convert::{detect_dominant_case, normalize_keywords, KeywordCase};
pub use indenter::{BlockKind, Indenter};
pub use layout::Formatter;
pub use params::{ParamResolver, Params};
pub use whitespace::QueryBuffer;
