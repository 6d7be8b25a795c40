//! Stream formatting.
//!
//! [`format_file`] reads a whole SQL document from any reader, formats it
//! with a [`Config`](crate::Config), and writes the result to any `Write`
//! implementation. The binary drives it once per file.

pub mod pipeline;

pub use pipeline::format_file;
