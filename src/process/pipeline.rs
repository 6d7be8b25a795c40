//! Read-format-write pipeline

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::Config;
use crate::Result;

/// Format one SQL document read from `input` into `output`.
///
/// The whole stream is read before formatting. Non-empty output is
/// terminated with a single newline.
///
/// # Errors
///
/// I/O failures (including input that is not valid UTF-8) and the
/// configuration errors of [`crate::format`].
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    source_name: &str,
) -> Result<()> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;
    debug!(source = source_name, bytes = source.len(), "formatting");

    let formatted = crate::format(&source, config)?;
    if !formatted.is_empty() {
        output.write_all(formatted.as_bytes())?;
        output.write_all(b"\n")?;
    }
    Ok(())
}
