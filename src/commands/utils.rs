//! Shared utilities for commands

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

/// Print `message` and read one line of input, without its line terminator
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message.cyan())?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read input")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use `value` if given, otherwise ask for it
pub fn value_or_prompt<R: BufRead, W: Write>(
    value: Option<String>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(input, output, message),
    }
}
