//! Terminal I/O utilities for CLI.
//!
//! Provides user prompting.

use std::io::{self, BufRead, Write};

use elementary_init::setup::Prompter;
use elementary_init::{Error, Result};

/// Print `message` to stderr and read one line from stdin.
///
/// End of input is an error so a closed stdin never reads as "yes".
pub fn prompt(message: &str) -> Result<String> {
    eprint!("{}", message);
    io::stderr().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    let read = stdin
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::internal_io(format!("Failed to read input: {}", e), None))?;

    if read == 0 {
        return Err(Error::internal_io(
            "Input ended before an answer was given",
            Some(message.trim().to_string()),
        )
        .with_hint("Run elementary-init from an interactive terminal, or use --clean"));
    }

    Ok(line.trim().to_string())
}

/// Prompts on stderr, answers from stdin.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        prompt(question)
    }

    fn show(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}
