//! Command execution primitives with consistent error handling.

use serde::Serialize;
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    pub success: bool,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            exit_code: 0,
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            exit_code,
        }
    }

    /// Prefers stderr, falls back to stdout if stderr is empty.
    pub fn error_text(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.trim().to_string()
        } else {
            self.stdout.trim().to_string()
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Runs external programs. Blocking; no timeout.
pub trait ProcessRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> CommandOutput;
}

/// Runs programs on the local machine via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl ProcessRunner for LocalRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> CommandOutput {
        match Command::new(program).args(args).current_dir(dir).output() {
            Ok(output) => output.into(),
            Err(e) => CommandOutput::failed(-1, format!("Failed to run {}: {}", program, e)),
        }
    }
}

/// Run a configured command line (`[program, args...]`) through `runner`.
pub fn run_command_line(runner: &dyn ProcessRunner, dir: &Path, command: &[String]) -> CommandOutput {
    let Some((program, args)) = command.split_first() else {
        return CommandOutput::failed(-1, "Empty command");
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    runner.run(dir, program, &args)
}

/// Display form of a command line, for logs and reports.
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(|part| {
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{}\"", part)
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
