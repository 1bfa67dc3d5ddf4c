use std::path::Path;

use serde::Serialize;

use elementary_init::setup::SetupReport;

pub type CmdResult<T> = elementary_init::Result<(T, i32)>;

pub mod cleanup;
pub mod init;

/// Run summary shared by both modes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub command: &'static str,
    pub root: String,
    pub content_updated: bool,
    pub names_updated: bool,
    pub git_initialized: bool,
    pub cleanup_done: bool,
    pub report: SetupReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl RunOutput {
    pub fn new(command: &'static str, root: &Path, report: SetupReport, hints: Vec<String>) -> Self {
        Self {
            command,
            root: root.display().to_string(),
            content_updated: report.content_updated(),
            names_updated: report.names_updated(),
            git_initialized: report.git_initialized(),
            cleanup_done: report.cleanup_done(),
            report,
            hints,
        }
    }
}
