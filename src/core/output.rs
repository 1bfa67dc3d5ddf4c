//! Public output types for setup step results.
//!
//! Every step returns a `StepReport`; the orchestrator collects them into a
//! run summary. Nothing here carries mutable process-wide state.

use serde::Serialize;

/// Identifies a setup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Rename,
    Styling,
    Git,
    Hooks,
    Cleanup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Success,
    PartialSuccess,
    Failed,
    Skipped,
}

/// A failure attached to one path or command. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepError {
    /// Relative path or command line the error belongs to.
    pub path: String,
    pub error: String,
}

impl StepError {
    pub fn new(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            error: error.into(),
        }
    }
}

/// Outcome of attempting a single step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub id: StepId,
    pub status: StepStatus,
    pub message: String,
    /// Human-readable list of what changed on disk.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<StepError>,
}

impl StepReport {
    pub fn skipped(id: StepId, message: impl Into<String>) -> Self {
        Self {
            id,
            status: StepStatus::Skipped,
            message: message.into(),
            changes: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn failed(id: StepId, message: impl Into<String>, errors: Vec<StepError>) -> Self {
        Self {
            id,
            status: StepStatus::Failed,
            message: message.into(),
            changes: Vec::new(),
            warnings: Vec::new(),
            errors,
        }
    }

    /// Build a report whose status follows from what happened:
    /// no errors is success, errors alongside changes is partial, errors alone is failure.
    pub fn completed(
        id: StepId,
        message: impl Into<String>,
        changes: Vec<String>,
        warnings: Vec<String>,
        errors: Vec<StepError>,
    ) -> Self {
        let status = match (errors.is_empty(), changes.is_empty()) {
            (true, _) => StepStatus::Success,
            (false, false) => StepStatus::PartialSuccess,
            (false, true) => StepStatus::Failed,
        };

        Self {
            id,
            status,
            message: message.into(),
            changes,
            warnings,
            errors,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == StepStatus::Success
    }

    pub fn ran(&self) -> bool {
        self.status != StepStatus::Skipped
    }
}
