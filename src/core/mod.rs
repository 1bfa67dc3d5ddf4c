// Public modules
pub mod cleanup;
pub mod defaults;
pub mod error;
pub mod git;
pub mod hooks;
pub mod output;
pub mod refactor;
pub mod scaffold;
pub mod setup;
pub mod theme_info;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{StepError, StepId, StepReport, StepStatus};
