//! Placeholder renaming: swap the scaffold's theme identity across a codebase.
//!
//! Walks project files, substitutes every case variant of the placeholder name
//! in file contents, then renames files and directories whose names carry one.

mod rename;
mod substitute;
mod walk;

pub use rename::{
    apply_renames, plan_renames, renamed_basename, AppliedRename, FileRename, RenameKind,
    RenamePlan, RenameReport, RenameWarning,
};
pub use substitute::{
    substitute_file, substitute_files, FileEdit, Substitution, SubstitutionMap,
    SubstitutionReport,
};
pub use walk::{walk_files, FileSet};
