//! Pacenote plugin file editors

pub mod descriptive;
pub mod document;
pub mod error;
pub mod rules;
pub mod strings;

use std::path::PathBuf;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use document::TextDocument;
#[allow(unused_imports)]
pub use error::{EditError, RuleError};
#[allow(unused_imports)]
pub use rules::{ReplacementRule, RuleSet};

/// What a successful file edit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// File that was edited
    pub path: PathBuf,

    /// Number of lines changed
    pub changes: usize,

    /// Whether the file was written back (false in dry-run mode)
    pub written: bool,

    /// Tags of rules that never matched (strings file only)
    pub missing: Vec<String>,
}
