//! `strings.ini` editor
//!
//! Rewrites `<TAG>=<anything>` entries to `<TAG>=<display label>`.

use std::path::Path;
use tracing::{info, warn};

use super::document::{split_terminator, TextDocument};
use super::error::EditError;
use super::rules::RuleSet;
use super::EditOutcome;

/// Result of the in-memory pass over `strings.ini`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StringsScan {
    pub changes: usize,

    /// Tags with no `<TAG>=` line anywhere in the document
    pub missing: Vec<String>,
}

/// Rewrite every matching entry in memory
pub fn apply_strings(doc: &mut TextDocument, rules: &RuleSet) -> StringsScan {
    let mut changes = 0;
    let mut found = vec![false; rules.len()];

    for i in 0..doc.len() {
        // Markers are tested against the line as read, not as rewritten by an earlier rule
        let Some(original) = doc.line(i).map(str::to_string) else {
            continue;
        };

        for (rule_idx, rule) in rules.iter().enumerate() {
            if !original.contains(&rule.key_marker()) {
                continue;
            }

            let current = doc.line(i).unwrap_or(original.as_str());
            let (content, terminator) = split_terminator(current);
            let canonical = rule.canonical_entry();
            if content != canonical {
                let terminator = if terminator.is_empty() { "\n" } else { terminator };
                let new_line = format!("{canonical}{terminator}");
                info!(
                    "Line {}: '{}' -> '{}'",
                    i + 1,
                    original.trim(),
                    new_line.trim()
                );
                doc.set_line(i, new_line);
                changes += 1;
            }
            found[rule_idx] = true;
        }
    }

    let missing: Vec<String> = rules
        .iter()
        .zip(&found)
        .filter(|(_, was_found)| !**was_found)
        .map(|(rule, _)| rule.tag.clone())
        .collect();

    for tag in &missing {
        warn!("Could not find {} in strings.ini", tag);
    }

    StringsScan { changes, missing }
}

/// Edit `strings.ini` on disk
///
/// Missing entries only produce warnings; the file is still written with
/// whatever changes were made.
pub fn update_strings_file(
    path: &Path,
    rules: &RuleSet,
    dry_run: bool,
) -> Result<EditOutcome, EditError> {
    let mut doc = TextDocument::read(path)?;
    info!("Successfully opened {}", path.display());

    let scan = apply_strings(&mut doc, rules);

    if dry_run {
        info!(
            "[DRY-RUN] Would update {} with {} changes",
            path.display(),
            scan.changes
        );
    } else {
        doc.write(path)?;
        info!(
            "Successfully updated {} with {} changes",
            path.display(),
            scan.changes
        );
    }

    Ok(EditOutcome {
        path: path.to_path_buf(),
        changes: scan.changes,
        written: !dry_run,
        missing: scan.missing,
    })
}
