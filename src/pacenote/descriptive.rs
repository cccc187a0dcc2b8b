//! `Descriptive.ini` editor
//!
//! Each corner call in this file is a block like:
//!
//! ```text
//! [PACENOTE::FLATRIGHT]
//! id=...
//! column=...
//! Snd0=flat_right.wav
//! Snd1=...
//! Snd2=...
//! Snd3=...
//! ```
//!
//! The four sound lines start three lines after the header. Only those lines are
//! touched, and only where they mention the rule's old token.

use std::path::Path;
use tracing::{info, warn};

use super::document::TextDocument;
use super::error::EditError;
use super::rules::RuleSet;
use super::EditOutcome;

/// Lines between a section header and its first sound line, plus one
pub const WINDOW_OFFSET: usize = 3;

/// Sound lines per section
pub const WINDOW_LEN: usize = 4;

/// Rewrite the sound lines of every matching section in memory
///
/// Returns the number of lines changed.
pub fn apply_descriptive(doc: &mut TextDocument, rules: &RuleSet) -> usize {
    let mut changes = 0;

    for i in 0..doc.len() {
        for rule in rules.iter() {
            let matched = doc
                .line(i)
                .is_some_and(|line| line.contains(&rule.header_marker()));
            if !matched {
                continue;
            }
            info!("Found section {} at line {}", rule.tag, i + 1);

            let start = i + WINDOW_OFFSET;
            let end = start + WINDOW_LEN;
            if end > doc.len() {
                warn!(
                    "Section {} at line {} is cut short by end of file ({} of {} sound lines present)",
                    rule.tag,
                    i + 1,
                    doc.len().saturating_sub(start).min(WINDOW_LEN),
                    WINDOW_LEN
                );
            }

            for index in start..end.min(doc.len()) {
                let Some(line) = doc.line(index) else {
                    continue;
                };
                if line.trim_start().starts_with('[') {
                    warn!(
                        "Line {} inside section {} looks like another section header; layout may differ from expected",
                        index + 1,
                        rule.tag
                    );
                }
                if !line.contains(&rule.old) {
                    continue;
                }

                let old_line = line.to_string();
                let new_line = old_line.replace(&rule.old, &rule.new);
                info!(
                    "Line {}: '{}' -> '{}'",
                    index + 1,
                    old_line.trim(),
                    new_line.trim()
                );
                doc.set_line(index, new_line);
                changes += 1;
            }
        }
    }

    changes
}

/// Edit `Descriptive.ini` on disk
///
/// The file is read once, edited in memory and, unless `dry_run` is set,
/// written back once.
pub fn update_descriptive_file(
    path: &Path,
    rules: &RuleSet,
    dry_run: bool,
) -> Result<EditOutcome, EditError> {
    let mut doc = TextDocument::read(path)?;
    info!("Successfully opened {}", path.display());

    let changes = apply_descriptive(&mut doc, rules);

    if dry_run {
        info!(
            "[DRY-RUN] Would update {} with {} changes",
            path.display(),
            changes
        );
    } else {
        doc.write(path)?;
        info!(
            "Successfully updated {} with {} changes",
            path.display(),
            changes
        );
    }

    Ok(EditOutcome {
        path: path.to_path_buf(),
        changes,
        written: !dry_run,
        missing: Vec::new(),
    })
}
