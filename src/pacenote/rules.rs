//! Replacement rule table
//!
//! Each rule ties a pacenote section tag (e.g. `FLATRIGHT`) to the sound token
//! that gets renamed in `Descriptive.ini` and the label written to `strings.ini`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::error::RuleError;

/// A single tag -> token/label substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// Section tag, as in `[PACENOTE::<tag>]` and `<tag>=`
    pub tag: String,

    /// Token replaced in the descriptive file
    pub old: String,

    /// Token written in its place
    pub new: String,

    /// Label written to the strings file
    pub display: String,
}

impl ReplacementRule {
    pub fn new(tag: &str, old: &str, new: &str, display: &str) -> Self {
        Self {
            tag: tag.to_string(),
            old: old.to_string(),
            new: new.to_string(),
            display: display.to_string(),
        }
    }

    /// Header marker searched for in `Descriptive.ini`
    pub fn header_marker(&self) -> String {
        format!("[PACENOTE::{}]", self.tag)
    }

    /// Key prefix searched for in `strings.ini`
    pub fn key_marker(&self) -> String {
        format!("{}=", self.tag)
    }

    /// Canonical `strings.ini` line, without terminator
    pub fn canonical_entry(&self) -> String {
        format!("{}={}", self.tag, self.display)
    }
}

/// Validated, ordered set of rules; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

#[derive(Deserialize)]
struct RulesFile {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    /// Build a rule set, enforcing unique tags and distinct non-empty tokens
    pub fn new(rules: Vec<ReplacementRule>) -> std::result::Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut seen = HashSet::new();
        for rule in &rules {
            for (field, value) in [
                ("tag", &rule.tag),
                ("old", &rule.old),
                ("new", &rule.new),
                ("display", &rule.display),
            ] {
                if value.is_empty() {
                    return Err(RuleError::EmptyField {
                        tag: rule.tag.clone(),
                        field,
                    });
                }
            }
            if rule.old == rule.new {
                return Err(RuleError::SameTokens(rule.tag.clone()));
            }
            if !seen.insert(rule.tag.as_str()) {
                return Err(RuleError::DuplicateTag(rule.tag.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// Load a rule set from a JSON file of the form `{"rules": [...]}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
        let file: RulesFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse rules file: {}", path.display()))?;
        Self::new(file.rules).with_context(|| format!("Invalid rules in {}", path.display()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplacementRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    /// The flat right/left -> max right/left renames
    fn default() -> Self {
        Self {
            rules: vec![
                ReplacementRule::new("FLATRIGHT", "flat_right", "max_right", "Max Right"),
                ReplacementRule::new("FLATLEFT", "flat_left", "max_left", "Max Left"),
            ],
        }
    }
}
