//! Patch command - rename the flat right/left calls in the Pacenote plugin
//!
//! Steps, in order:
//! 1. Collect the drive letter and folder (or a root path)
//! 2. Validate them; bail out before touching any file if invalid
//! 3. Resolve the two plugin file paths
//! 4. Edit `Descriptive.ini`
//! 5. Edit `strings.ini`
//!
//! A failure in step 4 or 5 is logged and the run carries on.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::utils;
use crate::config::{self, InputError, RootInput};
use crate::pacenote::descriptive::update_descriptive_file;
use crate::pacenote::strings::update_strings_file;
use crate::pacenote::{EditError, EditOutcome, RuleSet};

const DRIVE_PROMPT: &str = "Please enter the drive letter (e.g. C): ";
const FOLDER_PROMPT: &str = "Please enter the folder path (e.g. Richard Burns Rally): ";
const ROOT_PROMPT: &str = "Please enter the game folder path: ";

/// Options for the patch command
#[derive(Debug, Default)]
pub struct PatchOptions {
    pub drive: Option<String>,
    pub folder: Option<String>,
    pub root: Option<PathBuf>,
    pub rules_file: Option<PathBuf>,
    pub dry_run: bool,
}

/// Per-file results of a run
#[derive(Debug)]
pub struct PatchReport {
    pub descriptive: Result<EditOutcome, EditError>,
    pub strings: Result<EditOutcome, EditError>,
}

impl PatchReport {
    /// Files whose edit was abandoned
    pub fn failed_files(&self) -> Vec<&Path> {
        [&self.descriptive, &self.strings]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.path().as_path())
            .collect()
    }

    /// Lines changed across both files
    pub fn total_changes(&self) -> usize {
        [&self.descriptive, &self.strings]
            .into_iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|o| o.changes)
            .sum()
    }
}

/// Execute the patch command against stdin/stdout
///
/// The rules file is only read once the root folder has been validated.
pub fn execute(options: PatchOptions) -> Result<PatchReport> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let root_input = collect_input(&options, &mut input, &mut output)?;
    let root = config::resolve_root(&root_input)?;

    let rules = match &options.rules_file {
        Some(path) => {
            let rules = RuleSet::from_json_file(path)?;
            info!("Loaded {} rules from {}", rules.len(), path.display());
            rules
        }
        None => RuleSet::default(),
    };

    Ok(patch_root(&root, &rules, options.dry_run))
}

/// Work out how the user identified the game folder, prompting where needed
pub fn collect_input<R: BufRead, W: Write>(
    options: &PatchOptions,
    input: &mut R,
    output: &mut W,
) -> Result<RootInput> {
    if let Some(root) = &options.root {
        return Ok(RootInput::Path(root.clone()));
    }

    if cfg!(windows) || options.drive.is_some() || options.folder.is_some() {
        let letter = utils::value_or_prompt(options.drive.clone(), input, output, DRIVE_PROMPT)?;
        let folder = utils::value_or_prompt(options.folder.clone(), input, output, FOLDER_PROMPT)?;
        Ok(RootInput::Drive { letter, folder })
    } else {
        let root = utils::prompt(input, output, ROOT_PROMPT)?;
        Ok(RootInput::Path(PathBuf::from(root.trim())))
    }
}

/// Validate the root, then edit both plugin files in order
///
/// Only invalid input is an error here; per-file failures are logged and
/// returned in the report.
pub fn run(
    root_input: &RootInput,
    rules: &RuleSet,
    dry_run: bool,
) -> std::result::Result<PatchReport, InputError> {
    let root = config::resolve_root(root_input)?;
    Ok(patch_root(&root, rules, dry_run))
}

/// Edit both plugin files under an already validated root
fn patch_root(root: &Path, rules: &RuleSet, dry_run: bool) -> PatchReport {
    let paths = config::plugin_paths(root);

    let descriptive = update_descriptive_file(&paths.descriptive, rules, dry_run);
    if let Err(e) = &descriptive {
        error!("{}", e);
    }

    let strings = update_strings_file(&paths.strings, rules, dry_run);
    if let Err(e) = &strings {
        error!("{}", e);
    }

    info!("Processing completed successfully");

    PatchReport {
        descriptive,
        strings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const DESCRIPTIVE: &str = "\
[PACENOTE::FLATLEFT]
id=7
column=0
Snd0=flat_left.wav
Snd1=empty.wav
Snd2=empty.wav
Snd3=empty.wav
[PACENOTE::FLATRIGHT]
id=8
column=0
Snd0=empty.wav
Snd1=flat_right.wav
Snd2=empty.wav
Snd3=empty.wav
";

    const STRINGS: &str = "FLATRIGHT=Flat Right\nFLATLEFT=Flat Left\n";

    fn game_dir(descriptive: Option<&str>, strings: Option<&str>) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let paths = config::plugin_paths(dir.path());
        for (path, content) in [(&paths.descriptive, descriptive), (&paths.strings, strings)] {
            if let Some(content) = content {
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
        }
        dir
    }

    #[test]
    fn test_run_patches_both_files() {
        let dir = game_dir(Some(DESCRIPTIVE), Some(STRINGS));
        let report = run(
            &RootInput::Path(dir.path().to_path_buf()),
            &RuleSet::default(),
            false,
        )
        .unwrap();

        assert_eq!(report.total_changes(), 4);
        assert!(report.failed_files().is_empty());

        let paths = config::plugin_paths(dir.path());
        let descriptive = fs::read_to_string(&paths.descriptive).unwrap();
        assert!(descriptive.contains("Snd0=max_left.wav"));
        assert!(descriptive.contains("Snd1=max_right.wav"));
        assert_eq!(descriptive.lines().count(), DESCRIPTIVE.lines().count());
        assert_eq!(
            fs::read_to_string(&paths.strings).unwrap(),
            "FLATRIGHT=Max Right\nFLATLEFT=Max Left\n"
        );
    }

    #[test]
    fn test_run_twice_makes_no_further_changes() {
        let dir = game_dir(Some(DESCRIPTIVE), Some(STRINGS));
        let root = RootInput::Path(dir.path().to_path_buf());
        run(&root, &RuleSet::default(), false).unwrap();

        let second = run(&root, &RuleSet::default(), false).unwrap();
        assert_eq!(second.total_changes(), 0);
    }

    #[test]
    fn test_missing_descriptive_does_not_stop_strings() {
        let dir = game_dir(None, Some(STRINGS));
        let report = run(
            &RootInput::Path(dir.path().to_path_buf()),
            &RuleSet::default(),
            false,
        )
        .unwrap();

        assert!(matches!(report.descriptive, Err(EditError::NotFound { .. })));
        assert_eq!(report.strings.as_ref().unwrap().changes, 2);
        assert_eq!(report.failed_files().len(), 1);
    }

    #[test]
    fn test_missing_root_touches_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("Richard Burns Rally");
        let err = run(
            &RootInput::Path(missing.clone()),
            &RuleSet::default(),
            false,
        )
        .unwrap_err();

        assert_eq!(err, InputError::MissingRoot(missing.clone()));
        assert!(!missing.exists());
    }

    #[test]
    fn test_invalid_drive_rejected() {
        for letter in ["12", ""] {
            let input = RootInput::Drive {
                letter: letter.to_string(),
                folder: "Richard Burns Rally".to_string(),
            };
            let err = run(&input, &RuleSet::default(), false).unwrap_err();
            assert_eq!(err, InputError::InvalidDrive);
        }
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = game_dir(Some(DESCRIPTIVE), Some(STRINGS));
        let report = run(
            &RootInput::Path(dir.path().to_path_buf()),
            &RuleSet::default(),
            true,
        )
        .unwrap();

        assert_eq!(report.total_changes(), 4);
        let paths = config::plugin_paths(dir.path());
        assert_eq!(fs::read_to_string(&paths.descriptive).unwrap(), DESCRIPTIVE);
        assert_eq!(fs::read_to_string(&paths.strings).unwrap(), STRINGS);
    }

    #[test]
    fn test_execute_checks_root_before_rules_file() {
        let dir = tempdir().unwrap();
        let options = PatchOptions {
            root: Some(dir.path().join("missing-root")),
            rules_file: Some(dir.path().join("missing-rules.json")),
            ..Default::default()
        };

        let err = execute(options).unwrap_err();
        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::MissingRoot(dir.path().join("missing-root")))
        );
    }

    #[test]
    fn test_execute_with_rules_file() {
        let dir = game_dir(Some(DESCRIPTIVE), Some("FLATLEFT=Flat Left\n"));
        let rules_path = dir.path().join("rules.json");
        fs::write(
            &rules_path,
            r#"{"rules": [{"tag": "FLATLEFT", "old": "flat_left", "new": "sharp_left", "display": "Sharp Left"}]}"#,
        )
        .unwrap();

        let options = PatchOptions {
            root: Some(dir.path().to_path_buf()),
            rules_file: Some(rules_path),
            ..Default::default()
        };
        let report = execute(options).unwrap();
        assert_eq!(report.total_changes(), 2);

        let paths = config::plugin_paths(dir.path());
        let descriptive = fs::read_to_string(&paths.descriptive).unwrap();
        assert!(descriptive.contains("Snd0=sharp_left.wav"));
        assert!(descriptive.contains("Snd1=flat_right.wav"));
        assert_eq!(
            fs::read_to_string(&paths.strings).unwrap(),
            "FLATLEFT=Sharp Left\n"
        );
    }

    #[test]
    fn test_collect_input_root_flag() {
        let options = PatchOptions {
            root: Some(PathBuf::from("/games/rbr")),
            ..Default::default()
        };
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let root = collect_input(&options, &mut input, &mut output).unwrap();
        assert_eq!(root, RootInput::Path(PathBuf::from("/games/rbr")));
        assert!(output.is_empty());
    }

    #[test]
    fn test_collect_input_prompts_for_folder() {
        let options = PatchOptions {
            drive: Some("c".to_string()),
            ..Default::default()
        };
        let mut input = Cursor::new("Richard Burns Rally\n");
        let mut output = Vec::new();
        let root = collect_input(&options, &mut input, &mut output).unwrap();
        assert_eq!(
            root,
            RootInput::Drive {
                letter: "c".to_string(),
                folder: "Richard Burns Rally".to_string(),
            }
        );
        assert!(String::from_utf8(output).unwrap().contains("folder path"));
    }
}
