//! Root folder and plugin file locations

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// `Descriptive.ini`, relative to the game root
const DESCRIPTIVE_SEGMENTS: [&str; 7] = [
    "plugins",
    "pacenote",
    "config",
    "pacenotes",
    "packages",
    "corners",
    "Descriptive.ini",
];

/// `strings.ini`, relative to the game root
const STRINGS_SEGMENTS: [&str; 8] = [
    "plugins",
    "Pacenote",
    "language",
    "english",
    "pacenotes",
    "packages",
    "corners",
    "strings.ini",
];

/// Invalid user input; fatal, reported before any file is touched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid drive letter")]
    InvalidDrive,

    #[error("Path does not exist: {}", .0.display())]
    MissingRoot(PathBuf),
}

/// How the user identified the game folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootInput {
    /// Drive letter plus folder, e.g. `C` and `Richard Burns Rally`
    Drive { letter: String, folder: String },

    /// A directory given as-is (hosts without drive letters)
    Path(PathBuf),
}

/// The two files the patcher edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    pub descriptive: PathBuf,
    pub strings: PathBuf,
}

/// Normalize a drive letter: exactly one ASCII letter, returned uppercase
pub fn validate_drive_letter(input: &str) -> Result<char, InputError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(InputError::InvalidDrive),
    }
}

/// Build `<DRIVE>:\<folder>`, with the folder's outer separators stripped
pub fn drive_root(drive: char, folder: &str) -> PathBuf {
    let folder = folder.trim().trim_matches(['\\', '/']);
    PathBuf::from(format!("{}:\\{}", drive, folder))
}

/// Validate the user's input and check the root folder exists
pub fn resolve_root(input: &RootInput) -> Result<PathBuf, InputError> {
    let root = match input {
        RootInput::Drive { letter, folder } => drive_root(validate_drive_letter(letter)?, folder),
        RootInput::Path(path) => path.clone(),
    };

    if !root.exists() {
        return Err(InputError::MissingRoot(root));
    }

    Ok(root)
}

/// Locate the plugin files under `root`
pub fn plugin_paths(root: &Path) -> PluginPaths {
    let descriptive = DESCRIPTIVE_SEGMENTS
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));
    let strings = STRINGS_SEGMENTS
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));

    info!("Found Descriptive.ini path: {}", descriptive.display());
    info!("Found strings.ini path: {}", strings.display());

    PluginPaths {
        descriptive,
        strings,
    }
}
