//! Error types for rule tables and per-file edits

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single file edit was abandoned
///
/// None of these stop the run: the driver logs them and moves on to the next file.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Could not find file: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error processing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error processing {}: file is not valid UTF-8 text", .path.display())]
    Decode { path: PathBuf },
}

impl EditError {
    /// Classify an I/O error raised while working on `path`
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::InvalidData => Self::Decode { path },
            _ => Self::Io { path, source },
        }
    }

    /// The file this error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::Decode { path } => path,
        }
    }
}

/// A rule table that breaks one of its invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule set is empty")]
    Empty,

    #[error("duplicate section tag: {0}")]
    DuplicateTag(String),

    #[error("rule {tag}: {field} must not be empty")]
    EmptyField { tag: String, field: &'static str },

    #[error("rule {0}: old and new tokens are identical")]
    SameTokens(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = EditError::from_io("a.ini", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, EditError::NotFound { .. }));
        assert_eq!(err.to_string(), "Could not find file: a.ini");
    }

    #[test]
    fn test_from_io_invalid_data_is_decode() {
        let err = EditError::from_io("a.ini", io::Error::from(io::ErrorKind::InvalidData));
        assert!(matches!(err, EditError::Decode { .. }));
    }

    #[test]
    fn test_from_io_other() {
        let err = EditError::from_io(
            "a.ini",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, EditError::Io { .. }));
        assert_eq!(err.to_string(), "Error processing a.ini: denied");
        assert_eq!(err.path(), &PathBuf::from("a.ini"));
    }
}
