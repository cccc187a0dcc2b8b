//! Whole-file line buffer
//!
//! A document is read in one go, edited line by line in memory and written back
//! in one go. Every line keeps its own terminator so untouched lines round-trip
//! byte for byte.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::error::EditError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    /// Split text into lines, each keeping its `\n` / `\r\n` terminator
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    /// Read a whole file
    pub fn read(path: &Path) -> Result<Self, EditError> {
        let text = fs::read_to_string(path).map_err(|e| EditError::from_io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Replace the file at `path` with this document
    ///
    /// The content goes to a temporary file next to the target which is then
    /// renamed over it, so the target is either fully old or fully new.
    pub fn write(&self, path: &Path) -> Result<(), EditError> {
        write_atomic(path, self.to_text().as_bytes()).map_err(|e| EditError::from_io(path, e))
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Overwrite one line; out-of-range indices are ignored
    pub fn set_line(&mut self, index: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// Split a line into its content and its terminator (`"\r\n"`, `"\n"` or `""`)
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let permissions = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    if let Some(permissions) = permissions {
        fs::set_permissions(tmp.path(), permissions)?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
