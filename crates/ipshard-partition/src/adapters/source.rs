//! # Entry Source Adapters
//!
//! An input argument is either a path to a newline-delimited file or a
//! single literal (CIDR, address, range, domain).

use crate::algorithms::classify;
use crate::domain::Entry;
use crate::ports::EntrySource;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resolved input argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    /// Newline-delimited file.
    File(PathBuf),
    /// One literal entry.
    Literal(String),
}

impl SourceSpec {
    /// Treat `arg` as a file when such a file exists, otherwise as a literal.
    pub fn resolve(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            Self::File(path.to_path_buf())
        } else {
            Self::Literal(arg.to_string())
        }
    }

    /// Resolve an exclude argument.
    ///
    /// Only address literals can exclude anything, so any argument that is
    /// not one is taken as a file path. A missing or unreadable file then
    /// fails the run instead of silently excluding nothing.
    pub fn resolve_exclude(arg: &str) -> Self {
        let path = Path::new(arg);
        if path.is_file() {
            return Self::File(path.to_path_buf());
        }
        match classify(arg) {
            Entry::Range(_) => Self::Literal(arg.to_string()),
            Entry::Text(_) => Self::File(path.to_path_buf()),
        }
    }

    /// Explicit file source, whether or not it exists yet.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl EntrySource for SourceSpec {
    fn location(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Literal(text) => PathBuf::from(text),
        }
    }

    fn read_lines(&self) -> io::Result<Vec<String>> {
        match self {
            Self::File(path) => {
                let content = fs::read_to_string(path)?;
                Ok(content.lines().map(str::to_string).collect())
            }
            Self::Literal(text) => Ok(vec![text.clone()]),
        }
    }
}
