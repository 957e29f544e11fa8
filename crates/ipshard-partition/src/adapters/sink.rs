//! # Result Sink Adapters
//!
//! Selected items are written one per line, either to stdout or to a
//! `.txt` results file.

use crate::domain::PartitionError;
use crate::ports::ResultSink;
use std::fs::{self, File};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

/// Only extension accepted for results files.
pub const RESULTS_EXTENSION: &str = "txt";

/// Apply the results-file naming rule.
///
/// No extension gets `.txt` appended; `.txt` is kept; anything else is
/// rejected.
pub fn resolve_output_path(path: &Path) -> Result<PathBuf, PartitionError> {
    match path.extension() {
        None => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(RESULTS_EXTENSION);
            Ok(PathBuf::from(name))
        }
        Some(ext) if ext.eq_ignore_ascii_case(RESULTS_EXTENSION) => Ok(path.to_path_buf()),
        Some(ext) => Err(PartitionError::InvalidOutputExtension(
            ext.to_string_lossy().into_owned(),
        )),
    }
}

/// Validate the results path and create its parent directories.
///
/// The file itself is not created, so a run that fails later leaves
/// nothing behind.
pub fn prepare_output_path(path: &Path) -> Result<PathBuf, PartitionError> {
    let path = resolve_output_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PartitionError::OutputUnavailable {
            path: path.clone(),
            source,
        })?;
    }
    Ok(path)
}

/// Writes items to standard output.
#[derive(Debug)]
pub struct StdoutSink {
    out: BufWriter<Stdout>,
}

impl StdoutSink {
    /// Buffered stdout sink.
    pub fn new() -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for StdoutSink {
    fn write_item(&mut self, item: &str) -> Result<(), PartitionError> {
        writeln!(self.out, "{item}").map_err(PartitionError::OutputWrite)
    }

    fn finish(&mut self) -> Result<(), PartitionError> {
        self.out.flush().map_err(PartitionError::OutputWrite)
    }
}

/// Writes items to a results file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    out: BufWriter<File>,
}

impl FileSink {
    /// Validate the path, create parent directories and open the file.
    pub fn create(path: &Path) -> Result<Self, PartitionError> {
        let path = prepare_output_path(path)?;
        let file = File::create(&path).map_err(|source| PartitionError::OutputUnavailable {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    /// Final path, after extension normalization.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileSink {
    fn write_item(&mut self, item: &str) -> Result<(), PartitionError> {
        writeln!(self.out, "{item}").map_err(PartitionError::OutputWrite)
    }

    fn finish(&mut self) -> Result<(), PartitionError> {
        self.out.flush().map_err(PartitionError::OutputWrite)
    }
}
