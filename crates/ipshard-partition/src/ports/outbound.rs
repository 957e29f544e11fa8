//! # Outbound Ports
//!
//! Traits for the collaborators around the engine: where entries come from
//! and where selected items go.

use crate::domain::PartitionError;
use std::io;
use std::path::PathBuf;

/// Source of raw entry lines - outbound port.
pub trait EntrySource: Send + Sync {
    /// Path used in error reports.
    fn location(&self) -> PathBuf;

    /// Every raw line, unfiltered.
    fn read_lines(&self) -> io::Result<Vec<String>>;
}

/// Consumer of selected items - outbound port.
pub trait ResultSink {
    /// Write one item.
    fn write_item(&mut self, item: &str) -> Result<(), PartitionError>;

    /// Flush buffered output.
    fn finish(&mut self) -> Result<(), PartitionError>;

    /// Write every item, then flush.
    fn emit_all(&mut self, items: &[String]) -> Result<(), PartitionError> {
        for item in items {
            self.write_item(item)?;
        }
        self.finish()
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory entry source for testing.
#[derive(Clone, Debug, Default)]
pub struct MockSource {
    /// Lines to return.
    pub lines: Vec<String>,
    /// Fail every read when set.
    pub unreadable: bool,
}

impl MockSource {
    /// Source yielding `lines`.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            unreadable: false,
        }
    }

    /// Source whose reads always fail.
    pub fn unreadable() -> Self {
        Self {
            lines: Vec::new(),
            unreadable: true,
        }
    }
}

impl EntrySource for MockSource {
    fn location(&self) -> PathBuf {
        PathBuf::from("<mock>")
    }

    fn read_lines(&self) -> io::Result<Vec<String>> {
        if self.unreadable {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mock denied"));
        }
        Ok(self.lines.clone())
    }
}

/// Sink collecting items in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    /// Items written so far.
    pub items: Vec<String>,
    /// Whether `finish` was called.
    pub finished: bool,
}

impl ResultSink for MemorySink {
    fn write_item(&mut self, item: &str) -> Result<(), PartitionError> {
        self.items.push(item.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), PartitionError> {
        self.finished = true;
        Ok(())
    }
}
