//! # Domain Errors
//!
//! Error types for the partition subsystem.
//!
//! Malformed entries are never errors: they degrade to string entries while
//! parsing. Everything here is either a pre-flight rejection (bad shard
//! descriptor, unreadable source, bad output path) or an execution failure.

use std::path::PathBuf;
use thiserror::Error;

/// Partition error types.
#[derive(Debug, Error)]
pub enum PartitionError {
    /// Shard descriptor is not of the form `X/Y` with integer parts.
    #[error("Invalid shard descriptor: {0:?} (expected X/Y)")]
    InvalidShardDescriptor(String),

    /// Shard index or total outside `1 <= X <= Y`.
    #[error("Shard {index}/{total} out of range (need 1 <= X <= Y)")]
    ShardOutOfRange {
        /// Requested 1-based index
        index: u32,
        /// Total shard count
        total: u32,
    },

    /// The input source could not be read.
    #[error("Cannot read input source {path:?}: {source}")]
    InputSourceUnreadable {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The exclude source could not be read.
    #[error("Cannot read exclude source {path:?}: {source}")]
    ExcludeSourceUnreadable {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Results file has an extension other than `.txt`.
    #[error("Invalid results file extension: {0:?} (only .txt is supported)")]
    InvalidOutputExtension(String),

    /// Results destination could not be created.
    #[error("Cannot create results destination {path:?}: {source}")]
    OutputUnavailable {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing a result item failed.
    #[error("Failed to write results: {0}")]
    OutputWrite(#[source] std::io::Error),

    /// A worker failed while processing a chunk.
    #[error("Worker failed on chunk {chunk}: {reason}")]
    WorkerFailure {
        /// Chunk identifier
        chunk: usize,
        /// Failure description
        reason: String,
    },

    /// Engine configuration is unusable.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Invalid run state transition.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: String,
        /// Attempted state
        to: String,
    },

    /// A domain invariant was violated.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl PartitionError {
    /// Whether this error is detected before any chunk is executed.
    pub fn is_fatal_preflight(&self) -> bool {
        matches!(
            self,
            Self::InvalidShardDescriptor(_)
                | Self::ShardOutOfRange { .. }
                | Self::InputSourceUnreadable { .. }
                | Self::ExcludeSourceUnreadable { .. }
                | Self::InvalidOutputExtension(_)
                | Self::OutputUnavailable { .. }
                | Self::InvalidConfig(_)
        )
    }
}
