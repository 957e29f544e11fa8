//! Partition engine configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use ipshard_partition::domain::PartitionConfigBuilder;
//!
//! let config = PartitionConfigBuilder::new()
//!     .chunk_size(1_000_000)
//!     .workers(4)
//!     .build()
//!     .expect("Valid config");
//! ```

use super::errors::PartitionError;
use super::value_objects::FailurePolicy;
use serde::Serialize;

/// Largest number of addresses handed to one worker task.
pub const DEFAULT_CHUNK_SIZE: u64 = 25_000_000;

/// Segments larger than this are hashed with the batch backend.
pub const DEFAULT_VECTORIZE_THRESHOLD: u64 = 100_000;

/// Partition engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartitionConfig {
    /// Maximum addresses per work chunk
    pub chunk_size: u64,
    /// Segment size above which hashing is batched
    pub vectorize_threshold: u64,
    /// Worker pool size
    pub workers: usize,
    /// Reaction to a failing chunk
    pub failure_policy: FailurePolicy,
    /// Sort selected addresses numerically before returning
    pub sort_output: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            vectorize_threshold: DEFAULT_VECTORIZE_THRESHOLD,
            workers: num_cpus::get().max(1),
            failure_policy: FailurePolicy::Abort,
            sort_output: false,
        }
    }
}

impl PartitionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.chunk_size == 0 {
            return Err(PartitionError::InvalidConfig(
                "chunk_size cannot be 0".to_string(),
            ));
        }

        if self.workers == 0 {
            return Err(PartitionError::InvalidConfig(
                "workers cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the chunk size
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Builder-style method to set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder-style method to set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Builder for PartitionConfig with validation
#[derive(Default)]
pub struct PartitionConfigBuilder {
    chunk_size: Option<u64>,
    vectorize_threshold: Option<u64>,
    workers: Option<usize>,
    failure_policy: Option<FailurePolicy>,
    sort_output: Option<bool>,
}

impl PartitionConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum addresses per chunk (must be > 0)
    pub fn chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Set the batch hashing threshold
    pub fn vectorize_threshold(mut self, threshold: u64) -> Self {
        self.vectorize_threshold = Some(threshold);
        self
    }

    /// Set worker pool size (must be > 0)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the failure policy
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    /// Enable or disable numeric output ordering
    pub fn sort_output(mut self, sort: bool) -> Self {
        self.sort_output = Some(sort);
        self
    }

    /// Build the PartitionConfig, validating all parameters
    pub fn build(self) -> Result<PartitionConfig, PartitionError> {
        let defaults = PartitionConfig::default();

        let config = PartitionConfig {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            vectorize_threshold: self
                .vectorize_threshold
                .unwrap_or(defaults.vectorize_threshold),
            workers: self.workers.unwrap_or(defaults.workers),
            failure_policy: self.failure_policy.unwrap_or(defaults.failure_policy),
            sort_output: self.sort_output.unwrap_or(defaults.sort_output),
        };

        config.validate()?;
        Ok(config)
    }
}
