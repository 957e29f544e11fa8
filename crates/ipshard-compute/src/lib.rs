//! # ipshard-compute: Shard Hashing and Batch Compute
//!
//! This crate owns the hash functions that decide shard membership and a
//! small compute layer for hashing large address runs in one batched call.
//!
//! ## Backends
//!
//! 1. **CPU/Rayon** - always available, splits a batch across cores
//!
//! Batch hashing is purely a throughput optimization. Every backend must
//! return exactly what [`hash::hash_ip`] returns for each address.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ipshard_compute::auto_detect;
//!
//! let engine = auto_detect()?;
//! let hashes = engine.batch_hash_ip(0x0A00_0000, 0x0A00_00FF, 1)?;
//! assert_eq!(hashes.len(), 256);
//! ```

pub mod backends;
pub mod hash;

pub use hash::{belongs_to_shard, hash_ip, hash_string, shard_of, HASH_MASK};

use std::sync::Arc;
use thiserror::Error;

/// Compute backend capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CPU with Rayon parallelism
    Cpu,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Cpu => write!(f, "CPU (Rayon)"),
        }
    }
}

/// Compute engine errors
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("No compute backend available")]
    NoBackendAvailable,

    #[error("Compute task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Device information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend: Backend,
    pub compute_units: u32,
}

/// Compute engine trait - implemented by all backends
pub trait ComputeEngine: Send + Sync {
    /// Get backend type
    fn backend(&self) -> Backend;

    /// Get device info
    fn device_info(&self) -> &DeviceInfo;

    /// Hash every address in the inclusive run `start..=end`.
    ///
    /// The returned vector is index-aligned with the run: element `i` is the
    /// hash of `start + i`.
    fn batch_hash_ip(&self, start: u32, end: u32, seed: u32) -> Result<Vec<u32>, ComputeError>;
}

/// Auto-detect and create the best available compute engine
pub fn auto_detect() -> Result<Arc<dyn ComputeEngine>, ComputeError> {
    #[cfg(feature = "cpu")]
    {
        let engine = backends::cpu::CpuEngine::new();
        tracing::debug!(
            "Using CPU compute: {} cores (Rayon)",
            engine.device_info().compute_units
        );
        Ok(Arc::new(engine))
    }

    #[cfg(not(feature = "cpu"))]
    {
        Err(ComputeError::NoBackendAvailable)
    }
}

/// Create a specific backend
pub fn create_backend(backend: Backend) -> Result<Arc<dyn ComputeEngine>, ComputeError> {
    match backend {
        Backend::Cpu => {
            #[cfg(feature = "cpu")]
            {
                Ok(Arc::new(backends::cpu::CpuEngine::new()))
            }
            #[cfg(not(feature = "cpu"))]
            {
                Err(ComputeError::NoBackendAvailable)
            }
        }
    }
}
