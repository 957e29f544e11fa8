//! # Service Layer
//!
//! The partition engine: decomposition, parallel chunk execution and
//! aggregation.

pub mod partition_engine;

pub use partition_engine::{PartitionEngine, MAX_BATCH_LEN};
