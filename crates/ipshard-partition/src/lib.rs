//! # ipshard-partition
//!
//! Deterministic partitioning of IPv4 ranges and string entries into Y
//! disjoint shards.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Given input ranges (up to the whole IPv4 space), string entries, an
//! exclusion list and a shard `X/Y`, emit exactly the items shard X owns:
//! - Interval subtraction removes excluded addresses without enumerating them
//! - FNV-1a (addresses) and SHA-256 (strings) hashing decides ownership
//! - Ranges are split into bounded chunks processed on a worker pool
//!
//! Independently launched shards agree on ownership without coordinating:
//! the union of all Y outputs is the non-excluded universe and no two
//! outputs intersect.
//!
//! ## Module Structure
//!
//! ```text
//! ipshard-partition/
//! ├── domain/          # AddressRange, ShardSpec, ExclusionSet, results, config
//! ├── algorithms/      # Entry parser, exclusion merge, subtraction, decomposition
//! ├── service/         # PartitionEngine
//! ├── ports/           # PartitionApi + EntrySource/ResultSink traits
//! └── adapters/        # File/literal sources, stdout/file sinks
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{prepare_output_path, resolve_output_path, FileSink, SourceSpec, StdoutSink};
pub use algorithms::{
    build_exclusions, classify, decompose, excluded_count, exclusions_from_ranges, ipv4_to_u32,
    is_fully_excluded, merge, parse_entries, subtract, u32_to_ipv4,
};
pub use domain::{
    AddressRange, ChunkOutcome, Entry, ExclusionSet, FailedChunk, FailurePolicy, ParsedEntries,
    PartitionConfig, PartitionConfigBuilder, PartitionError, PartitionResult, PartitionSummary,
    RunState, ShardSpec, WorkChunk, DEFAULT_CHUNK_SIZE, DEFAULT_VECTORIZE_THRESHOLD,
};
pub use ports::{EntrySource, MemorySink, MockSource, PartitionApi, ResultSink};
pub use service::PartitionEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
