//! # Domain Entities
//!
//! Containers produced and consumed by a partition run.

use super::value_objects::{AddressRange, WorkChunk};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Classified input, both sequences in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedEntries {
    /// Address ranges (single addresses, CIDR blocks, explicit ranges).
    pub ranges: Vec<AddressRange>,
    /// Normalized string entries.
    pub strings: Vec<String>,
}

impl ParsedEntries {
    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.ranges.len() + self.strings.len()
    }

    /// True when nothing was parsed.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.strings.is_empty()
    }

    /// Number of addresses covered by all ranges (overlaps counted twice).
    pub fn address_count(&self) -> u64 {
        self.ranges.iter().map(AddressRange::size).sum()
    }
}

/// Sorted, pairwise disjoint, non-adjacent exclusion ranges.
///
/// Only obtainable through the exclusion builder, which merges its input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ranges: Vec<AddressRange>,
}

impl ExclusionSet {
    /// Set excluding nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap ranges that are already merged.
    pub(crate) fn from_merged(ranges: Vec<AddressRange>) -> Self {
        Self { ranges }
    }

    /// Merged ranges in ascending order.
    pub fn as_slice(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Number of merged ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True when nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of distinct excluded addresses.
    pub fn address_count(&self) -> u64 {
        self.ranges.iter().map(AddressRange::size).sum()
    }
}

/// Output of one chunk task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
    /// Addresses in the chunk.
    pub processed: u64,
    /// Addresses removed by the exclusion set.
    pub excluded: u64,
    /// Selected addresses in dotted-decimal form, ascending.
    pub selected: Vec<String>,
}

impl ChunkOutcome {
    /// Outcome for a chunk the exclusion set swallows entirely.
    pub fn fully_excluded(size: u64) -> Self {
        Self {
            processed: size,
            excluded: size,
            selected: Vec::new(),
        }
    }
}

/// A chunk that failed under [`super::FailurePolicy::Isolate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedChunk {
    /// The chunk that failed.
    pub chunk: WorkChunk,
    /// Failure description.
    pub reason: String,
}

/// Aggregated result of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionResult {
    /// Items examined (addresses plus string entries).
    pub processed: u64,
    /// Addresses removed by the exclusion set.
    pub excluded: u64,
    /// Items owned by the target shard.
    pub selected: Vec<String>,
    /// Chunks skipped after failing (isolating policy only).
    pub failed_chunks: Vec<FailedChunk>,
}

impl PartitionResult {
    /// Fold one chunk outcome into the running totals.
    pub fn absorb(&mut self, outcome: ChunkOutcome) {
        self.processed += outcome.processed;
        self.excluded += outcome.excluded;
        self.selected.extend(outcome.selected);
    }

    /// True when every chunk completed.
    pub fn is_complete(&self) -> bool {
        self.failed_chunks.is_empty()
    }
}

/// Human/JSON summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    /// Shard descriptor, `X/Y`.
    pub shard: String,
    /// Items examined.
    pub processed: u64,
    /// Addresses excluded.
    pub excluded: u64,
    /// Items selected.
    pub selected: u64,
    /// Chunks skipped after failure.
    pub failed_chunks: usize,
    /// Wall time in milliseconds.
    pub elapsed_ms: u64,
}

impl PartitionSummary {
    /// Summarize a result.
    pub fn new(shard: impl fmt::Display, result: &PartitionResult, elapsed: Duration) -> Self {
        Self {
            shard: shard.to_string(),
            processed: result.processed,
            excluded: result.excluded,
            selected: result.selected.len() as u64,
            failed_chunks: result.failed_chunks.len(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl fmt::Display for PartitionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shard {}: processed {} items, excluded {}, selected {} in {:.3}s",
            self.shard,
            self.processed,
            self.excluded,
            self.selected,
            self.elapsed_ms as f64 / 1000.0
        )?;
        if self.failed_chunks > 0 {
            write!(f, " ({} chunks failed)", self.failed_chunks)?;
        }
        Ok(())
    }
}
