//! # Domain Invariants
//!
//! Rules that must always hold for a partition run.

use super::errors::PartitionError;
use super::value_objects::{AddressRange, WorkChunk};
use std::collections::HashSet;

/// Invariant: exclusion ranges are sorted, disjoint and non-adjacent.
pub fn invariant_exclusions_normalized(ranges: &[AddressRange]) -> Result<(), PartitionError> {
    for pair in ranges.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        // Gap of at least one address between consecutive ranges.
        if u64::from(next.start()) <= u64::from(prev.end()) + 1 {
            return Err(PartitionError::InvariantViolation(format!(
                "exclusion ranges {} and {} overlap or touch",
                prev, next
            )));
        }
    }
    Ok(())
}

/// Invariant: chunks exactly partition the source ranges.
///
/// Chunks must appear in source order, each no larger than `chunk_size`,
/// contiguous within one source range and never straddling two.
pub fn invariant_chunks_partition(
    sources: &[AddressRange],
    chunks: &[WorkChunk],
    chunk_size: u64,
) -> Result<(), PartitionError> {
    let mut chunks = chunks.iter().peekable();

    for source in sources {
        let mut expected_start = u64::from(source.start());

        while expected_start <= u64::from(source.end()) {
            let chunk = chunks.next().ok_or_else(|| {
                PartitionError::InvariantViolation(format!("no chunk covers part of {}", source))
            })?;

            if u64::from(chunk.range.start()) != expected_start
                || !source.contains_range(&chunk.range)
            {
                return Err(PartitionError::InvariantViolation(format!(
                    "chunk {} ({}) does not continue {}",
                    chunk.id, chunk.range, source
                )));
            }
            if chunk.size() > chunk_size {
                return Err(PartitionError::InvariantViolation(format!(
                    "chunk {} holds {} addresses, limit is {}",
                    chunk.id,
                    chunk.size(),
                    chunk_size
                )));
            }

            expected_start = u64::from(chunk.range.end()) + 1;
        }
    }

    match chunks.peek() {
        Some(extra) => Err(PartitionError::InvariantViolation(format!(
            "chunk {} ({}) covers no source range",
            extra.id, extra.range
        ))),
        None => Ok(()),
    }
}

/// Invariant: shard selections never share an item.
pub fn invariant_shards_disjoint(selections: &[Vec<String>]) -> Result<(), PartitionError> {
    let mut seen = HashSet::new();
    for (shard, items) in selections.iter().enumerate() {
        for item in items {
            if !seen.insert(item.as_str()) {
                return Err(PartitionError::InvariantViolation(format!(
                    "{} selected by shard {} and an earlier shard",
                    item,
                    shard + 1
                )));
            }
        }
    }
    Ok(())
}
