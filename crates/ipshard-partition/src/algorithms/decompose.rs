//! # Range Decomposition
//!
//! Splits parsed ranges into bounded work chunks. Chunks never straddle two
//! input ranges, so the chunk list exactly partitions the input.

use crate::domain::{AddressRange, WorkChunk};

/// Split every range into consecutive chunks of at most `chunk_size` addresses.
///
/// A `chunk_size` of 0 is treated as 1.
pub fn decompose(ranges: &[AddressRange], chunk_size: u64) -> Vec<WorkChunk> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();

    for range in ranges {
        let end = u64::from(range.end());
        let mut start = u64::from(range.start());

        while start <= end {
            let last = start.saturating_add(chunk_size - 1).min(end);
            // Both bounds lie inside `range`, which is u32-valued.
            if let (Ok(s), Ok(e)) = (u32::try_from(start), u32::try_from(last)) {
                if let Some(piece) = AddressRange::new(s, e) {
                    chunks.push(WorkChunk::new(chunks.len(), piece));
                }
            }
            start = last + 1;
        }
    }

    chunks
}
