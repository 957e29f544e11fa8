//! # Range Subtractor
//!
//! Interval difference between one candidate range and the exclusion set,
//! computed without touching individual excluded addresses.

use crate::domain::{AddressRange, ExclusionSet};

/// Whether a single exclusion range swallows `range` entirely. O(log n).
pub fn is_fully_excluded(range: &AddressRange, set: &ExclusionSet) -> bool {
    let ranges = set.as_slice();
    // Last exclusion starting at or before range.start is the only candidate.
    let idx = ranges.partition_point(|e| e.start() <= range.start());
    idx > 0 && ranges[idx - 1].end() >= range.end()
}

/// Maximal sub-ranges of `range` not covered by `set`, ascending.
///
/// An empty result means the whole range is excluded.
pub fn subtract(range: &AddressRange, set: &ExclusionSet) -> Vec<AddressRange> {
    let ranges = set.as_slice();
    let end = u64::from(range.end());
    let mut cursor = u64::from(range.start());
    let mut segments = Vec::new();

    // Ends ascend too (the set is disjoint), so skip everything ending before us.
    let first = ranges.partition_point(|e| e.end() < range.start());

    for exclusion in &ranges[first..] {
        let (es, ee) = (u64::from(exclusion.start()), u64::from(exclusion.end()));
        if es > end {
            break;
        }
        if cursor < es {
            push_segment(&mut segments, cursor, (es - 1).min(end));
        }
        cursor = cursor.max(ee + 1);
        if cursor > end {
            break;
        }
    }

    if cursor <= end {
        push_segment(&mut segments, cursor, end);
    }

    segments
}

/// Addresses of `range` absent from `segments`.
pub fn excluded_count(range: &AddressRange, segments: &[AddressRange]) -> u64 {
    range.size() - segments.iter().map(AddressRange::size).sum::<u64>()
}

fn push_segment(segments: &mut Vec<AddressRange>, start: u64, end: u64) {
    // Both bounds come from u32 values clamped to the candidate range.
    if let (Ok(start), Ok(end)) = (u32::try_from(start), u32::try_from(end)) {
        if let Some(segment) = AddressRange::new(start, end) {
            segments.push(segment);
        }
    }
}
