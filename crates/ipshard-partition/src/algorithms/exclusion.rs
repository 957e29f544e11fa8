//! # Exclusion Builder
//!
//! Turns an exclusion source into a sorted, merged, disjoint range set.
//! String entries in the source are discarded: only addresses can be
//! excluded.

use super::entry_parser::parse_entries;
use crate::domain::{AddressRange, ExclusionSet};
use tracing::debug;

/// Parse exclusion lines and merge the resulting ranges.
pub fn build<I, S>(lines: I) -> ExclusionSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = parse_entries(lines);
    if !parsed.strings.is_empty() {
        debug!(
            "Ignoring {} non-address exclusion entries",
            parsed.strings.len()
        );
    }
    from_ranges(parsed.ranges)
}

/// Merge arbitrary ranges into an exclusion set.
pub fn from_ranges(ranges: Vec<AddressRange>) -> ExclusionSet {
    ExclusionSet::from_merged(merge(ranges))
}

/// Sort by start and fold overlapping or adjacent ranges together.
///
/// O(n log n). The output is sorted with a gap of at least one address
/// between consecutive ranges.
pub fn merge(mut ranges: Vec<AddressRange>) -> Vec<AddressRange> {
    ranges.sort_unstable_by_key(|r| r.start());

    let mut merged: Vec<AddressRange> = Vec::with_capacity(ranges.len());
    for next in ranges {
        match merged.last_mut() {
            Some(current) if u64::from(next.start()) <= u64::from(current.end()) + 1 => {
                if next.end() > current.end() {
                    // start <= end holds: next.end > current.end >= current.start
                    if let Some(grown) = AddressRange::new(current.start(), next.end()) {
                        *current = grown;
                    }
                }
            }
            _ => merged.push(next),
        }
    }

    merged
}
