//! # Domain Value Objects
//!
//! Immutable value types for partitioning.

use super::errors::PartitionError;
use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Inclusive IPv4 range `start..=end` with `start <= end`.
///
/// A single address is a range with `start == end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AddressRange {
    start: u32,
    end: u32,
}

impl AddressRange {
    /// Create a range, or `None` if `start > end`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Range covering exactly one address.
    pub const fn single(ip: u32) -> Self {
        Self { start: ip, end: ip }
    }

    /// The entire IPv4 space.
    pub const fn full() -> Self {
        Self {
            start: 0,
            end: u32::MAX,
        }
    }

    /// First address.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last address (inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of addresses covered. Up to 2^32, hence `u64`.
    pub fn size(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains_range(&self, other: &AddressRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether the two ranges share at least one address.
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Iterate over every address in the range.
    pub fn addresses(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", Ipv4Addr::from(self.start))
        } else {
            write!(
                f,
                "{}-{}",
                Ipv4Addr::from(self.start),
                Ipv4Addr::from(self.end)
            )
        }
    }
}

/// One classified input line or literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// An IPv4 address, CIDR block or explicit range.
    Range(AddressRange),
    /// Anything else (domain, URL, malformed address), already normalized.
    Text(String),
}

/// Target shard: 1-based `index` out of `total`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ShardSpec {
    index: u32,
    total: u32,
}

impl ShardSpec {
    /// Create a shard spec, enforcing `1 <= index <= total`.
    pub fn new(index: u32, total: u32) -> Result<Self, PartitionError> {
        if total < 1 || index < 1 || index > total {
            return Err(PartitionError::ShardOutOfRange { index, total });
        }
        Ok(Self { index, total })
    }

    /// Parse an `X/Y` descriptor.
    pub fn parse(descriptor: &str) -> Result<Self, PartitionError> {
        let invalid = || PartitionError::InvalidShardDescriptor(descriptor.to_string());

        let (index, total) = descriptor.trim().split_once('/').ok_or_else(invalid)?;
        let index: u32 = index.trim().parse().map_err(|_| invalid())?;
        let total: u32 = total.trim().parse().map_err(|_| invalid())?;

        Self::new(index, total)
    }

    /// 1-based shard index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Total number of shards.
    pub fn total(&self) -> u32 {
        self.total
    }
}

impl FromStr for ShardSpec {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ShardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// A bounded, contiguous unit of parallel work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WorkChunk {
    /// Position in decomposition order.
    pub id: usize,
    /// Addresses covered by this chunk.
    pub range: AddressRange,
}

impl WorkChunk {
    /// Create a chunk.
    pub fn new(id: usize, range: AddressRange) -> Self {
        Self { id, range }
    }

    /// Number of addresses in the chunk.
    pub fn size(&self) -> u64 {
        self.range.size()
    }
}

/// What the engine does when a chunk fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum FailurePolicy {
    /// Any failing chunk fails the whole run.
    #[default]
    Abort,
    /// Failing chunks are recorded and skipped; the run reports partial results.
    Isolate,
}

/// Partition run state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum RunState {
    /// Nothing started.
    #[default]
    Idle,
    /// Classifying input entries.
    Parsing,
    /// Building the merged exclusion set.
    ExclusionBuilding,
    /// Splitting ranges into work chunks.
    Decomposing,
    /// Chunks running on the worker pool.
    Executing,
    /// Summing counters and concatenating selections.
    Aggregating,
    /// Result produced.
    Done,
    /// Run aborted.
    Failed,
}

impl RunState {
    /// Check if transition to next state is valid.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        match (self, next) {
            (Self::Idle, Self::Parsing) => true,
            // Pre-parsed entries skip straight to exclusion building.
            (Self::Idle, Self::ExclusionBuilding) => true,
            (Self::Parsing, Self::ExclusionBuilding) => true,
            (Self::ExclusionBuilding, Self::Decomposing) => true,
            (Self::Decomposing, Self::Executing) => true,
            (Self::Executing, Self::Aggregating) => true,
            (Self::Aggregating, Self::Done) => true,
            (current, Self::Failed) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
