//! # Inbound Ports
//!
//! API trait defining what the partition subsystem can do.

use crate::domain::{ExclusionSet, ParsedEntries, PartitionError, PartitionResult, ShardSpec};
use crate::ports::outbound::EntrySource;

/// Partition API - inbound port.
pub trait PartitionApi: Send + Sync {
    /// Partition already-parsed entries and return shard `shard`'s items.
    fn partition(
        &self,
        entries: &ParsedEntries,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError>;

    /// Read, parse and partition in one pass.
    fn partition_sources(
        &self,
        input: &dyn EntrySource,
        exclude: Option<&dyn EntrySource>,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError>;
}
