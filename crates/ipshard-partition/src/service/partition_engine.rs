//! # Partition Engine
//!
//! Decomposes address ranges into bounded chunks, runs each chunk on a
//! worker pool (subtract exclusions, hash, filter by shard) and folds the
//! chunk outcomes into one [`PartitionResult`].
//!
//! ## Run states
//!
//! ```text
//! Idle → Parsing → ExclusionBuilding → Decomposing → Executing → Aggregating → Done
//!                                                        │
//!                                                        └──→ Failed
//! ```
//!
//! Workers share only immutable inputs (exclusion set, shard spec, seed).
//! Outcomes are sent back over a channel and aggregated by the calling
//! thread in completion order, so `selected` is not sorted unless
//! [`PartitionConfig::sort_output`] is set.

use crate::algorithms::{
    build_exclusions, decompose, excluded_count, ipv4_to_u32, is_fully_excluded, parse_entries,
    subtract, u32_to_ipv4,
};
use crate::domain::{
    invariant_chunks_partition, AddressRange, ChunkOutcome, ExclusionSet, FailedChunk,
    FailurePolicy, ParsedEntries, PartitionConfig, PartitionError, PartitionResult, RunState,
    ShardSpec, WorkChunk,
};
use crate::ports::{EntrySource, PartitionApi};
use ipshard_compute::{auto_detect, belongs_to_shard, hash_ip, hash_string, ComputeEngine};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Largest run handed to the batch backend in one call.
///
/// Keeps the per-call hash buffer at 4 MiB regardless of segment size.
pub const MAX_BATCH_LEN: u64 = 1 << 20;

type Completion = (WorkChunk, Result<ChunkOutcome, PartitionError>);

/// Parallel shard selection engine.
pub struct PartitionEngine {
    config: PartitionConfig,
    compute: Arc<dyn ComputeEngine>,
}

impl PartitionEngine {
    /// Create an engine on the auto-detected compute backend.
    pub fn new(config: PartitionConfig) -> Result<Self, PartitionError> {
        let compute = auto_detect().map_err(|e| PartitionError::InvalidConfig(e.to_string()))?;
        Self::with_compute(config, compute)
    }

    /// Create an engine on a specific compute backend.
    pub fn with_compute(
        config: PartitionConfig,
        compute: Arc<dyn ComputeEngine>,
    ) -> Result<Self, PartitionError> {
        config.validate()?;
        debug!(
            "Partition engine: {} workers, chunk size {}, batch backend {}",
            config.workers,
            config.chunk_size,
            compute.backend()
        );
        Ok(Self { config, compute })
    }

    /// Active configuration.
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Read both sources, then partition.
    ///
    /// An unreadable input or exclude source fails the run before any chunk
    /// is dispatched.
    pub fn run_sources(
        &self,
        input: &dyn EntrySource,
        exclude: Option<&dyn EntrySource>,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        let mut run = RunTracker::default();
        let result = self.run_sources_tracked(&mut run, input, exclude, shard, seed);
        run.settle(&result);
        result
    }

    /// Partition already-parsed entries against a built exclusion set.
    pub fn run(
        &self,
        entries: &ParsedEntries,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        let mut run = RunTracker::default();
        let result = self.run_tracked(&mut run, entries, exclusions, shard, seed);
        run.settle(&result);
        result
    }

    fn run_tracked(
        &self,
        run: &mut RunTracker,
        entries: &ParsedEntries,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        // Entries and exclusions arrive pre-built.
        run.advance(RunState::ExclusionBuilding)?;
        self.execute(run, entries, exclusions, shard, seed)
    }

    fn run_sources_tracked(
        &self,
        run: &mut RunTracker,
        input: &dyn EntrySource,
        exclude: Option<&dyn EntrySource>,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        run.advance(RunState::Parsing)?;
        let lines = input
            .read_lines()
            .map_err(|source| PartitionError::InputSourceUnreadable {
                path: input.location(),
                source,
            })?;
        let entries = parse_entries(&lines);

        run.advance(RunState::ExclusionBuilding)?;
        let exclusions = match exclude {
            Some(source) => {
                let lines =
                    source
                        .read_lines()
                        .map_err(|err| PartitionError::ExcludeSourceUnreadable {
                            path: source.location(),
                            source: err,
                        })?;
                build_exclusions(&lines)
            }
            None => ExclusionSet::empty(),
        };

        self.execute(run, &entries, &exclusions, shard, seed)
    }

    fn execute(
        &self,
        run: &mut RunTracker,
        entries: &ParsedEntries,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        let started = Instant::now();

        run.advance(RunState::Decomposing)?;
        let chunks = decompose(&entries.ranges, self.config.chunk_size);
        invariant_chunks_partition(&entries.ranges, &chunks, self.config.chunk_size)?;
        info!(
            "Partitioning shard {} (seed {}): {} addresses in {} chunks, {} strings, {} exclusion ranges",
            shard,
            seed,
            entries.address_count(),
            chunks.len(),
            entries.strings.len(),
            exclusions.len()
        );

        run.advance(RunState::Executing)?;
        let mut completions = self.execute_chunks(&chunks, exclusions, shard, seed)?;
        if self.config.failure_policy == FailurePolicy::Abort {
            if let Some(pos) = completions.iter().position(|(_, outcome)| outcome.is_err()) {
                if let (chunk, Err(err)) = completions.swap_remove(pos) {
                    error!("Chunk {} ({}) failed, aborting run: {}", chunk.id, chunk.range, err);
                    return Err(err);
                }
            }
        }

        run.advance(RunState::Aggregating)?;
        let mut result = PartitionResult::default();
        for (chunk, outcome) in completions {
            match outcome {
                Ok(outcome) => result.absorb(outcome),
                Err(err) => {
                    warn!("Chunk {} ({}) failed, skipping: {}", chunk.id, chunk.range, err);
                    result.failed_chunks.push(FailedChunk {
                        chunk,
                        reason: err.to_string(),
                    });
                }
            }
        }
        if self.config.sort_output {
            result.selected.sort_by_cached_key(|item| ipv4_to_u32(item));
        }

        let strings = self.process_string_entries(&entries.strings, shard, seed);
        result.processed += entries.strings.len() as u64;
        result.selected.extend(strings);

        run.advance(RunState::Done)?;
        debug!(
            "Shard {} done: processed {}, excluded {}, selected {}, failed chunks {} ({:?})",
            shard,
            result.processed,
            result.excluded,
            result.selected.len(),
            result.failed_chunks.len(),
            started.elapsed()
        );
        Ok(result)
    }

    /// Run every chunk on a bounded pool; outcomes arrive in completion order.
    fn execute_chunks(
        &self,
        chunks: &[WorkChunk],
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<Vec<Completion>, PartitionError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("ipshard-worker-{i}"))
            .build()
            .map_err(|e| PartitionError::InvalidConfig(format!("worker pool: {e}")))?;

        let stop_on_failure = self.config.failure_policy == FailurePolicy::Abort;
        let aborted = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<Completion>();

        pool.scope(|scope| {
            for chunk in chunks {
                let tx = tx.clone();
                let aborted = &aborted;
                scope.spawn(move |_| {
                    if aborted.load(Ordering::Relaxed) {
                        return;
                    }
                    let outcome = self.guarded_process_chunk(chunk, exclusions, shard, seed);
                    if outcome.is_err() && stop_on_failure {
                        aborted.store(true, Ordering::Relaxed);
                    }
                    // The receiver outlives the scope, so send cannot fail.
                    let _ = tx.send((*chunk, outcome));
                });
            }
        });
        drop(tx);

        Ok(rx.into_iter().collect())
    }

    /// [`Self::process_chunk`] with panics turned into worker failures.
    fn guarded_process_chunk(
        &self,
        chunk: &WorkChunk,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<ChunkOutcome, PartitionError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.process_chunk(chunk, exclusions, shard, seed)
        }))
        .unwrap_or_else(|payload| {
            Err(PartitionError::WorkerFailure {
                chunk: chunk.id,
                reason: panic_message(payload.as_ref()),
            })
        })
    }

    /// Select shard members from one chunk.
    ///
    /// Returns `(processed, excluded, selected)` for the chunk, with selected
    /// addresses ascending within each non-excluded segment.
    pub fn process_chunk(
        &self,
        chunk: &WorkChunk,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<ChunkOutcome, PartitionError> {
        let size = chunk.size();

        if is_fully_excluded(&chunk.range, exclusions) {
            debug!("Chunk {} ({}) fully excluded, skipping", chunk.id, chunk.range);
            return Ok(ChunkOutcome::fully_excluded(size));
        }

        let segments = subtract(&chunk.range, exclusions);
        if segments.is_empty() {
            return Ok(ChunkOutcome::fully_excluded(size));
        }

        let mut outcome = ChunkOutcome {
            processed: size,
            excluded: excluded_count(&chunk.range, &segments),
            selected: Vec::new(),
        };

        for segment in &segments {
            if segment.size() > self.config.vectorize_threshold {
                self.select_batched(chunk.id, segment, shard, seed, &mut outcome.selected)?;
            } else {
                select_scalar(segment, shard, seed, &mut outcome.selected);
            }
        }

        debug!(
            "Chunk {} ({}): {} segments, excluded {}, selected {}",
            chunk.id,
            chunk.range,
            segments.len(),
            outcome.excluded,
            outcome.selected.len()
        );
        Ok(outcome)
    }

    /// Hash a segment through the batch backend, window by window.
    fn select_batched(
        &self,
        chunk_id: usize,
        segment: &AddressRange,
        shard: ShardSpec,
        seed: u32,
        selected: &mut Vec<String>,
    ) -> Result<(), PartitionError> {
        let worker_failure = |reason: String| PartitionError::WorkerFailure {
            chunk: chunk_id,
            reason,
        };

        for window in decompose(std::slice::from_ref(segment), MAX_BATCH_LEN) {
            let range = window.range;
            let hashes = self
                .compute
                .batch_hash_ip(range.start(), range.end(), seed)
                .map_err(|e| worker_failure(e.to_string()))?;

            if hashes.len() as u64 != range.size() {
                return Err(worker_failure(format!(
                    "batch backend returned {} hashes for {} addresses",
                    hashes.len(),
                    range.size()
                )));
            }

            selected.extend(
                range
                    .addresses()
                    .zip(hashes)
                    .filter(|&(_, hash)| belongs_to_shard(hash, shard.index(), shard.total()))
                    .map(|(ip, _)| u32_to_ipv4(ip)),
            );
        }

        Ok(())
    }

    /// Keep the string entries owned by `shard`, in input order.
    pub fn process_string_entries(
        &self,
        entries: &[String],
        shard: ShardSpec,
        seed: u32,
    ) -> Vec<String> {
        entries
            .iter()
            .filter(|entry| belongs_to_shard(hash_string(entry, seed), shard.index(), shard.total()))
            .cloned()
            .collect()
    }
}

impl PartitionApi for PartitionEngine {
    fn partition(
        &self,
        entries: &ParsedEntries,
        exclusions: &ExclusionSet,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        self.run(entries, exclusions, shard, seed)
    }

    fn partition_sources(
        &self,
        input: &dyn EntrySource,
        exclude: Option<&dyn EntrySource>,
        shard: ShardSpec,
        seed: u32,
    ) -> Result<PartitionResult, PartitionError> {
        self.run_sources(input, exclude, shard, seed)
    }
}

/// Scalar path: hash and test one address at a time.
fn select_scalar(segment: &AddressRange, shard: ShardSpec, seed: u32, selected: &mut Vec<String>) {
    selected.extend(
        segment
            .addresses()
            .filter(|&ip| belongs_to_shard(hash_ip(ip, seed), shard.index(), shard.total()))
            .map(u32_to_ipv4),
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("worker panicked: {msg}")
    } else {
        "worker panicked".to_string()
    }
}

/// Enforces the run state machine and logs transitions.
#[derive(Debug, Default)]
struct RunTracker {
    state: RunState,
}

impl RunTracker {
    fn advance(&mut self, next: RunState) -> Result<(), PartitionError> {
        if !self.state.can_transition_to(next) {
            return Err(PartitionError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        debug!("Run state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    fn settle<T>(&mut self, result: &Result<T, PartitionError>) {
        if result.is_err() && self.state.can_transition_to(RunState::Failed) {
            debug!("Run state {} -> {}", self.state, RunState::Failed);
            self.state = RunState::Failed;
        }
    }
}
