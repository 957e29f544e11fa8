//! Command-line arguments.

use clap::Parser;
use ipshard_partition::ShardSpec;
use std::path::PathBuf;

/// ipshard: select shard X of Y from IPv4 ranges and domains
#[derive(Parser, Debug, Clone)]
#[command(name = "ipshard")]
#[command(version)]
#[command(about = "Deterministically split IPv4 ranges and domains into Y shards and emit shard X")]
pub struct Args {
    /// Shard to emit, as X/Y with 1 <= X <= Y
    #[arg(short, long)]
    pub shard: ShardSpec,

    /// Hash seed; every shard of one split must use the same value
    #[arg(long, default_value_t = 1)]
    pub seed: u32,

    /// Newline-delimited file, or a single CIDR / address / range / domain
    #[arg(short, long)]
    pub input: String,

    /// Exclusion file, or a single CIDR / address / range
    #[arg(short, long)]
    pub exclude: Option<String>,

    /// Results file (.txt appended when no extension); stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum addresses per work chunk
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Segment size above which addresses are hashed in batches
    #[arg(long)]
    pub vectorize_threshold: Option<u64>,

    /// Worker pool size (defaults to the number of CPUs)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Keep going when a chunk fails and report partial results
    #[arg(long)]
    pub isolate_failures: bool,

    /// Sort selected addresses numerically
    #[arg(long)]
    pub sort: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub summary_json: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}
