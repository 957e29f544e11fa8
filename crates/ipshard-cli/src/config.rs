//! Engine configuration: defaults, then environment, then flags.

use crate::cli::Args;
use ipshard_partition::{FailurePolicy, PartitionConfig, PartitionConfigBuilder, PartitionError};
use std::str::FromStr;
use tracing::{info, warn};

/// Overrides `PartitionConfig::chunk_size`.
pub const ENV_CHUNK_SIZE: &str = "IPSHARD_CHUNK_SIZE";
/// Overrides `PartitionConfig::vectorize_threshold`.
pub const ENV_VECTORIZE_THRESHOLD: &str = "IPSHARD_VECTORIZE_THRESHOLD";
/// Overrides `PartitionConfig::workers`.
pub const ENV_WORKERS: &str = "IPSHARD_WORKERS";

/// Build the engine configuration from the process environment and `args`.
pub fn load_config(args: &Args) -> Result<PartitionConfig, PartitionError> {
    load_config_with(args, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(args: &Args, env: F) -> Result<PartitionConfig, PartitionError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = PartitionConfig::default();
    let mut builder = PartitionConfigBuilder::new();

    // Environment overrides
    let chunk_size = env_override(&env, ENV_CHUNK_SIZE).unwrap_or(defaults.chunk_size);
    let vectorize_threshold =
        env_override(&env, ENV_VECTORIZE_THRESHOLD).unwrap_or(defaults.vectorize_threshold);
    let workers = env_override(&env, ENV_WORKERS).unwrap_or(defaults.workers);

    // Flags win over the environment
    builder = builder
        .chunk_size(args.chunk_size.unwrap_or(chunk_size))
        .vectorize_threshold(args.vectorize_threshold.unwrap_or(vectorize_threshold))
        .workers(args.workers.unwrap_or(workers))
        .sort_output(args.sort);

    if args.isolate_failures {
        builder = builder.failure_policy(FailurePolicy::Isolate);
    }

    builder.build()
}

fn env_override<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            info!("Loaded {} from environment", key);
            Some(value)
        }
        Err(_) => {
            warn!("Ignoring malformed {}={:?}", key, raw);
            None
        }
    }
}
