//! Diagnostic logging on stderr. Stdout is reserved for results.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter directive forced by `--verbose` / `--quiet`, if any.
pub fn forced_directive(verbose: bool, quiet: bool) -> Option<&'static str> {
    match (verbose, quiet) {
        (true, _) => Some("debug"),
        (false, true) => Some("warn"),
        (false, false) => None,
    }
}

/// Install the global subscriber.
///
/// Flags win over `RUST_LOG`; without either the level is `info`.
pub fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = match forced_directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
