//! # ipshard-cli
//!
//! Command-line front end for `ipshard-partition`. Each invocation selects
//! one shard; independent invocations with the same seed and shard count
//! split the universe without coordinating.
//!
//! ```text
//! ipshard --shard 2/8 --input targets.txt --exclude blocklist.txt -o shard2
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

pub use app::{render_summary, run, run_with_sink};
pub use cli::Args;
pub use config::{load_config, load_config_with};
pub use logging::init_logging;
