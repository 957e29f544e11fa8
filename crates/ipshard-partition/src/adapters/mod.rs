//! # Adapters
//!
//! Concrete entry sources and result sinks.

pub mod sink;
pub mod source;

pub use sink::{prepare_output_path, resolve_output_path, FileSink, StdoutSink, RESULTS_EXTENSION};
pub use source::SourceSpec;
