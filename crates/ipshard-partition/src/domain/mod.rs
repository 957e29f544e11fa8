//! # Domain Module
//!
//! Core domain types for partitioning: ranges, entries, shard specs,
//! exclusion sets, results, configuration and invariants.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
