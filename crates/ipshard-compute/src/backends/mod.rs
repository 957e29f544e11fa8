//! Compute backends
//!
//! Every backend must produce hashes identical to the scalar functions in
//! [`crate::hash`]; backends differ only in throughput.

#[cfg(feature = "cpu")]
pub mod cpu;
