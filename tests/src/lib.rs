//! # ipshard Test Suite
//!
//! Cross-crate tests for the partitioning guarantees.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── hashing.rs       # Pinned hash values, batch vs scalar
//!     ├── parsing.rs       # Entry classification, IPv4 conversions
//!     ├── exclusion.rs     # Exclusion merge and subtraction
//!     ├── partitioning.rs  # Completeness, disjointness, determinism
//!     └── cli_flow.rs      # File-to-file runs through the CLI layer
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ipshard-tests
//! cargo test -p ipshard-tests integration::partitioning::
//!
//! # Benchmarks
//! cargo bench -p ipshard-tests
//! ```
