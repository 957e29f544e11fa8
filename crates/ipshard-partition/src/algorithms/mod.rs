//! # Algorithms Module
//!
//! Pure functions: entry classification, exclusion merging, interval
//! subtraction and chunk decomposition.

pub mod decompose;
pub mod entry_parser;
pub mod exclusion;
pub mod ipv4;
pub mod subtract;

pub use decompose::decompose;
pub use entry_parser::{classify, is_skippable, parse_entries};
pub use exclusion::{build as build_exclusions, from_ranges as exclusions_from_ranges, merge};
pub use ipv4::{ipv4_to_u32, is_ipv4, parse_cidr, u32_to_ipv4};
pub use subtract::{excluded_count, is_fully_excluded, subtract};
