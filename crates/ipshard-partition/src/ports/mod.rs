//! # Ports Module
//!
//! Inbound API trait and outbound dependency traits.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
