//! # IPv4 Conversions
//!
//! Dotted-quad text to host-order integers and back, plus CIDR expansion.

use crate::domain::AddressRange;
use std::net::Ipv4Addr;

/// Parse a strict dotted-quad literal (`a.b.c.d`, octets 0-255).
pub fn ipv4_to_u32(text: &str) -> Option<u32> {
    text.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Render a host-order integer as a dotted quad.
pub fn u32_to_ipv4(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}

/// True if `text` is a valid IPv4 literal.
pub fn is_ipv4(text: &str) -> bool {
    ipv4_to_u32(text).is_some()
}

/// Four dot-separated runs of digits, whether or not the octets are in range.
pub fn looks_like_dotted_quad(text: &str) -> bool {
    let mut parts = 0;
    for part in text.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts == 4
}

/// Expand `network/prefix` into its first and last address.
///
/// Host bits set in `network` are masked off. Returns `None` if either
/// side is malformed or the prefix exceeds 32.
pub fn parse_cidr(text: &str) -> Option<AddressRange> {
    let (network, prefix) = text.split_once('/')?;
    let network = ipv4_to_u32(network.trim())?;
    let prefix = prefix.trim();
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix: u32 = prefix.parse().ok()?;
    if prefix > 32 {
        return None;
    }

    let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
    let start = network & mask;
    AddressRange::new(start, start | !mask)
}
