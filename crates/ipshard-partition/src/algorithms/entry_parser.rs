//! # Entry Parser
//!
//! Classifies a line or literal as an address range or an opaque string.
//!
//! Decision order:
//!
//! 1. `ip:port` without `/` or `-` drops the port.
//! 2. `network/prefix` is a CIDR block.
//! 3. `start-end` is an explicit range.
//! 4. A bare IPv4 literal is a single-address range.
//! 5. Anything else is a string entry, with any scheme prefix stripped and
//!    the port dropped when the host is an IPv4 literal.
//!
//! A malformed numeric form in steps 2-4 (bad octet, bad prefix, reversed
//! range) is not an error. The entry falls through to step 5.

use super::ipv4::{ipv4_to_u32, is_ipv4, looks_like_dotted_quad, parse_cidr};
use crate::domain::{AddressRange, Entry, ParsedEntries};

/// Scheme prefixes removed from string entries. First match wins.
const SCHEME_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "//"];

/// Classify one non-empty, non-comment entry.
pub fn classify(text: &str) -> Entry {
    let text = text.trim();
    match classify_address(text) {
        Some(range) => Entry::Range(range),
        None => Entry::Text(normalize_string(text)),
    }
}

/// Steps 1-4. `None` means "treat as a string".
fn classify_address(text: &str) -> Option<AddressRange> {
    let mut text = text;

    if text.contains(':') && !text.contains('/') && !text.contains('-') {
        if let Some((host, _port)) = text.split_once(':') {
            if is_ipv4(host) {
                text = host;
            }
        }
    }

    if let Some((network, _)) = text.split_once('/') {
        if looks_like_dotted_quad(network.trim()) {
            return parse_cidr(text);
        }
    }

    if let Some((start, end)) = text.split_once('-') {
        if let Some(start) = ipv4_to_u32(start.trim()) {
            let end = ipv4_to_u32(end.trim())?;
            return AddressRange::new(start, end);
        }
    }

    ipv4_to_u32(text).map(AddressRange::single)
}

/// Step 5: strip the scheme and drop `:port` after an IPv4 host.
fn normalize_string(text: &str) -> String {
    let stripped = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text);

    if let Some((host, rest)) = stripped.split_once(':') {
        if is_ipv4(host) {
            // Keep any path after the port.
            let path = rest.find('/').map(|i| &rest[i..]).unwrap_or("");
            return format!("{host}{path}");
        }
    }

    stripped.to_string()
}

/// True for lines the parser ignores: blank or `#` comments.
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Classify every meaningful line, preserving input order in both outputs.
pub fn parse_entries<I, S>(lines: I) -> ParsedEntries
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedEntries::default();

    for line in lines {
        let line = line.as_ref();
        if is_skippable(line) {
            continue;
        }
        match classify(line) {
            Entry::Range(range) => parsed.ranges.push(range),
            Entry::Text(text) => parsed.strings.push(text),
        }
    }

    parsed
}
