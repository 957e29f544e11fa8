//! # Entry Parsing
//!
//! Anything that is not a well-formed address form degrades to a string
//! entry instead of failing the run.

#[cfg(test)]
mod tests {
    use ipshard_partition::{classify, ipv4_to_u32, parse_entries, u32_to_ipv4, Entry};
    use rand::Rng;

    #[test]
    fn test_ipv4_round_trip() {
        let mut rng = rand::thread_rng();
        for ip in [0, 1, 0x0808_0808, u32::MAX]
            .into_iter()
            .chain((0..10_000).map(|_| rng.gen::<u32>()))
        {
            assert_eq!(ipv4_to_u32(&u32_to_ipv4(ip)), Some(ip));
        }
    }

    #[test]
    fn test_malformed_address_becomes_string() {
        assert_eq!(
            classify("999.999.999.999"),
            Entry::Text("999.999.999.999".into())
        );
        assert_eq!(classify("10.0.0.0/33"), Entry::Text("10.0.0.0/33".into()));
        assert_eq!(
            classify("10.0.0.9-10.0.0.1"),
            Entry::Text("10.0.0.9-10.0.0.1".into())
        );
    }

    #[test]
    fn test_mixed_file_preserves_order() {
        let parsed = parse_entries([
            "# header",
            "",
            "https://example.com/login",
            "10.0.0.1:443",
            "   ",
            "ftp://10.9.9.9:21/pub",
            "192.168.0.0/31",
            "Example.ORG",
        ]);

        assert_eq!(
            parsed.strings,
            vec!["example.com/login", "10.9.9.9/pub", "Example.ORG"]
        );
        let ranges: Vec<(String, String)> = parsed
            .ranges
            .iter()
            .map(|r| (u32_to_ipv4(r.start()), u32_to_ipv4(r.end())))
            .collect();
        assert_eq!(
            ranges,
            vec![
                ("10.0.0.1".to_string(), "10.0.0.1".to_string()),
                ("192.168.0.0".to_string(), "192.168.0.1".to_string()),
            ]
        );
        assert_eq!(parsed.address_count(), 3);
    }

    #[test]
    fn test_cidr_host_bits_are_masked() {
        match classify("10.1.2.3/24") {
            Entry::Range(range) => {
                assert_eq!(u32_to_ipv4(range.start()), "10.1.2.0");
                assert_eq!(u32_to_ipv4(range.end()), "10.1.2.255");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
