//! # Exclusion Correctness
//!
//! Excluded addresses never reach any shard, and the merged exclusion set
//! is stable under re-merging.

#[cfg(test)]
mod tests {
    use super::super::engine;
    use ipshard_partition::{
        build_exclusions, exclusions_from_ranges, ipv4_to_u32, merge, parse_entries, subtract,
        AddressRange, ShardSpec, WorkChunk,
    };
    use rand::Rng;

    fn r(start: u32, end: u32) -> AddressRange {
        AddressRange::new(start, end).unwrap()
    }

    #[test]
    fn test_excluded_half_never_selected() {
        let entries = parse_entries(["10.0.0.0/24"]);
        let exclusions = build_exclusions(["10.0.0.0/25"]);
        let engine = engine(1_000, 4);
        let low = ipv4_to_u32("10.0.0.0").unwrap();
        let high = ipv4_to_u32("10.0.0.127").unwrap();

        for index in 1..=4 {
            let result = engine
                .run(&entries, &exclusions, ShardSpec::new(index, 4).unwrap(), 1)
                .unwrap();
            assert_eq!(result.excluded, 128);
            for item in &result.selected {
                let ip = ipv4_to_u32(item).unwrap();
                assert!(!(low..=high).contains(&ip), "{item} leaked into shard {index}");
            }
        }
    }

    #[test]
    fn test_chunk_excluded_count() {
        let exclusions = build_exclusions(["10.0.0.0/25"]);
        let chunk = WorkChunk::new(0, parse_entries(["10.0.0.0/24"]).ranges[0]);
        let outcome = engine(1_000, 1)
            .process_chunk(&chunk, &exclusions, ShardSpec::new(1, 1).unwrap(), 1)
            .unwrap();
        assert_eq!(outcome.processed, 256);
        assert_eq!(outcome.excluded, 128);
        assert_eq!(outcome.selected.len(), 128);
    }

    #[test]
    fn test_overlapping_and_adjacent_exclusions_merge() {
        let set = build_exclusions([
            "10.0.0.0/25",
            "10.0.0.128-10.0.0.200",
            "10.0.0.150/31",
            "10.0.0.201",
            "192.168.0.1",
            "not-an-address.example",
        ]);
        assert_eq!(
            set.as_slice(),
            &[
                r(ipv4_to_u32("10.0.0.0").unwrap(), ipv4_to_u32("10.0.0.201").unwrap()),
                AddressRange::single(ipv4_to_u32("192.168.0.1").unwrap()),
            ]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let ranges: Vec<AddressRange> = (0..rng.gen_range(0..20))
                .map(|_| {
                    let start: u32 = rng.gen_range(0..100_000);
                    r(start, start + rng.gen_range(0..500))
                })
                .collect();
            let once = merge(ranges);
            assert_eq!(merge(once.clone()), once);
        }
    }

    #[test]
    fn test_subtract_matches_brute_force() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let exclusions = exclusions_from_ranges(
                (0..rng.gen_range(0..8))
                    .map(|_| {
                        let start: u32 = rng.gen_range(0..2_000);
                        r(start, start + rng.gen_range(0..200))
                    })
                    .collect(),
            );
            let start: u32 = rng.gen_range(0..1_500);
            let range = r(start, start + rng.gen_range(0..600));

            let kept: Vec<u32> = subtract(&range, &exclusions)
                .iter()
                .flat_map(AddressRange::addresses)
                .collect();
            let brute: Vec<u32> = range
                .addresses()
                .filter(|ip| !exclusions.as_slice().iter().any(|e| e.addresses().contains(ip)))
                .collect();
            assert_eq!(kept, brute);
        }
    }

    #[test]
    fn test_exclusion_at_top_of_space() {
        let entries = parse_entries(["255.255.255.250-255.255.255.255"]);
        let exclusions = build_exclusions(["255.255.255.254/31"]);
        let result = engine(4, 2)
            .run(&entries, &exclusions, ShardSpec::new(1, 1).unwrap(), 1)
            .unwrap();
        assert_eq!(result.excluded, 2);
        assert_eq!(result.selected.len(), 4);
        assert!(!result.selected.contains(&"255.255.255.255".to_string()));
    }
}
