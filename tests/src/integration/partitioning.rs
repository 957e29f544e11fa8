//! # Partitioning Guarantees
//!
//! Independently launched shards must agree: every non-excluded item lands
//! in exactly one shard, whatever the chunking or worker count.

#[cfg(test)]
mod tests {
    use super::super::engine;
    use ipshard_partition::domain::invariant_shards_disjoint;
    use ipshard_partition::{
        build_exclusions, ipv4_to_u32, parse_entries, u32_to_ipv4, AddressRange, ExclusionSet,
        ParsedEntries, PartitionError, ShardSpec,
    };
    use std::collections::BTreeSet;

    const INPUT: [&str; 7] = [
        "# universe",
        "10.0.0.0/22",
        "172.16.5.10-172.16.5.200",
        "8.8.8.8",
        "example.com",
        "a.test",
        "http://b.test/x",
    ];

    const EXCLUDE: [&str; 4] = [
        "10.0.1.0/24",
        "172.16.5.100-172.16.5.250",
        "8.8.8.8",
        "example.com",
    ];

    fn universe() -> (ParsedEntries, ExclusionSet) {
        (parse_entries(INPUT), build_exclusions(EXCLUDE))
    }

    /// Brute-force expected output of all shards combined.
    fn expected(entries: &ParsedEntries, exclusions: &ExclusionSet) -> BTreeSet<String> {
        let excluded = |ip: u32| exclusions.as_slice().iter().any(|r| r.addresses().contains(&ip));
        entries
            .ranges
            .iter()
            .flat_map(AddressRange::addresses)
            .filter(|ip| !excluded(*ip))
            .map(u32_to_ipv4)
            .chain(entries.strings.iter().cloned())
            .collect()
    }

    fn all_shards(total: u32, chunk_size: u64, workers: usize) -> Vec<Vec<String>> {
        let (entries, exclusions) = universe();
        let engine = engine(chunk_size, workers);
        (1..=total)
            .map(|index| {
                let shard = ShardSpec::new(index, total).unwrap();
                engine.run(&entries, &exclusions, shard, 1).unwrap().selected
            })
            .collect()
    }

    #[test]
    fn test_two_shard_example() {
        let entries = parse_entries(["192.168.1.0/30"]);
        let engine = engine(1_000, 2);
        let run = |index| {
            let shard = ShardSpec::new(index, 2).unwrap();
            let mut selected = engine
                .run(&entries, &ExclusionSet::empty(), shard, 1)
                .unwrap()
                .selected;
            selected.sort_by_key(|ip| ipv4_to_u32(ip));
            selected
        };

        assert_eq!(run(1), vec!["192.168.1.1", "192.168.1.3"]);
        assert_eq!(run(2), vec!["192.168.1.0", "192.168.1.2"]);
    }

    #[test]
    fn test_shards_are_complete_and_disjoint() {
        let (entries, exclusions) = universe();
        let want = expected(&entries, &exclusions);

        for total in [1, 2, 3, 7] {
            let shards = all_shards(total, 100, 4);
            assert!(invariant_shards_disjoint(&shards).is_ok(), "Y={total}");

            let union: BTreeSet<String> = shards.into_iter().flatten().collect();
            assert_eq!(union, want, "Y={total}");
        }
    }

    #[test]
    fn test_string_entries_are_never_excluded() {
        let shards = all_shards(1, 100, 2);
        assert!(shards[0].contains(&"example.com".to_string()));
        assert!(shards[0].contains(&"b.test/x".to_string()));
    }

    #[test]
    fn test_chunking_does_not_change_membership() {
        let reference: Vec<BTreeSet<String>> = all_shards(3, 1_000_000, 1)
            .into_iter()
            .map(|items| items.into_iter().collect())
            .collect();

        for (chunk_size, workers) in [(1, 8), (7, 3), (256, 2)] {
            let shards: Vec<BTreeSet<String>> = all_shards(3, chunk_size, workers)
                .into_iter()
                .map(|items| items.into_iter().collect())
                .collect();
            assert_eq!(shards, reference, "chunk {chunk_size}, workers {workers}");
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let first = all_shards(4, 50, 4);
        let second = all_shards(4, 50, 4);
        for (a, b) in first.iter().zip(&second) {
            let a: BTreeSet<_> = a.iter().collect();
            let b: BTreeSet<_> = b.iter().collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_seed_changes_assignment() {
        let entries = parse_entries(["10.0.0.0/24"]);
        let engine = engine(1_000, 2);
        let shard = ShardSpec::new(1, 2).unwrap();
        let with_seed = |seed| -> BTreeSet<String> {
            engine
                .run(&entries, &ExclusionSet::empty(), shard, seed)
                .unwrap()
                .selected
                .into_iter()
                .collect()
        };
        assert_ne!(with_seed(1), with_seed(2));
    }

    #[test]
    fn test_single_shard_selects_everything_not_excluded() {
        let (entries, exclusions) = universe();
        let result = engine(64, 4)
            .run(&entries, &exclusions, ShardSpec::new(1, 1).unwrap(), 99)
            .unwrap();

        let want = expected(&entries, &exclusions);
        assert_eq!(result.selected.len(), want.len());
        assert_eq!(
            result.processed,
            entries.address_count() + entries.strings.len() as u64
        );
        // 256 from 10.0.1.0/24, 101 from 172.16.5.100-200, plus 8.8.8.8
        assert_eq!(result.excluded, 256 + 101 + 1);
    }

    #[test]
    fn test_out_of_range_shard_is_rejected() {
        assert!(matches!(
            ShardSpec::parse("5/3"),
            Err(PartitionError::ShardOutOfRange { index: 5, total: 3 })
        ));
        assert!(ShardSpec::parse("0/3").is_err());
        assert!(ShardSpec::parse("1/0").is_err());
        assert!(matches!(
            ShardSpec::parse("three"),
            Err(PartitionError::InvalidShardDescriptor(_))
        ));
    }

    #[test]
    fn test_fully_excluded_address_space_is_not_enumerated() {
        let entries = parse_entries(["0.0.0.0/0"]);
        let exclusions = build_exclusions(["0.0.0.0/1", "128.0.0.0/1"]);
        let result = engine(25_000_000, 4)
            .run(&entries, &exclusions, ShardSpec::new(1, 3).unwrap(), 1)
            .unwrap();

        assert_eq!(result.processed, 1u64 << 32);
        assert_eq!(result.excluded, 1u64 << 32);
        assert!(result.selected.is_empty());
    }
}
