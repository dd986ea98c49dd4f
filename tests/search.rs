//! End-to-end searches against deterministic seed sequences.

use nano_vanity::{
    validate_address, Coordinator, Keypair, PrefixSet, SearchError, SearchOptions, Seed,
    SeedSequence,
};

fn counter_seed(n: u64) -> Seed {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    Seed::from_bytes(bytes)
}

fn qualifies(prefixes: &PrefixSet, seed: &Seed) -> bool {
    prefixes.matches(Keypair::from_seed(seed, 0).address()).is_some()
}

/// Returns `misses` non-qualifying seeds followed by the first qualifying one.
fn sequence_ending_in_match(prefixes: &PrefixSet, misses: usize) -> (Vec<Seed>, Seed) {
    let mut candidates = (0u64..).map(counter_seed);
    let mut seeds = Vec::with_capacity(misses + 1);
    while seeds.len() < misses {
        let seed = candidates.next().unwrap();
        if !qualifies(prefixes, &seed) {
            seeds.push(seed);
        }
    }
    let hit = candidates.find(|s| qualifies(prefixes, s)).unwrap();
    seeds.push(hit);
    (seeds, hit)
}

fn options(workers: usize) -> SearchOptions {
    SearchOptions {
        workers,
        progress_interval: 10,
        quiet: true,
    }
}

#[test]
fn test_reports_first_qualifying_seed() {
    let prefixes = PrefixSet::new(["b"]).unwrap();
    let (seeds, expected) = sequence_ending_in_match(&prefixes, 60);
    let sequence = SeedSequence::new(seeds);

    let coordinator = Coordinator::new(prefixes, options(1), sequence.clone());
    let found = coordinator.search().unwrap();

    assert_eq!(found.seed, expected);
    assert_eq!(found.prefix, "b");
    assert_eq!(found.attempts, 60);
    assert_eq!(sequence.drawn(), 61);
    assert!(validate_address(found.address.as_str()));
}

#[test]
fn test_single_worker_takes_earlier_of_two_matches() {
    let prefixes = PrefixSet::new(["c", "d"]).unwrap();
    let (mut seeds, expected) = sequence_ending_in_match(&prefixes, 20);
    let later = (1_000u64..)
        .map(counter_seed)
        .find(|s| qualifies(&prefixes, s))
        .unwrap();
    seeds.push(later);

    let coordinator = Coordinator::new(prefixes, options(1), SeedSequence::new(seeds));
    assert_eq!(coordinator.search().unwrap().seed, expected);
}

#[test]
fn test_worker_count_does_not_change_accepted_seed() {
    // about one seed in sixteen qualifies, so the sequence holds many matches
    let prefixes = PrefixSet::new(["1", "3"]).unwrap();
    let seeds: Vec<Seed> = (0u64..400).map(counter_seed).collect();
    let expected = *seeds.iter().find(|s| qualifies(&prefixes, s)).unwrap();
    assert!(seeds.iter().filter(|s| qualifies(&prefixes, s)).count() > 5);

    for workers in [1, 8] {
        for run in 0..25 {
            let coordinator = Coordinator::new(
                prefixes.clone(),
                options(workers),
                SeedSequence::new(seeds.clone()),
            );
            let found = coordinator.search().unwrap();
            assert_eq!(found.seed, expected, "workers = {}, run = {}", workers, run);
        }
    }
}

#[test]
fn test_sequence_without_match_fails_cleanly() {
    let prefixes = PrefixSet::new(["q"]).unwrap();
    let seeds: Vec<Seed> = (0u64..50)
        .map(counter_seed)
        .filter(|s| !qualifies(&prefixes, s))
        .collect();

    let coordinator = Coordinator::new(prefixes, options(4), SeedSequence::new(seeds));
    assert!(matches!(
        coordinator.search(),
        Err(SearchError::RandomSourceFailure(_))
    ));
}

#[test]
fn test_invalid_prefix_rejected_before_search() {
    assert_eq!(
        PrefixSet::new(["abc", "nano_"]),
        Err(SearchError::InvalidPrefixCharacter {
            prefix: "nano_".into(),
            character: '_',
        })
    );
}
