use battleship_solver::{
    BeliefEngine, BitSet, BoardSpace, CachePolicy, CacheStats, MissKey, SpaceConfig, Strategy,
};
use rand::{rngs::SmallRng, SeedableRng};

fn space(cache: CachePolicy) -> BoardSpace {
    BoardSpace::new(SpaceConfig::new(3, 3, vec![2, 3]).with_cache(cache)).unwrap()
}

#[test]
fn test_opening_map_is_shared() {
    let s = space(CachePolicy::MissSet);
    assert!(s.miss_cache().is_empty());

    let a = BeliefEngine::for_board(&s, 0, Strategy::Median).unwrap();
    assert_eq!(
        s.miss_cache().stats(),
        CacheStats {
            entries: 1,
            hits: 0,
            misses: 1
        }
    );

    let b = BeliefEngine::for_board(&s, 7, Strategy::Maximum).unwrap();
    assert_eq!(s.miss_cache().stats().hits, 1);
    assert!(std::ptr::eq(a.probability_map(), b.probability_map()));
}

#[test]
fn test_only_all_miss_prefixes_are_cached() {
    let s = space(CachePolicy::MissSet);
    // Board 0 occupies 0, 1, 2, 5, 8.
    let mut engine = BeliefEngine::for_board(&s, 0, Strategy::Median).unwrap();
    engine.guess(4).unwrap();
    assert_eq!(s.miss_cache().len(), 2);
    engine.guess(0).unwrap();
    engine.guess(3).unwrap();
    assert_eq!(s.miss_cache().len(), 2);

    s.miss_cache().clear();
    assert_eq!(s.miss_cache().stats(), CacheStats::default());
}

#[test]
fn test_miss_set_matches_uncached_computation() {
    let cached = space(CachePolicy::MissSet);
    let plain = space(CachePolicy::Disabled);
    // Board 35 is the last layout; walk several miss orders on it and on
    // a second engine sharing the cache.
    let truth = cached.boards().len() - 1;
    let misses: Vec<usize> = (0..9).filter(|&c| !cached.boards()[truth].contains(c)).collect();

    for order in [misses.clone(), misses.iter().rev().copied().collect()] {
        let mut a = BeliefEngine::for_board(&cached, truth, Strategy::Minimum).unwrap();
        let mut b = BeliefEngine::for_board(&plain, truth, Strategy::Minimum).unwrap();
        for &cell in &order {
            a.guess(cell).unwrap();
            b.guess(cell).unwrap();
            assert_eq!(a.probability_map(), b.probability_map());
            assert_eq!(a.beliefs(), b.beliefs());
        }
    }
    assert!(plain.miss_cache().is_empty());
    assert!(cached.miss_cache().stats().hits > 0);
}

#[test]
fn test_miss_count_shares_maps_across_miss_sets() {
    let s = space(CachePolicy::MissCount);
    // Neither cell is part of board 0.
    let mut a = BeliefEngine::for_board(&s, 0, Strategy::Median).unwrap();
    a.guess(3).unwrap();
    let mut b = BeliefEngine::for_board(&s, 0, Strategy::Median).unwrap();
    b.guess(4).unwrap();

    assert_eq!(a.probability_map(), b.probability_map());
    assert_eq!(b.probability_map().get(3), Some(0.0));
    // The beliefs themselves stay exact.
    assert_ne!(a.beliefs(), b.beliefs());
}

#[test]
fn test_disabled_and_random_strategies_bypass_the_cache() {
    let s = space(CachePolicy::Disabled);
    let mut rng = SmallRng::seed_from_u64(9);
    let mut engine = BeliefEngine::for_board(&s, 3, Strategy::Median).unwrap();
    engine.autoplay(&mut rng).unwrap();
    assert_eq!(s.miss_cache().stats(), CacheStats::default());

    let s = space(CachePolicy::MissSet);
    for strategy in [Strategy::RandomTracked, Strategy::RandomUntracked] {
        let mut engine = BeliefEngine::for_board(&s, 3, strategy).unwrap();
        engine.autoplay(&mut rng).unwrap();
    }
    assert!(s.miss_cache().is_empty());
}

#[test]
fn test_miss_keys() {
    let misses = BitSet::from_indices(9, [2, 4]).unwrap();
    assert_eq!(MissKey::for_policy(CachePolicy::Disabled, &misses), None);
    assert_eq!(
        MissKey::for_policy(CachePolicy::MissCount, &misses),
        Some(MissKey::Count(2))
    );
    assert_eq!(
        MissKey::for_policy(CachePolicy::MissSet, &misses),
        Some(MissKey::Cells(misses.clone()))
    );
    assert_eq!(CachePolicy::default(), CachePolicy::MissSet);
}
