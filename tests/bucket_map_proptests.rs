// BucketMap property tests against the public API.
//
// Property 1: set/get/delete equivalence with a reference map.
//  - Model: hashbrown HashMap.
//  - Invariants after every op: get agrees with the model (value or
//    KeyNotFound), get_or falls back only on absence, len equals the
//    number of distinct keys set minus those deleted, and iter yields the
//    model's entries exactly once.
//
// Property 2: growth preserves the most recent value for every key,
// whatever the number of growths in between.
use bucket_map::{BucketMap, MapError, INITIAL_CAPACITY_EXPONENT};
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Set(u16, i64),
    Get(u16),
    Delete(u16),
}

fn arb_op() -> impl Strategy<Value = Op> {
    // A key space wider than the initial table makes collisions likely.
    prop_oneof![
        4 => (0u16..3000, any::<i64>()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => (0u16..3000).prop_map(Op::Get),
        2 => (0u16..3000).prop_map(Op::Delete),
    ]
}

// Property 1: state-machine equivalence with a reference map.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_reference_map(ops in proptest::collection::vec(arb_op(), 1..200)) {
        let mut sut: BucketMap<u16, i64> = BucketMap::new();
        let mut model: HashMap<u16, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    sut.set(k, v);
                    model.insert(k, v);
                    prop_assert_eq!(sut.get(&k), Ok(&v));
                }
                Op::Get(k) => {
                    prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                    let fallback = i64::MIN;
                    let expected = model.get(&k).unwrap_or(&fallback);
                    prop_assert_eq!(sut.get_or(&k, &fallback), expected);
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                Op::Delete(k) => match model.remove(&k) {
                    Some(v) => {
                        prop_assert_eq!(sut.delete(&k), Ok(v));
                        prop_assert_eq!(sut.get(&k), Err(MapError::KeyNotFound));
                        prop_assert!(sut.keys().all(|&other| other != k));
                    }
                    None => {
                        prop_assert_eq!(sut.delete(&k), Err(MapError::KeyNotFound));
                    }
                },
            }
            prop_assert_eq!(sut.len(), model.len());
        }

        let seen: BTreeMap<u16, i64> = sut.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(seen.len(), sut.iter().count());
        let expected: BTreeMap<u16, i64> = model.into_iter().collect();
        prop_assert_eq!(seen, expected);
    }
}

// Property 2: growth preserves data.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_data(
        writes in proptest::collection::vec((0u32..6000, ".{0,4}"), 1..300)
    ) {
        let mut sut: BucketMap<u32, String> = BucketMap::new();
        let mut latest: HashMap<u32, String> = HashMap::new();
        for (k, v) in writes {
            sut.set(k, v.clone());
            latest.insert(k, v);
        }
        prop_assert!(sut.capacity_exponent() >= INITIAL_CAPACITY_EXPONENT);
        prop_assert_eq!(sut.capacity(), (1usize << sut.capacity_exponent()) - 1);
        prop_assert_eq!(sut.len(), latest.len());
        for (k, v) in &latest {
            prop_assert_eq!(sut.get(k), Ok(v));
        }
    }
}
