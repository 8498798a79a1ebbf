#![cfg(test)]

// Property tests for BucketTable kept inside the crate so they can reach the
// engine directly.

use crate::bucket_table::{BucketTable, INITIAL_CAPACITY_EXPONENT};
use crate::hasher::SlotBuildHasher;
use core::hash::BuildHasher;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Find(usize),
    Contains(String),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Find),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs `ops` against the table and a hashbrown model, checking after each op:
// - `insert` reports a replace exactly when the model already had the key.
// - `find`/`remove` agree with the model; a removed key is gone.
// - `iter` yields each live entry exactly once.
// - `len` equals the model size, `capacity == 2^c - 1`, and `c` never drops.
fn run_state_machine<S: BuildHasher>(
    mut sut: BucketTable<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut last_exponent = sut.capacity_exponent();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.insert(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                prop_assert_eq!(sut.find(&k).map(|e| *e.value()), Some(v));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let removed = sut.remove(&k);
                prop_assert_eq!(removed.map(|(_, v)| v), model.remove(&k));
                prop_assert!(sut.find(&k).is_none());
            }
            OpI::Find(i) => {
                let k = key_from(pool, i);
                let found = sut.find(&k).map(|e| (e.key().clone(), *e.value()));
                prop_assert_eq!(found, model.get(&k).map(|v| (k.clone(), *v)));
            }
            OpI::Contains(s) => {
                let has = sut.find(s.as_str()).is_some();
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Iterate => {
                let entries: Vec<(Key, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let s_keys: BTreeSet<_> = entries.iter().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(s_keys.len(), entries.len(), "no entry yielded twice");
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                for (k, v) in &entries {
                    prop_assert_eq!(Some(v), model.get(k));
                }
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.iter().len(), model.len());
        prop_assert!(sut.capacity_exponent() >= last_exponent);
        prop_assert_eq!(sut.capacity(), (1usize << sut.capacity_exponent()) - 1);
        last_exponent = sut.capacity_exponent();
    }
    Ok(())
}

// Property: state-machine equivalence with the deterministic default hasher.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(BucketTable::with_hasher(SlotBuildHasher), &pool, ops)?;
    }
}

// Property: same invariants with hashbrown's ahash-based hasher. Collisions
// show up at arbitrary points, exercising growth mid-sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_ahash((pool, ops) in arb_scenario()) {
        let hasher = hashbrown::hash_map::DefaultHashBuilder::default();
        run_state_machine(BucketTable::with_hasher(hasher), &pool, ops)?;
    }
}

// Property: growth preserves data. Integer keys below 8191 can never collide
// once `c` reaches 13, which bounds growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_latest_values(
        writes in proptest::collection::vec((0u32..8191, any::<u16>()), 1..400)
    ) {
        let mut sut: BucketTable<u32, u16, _> = BucketTable::with_hasher(SlotBuildHasher);
        let mut model: HashMap<u32, u16> = HashMap::new();
        for (k, v) in writes {
            sut.insert(k, v);
            model.insert(k, v);
        }
        prop_assert!(sut.capacity_exponent() >= INITIAL_CAPACITY_EXPONENT);
        prop_assert!(sut.capacity_exponent() <= 13);
        prop_assert_eq!(sut.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(sut.find(k).map(|e| *e.value()), Some(*v));
        }
        let grew = model.keys().any(|&k| {
            model.keys().any(|&j| j != k && j % 1023 == k % 1023)
        });
        prop_assert_eq!(grew, sut.capacity_exponent() > INITIAL_CAPACITY_EXPONENT);
    }
}

// Property: two-field keys under the default hasher. The field ranges
// include pairs like (1, 0) and (0, 32) whose bits shift into each other.
// Every key in this domain is collision-free at every exponent from 12 up,
// so the table can never pass 12.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_tuple_keys(
        ops in proptest::collection::vec(
            (any::<bool>(), (0u16..4, 0u16..128), any::<i32>()),
            1..120,
        )
    ) {
        let mut sut: BucketTable<(u16, u16), i32, _> = BucketTable::with_hasher(SlotBuildHasher);
        let mut model: HashMap<(u16, u16), i32> = HashMap::new();

        for (insert, k, v) in ops {
            if insert {
                prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
            } else {
                prop_assert_eq!(sut.remove(&k).map(|(_, v)| v), model.remove(&k));
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(sut.capacity_exponent() <= 12);
        }
        for (k, v) in &model {
            prop_assert_eq!(sut.find(k).map(|e| *e.value()), Some(*v));
        }
    }
}
