#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// slot-level invariants that the public API does not expose.

use crate::hash_table::{HashTable, MIN_BASE_SIZE};
use crate::prime::is_prime;
use proptest::prelude::*;
use std::collections::HashMap;

// Ops name keys by index into a pool of distinct lowercase keys (up to 200),
// so a sequence revisits the same keys often enough to overwrite, delete and
// re-insert them across grows and shrinks.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Delete(usize),
    Search(usize),
    SearchAbsent(String),
}

fn arb_scenario(max_pool: usize) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::hash_set("[a-z]{0,6}", 1..=max_pool).prop_flat_map(|pool| {
        let pool: Vec<String> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), "[0-9]{0,3}").prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::Search),
            1 => "[A-Z]{1,4}".prop_map(OpI::SearchAbsent),
        ];
        proptest::collection::vec(op, 1..300).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences, including ones
// large enough to grow and then shrink the table:
// - `search` returns the most recent value for live keys and `None` otherwise.
// - Overwrites leave `len` unchanged; deletes of absent keys are no-ops.
// - After every op: capacity is prime and >= the floor, every occupied key
//   is reachable along its probe sequence, no key is stored twice.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(120)) {
        let mut sut = HashTable::new();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let before = sut.len();
                    let existed = model.insert(k.clone(), v.clone()).is_some();
                    sut.insert(k, &v);
                    if existed {
                        prop_assert_eq!(sut.len(), before, "overwrite must not change len");
                    }
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    model.remove(k);
                    sut.delete(k);
                    prop_assert!(sut.search(k).is_none());
                }
                OpI::Search(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.search(k), model.get(k).map(String::as_str));
                }
                OpI::SearchAbsent(s) => {
                    // Pool keys are lowercase, so uppercase probes always miss.
                    prop_assert!(sut.search(&s).is_none());
                }
            }

            sut.check_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert!(is_prime(sut.capacity()).is_prime());
            prop_assert!(sut.capacity() >= MIN_BASE_SIZE);
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.search(k), Some(v.as_str()));
        }
    }
}

// Property: the observable contents are identical immediately before and
// after every resize the load thresholds trigger, and no tombstone survives
// a resize.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_resize_preserves_contents((pool, ops) in arb_scenario(200)) {
        let mut sut = HashTable::new();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            let capacity = sut.capacity();
            match op {
                OpI::Insert(i, v) => {
                    sut.insert(&pool[i], &v);
                    model.insert(pool[i].clone(), v);
                }
                OpI::Delete(i) => {
                    sut.delete(&pool[i]);
                    model.remove(&pool[i]);
                }
                OpI::Search(_) | OpI::SearchAbsent(_) => continue,
            }
            if sut.capacity() != capacity {
                // Only the op's own key can have changed; everything else
                // must have survived the rebuild.
                for (k, v) in &model {
                    prop_assert_eq!(sut.search(k), Some(v.as_str()));
                }
                for k in pool.iter().filter(|k| !model.contains_key(*k)) {
                    prop_assert!(sut.search(k).is_none());
                }
                prop_assert!(sut.tombstones() <= 1, "at most the op's own delete");
            }
        }
    }
}
