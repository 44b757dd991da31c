#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// the bucket array directly.

use crate::config::TableConfig;
use crate::hash_table::HashTable;
use crate::prime::{is_prime, Primality};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, u16),
    Delete(usize),
    Search(usize),
    Contains(String),
}

fn arb_scenario(pool_len: usize) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=pool_len).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<u16>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Search),
            1 => "[a-z]{0,6}".prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_structure(sut: &HashTable) -> Result<(), TestCaseError> {
    let keys = sut.occupied_keys();
    let unique: BTreeSet<&str> = keys.iter().copied().collect();
    prop_assert_eq!(unique.len(), keys.len(), "duplicate key in bucket array");
    prop_assert_eq!(keys.len(), sut.len(), "count must equal occupied slots");
    prop_assert_eq!(is_prime(sut.capacity()), Primality::Prime);
    prop_assert!(sut.capacity() >= sut.config().min_base_size);
    prop_assert!(sut.base_size() >= sut.config().min_base_size);
    Ok(())
}

fn run_scenario(
    mut sut: HashTable,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, String> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let v = v.to_string();
                let prev = sut.insert(k, &v).expect("insert");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                let removed = sut.delete(k).expect("delete");
                prop_assert_eq!(removed, model.remove(k));
                prop_assert!(sut.search(k).is_none());
            }
            OpI::Search(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.search(k), model.get(k).map(String::as_str));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
        }

        // Post-conditions after each op
        check_structure(&sut)?;
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }

    // Every key the model holds is found, and nothing else in the pool is.
    for k in &pool {
        prop_assert_eq!(sut.search(k), model.get(k).map(String::as_str));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the previous value exactly when the model had one.
// - delete returns the removed value and the key is gone afterwards.
// - search/contains_key agree with the model, across tombstones and resizes.
// - count equals occupied slots; no duplicate keys; capacity stays prime.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(8)) {
        run_scenario(HashTable::new(), pool, ops)?;
    }

    // A larger pool pushes the table through several grow/shrink cycles.
    #[test]
    fn prop_state_machine_with_resizes((pool, ops) in arb_scenario(64)) {
        run_scenario(HashTable::new(), pool, ops)?;
    }

    // The smallest legal table: two slots, growing past 50% load. Every
    // probe chain covers the whole array, so tombstones pile up fast.
    #[test]
    fn prop_state_machine_tiny_table((pool, ops) in arb_scenario(6)) {
        let config = TableConfig::new()
            .with_initial_base_size(2)
            .with_min_base_size(2)
            .with_grow_above_percent(50)
            .with_shrink_below_percent(20);
        let sut = HashTable::with_config(config).expect("valid config");
        run_scenario(sut, pool, ops)?;
    }
}
