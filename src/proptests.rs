//! Property tests that run the map against a plain vector of entries.
//!
//! The vector mirrors the map's array order exactly: appends on insert and
//! swap-removes on removal. Every operation checks both the observable
//! results and the table's structural invariants.

use alloc::vec::Vec;
use core::hash::BuildHasher;
use core::hash::Hasher;

use proptest::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::DefaultHashBuilder;
use crate::HashMap;

/// Gives each pair of adjacent keys the same hash, so lookups have to compare
/// keys as well as cached hashes.
#[derive(Clone, Default)]
struct PairedHashBuilder;

#[derive(Default)]
struct PairedHasher {
    state: u64,
}

impl Hasher for PairedHasher {
    fn finish(&self) -> u64 {
        // splitmix64 finalizer
        let mut z = (self.state >> 1).wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state << 8) | u64::from(byte);
        }
    }

    fn write_u16(&mut self, i: u16) {
        self.state = u64::from(i);
    }
}

impl BuildHasher for PairedHashBuilder {
    type Hasher = PairedHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PairedHasher::default()
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, i32),
    Set(u16, i32),
    Remove(u16),
    Delete(u16),
    Get(u16),
    PopItem,
    GetOrInsert(u16, i32),
    Retain(u16),
    Clear,
    Reserve(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let key = 0u16..300;
    prop_oneof![
        6 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => key.clone().prop_map(Op::Remove),
        2 => key.clone().prop_map(Op::Delete),
        3 => key.clone().prop_map(Op::Get),
        1 => Just(Op::PopItem),
        2 => (key, any::<i32>()).prop_map(|(k, v)| Op::GetOrInsert(k, v)),
        1 => (2u16..7).prop_map(Op::Retain),
        1 => Just(Op::Clear),
        1 => any::<u8>().prop_map(Op::Reserve),
    ]
}

fn position(model: &[(u16, i32)], key: u16) -> Option<usize> {
    model.iter().position(|&(k, _)| k == key)
}

fn run_ops<S: BuildHasher>(
    mut map: HashMap<u16, i32, S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<(u16, i32)> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let expected = match position(&model, k) {
                    Some(pos) => Some(core::mem::replace(&mut model[pos].1, v)),
                    None => {
                        model.push((k, v));
                        None
                    }
                };
                prop_assert_eq!(map.insert(k, v), expected);
            }
            Op::Set(k, v) => {
                let expected = match position(&model, k) {
                    Some(pos) => Some(core::mem::replace(&mut model[pos].1, v)),
                    None => {
                        model.push((k, v));
                        None
                    }
                };
                prop_assert_eq!(map.set(k, v), Ok(expected));
            }
            Op::Remove(k) => {
                let expected = position(&model, k).map(|pos| model.swap_remove(pos).1);
                prop_assert_eq!(map.remove(&k), expected);
            }
            Op::Delete(k) => {
                let expected = position(&model, k)
                    .map(|pos| model.swap_remove(pos).1)
                    .ok_or(crate::Error::NotFound);
                prop_assert_eq!(map.delete(&k), expected);
            }
            Op::Get(k) => {
                let expected = position(&model, k).map(|pos| &model[pos].1);
                prop_assert_eq!(map.get(&k), expected);
                prop_assert_eq!(map.contains_key(&k), expected.is_some());
            }
            Op::PopItem => {
                prop_assert_eq!(map.pop_item(), model.pop());
            }
            Op::GetOrInsert(k, v) => {
                let expected = match position(&model, k) {
                    Some(pos) => model[pos].1,
                    None => {
                        model.push((k, v));
                        v
                    }
                };
                prop_assert_eq!(*map.get_or_insert(k, v), expected);
            }
            Op::Retain(modulus) => {
                for index in (0..model.len()).rev() {
                    if model[index].0 % modulus == 0 {
                        model.swap_remove(index);
                    }
                }
                map.retain(|k, _| k % modulus != 0);
            }
            Op::Clear => {
                model.clear();
                map.clear();
                prop_assert_eq!(map.capacity(), 8);
            }
            Op::Reserve(additional) => {
                map.reserve(usize::from(additional));
                prop_assert!((map.len() + usize::from(additional)) * 5 < map.capacity() * 4);
            }
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert_eq!(map.check_invariants(), Ok(()));
        let entries: Vec<(u16, i32)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&entries, &model);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_matches_entry_vector(ops in proptest::collection::vec(arb_op(), 1..300)) {
        run_ops(HashMap::<u16, i32, DefaultHashBuilder>::new(), ops)?;
    }

    #[test]
    fn prop_matches_with_shared_hashes(ops in proptest::collection::vec(arb_op(), 1..300)) {
        run_ops(HashMap::with_hasher(PairedHashBuilder), ops)?;
    }

    #[test]
    fn prop_from_iter_keeps_last_value(pairs in proptest::collection::vec((0u16..64, any::<i32>()), 0..200)) {
        let map: HashMap<u16, i32, PairedHashBuilder> = pairs.iter().copied().collect();
        for &(key, _) in &pairs {
            let last = pairs.iter().rev().find(|&&(k, _)| k == key).map(|&(_, v)| v);
            prop_assert_eq!(map.get(&key).copied(), last);
        }
        prop_assert_eq!(map.check_invariants(), Ok(()));
    }
}

#[test]
fn random_keys_survive_growth_and_deletion() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let keys: Vec<u64> = (0..1000).map(|_| rng.random()).collect();

    let mut map: HashMap<u64, u64> = HashMap::new();
    for (value, &key) in keys.iter().enumerate() {
        map.insert(key, value as u64);
    }
    assert_eq!(map.len(), 1000);
    map.check_invariants().unwrap();

    for &key in &keys[..500] {
        assert!(map.delete(&key).is_ok());
    }
    assert_eq!(map.len(), 500);
    map.check_invariants().unwrap();

    for (value, key) in keys.iter().enumerate() {
        let expected = (value >= 500).then_some(value as u64);
        assert_eq!(map.get(key).copied(), expected);
    }
}
