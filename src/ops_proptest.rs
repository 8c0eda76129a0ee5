#![cfg(test)]

// Property tests for the map operations kept inside the crate so they can
// exercise the layers together without feature gates.

use crate::merge::MergeRange;
use crate::policy::{CollisionPolicy, PolicyAdd};
use crate::range::RangeSlice;
use crate::rename::{RenameKey, DEFAULT_RENAMED_KEY_SUFFIX};
use crate::search::KeySearch;
use crate::ticks::SequenceTicks;
use crate::upsert::Upsert;
use indexmap::IndexMap;
use proptest::prelude::*;

type Model = Vec<(String, i32)>;

fn model_upsert(model: &mut Model, key: &str, value: i32) {
    match model.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value,
        None => model.push((key.to_string(), value)),
    }
}

fn model_contains(model: &Model, key: &str) -> bool {
    model.iter().any(|(k, _)| k == key)
}

fn pairs(map: &IndexMap<String, i32>) -> Model {
    map.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    AddOrUpdate(usize, i32),
    TryAdd(usize, i32),
    TryAddUpdate(usize, i32),
    PolicyTryAdd(usize, i32),
    PolicyUpdate(usize, i32),
    MergeBatch(Vec<(usize, i32)>, bool),
    SliceRange(usize, usize),
    SkipFirst(usize),
    Search(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let batch = proptest::collection::vec((idx.clone(), any::<i32>()), 0..5);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::AddOrUpdate(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryAdd(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryAddUpdate(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::PolicyTryAdd(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::PolicyUpdate(i, v)),
            (batch, any::<bool>()).prop_map(|(b, u)| OpI::MergeBatch(b, u)),
            (0usize..10, 0usize..10).prop_map(|(i, c)| OpI::SliceRange(i, c)),
            (0usize..10).prop_map(OpI::SkipFirst),
            "[a-z]{0,3}".prop_map(OpI::Search),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against an insertion-ordered
// Vec<(K, V)> model. Invariants exercised across random operation sequences:
// - Upserts overwrite in place; blocked try-adds leave the map unchanged.
// - Policy dispatch agrees with the basic upsert primitives.
// - Merges are atomic-or-nothing without the update flag.
// - slice_range/skip_first succeed exactly when the model says the positions
//   are valid and reproduce the model slice in order.
// - Search agrees with a naive filter over the model.
// - Key order and length parity with the model hold after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: IndexMap<String, i32> = IndexMap::new();
        let mut model: Model = Vec::new();

        for op in ops {
            match op {
                OpI::AddOrUpdate(i, v) => {
                    sut.add_or_update(pool[i].clone(), v);
                    model_upsert(&mut model, &pool[i], v);
                }
                OpI::TryAdd(i, v) => {
                    let ok = sut.try_add_or_update(pool[i].clone(), v, false);
                    prop_assert_eq!(ok, !model_contains(&model, &pool[i]));
                    if ok {
                        model.push((pool[i].clone(), v));
                    }
                }
                OpI::TryAddUpdate(i, v) => {
                    prop_assert!(sut.try_add_or_update(pool[i].clone(), v, true));
                    model_upsert(&mut model, &pool[i], v);
                }
                OpI::PolicyTryAdd(i, v) => {
                    let applied = sut.add_with_policy(pool[i].clone(), v, CollisionPolicy::TryAdd);
                    if model_contains(&model, &pool[i]) {
                        prop_assert_eq!(applied, None);
                    } else {
                        prop_assert_eq!(applied.as_deref(), Some(pool[i].as_str()));
                        model.push((pool[i].clone(), v));
                    }
                }
                OpI::PolicyUpdate(i, v) => {
                    let applied = sut.add_with_policy(pool[i].clone(), v, CollisionPolicy::Update);
                    prop_assert_eq!(applied.as_deref(), Some(pool[i].as_str()));
                    model_upsert(&mut model, &pool[i], v);
                }
                OpI::MergeBatch(batch, update) => {
                    let mut source: IndexMap<String, i32> = IndexMap::new();
                    for (i, v) in &batch {
                        source.insert(pool[*i].clone(), *v);
                    }
                    let collides = source.keys().any(|k| model_contains(&model, k));
                    let ok = sut.try_add_range_or_update(Some(&source), update);
                    if update || !collides {
                        prop_assert!(ok);
                        for (k, v) in &source {
                            model_upsert(&mut model, k, *v);
                        }
                    } else {
                        prop_assert!(!ok, "collision without update flag must abort");
                    }
                }
                OpI::SliceRange(index, count) => {
                    let res = sut.slice_range(index, count);
                    let valid = index < model.len() && model.len() - index >= count;
                    prop_assert_eq!(res.is_ok(), valid);
                    if let Ok(ranged) = res {
                        prop_assert_eq!(pairs(&ranged), model[index..index + count].to_vec());
                    }
                }
                OpI::SkipFirst(n) => {
                    let res = sut.skip_first(n);
                    prop_assert_eq!(res.is_ok(), n <= model.len());
                    if let Ok(rest) = res {
                        prop_assert_eq!(pairs(&rest), model[n.min(model.len())..].to_vec());
                    }
                }
                OpI::Search(pattern) => {
                    let expected: Model = model
                        .iter()
                        .filter(|(k, _)| k.to_lowercase().contains(&pattern.to_lowercase()))
                        .cloned()
                        .collect();
                    match sut.find_by_key_contains_pattern(&pattern, &[]) {
                        Some(found) => prop_assert_eq!(pairs(&found), expected),
                        None => prop_assert!(expected.is_empty()),
                    }
                }
            }

            // Post-conditions after each op: order and length parity.
            prop_assert_eq!(pairs(&sut), model.clone());
        }
    }
}

// Expected candidate chain for a scripted tick source starting at `start`
// with step 1: key, key + suffix, then one `_{tick}` extension per retry.
fn candidates(key: &str, upto: usize, start: u64) -> Vec<String> {
    let mut out = Vec::with_capacity(upto + 1);
    let mut current = key.to_string();
    let mut suffix = DEFAULT_RENAMED_KEY_SUFFIX.to_string();
    let mut tick = start;
    out.push(current.clone());
    for _ in 0..upto {
        current.push_str(&suffix);
        suffix = format!("_{tick}");
        tick += 1;
        out.push(current.clone());
    }
    out
}

// Property: the rename engine, driven by a scripted tick source, probes
// exactly `retry_attempts + 1` candidates in chain order: it succeeds on the
// first unseeded candidate and fails (mutation-free) when every candidate
// within the budget is seeded.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_rename_chain(
        key in "[a-z]{1,6}",
        seeded_len in 0usize..=6,
        retry_attempts in 1usize..=5,
    ) {
        let chain = candidates(&key, 8, 1000);
        let mut sut: IndexMap<String, i32> = chain[..seeded_len]
            .iter()
            .map(|k| (k.clone(), 0))
            .collect();
        let before = pairs(&sut);

        let ticks = SequenceTicks::new(1000, 1);
        let applied = sut
            .add_or_rename_key_with(key.clone(), 42, None, retry_attempts, &ticks)
            .expect("budget is within range");

        if seeded_len <= retry_attempts {
            // First free candidate is chain[seeded_len].
            prop_assert_eq!(applied.as_deref(), Some(chain[seeded_len].as_str()));
            prop_assert_eq!(sut.len(), seeded_len + 1);
            prop_assert_eq!(sut.get(chain[seeded_len].as_str()), Some(&42));
        } else {
            prop_assert_eq!(applied, None);
            prop_assert_eq!(pairs(&sut), before);
        }
    }
}
