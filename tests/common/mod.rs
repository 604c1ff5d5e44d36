// Shared by several test binaries, each of which uses only some of these helpers.
#![allow(dead_code)]

#[cfg(feature = "bench")]
pub mod bench;

pub use sapling::*;

use proptest::prelude::*;
use rand::{self, Rng};
use std::collections::BTreeSet;
use std::iter::FromIterator;

/// Keys are drawn from `-MAX_KEY..=MAX_KEY`, so that repeated keys come up often.
pub const MAX_KEY: i32 = 300;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { key: i32 },
    Remove { key: i32 },
    Query { key: i32 },
}

/// Sends the trees' logs to the test harness. Only the first call installs the logger.
pub fn init_logger() {
    let _ = simplelog::TestLogger::init(log::LevelFilter::Debug, simplelog::Config::default());
}

pub fn random_round_action(rng: &mut rand::rngs::ThreadRng) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(-MAX_KEY..=MAX_KEY);
    match rng.gen_range(0..3) {
        0 => Insert { key },
        1 => Remove { key },
        2 => Query { key },
        _ => panic!(),
    }
}

/// Performs the action, and returns what the tree answered.
pub fn run_round<T: SearchTree<i32>>(round_action: &RoundAction, tree: &mut T) -> bool {
    match *round_action {
        RoundAction::Insert { key } => tree.insert(key),
        RoundAction::Remove { key } => tree.remove(&key),
        RoundAction::Query { key } => tree.contains(&key),
    }
}

/// Performs the action on a [`BTreeSet`], which the trees should agree with.
pub fn run_round_on_model(round_action: &RoundAction, model: &mut BTreeSet<i32>) -> bool {
    match *round_action {
        RoundAction::Insert { key } => model.insert(key),
        RoundAction::Remove { key } => model.remove(&key),
        RoundAction::Query { key } => model.contains(&key),
    }
}

fn keys<T: SearchTree<i32>>(tree: &T) -> Vec<i32> {
    tree.in_order().into_iter().cloned().collect()
}

const INITIAL_SIZE: i32 = 200;

/// Runs random rounds on two trees and on a [`BTreeSet`], and checks that they all agree.
pub fn check_consistency<T1, T2>(num_rounds: u32)
where
    T1: SearchTree<i32> + FromIterator<i32>,
    T2: SearchTree<i32> + FromIterator<i32>,
{
    init_logger();
    let mut rng = rand::thread_rng();

    let range = -INITIAL_SIZE / 2..INITIAL_SIZE / 2;
    let mut tree1: T1 = range.clone().collect();
    let mut tree2: T2 = range.clone().collect();
    let mut model: BTreeSet<i32> = range.collect();

    for _ in 0..num_rounds {
        let round_action = random_round_action(&mut rng);
        let res1 = run_round(&round_action, &mut tree1);
        let res2 = run_round(&round_action, &mut tree2);
        let expected = run_round_on_model(&round_action, &mut model);
        assert_eq!(res1, expected, "{:?}", round_action);
        assert_eq!(res2, expected, "{:?}", round_action);
        assert_eq!(tree1.len(), model.len());
        assert_eq!(tree2.len(), model.len());

        // This check takes `O(n)` time. However, since the trees aren't so big in this test
        // (at most `2 * MAX_KEY + 1` keys) the check doesn't take too long.
        tree1.assert_correctness();
        tree2.assert_correctness();
    }
    let expected: Vec<i32> = model.into_iter().collect();
    assert_eq!(keys(&tree1), expected);
    assert_eq!(keys(&tree2), expected);
}

/// Like [`check_consistency`], but with the rounds given by proptest.
pub fn check_consistency_proptest<T1, T2>(
    initial: &[i32],
    actions: &[RoundAction],
) -> Result<(), TestCaseError>
where
    T1: SearchTree<i32> + FromIterator<i32>,
    T2: SearchTree<i32> + FromIterator<i32>,
{
    let mut tree1: T1 = initial.iter().cloned().collect();
    let mut tree2: T2 = initial.iter().cloned().collect();
    let mut model: BTreeSet<i32> = initial.iter().cloned().collect();

    for round_action in actions {
        let res1 = run_round(round_action, &mut tree1);
        let res2 = run_round(round_action, &mut tree2);
        let expected = run_round_on_model(round_action, &mut model);
        prop_assert_eq!(res1, expected);
        prop_assert_eq!(res2, expected);
        prop_assert_eq!(tree1.len(), model.len());
        prop_assert!(tree1.check_invariants().is_ok(), "{:?}", tree1.check_invariants());
        prop_assert!(tree2.check_invariants().is_ok(), "{:?}", tree2.check_invariants());
    }

    let expected: Vec<i32> = model.into_iter().collect();
    prop_assert_eq!(keys(&tree1), expected.clone());
    prop_assert_eq!(keys(&tree2), expected);
    Ok(())
}

/// Removes every key in turn from a fresh tree, and checks the rest is intact.
pub fn check_delete<T>()
where
    T: SearchTree<i32> + FromIterator<i32>,
{
    let arr: Vec<i32> = (0..200).collect();
    for i in 0..arr.len() {
        let mut tree: T = arr.iter().cloned().collect();
        assert!(tree.remove(&arr[i]));
        assert!(!tree.contains(&arr[i]));
        tree.assert_correctness();
        assert_eq!(tree.len(), arr.len() - 1);
        assert_eq!(
            keys(&tree),
            arr[..i]
                .iter()
                .chain(arr[i + 1..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );
    }
}

/// Inserts a key into every gap of a fresh tree, checks it lands in place,
/// then removes it again.
pub fn check_insert<T>()
where
    T: SearchTree<i32> + FromIterator<i32>,
{
    let arr: Vec<i32> = (0..200).map(|x| 2 * x).collect();
    for i in 0..=arr.len() {
        let new_key = 2 * i as i32 - 1;
        let mut tree: T = arr.iter().cloned().collect();
        assert!(tree.insert(new_key));
        assert!(!tree.insert(new_key));
        assert!(tree.contains(&new_key));
        tree.assert_correctness();
        assert_eq!(
            keys(&tree),
            arr[..i]
                .iter()
                .chain([new_key].iter())
                .chain(arr[i..].iter())
                .cloned()
                .collect::<Vec<_>>()
        );

        // removing the new key restores the original tree's contents
        assert!(tree.remove(&new_key));
        tree.assert_correctness();
        assert_eq!(tree.len(), arr.len());
        assert_eq!(keys(&tree), arr);
    }
}
