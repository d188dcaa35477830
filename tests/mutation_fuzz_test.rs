//! Random mutation sequences must never break the arena's structural invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use treebox::domain::{NodeId, TreeArena, TreeError};

const NODES: usize = 24;
const STEPS: usize = 2_000;

fn assert_consistent(arena: &TreeArena<usize>, ids: &[NodeId]) {
    for &idx in ids {
        if let Some(parent) = arena.parent(idx).unwrap() {
            let listed = arena
                .children(parent)
                .unwrap()
                .iter()
                .filter(|&&c| c == idx)
                .count();
            assert_eq!(listed, 1, "{idx:?} listed {listed} times under its parent");
        }
        for &child in arena.children(idx).unwrap() {
            assert_eq!(arena.parent(child).unwrap(), Some(idx));
        }
        // a cycle would make the ancestor walk exceed the node count
        let hops = arena.ancestors(idx).unwrap().take(ids.len() + 1).count();
        assert!(hops < ids.len(), "{idx:?} sits on a cycle");
    }
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(1337)]
fn given_random_mutations_when_applied_then_invariants_hold(#[case] seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut arena = TreeArena::new();
    let ids: Vec<NodeId> = (0..NODES).map(|i| arena.insert(i)).collect();

    for _ in 0..STEPS {
        let a = ids[rng.gen_range(0..NODES)];
        let b = ids[rng.gen_range(0..NODES)];

        let would_cycle = a == b || arena.is_descendant_of(a, b).unwrap();
        match rng.gen_range(0..4) {
            0 => {
                let result = arena.add_child(a, b);
                assert_eq!(result.is_err(), would_cycle);
            }
            1 => {
                let result = arena.set_parent(b, Some(a));
                assert_eq!(result.is_err(), would_cycle);
                if result.is_ok() {
                    assert!(arena.is_child_of(b, a).unwrap());
                }
            }
            2 => {
                arena.remove_child(a, b).unwrap();
                assert!(!arena.is_child_of(b, a).unwrap());
            }
            _ => {
                arena.set_parent(b, None).unwrap();
                assert!(arena.is_root(b).unwrap());
            }
        }

        assert_consistent(&arena, &ids);
    }
}

#[test]
fn given_rejected_attach_when_checking_tree_then_unchanged() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut arena = TreeArena::new();
    let ids: Vec<NodeId> = (0..NODES).map(|i| arena.insert(i)).collect();

    // random tree: every node hangs below an earlier one
    for i in 1..NODES {
        let parent = ids[rng.gen_range(0..i)];
        arena.add_child(parent, ids[i]).unwrap();
    }
    let snapshot: Vec<(Option<NodeId>, Vec<NodeId>)> = ids
        .iter()
        .map(|&idx| {
            (
                arena.parent(idx).unwrap(),
                arena.children(idx).unwrap().to_vec(),
            )
        })
        .collect();

    let root = ids[0];
    for &idx in &ids[1..] {
        assert!(matches!(
            arena.add_child(idx, root),
            Err(TreeError::CyclicReference { .. })
        ));
    }

    for (position, &idx) in ids.iter().enumerate() {
        assert_eq!(arena.parent(idx).unwrap(), snapshot[position].0);
        assert_eq!(arena.children(idx).unwrap(), snapshot[position].1.as_slice());
    }
}
