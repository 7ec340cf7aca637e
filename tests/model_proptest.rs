//! Model-based checks: the container must agree with a plain `Vec` driven
//! by the same operations, and earlier snapshots must stay frozen as the
//! run continues past them.

use proptest::prelude::*;
use snapvec::{SnapVec, Snapshot};

#[derive(Clone, Debug)]
enum Op {
    PushFront(u8),
    PushBack(u8),
    RemoveAll(u8),
    RemoveFirst(u8),
    RemoveLast(u8),
    Clear,
    Snapshot,
}

// Values stay in a tiny domain so removals collide with real elements.
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..8).prop_map(Op::PushFront),
        5 => (0u8..8).prop_map(Op::PushBack),
        2 => (0u8..8).prop_map(Op::RemoveAll),
        2 => (0u8..8).prop_map(Op::RemoveFirst),
        2 => (0u8..8).prop_map(Op::RemoveLast),
        1 => Just(Op::Clear),
        2 => Just(Op::Snapshot),
    ]
}

proptest! {
    #[test]
    fn container_agrees_with_a_plain_vec(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let v: SnapVec<u8> = SnapVec::new();
        let mut model: Vec<u8> = Vec::new();
        let mut frozen: Vec<(Snapshot<u8>, Vec<u8>)> = Vec::new();

        for op in ops {
            match op {
                Op::PushFront(n) => {
                    v.push_front(n);
                    model.insert(0, n);
                }
                Op::PushBack(n) => {
                    v.push_back(n);
                    model.push(n);
                }
                Op::RemoveAll(n) => {
                    let removed = v.remove_all(|&m| m == n);
                    let before = model.len();
                    model.retain(|&m| m != n);
                    prop_assert_eq!(removed, before - model.len());
                }
                Op::RemoveFirst(n) => {
                    let removed = v.remove_first(|&m| m == n);
                    let expected = model.iter().position(|&m| m == n);
                    if let Some(pos) = expected {
                        model.remove(pos);
                    }
                    prop_assert_eq!(removed, expected.is_some());
                }
                Op::RemoveLast(n) => {
                    let removed = v.remove_last(|&m| m == n);
                    let expected = model.iter().rposition(|&m| m == n);
                    if let Some(pos) = expected {
                        model.remove(pos);
                    }
                    prop_assert_eq!(removed, expected.is_some());
                }
                Op::Clear => {
                    v.clear();
                    model.clear();
                }
                Op::Snapshot => {
                    frozen.push((v.snapshot(), model.clone()));
                }
            }
            let snap = v.snapshot();
            prop_assert_eq!(snap.as_slice(), model.as_slice());
            prop_assert_eq!(v.len(), model.len());
        }

        let collected: Vec<u8> = v.iter().collect();
        prop_assert_eq!(collected, model);

        for (snap, expected) in frozen {
            prop_assert_eq!(snap.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn searches_agree_with_slice_scans(
        values in prop::collection::vec(0u8..8, 0..32),
        needle in 0u8..8,
    ) {
        let v = SnapVec::from(values.clone());
        prop_assert_eq!(v.any(|&n| n == needle), values.contains(&needle));
        prop_assert_eq!(
            v.find_first(|&n| n == needle),
            values.iter().copied().find(|&n| n == needle),
        );
        prop_assert_eq!(
            v.find_last(|&n| n == needle),
            values.iter().copied().rev().find(|&n| n == needle),
        );
    }
}
