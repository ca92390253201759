//! Random append/pop/clear sequences checked step by step against a
//! `VecDeque` bounded to the same capacity.

use std::collections::VecDeque;

use proptest::prelude::*;
use sentinel_ring::{ByteRing, RingError, RingState};

const CASES: u32 = 512;

#[derive(Debug, Clone, Copy)]
enum Op {
    Append(u8),
    Pop,
    Clear,
}

/// Appends slightly outweigh pops so short runs reach both full and empty.
fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => any::<u8>().prop_map(Op::Append),
        4 => Just(Op::Pop),
        1 => Just(Op::Clear),
    ]
}

fn model_state(len: usize, capacity: usize) -> RingState {
    if len == 0 {
        RingState::Empty
    } else if len == capacity {
        RingState::Full
    } else {
        RingState::Partial
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(CASES))]

    #[test]
    fn sequence_matches_bounded_vecdeque(
        capacity in 0usize..12,
        ops in prop::collection::vec(op(), 1..200),
    ) {
        let mut ring = ByteRing::new(capacity);
        let mut model: VecDeque<u8> = VecDeque::with_capacity(capacity);

        for op in ops {
            let before = (ring.head(), ring.tail());
            match op {
                Op::Append(value) => {
                    let res = ring.append(value);
                    if model.len() == capacity {
                        prop_assert_eq!(res, Err(RingError::Full));
                        prop_assert_eq!((ring.head(), ring.tail()), before);
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.push_back(value);
                    }
                }
                Op::Pop => {
                    let res = ring.pop_front();
                    if let Some(value) = model.pop_front() {
                        prop_assert_eq!(res, Ok(value));
                    } else {
                        prop_assert_eq!(res, Err(RingError::Empty));
                        prop_assert_eq!((ring.head(), ring.tail()), before);
                    }
                }
                Op::Clear => {
                    ring.clear();
                    model.clear();
                }
            }

            prop_assert!(ring.head() < ring.allocated_len());
            prop_assert!(ring.tail() < ring.allocated_len());
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.is_full(), model.len() == capacity);
            prop_assert_eq!(ring.state(), model_state(model.len(), capacity));
            prop_assert_eq!(ring.peek_front(), model.front());
            prop_assert!(
                ring.iter().eq(model.iter()),
                "live {:?} != model {:?}",
                ring.iter().collect::<Vec<_>>(),
                model
            );
        }
    }

    #[test]
    fn live_membership_is_a_subset_of_physical(
        capacity in 0usize..12,
        ops in prop::collection::vec(op(), 1..100),
        needle in any::<u8>(),
    ) {
        let mut ring = ByteRing::new(capacity);
        for op in ops {
            match op {
                Op::Append(value) => {
                    let _ = ring.append(value);
                }
                Op::Pop => {
                    let _ = ring.pop_front();
                }
                Op::Clear => ring.clear(),
            }

            prop_assert_eq!(ring.as_raw_slice().len(), capacity + 1);
            prop_assert_eq!(ring.contains_live(&needle), ring.iter().any(|&b| b == needle));
            if ring.contains_live(&needle) {
                prop_assert!(ring.contains(&needle));
            }
        }
    }
}
