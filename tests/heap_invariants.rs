//! Structural invariant tests.
//!
//! These drive the queue through shapes that stress the consolidation pass
//! and assert `verify_internal_structure` after every mutation: ring
//! validity, degree accounting, heap order on every parent/child edge,
//! min-pointer correctness, and node-count bookkeeping.

use fibonacci_queue::PriorityQueue;

#[test]
fn invariants_hold_while_growing() {
    let mut queue = PriorityQueue::new();

    for i in 0..100 {
        queue.enqueue(i);
        assert!(queue.verify_internal_structure(), "broken after enqueue {i}");
    }
}

#[test]
fn invariants_hold_while_draining() {
    let mut queue = PriorityQueue::new();
    for i in (0..100).rev() {
        queue.enqueue(i);
    }

    for i in 0..100 {
        assert_eq!(queue.dequeue(), Some(i));
        assert!(queue.verify_internal_structure(), "broken after dequeue {i}");
    }
    assert!(queue.verify_internal_structure());
}

#[test]
fn consolidation_cascade_at_powers_of_two() {
    // Power-of-two root counts force the longest degree-collision chains:
    // after the first extraction every remaining root must fold into a
    // single binomial-shaped tree.
    for exp in 1..=10u32 {
        let n = 1usize << exp;
        let mut queue = PriorityQueue::new();
        for i in 0..=n {
            queue.enqueue(i);
        }

        assert_eq!(queue.dequeue(), Some(0));
        assert!(queue.verify_internal_structure(), "broken for n = {n}");

        for i in 1..=n {
            assert_eq!(queue.dequeue(), Some(i));
        }
        assert!(queue.is_empty());
    }
}

#[test]
fn invariants_hold_under_churn() {
    let mut queue = PriorityQueue::new();

    // Sawtooth load: grow by 7, shrink by 3, repeatedly.
    let mut next = 0i32;
    for _ in 0..50 {
        for _ in 0..7 {
            queue.enqueue(next % 23);
            next += 1;
        }
        for _ in 0..3 {
            queue.dequeue();
        }
        assert!(queue.verify_internal_structure());
    }

    while queue.dequeue().is_some() {
        assert!(queue.verify_internal_structure());
    }
    assert_eq!(queue.len(), 0);
}

#[test]
fn invariants_hold_with_custom_comparator() {
    let mut queue = PriorityQueue::with_comparator(|a: &(u32, &str), b: &(u32, &str)| a.0 >= b.0);

    queue.enqueue((1, "low"));
    queue.enqueue((10, "high"));
    queue.enqueue((5, "mid"));
    assert!(queue.verify_internal_structure());

    assert_eq!(queue.dequeue(), Some((10, "high")));
    assert!(queue.verify_internal_structure());
    assert_eq!(queue.dequeue(), Some((5, "mid")));
    assert_eq!(queue.dequeue(), Some((1, "low")));
}

#[test]
fn invariants_hold_with_all_equal_values() {
    let mut queue = PriorityQueue::new();

    for _ in 0..64 {
        queue.enqueue(42);
    }
    assert!(queue.verify_internal_structure());

    for _ in 0..64 {
        assert_eq!(queue.dequeue(), Some(42));
        assert!(queue.verify_internal_structure());
    }
    assert_eq!(queue.dequeue(), None);
}
