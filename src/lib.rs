//! Priority queue backed by a Fibonacci heap
//!
//! This crate provides a single data structure, [`PriorityQueue`], with the
//! classic Fibonacci-heap cost profile:
//!
//! - **enqueue**: O(1)
//! - **min**: O(1)
//! - **dequeue**: O(log n) amortized
//!
//! Ordering is supplied at construction as a "less or equal" predicate; for
//! `T: Ord` a natural-order constructor is provided. Nodes are allocated in
//! a slotmap arena and linked by key, so the cyclic sibling/parent/child
//! graph involves no reference counting and no unsafe pointer juggling.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_queue::PriorityQueue;
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue(3);
//! queue.enqueue(1);
//! queue.enqueue(2);
//!
//! assert_eq!(queue.min(), Some(&1));
//! assert_eq!(queue.dequeue(), Some(1));
//! assert_eq!(queue.dequeue(), Some(2));
//! assert_eq!(queue.dequeue(), Some(3));
//! assert_eq!(queue.dequeue(), None);
//! ```

mod arena;
mod queue;

pub use queue::PriorityQueue;
