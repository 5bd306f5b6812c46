//! Fibonacci-heap priority queue.
//!
//! The queue owns a forest of heap-ordered trees whose roots form a circular
//! doubly-linked list, and tracks the minimum root. Insertion lazily splices
//! a singleton into the root list in O(1); extraction pays the deferred cost
//! by consolidating roots of equal degree, which bounds the root count at
//! O(log n) (the standard potential argument: Φ = number of roots).

use crate::arena::{Arena, NodeKey};
use smallvec::SmallVec;
use std::fmt;

/// Rings and degree tables stay O(log n) sized; 16 inline slots cover
/// queues well beyond a million elements without spilling to the heap.
const INLINE_ROOTS: usize = 16;

fn natural_le<T: Ord>(a: &T, b: &T) -> bool {
    a <= b
}

/// Priority queue backed by a Fibonacci heap.
///
/// - O(1) `enqueue` and `min`
/// - O(log n) amortized `dequeue`
///
/// Ordering comes from a "less or equal" predicate fixed at construction.
/// The predicate must be consistent with a strict weak ordering; extraction
/// order is undefined (but memory-safe) otherwise.
///
/// # Example
///
/// ```rust
/// use fibonacci_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.enqueue(100);
/// queue.enqueue(8);
/// queue.enqueue(1000);
///
/// assert_eq!(queue.min(), Some(&8));
/// assert_eq!(queue.dequeue(), Some(8));
/// assert_eq!(queue.dequeue(), Some(100));
/// ```
pub struct PriorityQueue<T, C = fn(&T, &T) -> bool> {
    arena: Arena<T>,
    min: Option<NodeKey>,
    len: usize,
    le: C,
}

impl<T: Ord> PriorityQueue<T> {
    /// Creates an empty queue ordered by the type's natural `<=`.
    pub fn new() -> Self {
        Self::with_comparator(natural_le::<T>)
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    /// Creates an empty queue ordered by `le`, a "less or equal" predicate.
    ///
    /// Useful for element types without a natural order, or to invert one:
    ///
    /// ```rust
    /// use fibonacci_queue::PriorityQueue;
    ///
    /// struct Job {
    ///     cost: u32,
    /// }
    ///
    /// let mut queue = PriorityQueue::with_comparator(|a: &Job, b: &Job| a.cost <= b.cost);
    /// queue.enqueue(Job { cost: 9 });
    /// queue.enqueue(Job { cost: 2 });
    /// assert_eq!(queue.dequeue().map(|job| job.cost), Some(2));
    /// ```
    pub fn with_comparator(le: C) -> Self {
        PriorityQueue {
            arena: Arena::new(),
            min: None,
            len: 0,
            le,
        }
    }

    /// Number of elements in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The smallest element, or `None` if the queue is empty. O(1).
    pub fn min(&self) -> Option<&T> {
        self.min.map(|key| &self.arena[key].value)
    }

    /// Inserts an element. O(1).
    pub fn enqueue(&mut self, value: T) {
        let node = self.arena.alloc(value);

        match self.min {
            // First node becomes the entire root list.
            None => self.min = Some(node),
            Some(min) => {
                self.arena.splice(min, node);
                if (self.le)(&self.arena[node].value, &self.arena[min].value) {
                    self.min = Some(node);
                }
            }
        }

        self.len += 1;
    }

    /// Removes and returns the smallest element, or `None` if the queue is
    /// empty. O(log n) amortized, O(n) worst case during consolidation.
    pub fn dequeue(&mut self) -> Option<T> {
        let min = self.min?;

        // Promote the minimum's children to roots.
        if let Some(child) = self.arena[min].child {
            let mut cursor = child;
            loop {
                self.arena[cursor].parent = None;
                cursor = self.arena[cursor].next;
                if cursor == child {
                    break;
                }
            }
            self.arena.splice(min, child);
        }

        if self.arena[min].next == min {
            // Sole root: the queue is now empty, nothing to consolidate.
            self.min = None;
        } else {
            let next = self.arena[min].next;
            self.arena.unlink(min);
            self.min = Some(next);
            self.consolidate();
        }

        self.len -= 1;
        self.arena.free(min)
    }

    /// Merges roots of equal degree until at most one root per degree
    /// remains, then recomputes the minimum.
    fn consolidate(&mut self) {
        let Some(start) = self.min else { return };

        // Snapshot the root ring before any mutation. Merging rewrites the
        // links we would otherwise be walking, so the snapshot is the fixed
        // extent of the pass; a not-yet-visited root can never already be in
        // the degree table, which keeps the merge loop finite.
        let roots: SmallVec<[NodeKey; INLINE_ROOTS]> = self.arena.ring(start).collect();

        // Transient table: degree -> the one root known to have that degree.
        let mut degrees: SmallVec<[Option<NodeKey>; INLINE_ROOTS]> = SmallVec::new();

        for root in roots {
            let mut x = root;
            let mut d = self.arena[x].degree;

            loop {
                if d >= degrees.len() {
                    degrees.resize(d + 1, None);
                }
                let y = match degrees[d].take() {
                    Some(y) => y,
                    None => break,
                };

                // The root failing the comparator test is demoted to a child.
                let (parent, child) = if (self.le)(&self.arena[x].value, &self.arena[y].value) {
                    (x, y)
                } else {
                    (y, x)
                };

                self.arena.unlink(child);
                self.arena.attach_child(parent, child);

                // The promoted node gained a child and may now collide with
                // an existing root of the next degree.
                x = parent;
                d += 1;
            }

            degrees[d] = Some(x);
        }

        // The minimum is the smallest surviving root in the table.
        self.min = degrees.iter().flatten().copied().reduce(|best, key| {
            if (self.le)(&self.arena[key].value, &self.arena[best].value) {
                key
            } else {
                best
            }
        });
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    /// Walks the whole forest checking every structural invariant: ring
    /// consistency, `degree` = child count, heap order on parent/child
    /// edges, min-pointer correctness, and `len` accounting.
    ///
    /// O(n); intended for tests, never called by the queue itself.
    #[doc(hidden)]
    pub fn verify_internal_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.arena.len() == 0;
        };

        if self.arena[min].parent.is_some() || !self.arena.ring_is_consistent(min) {
            return false;
        }

        let mut reachable = 0;
        for root in self.arena.ring(min) {
            if self.arena[root].parent.is_some() {
                return false;
            }
            if root != min && !(self.le)(&self.arena[min].value, &self.arena[root].value) {
                return false;
            }
            match self.subtree_size(root) {
                Some(size) => reachable += size,
                None => return false,
            }
        }

        reachable == self.len && self.arena.len() == self.len
    }

    /// Returns the node count of the subtree at `node`, or `None` if any
    /// invariant is violated within it.
    fn subtree_size(&self, node: NodeKey) -> Option<usize> {
        let mut size = 1;

        match self.arena[node].child {
            None => {
                if self.arena[node].degree != 0 {
                    return None;
                }
            }
            Some(child) => {
                if !self.arena.ring_is_consistent(child) {
                    return None;
                }
                let mut count = 0;
                for c in self.arena.ring(child) {
                    if self.arena[c].parent != Some(node) {
                        return None;
                    }
                    if !(self.le)(&self.arena[node].value, &self.arena[c].value) {
                        return None;
                    }
                    count += 1;
                    size += self.subtree_size(c)?;
                }
                if count != self.arena[node].degree {
                    return None;
                }
            }
        }

        Some(size)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.len)
            .field("min", &self.min.map(|key| &self.arena[key].value))
            .finish()
    }
}
