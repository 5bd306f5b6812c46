//! Slotmap-backed node storage and circular-list primitives.
//!
//! Heap nodes live in a [`slotmap::SlotMap`] arena and reference each other
//! by key instead of by pointer. Siblings form a circular doubly-linked list
//! through `prev`/`next`; a detached node links to itself. The generational
//! keys make stale references detectable rather than undefined behavior.
//!
//! All structural mutation goes through three O(1) primitives:
//!
//! - [`Arena::splice`]: merge two rings into one
//! - [`Arena::unlink`]: remove a node from its ring
//! - [`Arena::attach_child`]: demote a detached node under a parent
//!
//! The queue's algorithms are written purely in terms of these, which keeps
//! the consolidation logic free of raw link manipulation.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Key identifying a node in the arena.
    pub(crate) struct NodeKey;
}

/// A heap node.
///
/// `prev`/`next` are always valid keys; a node outside any ring points to
/// itself in both directions. `degree` counts the direct children reachable
/// from `child` through the child ring.
pub(crate) struct Node<T> {
    pub value: T,
    pub degree: usize,
    pub parent: Option<NodeKey>,
    pub child: Option<NodeKey>,
    pub prev: NodeKey,
    pub next: NodeKey,
}

pub(crate) struct Arena<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            nodes: SlotMap::with_key(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Allocates a self-linked singleton node holding `value`.
    pub fn alloc(&mut self, value: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            value,
            degree: 0,
            parent: None,
            child: None,
            prev: key,
            next: key,
        })
    }

    /// Frees a node and returns its value, or `None` for a stale key.
    pub fn free(&mut self, key: NodeKey) -> Option<T> {
        self.nodes.remove(key).map(|node| node.value)
    }

    /// Merges the ring containing `other` into the ring containing `at`,
    /// placing `other`'s ring immediately before `at`.
    ///
    /// Both arguments may be singletons, so this covers plain insertion as
    /// well as promoting a whole child ring. The two rings must be disjoint.
    pub fn splice(&mut self, at: NodeKey, other: NodeKey) {
        debug_assert_ne!(at, other, "cannot splice a ring into itself");

        let at_prev = self.nodes[at].prev;
        let other_prev = self.nodes[other].prev;

        self.nodes[at_prev].next = other;
        self.nodes[other].prev = at_prev;

        self.nodes[other_prev].next = at;
        self.nodes[at].prev = other_prev;
    }

    /// Removes `key` from its ring, reconnecting its neighbors.
    ///
    /// Afterwards `key` is a self-linked singleton. Unlinking a singleton is
    /// a no-op. The node's `child` ring is untouched.
    pub fn unlink(&mut self, key: NodeKey) {
        let prev = self.nodes[key].prev;
        let next = self.nodes[key].next;

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;

        self.nodes[key].prev = key;
        self.nodes[key].next = key;
    }

    /// Attaches the detached node `node` as a child of `parent`.
    ///
    /// Splices into the existing child ring if there is one, otherwise
    /// installs `node` as the sole child. Increments `parent.degree`.
    pub fn attach_child(&mut self, parent: NodeKey, node: NodeKey) {
        debug_assert_eq!(self.nodes[node].next, node, "node must be detached");

        match self.nodes[parent].child {
            Some(child) => self.splice(child, node),
            None => self.nodes[parent].child = Some(node),
        }

        self.nodes[node].parent = Some(parent);
        self.nodes[parent].degree += 1;
    }

    /// Iterates the keys of the ring containing `start`, beginning at
    /// `start` and following `next` until it wraps around.
    pub fn ring(&self, start: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        let mut cursor = Some(start);
        std::iter::from_fn(move || {
            let key = cursor?;
            let next = self.nodes[key].next;
            cursor = (next != start).then_some(next);
            Some(key)
        })
    }

    /// Checks that every node in the ring agrees with its neighbors about
    /// the link structure. O(ring length); used by the structure verifier.
    pub fn ring_is_consistent(&self, start: NodeKey) -> bool {
        self.ring(start).all(|key| {
            let node = &self.nodes[key];
            self.nodes[node.next].prev == key && self.nodes[node.prev].next == key
        })
    }
}

impl<T> Index<NodeKey> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key]
    }
}

impl<T> IndexMut<NodeKey> for Arena<T> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key]
    }
}
