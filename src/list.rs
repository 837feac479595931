//! Arena-backed doubly linked lists.
//!
//! Nodes live in an [`Arena`] and are addressed by stable [`SlotId`] indices.
//! A [`List`] is only a `head`/`tail`/`len` handle, so any number of lists can
//! thread through the same arena. The LRU cache uses a single list; the LFU
//! cache keeps one list per frequency bucket, all sharing one arena.
//!
//! ```text
//!   arena: Vec<Option<Node<T>>>
//!   ┌──────┬──────────────────────────────────────┐
//!   │ slot │ Node { value, prev, next }           │
//!   ├──────┼──────────────────────────────────────┤
//!   │  0   │ { A, prev: None,    next: Some(2) }  │
//!   │  1   │ (free)                               │
//!   │  2   │ { B, prev: Some(0), next: None }     │
//!   └──────┴──────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [2] ◄── tail
//! ```
//!
//! Relinking never moves a value and never hands out a pointer, so removal
//! and reinsertion cannot leave dangling or aliased references behind.

extern crate alloc;

use crate::error::InvariantError;
use alloc::vec::Vec;

/// Upper bound on storage reserved up front; larger caches grow on demand.
const MAX_PREALLOCATION: usize = 1 << 16;

/// Number of slots to reserve for a cache of `capacity` entries.
#[inline]
pub(crate) fn initial_capacity(capacity: usize) -> usize {
    capacity.min(MAX_PREALLOCATION)
}

/// Stable index of a node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

impl SlotId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Slot storage for list nodes. Freed slots are recycled before the backing
/// vector grows.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` in an unlinked node and returns its slot.
    pub(crate) fn insert(&mut self, value: T) -> SlotId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Frees the slot and returns its value.
    ///
    /// The node must already be unlinked from whatever list held it.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        let node = self.slots.get_mut(id.0)?.take()?;
        debug_assert!(node.prev.is_none() && node.next.is_none());
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    #[inline]
    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    #[inline]
    pub(crate) fn contains(&self, id: SlotId) -> bool {
        self.node(id).is_some()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn node(&self, id: SlotId) -> Option<&Node<T>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, id: SlotId) -> Option<&mut Node<T>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }
}

/// Handle for one ordered sequence of arena nodes, front to back.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct List {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl List {
    pub(crate) const fn new() -> Self {
        List {
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<SlotId> {
        self.head
    }

    #[inline]
    pub(crate) fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links the unlinked node `id` at the back of this list.
    pub(crate) fn push_back<T>(&mut self, arena: &mut Arena<T>, id: SlotId) -> bool {
        let old_tail = self.tail;
        match arena.node_mut(id) {
            Some(node) => {
                debug_assert!(node.prev.is_none() && node.next.is_none());
                node.prev = old_tail;
                node.next = None;
            }
            None => return false,
        }
        match old_tail.and_then(|tail| arena.node_mut(tail)) {
            Some(tail_node) => tail_node.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        true
    }

    /// Detaches `id` from this list, leaving the node allocated in the arena.
    ///
    /// `id` must be a member of this list.
    pub(crate) fn unlink<T>(&mut self, arena: &mut Arena<T>, id: SlotId) -> bool {
        let (prev, next) = match arena.node_mut(id) {
            Some(node) => {
                let links = (node.prev, node.next);
                node.prev = None;
                node.next = None;
                links
            }
            None => return false,
        };

        match prev.and_then(|p| arena.node_mut(p)) {
            Some(prev_node) => prev_node.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| arena.node_mut(n)) {
            Some(next_node) => next_node.prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        true
    }

    /// Moves member `id` to the back of this list.
    pub(crate) fn move_to_back<T>(&mut self, arena: &mut Arena<T>, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return arena.contains(id);
        }
        self.unlink(arena, id) && self.push_back(arena, id)
    }

    /// Detaches the front node and returns its slot. The slot stays allocated.
    pub(crate) fn pop_front<T>(&mut self, arena: &mut Arena<T>) -> Option<SlotId> {
        let id = self.head?;
        self.unlink(arena, id).then_some(id)
    }

    pub(crate) fn iter<'a, T>(&self, arena: &'a Arena<T>) -> ListIter<'a, T> {
        ListIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the links and checks them against `len`, `head` and `tail`.
    pub(crate) fn validate<T>(&self, arena: &Arena<T>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new("empty list has a dangling head or tail"));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = arena
                .node(id)
                .ok_or_else(|| InvariantError::new("list links to a freed slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("broken prev link"));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new("list is longer than its recorded length"));
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new("tail does not terminate the list"));
        }
        if count != self.len {
            return Err(InvariantError::new("list is shorter than its recorded length"));
        }
        Ok(())
    }
}

/// Front-to-back iterator over `(slot, value)` pairs of one list.
#[derive(Debug)]
pub(crate) struct ListIter<'a, T> {
    arena: &'a Arena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.arena.node(id)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
