//! Sentinel-bounded doubly linked list backed by a [`SlotArena`].
//!
//! Values live in the arena and are addressed by [`SlotId`]. The `prev`/`next`
//! links live in a parallel `Vec` whose first two positions are permanent
//! sentinels, so every real node always has both neighbours and link updates
//! never branch on "is this the first/last node".
//!
//! ## Architecture
//!
//! ```text
//!   links (Vec<Links>)                      values (SlotArena<T>)
//!   ┌─────┬──────────────────────┐          ┌────────┬─────────┐
//!   │ pos │ { prev, next }       │          │ SlotId │ value   │
//!   ├─────┼──────────────────────┤          ├────────┼─────────┤
//!   │ 0   │ HEAD { -, 3 }        │          │ 0      │ B       │
//!   │ 1   │ TAIL { 2, - }        │          │ 1      │ A       │
//!   │ 2   │ { 3, TAIL }  (id 0)  │          └────────┴─────────┘
//!   │ 3   │ { HEAD, 2 }  (id 1)  │
//!   └─────┴──────────────────────┘
//!
//!   HEAD ─► [A] ◄──► [B] ◄── TAIL
//!          front      back
//! ```
//!
//! Node `SlotId(i)` uses link position `i + 2`.
//!
//! ## Operations
//! - `push_front(value)`: attach after HEAD
//! - `move_to_front(id)`: detach + attach after HEAD
//! - `pop_back()`: detach the node before TAIL + free its slot
//! - `remove(id)`: detach + free slot
//!
//! All of the above are O(1); `iter` is O(n).

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

const HEAD: usize = 0;
const TAIL: usize = 1;
const SENTINELS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    prev: usize,
    next: usize,
}

impl Links {
    // Sentinels of an empty list point at each other.
    const EMPTY: Links = Links {
        prev: HEAD,
        next: TAIL,
    };
}

#[inline(always)]
fn pos(id: SlotId) -> usize {
    id.0 + SENTINELS
}

#[inline(always)]
fn slot(pos: usize) -> SlotId {
    SlotId(pos - SENTINELS)
}

/// Doubly linked list that stores values in a `SlotArena` and links them
/// between a head sentinel (front) and a tail sentinel (back).
#[derive(Debug)]
pub struct RecencyList<T> {
    values: SlotArena<T>,
    links: Vec<Links>,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut links = Vec::with_capacity(capacity.saturating_add(SENTINELS));
        links.push(Links::EMPTY);
        links.push(Links::EMPTY);
        Self {
            values: SlotArena::with_capacity(capacity),
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `id` is a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.values.contains(id)
    }

    /// Returns the id of the node right after the head sentinel.
    pub fn front_id(&self) -> Option<SlotId> {
        let first = self.links[HEAD].next;
        (first != TAIL).then(|| slot(first))
    }

    /// Returns the id of the node right before the tail sentinel.
    pub fn back_id(&self) -> Option<SlotId> {
        let last = self.links[TAIL].prev;
        (last != HEAD).then(|| slot(last))
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.values.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.values.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.values.get(id)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.values.get_mut(id)
    }

    /// Inserts `value` right after the head sentinel and returns its id.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.values.insert(value);
        let p = pos(id);
        if p >= self.links.len() {
            self.links.resize(p + 1, Links::EMPTY);
        }
        self.attach_front(p);
        id
    }

    /// Moves a live node right after the head sentinel.
    ///
    /// Returns `false` if `id` is not in the list. Moving the current front
    /// node leaves the order unchanged.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.values.contains(id) {
            return false;
        }
        let p = pos(id);
        self.detach(p);
        self.attach_front(p);
        true
    }

    /// Removes and returns the node right before the tail sentinel.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Unlinks `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.values.contains(id) {
            return None;
        }
        self.detach(pos(id));
        self.values.remove(id)
    }

    /// Drops every node; the sentinels end up linked to each other.
    pub fn clear(&mut self) {
        self.values.clear();
        self.links.truncate(SENTINELS);
        self.links[HEAD] = Links::EMPTY;
        self.links[TAIL] = Links::EMPTY;
    }

    /// Reserves room for at least `additional` more nodes.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.links.reserve(additional);
    }

    /// Iterates values from front to back. Reverse with `.rev()`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.cursor(),
        }
    }

    /// Iterates node ids from front to back.
    pub fn iter_ids(&self) -> IterIds<'_, T> {
        IterIds {
            cursor: self.cursor(),
        }
    }

    fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            front: self.links[HEAD].next,
            back: self.links[TAIL].prev,
            remaining: self.len(),
        }
    }

    #[inline(always)]
    fn detach(&mut self, p: usize) {
        let Links { prev, next } = self.links[p];
        self.links[prev].next = next;
        self.links[next].prev = prev;
    }

    #[inline(always)]
    fn attach_front(&mut self, p: usize) {
        let first = self.links[HEAD].next;
        self.links[p] = Links {
            prev: HEAD,
            next: first,
        };
        self.links[first].prev = p;
        self.links[HEAD].next = p;
    }

    /// Walks the list in both directions and checks link symmetry, node
    /// liveness and the node count.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let len = self.len();

        let mut count = 0usize;
        let mut prev = HEAD;
        let mut current = self.links[HEAD].next;
        while current != TAIL {
            if current < SENTINELS || current >= self.links.len() {
                return Err(InvariantError::new(format!(
                    "forward walk reached invalid link position {current}"
                )));
            }
            if !self.values.contains(slot(current)) {
                return Err(InvariantError::new(format!(
                    "linked node {} has no value",
                    current - SENTINELS
                )));
            }
            if self.links[current].prev != prev {
                return Err(InvariantError::new(format!(
                    "node {} prev link does not point back to its predecessor",
                    current - SENTINELS
                )));
            }
            count += 1;
            if count > len {
                return Err(InvariantError::new("forward walk exceeds list length"));
            }
            prev = current;
            current = self.links[current].next;
        }
        if self.links[TAIL].prev != prev {
            return Err(InvariantError::new("tail sentinel prev link is stale"));
        }
        if count != len {
            return Err(InvariantError::new(format!(
                "forward walk found {count} nodes, expected {len}"
            )));
        }

        let mut back_count = 0usize;
        let mut current = self.links[TAIL].prev;
        while current != HEAD {
            back_count += 1;
            if back_count > len {
                return Err(InvariantError::new("backward walk exceeds list length"));
            }
            current = self.links[current].prev;
        }
        if back_count != len {
            return Err(InvariantError::new(format!(
                "backward walk found {back_count} nodes, expected {len}"
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct Cursor<'a, T> {
    list: &'a RecencyList<T>,
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn next(&mut self) -> Option<(SlotId, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let p = self.front;
        self.front = self.list.links[p].next;
        self.remaining -= 1;
        let id = slot(p);
        self.list.values.get(id).map(|value| (id, value))
    }

    fn next_back(&mut self) -> Option<(SlotId, &'a T)> {
        if self.remaining == 0 {
            return None;
        }
        let p = self.back;
        self.back = self.list.links[p].prev;
        self.remaining -= 1;
        let id = slot(p);
        self.list.values.get(id).map(|value| (id, value))
    }
}

/// Iterator over list values from front to back.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|(_, value)| value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over node ids from front to back.
pub struct IterIds<'a, T> {
    cursor: Cursor<'a, T>,
}

impl<T> Iterator for IterIds<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(|(id, _)| id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cursor.remaining, Some(self.cursor.remaining))
    }
}

impl<T> DoubleEndedIterator for IterIds<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.cursor.next_back().map(|(id, _)| id)
    }
}

impl<T> ExactSizeIterator for IterIds<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn recency_list_basic_ops() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(a));
        assert_eq!(list.get(b), Some(&2));
        list.check_links().unwrap();
    }

    #[test]
    fn empty_list_has_linked_sentinels() {
        let list: RecencyList<u8> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        assert_eq!(list.iter().count(), 0);
        list.check_links().unwrap();
    }

    #[test]
    fn move_to_front_from_middle_back_and_front() {
        let mut list = RecencyList::new();
        let a = list.push_front('a');
        let b = list.push_front('b');
        let _c = list.push_front('c');
        assert_eq!(order(&list), vec!['c', 'b', 'a']);

        assert!(list.move_to_front(b));
        assert_eq!(order(&list), vec!['b', 'c', 'a']);

        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!['a', 'b', 'c']);

        // Already at the front: order is unchanged.
        assert!(list.move_to_front(a));
        assert_eq!(order(&list), vec!['a', 'b', 'c']);
        list.check_links().unwrap();
    }

    #[test]
    fn move_to_front_single_node() {
        let mut list = RecencyList::new();
        let only = list.push_front(9);
        assert!(list.move_to_front(only));
        assert_eq!(list.front_id(), Some(only));
        assert_eq!(list.back_id(), Some(only));
        list.check_links().unwrap();
    }

    #[test]
    fn move_to_front_stale_id_is_false() {
        let mut list = RecencyList::new();
        let id = list.push_front(1);
        list.remove(id);
        assert!(!list.move_to_front(id));
        list.check_links().unwrap();
    }

    #[test]
    fn pop_back_returns_oldest_first() {
        let mut list = RecencyList::new();
        for i in 0..4 {
            list.push_front(i);
        }
        assert_eq!(list.pop_back(), Some(0));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_links().unwrap();
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);
        let d = list.push_front(4);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(order(&list), vec![4, 3, 1]);
        assert_eq!(list.remove(d), Some(4));
        assert_eq!(order(&list), vec![3, 1]);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(order(&list), vec![3]);
        assert_eq!(list.remove(a), None);
        assert_eq!(list.remove(c), Some(3));
        assert!(list.is_empty());
        list.check_links().unwrap();
    }

    #[test]
    fn freed_slots_are_relinked_on_reuse() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.remove(a);
        let reused = list.push_front(3);
        assert_eq!(reused, a);
        assert_eq!(order(&list), vec![3, 2]);
        list.check_links().unwrap();
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut list = RecencyList::new();
        for i in 1..=5 {
            list.push_front(i);
        }
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&5));
        assert_eq!(iter.next_back(), Some(&1));
        assert_eq!(iter.len(), 3);
        let rest: Vec<_> = iter.copied().collect();
        assert_eq!(rest, vec![4, 3, 2]);

        let reversed: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(reversed, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn iter_ids_matches_iter() {
        let mut list = RecencyList::new();
        let ids: Vec<_> = (0..3).map(|i| list.push_front(i)).collect();
        let walked: Vec<_> = list.iter_ids().collect();
        assert_eq!(walked, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn clear_relinks_sentinels() {
        let mut list = RecencyList::with_capacity(8);
        for i in 0..8 {
            list.push_front(i);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.check_links().unwrap();

        list.push_front(42);
        assert_eq!(list.front(), Some(&42));
        assert_eq!(list.back(), Some(&42));
        list.check_links().unwrap();
    }

    #[test]
    fn get_mut_updates_value() {
        let mut list = RecencyList::new();
        let id = list.push_front(10);
        *list.get_mut(id).unwrap() = 20;
        assert_eq!(list.front(), Some(&20));
    }

    #[test]
    fn check_links_detects_broken_prev_link() {
        let mut list = RecencyList::new();
        let a = list.push_front(1);
        list.push_front(2);
        list.links[pos(a)].prev = pos(a);
        assert!(list.check_links().is_err());
    }
}
