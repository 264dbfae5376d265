//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key/value store that evicts the least recently used entry
//! when a new key would exceed its capacity. Both lookups and insertions count
//! as a "use".
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                               │   │
//!   │   │                                                              │   │
//!   │   │   "a" ─────────────┐    "b" ────────┐    "c" ───┐            │   │
//!   │   └────────────────────┼──────────────────┼───────────┼──────────┘   │
//!   │                        ▼                  ▼           ▼              │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (recency order)                   │   │
//!   │   │                                                              │   │
//!   │   │  HEAD ◄──► [a:1] ◄──► [b:2] ◄──► [c:3] ◄──► TAIL             │   │
//!   │   │  sentinel   MRU                   LRU       sentinel         │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index and the list always hold the same set of entries. Every entry is
//! owned by the list's slot arena; the index only stores its `SlotId`.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(d) on a full cache (capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════
//!     Before:  HEAD ◄──► [a] ◄──► [b] ◄──► [c] ◄──► TAIL
//!
//!     1. push [d] after HEAD, index d
//!     2. len 4 > 3: detach the node before TAIL ([c]), unindex c
//!
//!     After:   HEAD ◄──► [d] ◄──► [a] ◄──► [b] ◄──► TAIL
//!
//!   get(b)
//!   ═══════════════════════════════════════════════════════════════════
//!     1. index lookup: O(1)
//!     2. detach [b], reattach after HEAD: O(1)
//!
//!     After:   HEAD ◄──► [b] ◄──► [d] ◄──► [a] ◄──► TAIL
//! ```
//!
//! ## Methods
//!
//! | Method              | Complexity | Description                            |
//! |---------------------|------------|----------------------------------------|
//! | `new(capacity)`     | O(1)       | Create cache; rejects capacity 0       |
//! | `put(k, v)`         | O(1)*      | Insert or update, may evict LRU        |
//! | `insert(k, v)`      | O(1)*      | `put` returning the previous value     |
//! | `push(k, v)`        | O(1)*      | `put` returning the evicted entry      |
//! | `get(&k)`           | O(1)*      | Get value, moves to MRU position       |
//! | `get_mut(&k)`       | O(1)*      | Mutable get, moves to MRU position     |
//! | `peek(&k)`          | O(1)*      | Get value without affecting order      |
//! | `peek_mut(&k)`      | O(1)*      | Mutable peek                           |
//! | `contains(&k)`      | O(1)*      | Check if key exists                    |
//! | `remove(&k)`        | O(1)*      | Remove entry by key                    |
//! | `pop_lru()`         | O(1)       | Remove and return LRU entry            |
//! | `peek_lru()`        | O(1)       | LRU entry without removing             |
//! | `peek_mru()`        | O(1)       | MRU entry without reordering           |
//! | `touch(&k)`         | O(1)*      | Move to MRU without returning value    |
//! | `recency_rank(&k)`  | O(n)       | Position in recency order (0 = MRU)    |
//! | `iter()`            | O(n)       | MRU → LRU; `.rev()` for LRU → MRU      |
//! | `clear()`           | O(n)       | Remove all entries                     |
//!
//! `*` amortized: one hash lookup plus a constant number of link updates.
//!
//! ## Thread Safety
//!
//! `LruCache` has no internal synchronization. Mutation (including `get`,
//! which reorders) requires `&mut self`; wrap the cache in a `Mutex` to share
//! it across threads.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "a");
//! cache.put(2, "b");
//!
//! assert_eq!(cache.get(&1), Some(&"a"));   // 1 is now MRU
//! cache.put(3, "c");                       // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::LruConfig;
use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Upper bound on slots reserved up front by `prealloc`; larger caches grow
/// on demand past this point.
const MAX_PREALLOC: usize = 1 << 20;

/// A stored key/value pair. The key is kept so eviction can unindex it.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Outcome of an insert-or-update.
enum Upsert<K, V> {
    Updated(V),
    Inserted { evicted: Option<(K, V)> },
}

/// Fixed-capacity LRU cache.
///
/// Keys are stored twice (in the index and in their entry), hence the
/// `K: Clone` bound. Values are unconstrained.
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Storage for `capacity` entries is reserved up front (see
    /// [`LruConfig::prealloc`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100).unwrap();
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(LruCache::<u32, String>::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(LruConfig {
            capacity,
            ..LruConfig::default()
        })
    }

    /// Creates a cache from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `config.capacity` is zero.
    pub fn with_config(config: LruConfig) -> Result<Self, ConfigError> {
        config.validate().inspect_err(|err| {
            debug!(%err, "rejected LRU cache configuration");
        })?;

        // One extra slot: a new entry is linked before the LRU one is evicted.
        let reserve = if config.prealloc {
            config.capacity.saturating_add(1).min(MAX_PREALLOC)
        } else {
            0
        };
        debug!(
            capacity = config.capacity,
            reserved = reserve,
            "created LRU cache"
        );

        Ok(LruCache {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: RecencyList::with_capacity(reserve),
            capacity: config.capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Looks up `key` and, on a hit, promotes it to most recently used.
    ///
    /// A miss returns `None` and leaves the recency order untouched.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.promote(key).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.promote(key).map(|entry| &mut entry.value)
    }

    /// Inserts or updates `key`, promoting it to most recently used.
    ///
    /// Updating an existing key never evicts. Inserting a new key into a full
    /// cache evicts exactly one entry, the least recently used one.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2).unwrap();
    /// cache.put("k", 1);
    /// cache.put("k", 2);
    /// assert_eq!(cache.len(), 1);
    /// assert_eq!(cache.get("k"), Some(&2));
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) {
        let _ = self.upsert(key, value);
    }

    /// [`put`](Self::put) that returns the previous value of an existing key.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.upsert(key, value) {
            Upsert::Updated(previous) => Some(previous),
            Upsert::Inserted { .. } => None,
        }
    }

    /// [`put`](Self::put) that returns the entry evicted to make room, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(1).unwrap();
    /// assert_eq!(cache.push(1, "a"), None);
    /// assert_eq!(cache.push(2, "b"), Some((1, "a")));
    /// // Updating never evicts.
    /// assert_eq!(cache.push(2, "c"), None);
    /// ```
    #[inline]
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.upsert(key, value) {
            Upsert::Updated(_) => None,
            Upsert::Inserted { evicted } => evicted,
        }
    }

    /// Looks up `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;
        let entry = self.order.get(id)?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_found();

        Some(&entry.value)
    }

    /// Mutable lookup without changing recency.
    pub fn peek_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns `true` if `key` is cached. Does not change recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key` from both the index and the recency list.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.debug_assert_sizes();

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let Entry { key, value } = self.order.pop_back()?;
        self.index.remove(&key);
        self.debug_assert_sizes();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((key, value))
    }

    /// Returns the least recently used entry without removing or promoting it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Returns the most recently used entry without reordering.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Promotes `key` to most recently used without reading it.
    ///
    /// Returns `false` if the key is not cached.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let moved = self.order.move_to_front(id);

        #[cfg(feature = "metrics")]
        if moved {
            self.metrics.record_touch_found();
        }

        moved
    }

    /// Position of `key` in recency order (0 = most recently used). O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let target = *self.index.get(key)?;
        let rank = self.order.iter_ids().position(|id| {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();
            id == target
        })?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_found();

        Some(rank)
    }

    /// Iterates entries from most to least recently used without promoting
    /// them. Use `.rev()` for least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter(),
        }
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. The cache stays usable with the same capacity.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(cleared = self.order.len(), "cleared LRU cache");
        self.index.clear();
        self.order.clear();
    }

    /// Verifies that the index and the recency list describe the same set of
    /// entries and that the list is well linked.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantError`] naming the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_links()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index slot {} holds a different key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at vacant slot {}",
                        id.index()
                    )));
                },
            }
        }
        for id in self.order.iter_ids() {
            let indexed = self
                .order
                .get(id)
                .and_then(|entry| self.index.get(&entry.key));
            if indexed != Some(&id) {
                return Err(InvariantError::new(format!(
                    "list node {} is not indexed",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    /// Hit path shared by `get` and `get_mut`.
    #[inline]
    fn promote<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get_mut(id)
    }

    fn upsert(&mut self, key: K, value: V) -> Upsert<K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            self.order.move_to_front(id);
            if let Some(entry) = self.order.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();

                return Upsert::Updated(std::mem::replace(&mut entry.value, value));
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        let evicted = if self.order.len() > self.capacity {
            self.evict_lru()
        } else {
            None
        };
        self.debug_assert_sizes();

        Upsert::Inserted { evicted }
    }

    /// Drops the node before the tail sentinel from list and index together.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let Entry { key, value } = self.order.pop_back()?;
        self.index.remove(&key);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        trace!(
            len = self.order.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );
        Some((key, value))
    }

    #[inline(always)]
    fn debug_assert_sizes(&self) {
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert!(self.order.len() <= self.capacity);
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            clears: self.metrics.clears,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.order.len(),
            capacity: self.capacity,
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.order.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
