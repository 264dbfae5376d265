//! # Cache Trait Hierarchy
//!
//! Generic cache operations, split so that code can ask for exactly the
//! capabilities it needs.
//!
//! ```text
//!            ┌─────────────────────────────────────────┐
//!            │            CoreCache<K, V>              │
//!            │                                         │
//!            │  insert(&mut, K, V) → Option<V>         │
//!            │  get(&mut, &K) → Option<&V>             │
//!            │  contains(&, &K) → bool                 │
//!            │  len / is_empty / capacity / clear      │
//!            └──────────────────┬──────────────────────┘
//!                               ▼
//!            ┌─────────────────────────────────────────┐
//!            │          MutableCache<K, V>             │
//!            │                                         │
//!            │  remove(&K) → Option<V>                 │
//!            │  remove_batch(&[K]) → Vec<Option<V>>    │
//!            └──────────────────┬──────────────────────┘
//!                               ▼
//!            ┌─────────────────────────────────────────┐
//!            │          LruCacheTrait<K, V>            │
//!            │                                         │
//!            │  pop_lru() → Option<(K, V)>             │
//!            │  peek_lru() → Option<(&K, &V)>          │
//!            │  touch(&K) → bool                       │
//!            │  recency_rank(&K) → Option<usize>       │
//!            └─────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Every mutating method takes `&mut self`. Implementations carry no internal
//! synchronization; share a cache across threads by wrapping it in a lock.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//! use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};
//!
//! fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.to_string());
//!     }
//! }
//!
//! fn invalidate<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
//!     for key in keys {
//!         cache.remove(key);
//!     }
//! }
//!
//! fn refresh<C: LruCacheTrait<u64, String>>(cache: &mut C, keys: &[u64]) {
//!     for key in keys {
//!         cache.touch(key);
//!     }
//! }
//!
//! let mut cache = LruCache::new(10).unwrap();
//! warm(&mut cache, &[(1, "one"), (2, "two"), (3, "three")]);
//! invalidate(&mut cache, &[2]);
//! refresh(&mut cache, &[1]);
//! assert_eq!(cache.len(), 2);
//! assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(3));
//! ```

/// Core cache operations that all caches support.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity, an entry may be evicted according to the
    /// cache's eviction policy to make room for the new entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(10).unwrap();
    ///
    /// // New key returns None
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "first"), None);
    ///
    /// // Existing key returns previous value
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal state (access order) depending on the eviction
    /// policy. Use [`contains`](Self::contains) to check existence without
    /// affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache can hold.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::MutableCache;
///
/// let mut cache = LruCache::new(10).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.put(3, "three");
///
/// let removed = MutableCache::remove_batch(&mut cache, &[1, 99, 3]);
/// assert_eq!(removed, vec![Some("one"), None, Some("three")]);
/// assert_eq!(cache.len(), 1);
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations.
///
/// Entries are ordered by last access. "Access" means a successful `get` or
/// `insert` (or `touch`); `contains` and `peek_lru` never reorder.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` if the cache is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::LruCacheTrait;
    ///
    /// let mut cache = LruCache::new(10).unwrap();
    /// cache.put(1, "first");
    /// cache.put(2, "second");
    ///
    /// let (key, _) = LruCacheTrait::pop_lru(&mut cache).unwrap();
    /// assert_eq!(key, 1);  // First inserted, not accessed since
    /// ```
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::LruCacheTrait;
    ///
    /// let mut cache = LruCache::new(10).unwrap();
    /// cache.put(1, "first");
    /// cache.put(2, "second");
    ///
    /// assert!(LruCacheTrait::touch(&mut cache, &1));
    /// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
    /// assert!(!LruCacheTrait::touch(&mut cache, &99));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    ///
    /// Returns `None` if the key is not found. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
