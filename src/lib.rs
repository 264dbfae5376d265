//! lrukit: a fixed-capacity least-recently-used cache.
//!
//! [`LruCache`](policy::lru::LruCache) maps keys to values, holds at most
//! `capacity` entries and evicts the least recently used one when a new key
//! would exceed that bound. Lookups and insertions are O(1) on average.
//!
//! Entries live in a slot arena threaded by a sentinel-bounded doubly linked
//! list ([`ds::RecencyList`]); a hash index maps each key to its slot.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//! assert!(!cache.contains(&"b"));
//! # Ok::<(), ConfigError>(())
//! ```

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::ds::{RecencyList, SlotArena, SlotId};
