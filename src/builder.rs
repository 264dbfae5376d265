//! Cache configuration and builder.
//!
//! [`LruConfig`] carries the construction parameters; [`LruBuilder`] is the
//! fluent front end for it. Both validate before any storage is allocated.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LruBuilder;
//!
//! let mut cache = LruBuilder::new(100)
//!     .prealloc(false)
//!     .build::<u64, String>()
//!     .unwrap();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

/// Construction parameters for an [`LruCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruConfig {
    /// Maximum number of entries. Must be non-zero.
    pub capacity: usize,
    /// Reserve index and entry storage for `capacity` entries up front.
    /// When `false`, both grow on demand.
    pub prealloc: bool,
}

impl LruConfig {
    /// Checks the configuration without building a cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for LruConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc: true,
        }
    }
}

/// Builder for [`LruCache`] instances.
#[derive(Debug, Clone)]
pub struct LruBuilder {
    config: LruConfig,
}

impl LruBuilder {
    /// Create a new builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: LruConfig {
                capacity,
                ..LruConfig::default()
            },
        }
    }

    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    /// The configuration that [`build`](Self::build) will use.
    pub fn config(&self) -> &LruConfig {
        &self.config
    }

    /// Build the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if the capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lrukit::builder::LruBuilder;
    /// use lrukit::error::ConfigError;
    ///
    /// let err = LruBuilder::new(0).build::<u64, String>().unwrap_err();
    /// assert_eq!(err, ConfigError::InvalidCapacity { capacity: 0 });
    /// ```
    pub fn build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::with_config(self.config)
    }
}

impl From<LruConfig> for LruBuilder {
    fn from(config: LruConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LruConfig::default();
        assert_eq!(config.capacity, 1000);
        assert!(config.prealloc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = LruConfig {
            capacity: 0,
            prealloc: false,
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn test_builder_sets_fields() {
        let builder = LruBuilder::new(8).prealloc(false);
        assert_eq!(
            *builder.config(),
            LruConfig {
                capacity: 8,
                prealloc: false
            }
        );
    }

    #[test]
    fn test_capacity_enforcement() {
        for prealloc in [true, false] {
            let mut cache = LruBuilder::new(2)
                .prealloc(prealloc)
                .build::<u64, String>()
                .unwrap();

            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());
            cache.put(3, "three".to_string()); // Should evict key 1

            assert_eq!(cache.len(), 2);
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
            assert!(cache.contains(&3));
        }
    }

    #[test]
    fn test_from_config_round_trips_capacity() {
        let config = LruConfig {
            capacity: 3,
            prealloc: true,
        };
        let cache = LruBuilder::from(config).build::<u8, u8>().unwrap();
        assert_eq!(cache.capacity(), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_build_zero_capacity_fails() {
        assert!(LruBuilder::new(0).build::<u8, u8>().is_err());
    }
}
