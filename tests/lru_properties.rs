// ==============================================
// LRU BEHAVIOR TESTS (integration)
// ==============================================
//
// Black-box checks against the public API only: eviction order, capacity
// bound, overwrite semantics and the trait surface.

use lrukit::prelude::*;

fn order<V>(cache: &LruCache<u32, V>) -> Vec<u32> {
    cache.keys().copied().collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ==============================================
// Construction
// ==============================================

mod construction {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        init_tracing();
        let err = LruCache::<u32, u32>::new(0).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCapacity { capacity: 0 });
        assert_eq!(err.to_string(), "capacity must be > 0 (got 0)");
    }

    #[test]
    fn builder_and_new_agree() {
        let mut a = LruCache::new(3).unwrap();
        let mut b = LruBuilder::new(3).prealloc(false).build().unwrap();
        for k in 0..10u32 {
            a.put(k, k);
            b.put(k, k);
            if k % 3 == 0 {
                a.get(&(k / 2));
                b.get(&(k / 2));
            }
        }
        assert_eq!(order(&a), order(&b));
    }
}

// ==============================================
// Eviction Order
// ==============================================

mod eviction {
    use super::*;

    #[test]
    fn capacity_two_scenario() {
        init_tracing();
        let mut cache = LruCache::new(2).unwrap();
        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.get(&1), Some(&"a"));
        cache.put(3, "c");
        assert_eq!(cache.get(&2), None);
        assert_eq!(order(&cache), vec![3, 1]);
        assert_eq!(cache.get(&3), Some(&"c"));
        assert_eq!(cache.get(&1), Some(&"a"));
    }

    #[test]
    fn get_protects_oldest_key() {
        for n in 2..20u32 {
            let mut cache = LruCache::new(n as usize).unwrap();
            for k in 1..=n {
                cache.put(k, ());
            }
            cache.get(&1);
            cache.put(n + 1, ());
            assert!(cache.contains(&1), "capacity {n}: key 1 was evicted");
            assert!(!cache.contains(&2), "capacity {n}: key 2 survived");
            assert_eq!(cache.len(), n as usize);
        }
    }

    #[test]
    fn capacity_bound_holds_after_every_put() {
        let mut cache = LruCache::new(7).unwrap();
        for k in 0..1000u32 {
            cache.put(k % 53, k);
            assert!(cache.len() <= cache.capacity());
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn eviction_follows_reverse_recency() {
        let mut cache = LruCache::new(4).unwrap();
        for k in 0..4u32 {
            cache.put(k, ());
        }
        cache.get(&2);
        cache.get(&0);
        let lru_first: Vec<u32> = cache.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(lru_first, vec![1, 3, 2, 0]);

        let mut evicted = Vec::new();
        for k in 10..14u32 {
            if let Some((old, ())) = cache.push(k, ()) {
                evicted.push(old);
            }
        }
        assert_eq!(evicted, lru_first);
    }
}

// ==============================================
// Overwrite and Miss Semantics
// ==============================================

mod overwrite_and_miss {
    use super::*;

    #[test]
    fn overwrite_keeps_len_and_updates_value() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, "v1");
        cache.put(2, "x");
        let len = cache.len();
        cache.put(1, "v2");
        assert_eq!(cache.len(), len);
        assert_eq!(cache.get(&1), Some(&"v2"));
    }

    #[test]
    fn miss_leaves_order_unchanged() {
        let mut cache = LruCache::new(3).unwrap();
        cache.put(1, ());
        cache.put(2, ());
        cache.put(3, ());
        let before = order(&cache);
        assert_eq!(cache.get(&99), None);
        assert_eq!(order(&cache), before);
    }

    #[test]
    fn repeated_get_equals_single_get() {
        let mut once = LruCache::new(3).unwrap();
        let mut twice = LruCache::new(3).unwrap();
        for k in 1..=3u32 {
            once.put(k, k);
            twice.put(k, k);
        }
        once.get(&2);
        twice.get(&2);
        twice.get(&2);
        assert_eq!(order(&once), order(&twice));
    }
}

// ==============================================
// Trait Surface
// ==============================================

mod traits {
    use super::*;

    fn drain_lru<K, V, C: LruCacheTrait<K, V>>(cache: &mut C) -> Vec<K> {
        let mut out = Vec::new();
        while let Some((k, _)) = cache.pop_lru() {
            out.push(k);
        }
        out
    }

    #[test]
    fn generic_code_sees_lru_order() {
        let mut cache = LruCache::new(3).unwrap();
        CoreCache::insert(&mut cache, 1u32, 'a');
        CoreCache::insert(&mut cache, 2, 'b');
        CoreCache::insert(&mut cache, 3, 'c');
        LruCacheTrait::touch(&mut cache, &1);
        assert_eq!(LruCacheTrait::recency_rank(&cache, &1), Some(0));
        assert_eq!(
            MutableCache::remove_batch(&mut cache, &[3, 42]),
            vec![Some('c'), None]
        );
        assert_eq!(drain_lru::<u32, char, _>(&mut cache), vec![2, 1]);
        assert!(CoreCache::is_empty(&cache));
    }
}
