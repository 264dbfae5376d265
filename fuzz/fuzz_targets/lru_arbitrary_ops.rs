#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; the rest decode as (op, key, value) triples.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity).unwrap();

    for chunk in rest.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 9, chunk[1] % 64, chunk[2]);

        match op {
            0 | 1 => {
                cache.put(key, value);
                assert_eq!(cache.peek_mru(), Some((&key, &value)));
            }
            2 => {
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, cache.contains(&key));
                if hit {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            3 => {
                let before: Vec<u8> = cache.keys().copied().collect();
                cache.peek(&key);
                let after: Vec<u8> = cache.keys().copied().collect();
                assert_eq!(before, after);
            }
            4 => {
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            }
            5 => {
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            }
            6 => {
                assert_eq!(cache.touch(&key), cache.contains(&key));
            }
            7 => {
                let full = cache.len() == cache.capacity();
                let present = cache.contains(&key);
                let lru = cache.peek_lru().map(|(k, v)| (*k, *v));
                let evicted = cache.push(key, value);
                if full && !present {
                    assert_eq!(evicted, lru);
                } else {
                    assert_eq!(evicted, None);
                }
            }
            _ => {
                if value == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.iter().count(), cache.len());
    }

    cache.check_invariants().unwrap();
});
