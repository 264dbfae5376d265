use lrukit::policy::lru::LruCache;

fn main() {
    let mut cache: LruCache<u32, String> = match LruCache::new(2) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("failed to create cache: {err}");
            return;
        },
    };

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value.as_str());
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));

    let order: Vec<u32> = cache.keys().copied().collect();
    println!("mru -> lru: {:?}", order);
}

// Expected output:
// hit 1: alpha
// contains 2? false
// mru -> lru: [3, 1]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2, so contains(2) is false.
