#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Differential fuzzing against a Vec-ordered reference model (MRU first)
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 16) + 1;
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity).unwrap();
    let mut model: Vec<(u8, u8)> = Vec::new();

    for chunk in rest.chunks_exact(2) {
        let key = chunk[1] % 32;
        if chunk[0] & 1 == 0 {
            let value = chunk[0];
            cache.put(key, value);
            if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                model.remove(pos);
            }
            model.insert(0, (key, value));
            model.truncate(capacity);
        } else {
            let expected = model.iter().position(|(k, _)| *k == key).map(|pos| {
                let entry = model.remove(pos);
                model.insert(0, entry);
                entry.1
            });
            assert_eq!(cache.get(&key).copied(), expected);
        }

        let actual: Vec<(u8, u8)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(actual, model);
    }

    cache.check_invariants().unwrap();
});
