use lrukit::builder::LruBuilder;
use lrukit::error::ConfigError;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut cache = LruBuilder::new(3).prealloc(false).build::<&str, u32>()?;

    for (word, count) in [("apple", 1), ("pear", 2), ("plum", 3)] {
        cache.put(word, count);
    }
    cache.get("apple");

    if let Some((key, value)) = cache.push("fig", 4) {
        println!("evicted {key}={value}");
    }

    match LruBuilder::new(0).build::<&str, u32>() {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("rejected: {err}"),
    }

    for (key, value) in &cache {
        println!("{key}={value}");
    }
    Ok(())
}

// Expected output (RUST_LOG=lrukit=trace also prints construction and
// eviction events):
// evicted pear=2
// rejected: capacity must be > 0 (got 0)
// fig=4
// apple=1
// plum=3
