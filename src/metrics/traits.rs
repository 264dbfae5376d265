//! # Metrics Trait Hierarchy
//!
//! Recorders only write counters; snapshot providers only read them.
//!
//! ```text
//!   CoreMetricsRecorder          get hit/miss, insert new/update, evict, clear
//!          │
//!          ▼
//!   LruMetricsRecorder           pop_lru, touch, remove      (&mut self)
//!   LruMetricsReadRecorder       peek, peek_lru, recency_rank (&self)
//!
//!   MetricsSnapshotProvider<S>   snapshot() -> S
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU operations that take `&mut self`.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Metrics for LRU operations that only take `&self` (interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produce a point-in-time copy of the counters (tests, dashboards).
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zero all counters, e.g. between test phases.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
