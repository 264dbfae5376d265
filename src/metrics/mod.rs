//! Per-cache counters, enabled with the `metrics` feature.
//!
//! Recording, snapshotting and consumption are separate concerns:
//!
//! ```text
//!   LruCache ──records──► LruMetrics (counters)
//!                              │
//!                              ▼ metrics_snapshot()
//!                         LruMetricsSnapshot (Copy, plain data)
//! ```
//!
//! Counters touched from `&self` methods (`peek`, `peek_lru`, `recency_rank`)
//! use [`MetricsCell`](cell::MetricsCell), which makes a metrics-enabled cache
//! `!Sync`.

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
