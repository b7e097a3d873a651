//! Time-bounded caching for expensive lookups.
//!
//! This crate provides the explicit cache component behind the feat lookup:
//! values carry a TTL, expired entries are recomputed on demand, and admin
//! commands can invalidate a key by hand instead of waiting out the clock.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, TtlCache, TtlCacheConfig, TtlCacheConfigBuilder};
