//! Keyword usage analytics.
//!
//! Every time a keyword rule answers a visitor, the caller reports it through
//! [`UsageTracker::track_keyword_usage`]. Tracking is advisory telemetry:
//! failures are logged and surfaced as `false`, never as errors, so the
//! conversation flow cannot be broken by an unavailable counter backend.
//!
//! Backends implement [`UsageSink`]:
//!
//! - [`InMemoryUsageStore`]: atomic per-`(tenant, keyword)` counters with the
//!   "top keywords" report used by the analytics view.
//! - [`MetricsUsageSink`]: `keyword_matches_total` counter via the `metrics`
//!   facade.
//!
//! ```
//! use std::sync::Arc;
//! use usage::{InMemoryUsageStore, UsageTracker};
//!
//! let store = Arc::new(InMemoryUsageStore::new());
//! let tracker = UsageTracker::new(store.clone());
//!
//! assert!(tracker.track_keyword_usage("k-pricing", "tenant-a"));
//! assert_eq!(store.count("tenant-a", "k-pricing"), 1);
//! ```

mod sink;
mod tracker;

pub use crate::sink::{InMemoryUsageStore, KeywordCount, MetricsUsageSink, UsageError, UsageSink};
pub use crate::tracker::UsageTracker;
