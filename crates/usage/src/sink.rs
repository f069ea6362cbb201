//! Counter backends for keyword usage.

use std::collections::HashMap;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a usage backend may report. Callers log them and move on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsageError {
    #[error("tenant_id and keyword_id must not be empty")]
    MissingKey,

    #[error("usage store is full ({0} keys)")]
    CapacityExceeded(usize),

    #[error("usage backend unavailable: {0}")]
    Unavailable(String),
}

/// Destination for "this keyword rule answered a visitor" events.
pub trait UsageSink: Send + Sync {
    /// Count one use of `keyword_id` for `tenant_id`.
    ///
    /// Implementations must apply the increment as a single atomic update so
    /// concurrent calls for the same key never lose counts.
    fn record(&self, tenant_id: &str, keyword_id: &str) -> Result<(), UsageError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct UsageKey {
    tenant_id: String,
    keyword_id: String,
}

/// One row of a usage report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword_id: String,
    pub count: u64,
}

/// In-process counter store keyed by `(tenant, keyword)`.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    counts: DashMap<UsageKey, u64>,
    max_keys: Option<usize>,
}

impl InMemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse new keys once `max_keys` distinct `(tenant, keyword)` pairs are
    /// tracked. Existing keys keep counting.
    pub fn with_max_keys(max_keys: usize) -> Self {
        Self {
            counts: DashMap::new(),
            max_keys: Some(max_keys),
        }
    }

    pub fn count(&self, tenant_id: &str, keyword_id: &str) -> u64 {
        let key = UsageKey {
            tenant_id: tenant_id.to_string(),
            keyword_id: keyword_id.to_string(),
        };
        self.counts.get(&key).map(|c| *c).unwrap_or(0)
    }

    /// All counters of one tenant, keyed by keyword id.
    pub fn snapshot(&self, tenant_id: &str) -> HashMap<String, u64> {
        self.counts
            .iter()
            .filter(|entry| entry.key().tenant_id == tenant_id)
            .map(|entry| (entry.key().keyword_id.clone(), *entry.value()))
            .collect()
    }

    /// Most used keywords first; equal counts ordered by keyword id.
    pub fn top_keywords(&self, tenant_id: &str, limit: usize) -> Vec<KeywordCount> {
        let mut rows: Vec<KeywordCount> = self
            .snapshot(tenant_id)
            .into_iter()
            .map(|(keyword_id, count)| KeywordCount { keyword_id, count })
            .collect();
        rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.keyword_id.cmp(&b.keyword_id))
        });
        rows.truncate(limit);
        rows
    }

    pub fn total(&self, tenant_id: &str) -> u64 {
        self.snapshot(tenant_id).values().sum()
    }

    /// Drop every counter of one tenant.
    pub fn reset(&self, tenant_id: &str) {
        self.counts.retain(|key, _| key.tenant_id != tenant_id);
    }
}

impl UsageSink for InMemoryUsageStore {
    fn record(&self, tenant_id: &str, keyword_id: &str) -> Result<(), UsageError> {
        if tenant_id.trim().is_empty() || keyword_id.trim().is_empty() {
            return Err(UsageError::MissingKey);
        }
        let key = UsageKey {
            tenant_id: tenant_id.to_string(),
            keyword_id: keyword_id.to_string(),
        };

        if let Some(max) = self.max_keys {
            // Best effort: concurrent first inserts may overshoot by a few keys.
            if !self.counts.contains_key(&key) && self.counts.len() >= max {
                return Err(UsageError::CapacityExceeded(max));
            }
        }

        // The entry guard holds the shard write lock for the whole update.
        *self.counts.entry(key).or_insert(0) += 1;
        Ok(())
    }
}

/// Forwards usage events to the process-wide `metrics` recorder as
/// `keyword_matches_total{tenant, keyword}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsUsageSink;

impl UsageSink for MetricsUsageSink {
    fn record(&self, tenant_id: &str, keyword_id: &str) -> Result<(), UsageError> {
        if tenant_id.trim().is_empty() || keyword_id.trim().is_empty() {
            return Err(UsageError::MissingKey);
        }
        metrics::counter!(
            "keyword_matches_total",
            "tenant" => tenant_id.to_string(),
            "keyword" => keyword_id.to_string()
        )
        .increment(1);
        Ok(())
    }
}
