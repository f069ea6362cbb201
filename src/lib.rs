//! Workspace umbrella crate for the keyword auto-response engine.
//!
//! This crate stitches the matcher, usage tracking and rule management
//! together so the widget backend can answer a visitor message with a single
//! call: [`AutoResponder::respond`] matches the message against the tenant's
//! rules and, on a hit, records keyword usage.

pub mod config;

pub use config::{AutoreplyConfig, ConfigLoadError, UsageYamlConfig, WidgetPosition, WidgetSettings};
pub use matcher::{
    KeywordMatcher, KeywordRule, MatchError, MatchResult, MatchType, MatcherConfig, match_keyword,
};
pub use rules::{
    InMemoryRuleStore, RuleDraft, RuleError, RuleStore, StoredRule, export_csv, import_csv,
    import_into,
};
pub use usage::{InMemoryUsageStore, KeywordCount, MetricsUsageSink, UsageSink, UsageTracker};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

/// Observer for answered messages.
pub trait ResponderMetrics: Send + Sync {
    fn record_match(&self, tenant_id: &str, latency: Duration, result: &MatchResult);
}

/// Matching plus usage tracking for one process.
#[derive(Clone)]
pub struct AutoResponder {
    matcher: KeywordMatcher,
    tracker: UsageTracker,
    metrics: Option<Arc<dyn ResponderMetrics>>,
}

impl AutoResponder {
    pub fn new(matcher: KeywordMatcher, tracker: UsageTracker) -> Self {
        Self {
            matcher,
            tracker,
            metrics: None,
        }
    }

    /// Build a responder from the umbrella configuration.
    ///
    /// Returns the in-memory usage store alongside so callers can report on
    /// keyword counts.
    pub fn from_config(
        cfg: &AutoreplyConfig,
    ) -> Result<(Self, Arc<InMemoryUsageStore>), ConfigLoadError> {
        cfg.validate()?;
        let matcher = KeywordMatcher::new(cfg.matcher.clone())
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;
        let (tracker, store) = cfg.build_usage();
        Ok((Self::new(matcher, tracker), store))
    }

    pub fn with_metrics(mut self, recorder: Arc<dyn ResponderMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }

    /// Match `message` against `rules` and record usage of the matched rule.
    ///
    /// Usage tracking never changes the returned result; a failing sink is
    /// only logged.
    pub fn respond(&self, tenant_id: &str, message: &str, rules: &[KeywordRule]) -> MatchResult {
        let start = Instant::now();
        let result = self.matcher.match_keyword(message, rules);

        if let Some(keyword_id) = result.keyword_id.as_deref() {
            let tracked = self.tracker.track_keyword_usage(keyword_id, tenant_id);
            debug!(tenant_id, keyword_id, tracked, "keyword usage recorded");
        }
        if let Some(recorder) = &self.metrics {
            recorder.record_match(tenant_id, start.elapsed(), &result);
        }
        result
    }

    /// Answer from the tenant's active rules in `store`.
    pub fn respond_from_store(
        &self,
        store: &dyn RuleStore,
        tenant_id: &str,
        message: &str,
    ) -> MatchResult {
        let rules = store.active_rules(tenant_id);
        self.respond(tenant_id, message, &rules)
    }
}

impl fmt::Debug for AutoResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoResponder")
            .field("matcher", &self.matcher)
            .field("tracker", &self.tracker)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMetrics {
        events: Mutex<Vec<(String, MatchType)>>,
    }

    impl ResponderMetrics for RecordingMetrics {
        fn record_match(&self, tenant_id: &str, _latency: Duration, result: &MatchResult) {
            self.events
                .lock()
                .unwrap()
                .push((tenant_id.to_string(), result.match_type));
        }
    }

    fn rules() -> Vec<KeywordRule> {
        vec![
            KeywordRule::new("k1", "pricing", "See /pricing").with_synonyms(["cost"]),
            KeywordRule::new("k2", "support", "Email us").with_regex(r"help|assist"),
        ]
    }

    #[test]
    fn respond_tracks_usage_on_match() {
        let (responder, store) = AutoResponder::from_config(&AutoreplyConfig::default()).unwrap();
        let result = responder.respond("t1", "cost", &rules());
        assert!(result.matched);
        assert_eq!(result.match_type, MatchType::Synonym);
        assert_eq!(store.count("t1", "k1"), 1);

        responder.respond("t1", "I need help", &rules());
        assert_eq!(store.count("t1", "k2"), 1);
    }

    #[test]
    fn respond_does_not_track_misses() {
        let (responder, store) = AutoResponder::from_config(&AutoreplyConfig::default()).unwrap();
        let result = responder.respond("t1", "weather", &rules());
        assert!(!result.matched);
        assert_eq!(store.total("t1"), 0);
    }

    #[test]
    fn respond_from_store_uses_active_rules() {
        let (responder, usage) = AutoResponder::from_config(&AutoreplyConfig::default()).unwrap();
        let store = InMemoryRuleStore::new();
        store
            .create(
                "t1",
                RuleDraft {
                    is_active: false,
                    ..RuleDraft::new("pricing", "hidden")
                },
            )
            .unwrap();
        assert!(!responder.respond_from_store(&store, "t1", "pricing").matched);

        let created = store.create("t1", RuleDraft::new("pricing", "shown")).unwrap();
        let result = responder.respond_from_store(&store, "t1", "Pricing");
        assert_eq!(result.response.as_deref(), Some("shown"));
        assert_eq!(usage.count("t1", &created.rule.id), 1);
    }

    #[test]
    fn metrics_observer_sees_every_message() {
        let recorder = Arc::new(RecordingMetrics::default());
        let (responder, _) = AutoResponder::from_config(&AutoreplyConfig::default()).unwrap();
        let responder = responder.with_metrics(recorder.clone());

        responder.respond("t1", "pricing", &rules());
        responder.respond("t2", "", &rules());

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                ("t1".to_string(), MatchType::Exact),
                ("t2".to_string(), MatchType::None)
            ]
        );
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let mut cfg = AutoreplyConfig::default();
        cfg.matcher.fuzzy_threshold = -1.0;
        assert!(AutoResponder::from_config(&cfg).is_err());
    }
}
