use crate::config::ServerConfig;
use crate::error::ServerResult;
use autoreply::{AutoResponder, AutoreplyConfig, ResponderMetrics};
use matcher::MatchResult;
use metrics_exporter_prometheus::PrometheusHandle;
use rules::{InMemoryRuleStore, RuleStore};
use std::sync::Arc;
use std::time::Duration;
use usage::InMemoryUsageStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Engine configuration (matcher, usage, widget)
    pub engine: Arc<AutoreplyConfig>,

    /// Tenant rule sets
    pub rules: Arc<dyn RuleStore>,

    /// Matcher plus usage tracking (shared across requests)
    pub responder: AutoResponder,

    /// Keyword usage counters backing the analytics routes
    pub usage: Arc<InMemoryUsageStore>,

    /// Prometheus recorder handle, present once the exporter is installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, reading the engine YAML file when one is configured
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let engine = match &config.engine_config {
            Some(path) => {
                tracing::info!(path = %path, "loading engine configuration");
                AutoreplyConfig::from_file(path)?
            }
            None => AutoreplyConfig::default(),
        };
        Self::with_engine(config, engine)
    }

    /// Create server state from an already loaded engine configuration
    pub fn with_engine(config: ServerConfig, engine: AutoreplyConfig) -> ServerResult<Self> {
        let (responder, usage) = AutoResponder::from_config(&engine)?;
        let rules = Arc::new(InMemoryRuleStore::with_matcher_config(engine.matcher.clone()));

        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            rules,
            responder,
            usage,
            metrics: None,
        })
    }

    /// Attach an installed Prometheus recorder and time every match through it
    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.responder = self.responder.with_metrics(Arc::new(MatchTelemetry));
        self.metrics = Some(handle);
        self
    }
}

/// Records match latency and outcome through the `metrics` facade
struct MatchTelemetry;

impl ResponderMetrics for MatchTelemetry {
    fn record_match(&self, _tenant_id: &str, latency: Duration, result: &MatchResult) {
        metrics::histogram!(
            "keyword_match_duration_seconds",
            "match_type" => result.match_type.as_str()
        )
        .record(latency.as_secs_f64());
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
