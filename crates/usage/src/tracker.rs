use std::sync::Arc;

use tracing::{debug, warn};

use crate::sink::UsageSink;

/// Fire-and-forget keyword usage tracking.
///
/// Fans each event out to every configured sink. A failing sink is logged and
/// reported through the `bool` return value; it never panics and never
/// affects the reply already chosen for the visitor.
#[derive(Clone, Default)]
pub struct UsageTracker {
    sinks: Vec<Arc<dyn UsageSink>>,
}

impl UsageTracker {
    pub fn new(sink: Arc<dyn UsageSink>) -> Self {
        Self { sinks: vec![sink] }
    }

    pub fn with_sink(mut self, sink: Arc<dyn UsageSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Count one use of `keyword_id` for `tenant_id`.
    ///
    /// Returns `true` only if every sink recorded the event. Blank ids are
    /// rejected before any sink is called, even with no sinks configured.
    pub fn track_keyword_usage(&self, keyword_id: &str, tenant_id: &str) -> bool {
        if tenant_id.trim().is_empty() || keyword_id.trim().is_empty() {
            warn!(tenant_id, keyword_id, "refusing to track usage for a blank id");
            return false;
        }

        let mut ok = true;
        for sink in &self.sinks {
            if let Err(err) = sink.record(tenant_id, keyword_id) {
                warn!(
                    tenant_id,
                    keyword_id,
                    error = %err,
                    "failed to track keyword usage"
                );
                ok = false;
            }
        }
        if ok {
            debug!(tenant_id, keyword_id, "keyword usage tracked");
        }
        ok
    }
}

impl std::fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageTracker")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
