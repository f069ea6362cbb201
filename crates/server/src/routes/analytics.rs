use crate::error::ServerResult;
use crate::routes::require_tenant;
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Query parameters for the keyword report
#[derive(Debug, Deserialize)]
pub struct KeywordReportQuery {
    /// Maximum rows; defaults to the engine's `usage.top_keywords_limit`
    #[serde(default)]
    pub limit: Option<usize>,
}

/// One row of the keyword report
#[derive(Debug, Serialize)]
pub struct KeywordUsageRow {
    pub keyword_id: String,
    /// Keyword text, absent once the rule has been deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub count: u64,
}

/// Keyword report response
#[derive(Debug, Serialize)]
pub struct KeywordReport {
    pub tenant_id: String,
    pub total_matches: u64,
    pub keywords: Vec<KeywordUsageRow>,
}

/// Most-matched keywords of a tenant, busiest first
pub async fn top_keywords(
    State(state): State<Arc<ServerState>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<KeywordReportQuery>,
) -> ServerResult<Json<KeywordReport>> {
    let tenant_id = require_tenant(&tenant_id)?;
    let limit = query
        .limit
        .unwrap_or(state.engine.usage.top_keywords_limit);

    let names: HashMap<String, String> = state
        .rules
        .list(tenant_id)
        .into_iter()
        .map(|stored| (stored.rule.id, stored.rule.keyword))
        .collect();

    let keywords = state
        .usage
        .top_keywords(tenant_id, limit)
        .into_iter()
        .map(|row| KeywordUsageRow {
            keyword: names.get(&row.keyword_id).cloned(),
            keyword_id: row.keyword_id,
            count: row.count,
        })
        .collect();

    Ok(Json(KeywordReport {
        tenant_id: tenant_id.to_string(),
        total_matches: state.usage.total(tenant_id),
        keywords,
    }))
}
