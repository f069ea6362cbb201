use crate::error::ServerResult;
use crate::routes::require_tenant;
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use matcher::KeywordRule;
use rules::{export_csv, import_into, ImportReport, RuleDraft, StoredRule};
use serde::Serialize;
use std::sync::Arc;

/// Rule listing response
#[derive(Debug, Serialize)]
pub struct RuleList {
    pub tenant_id: String,
    pub total: usize,
    pub rules: Vec<StoredRule>,
}

/// List every rule of a tenant, highest priority first
pub async fn list_rules(
    State(state): State<Arc<ServerState>>,
    Path(tenant_id): Path<String>,
) -> ServerResult<Json<RuleList>> {
    let tenant_id = require_tenant(&tenant_id)?;
    let rules = state.rules.list(tenant_id);
    Ok(Json(RuleList {
        tenant_id: tenant_id.to_string(),
        total: rules.len(),
        rules,
    }))
}

/// Create a rule; the store assigns its id
pub async fn create_rule(
    State(state): State<Arc<ServerState>>,
    Path(tenant_id): Path<String>,
    Json(draft): Json<RuleDraft>,
) -> ServerResult<impl IntoResponse> {
    let tenant_id = require_tenant(&tenant_id)?;
    let stored = state.rules.create(tenant_id, draft)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn get_rule(
    State(state): State<Arc<ServerState>>,
    Path((tenant_id, rule_id)): Path<(String, String)>,
) -> ServerResult<Json<StoredRule>> {
    let tenant_id = require_tenant(&tenant_id)?;
    Ok(Json(state.rules.get(tenant_id, &rule_id)?))
}

/// Replace a rule's fields, keeping its id and creation time
pub async fn update_rule(
    State(state): State<Arc<ServerState>>,
    Path((tenant_id, rule_id)): Path<(String, String)>,
    Json(draft): Json<RuleDraft>,
) -> ServerResult<Json<StoredRule>> {
    let tenant_id = require_tenant(&tenant_id)?;
    Ok(Json(state.rules.update(tenant_id, &rule_id, draft)?))
}

pub async fn delete_rule(
    State(state): State<Arc<ServerState>>,
    Path((tenant_id, rule_id)): Path<(String, String)>,
) -> ServerResult<StatusCode> {
    let tenant_id = require_tenant(&tenant_id)?;
    state.rules.delete(tenant_id, &rule_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Download the tenant's rules as CSV
pub async fn export_rules(
    State(state): State<Arc<ServerState>>,
    Path(tenant_id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let tenant_id = require_tenant(&tenant_id)?;
    let rules: Vec<KeywordRule> = state
        .rules
        .list(tenant_id)
        .into_iter()
        .map(|stored| stored.rule)
        .collect();
    let disposition = format!("attachment; filename=\"keyword-responses-{tenant_id}.csv\"");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        export_csv(&rules),
    ))
}

/// Create rules from a CSV body
///
/// Rows the store rejects are skipped and counted; the call fails only when
/// the document itself is unusable.
pub async fn import_rules(
    State(state): State<Arc<ServerState>>,
    Path(tenant_id): Path<String>,
    body: String,
) -> ServerResult<(StatusCode, Json<ImportReport>)> {
    let tenant_id = require_tenant(&tenant_id)?;
    let report = import_into(state.rules.as_ref(), tenant_id, &body)?;
    tracing::info!(
        tenant_id,
        created = report.created.len(),
        skipped = report.skipped,
        "CSV import finished"
    );
    Ok((StatusCode::CREATED, Json(report)))
}
