use crate::error::ServerResult;
use crate::routes::require_tenant;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::{KeywordRule, MatchResult};
use serde::Deserialize;
use std::sync::Arc;

/// Visitor message sent by the widget
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    /// Tenant whose active rules are consulted
    pub tenant_id: String,

    /// Raw visitor message
    #[serde(default)]
    pub message: String,
}

/// Answer a visitor message from the tenant's active rules.
///
/// A hit is counted in keyword usage; counting never changes the reply.
/// An empty message yields the "no match" decision, not an error.
pub async fn match_message(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<MatchRequest>,
) -> ServerResult<Json<MatchResult>> {
    let tenant_id = require_tenant(&request.tenant_id)?;
    let result = state
        .responder
        .respond_from_store(state.rules.as_ref(), tenant_id, &request.message);

    tracing::debug!(
        tenant_id,
        matched = result.matched,
        match_type = result.match_type.as_str(),
        "message answered"
    );
    Ok(Json(result))
}

/// Dry-run request: a message plus an ad-hoc rule set
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub rules: Vec<KeywordRule>,
}

/// Match a message against rules supplied in the request.
///
/// Nothing is stored and no usage is tracked; the dashboard uses this to
/// test a rule set before saving it.
pub async fn evaluate_rules(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<EvaluateRequest>,
) -> ServerResult<impl IntoResponse> {
    let result = state
        .responder
        .matcher()
        .match_keyword(&request.message, &request.rules);
    Ok(Json(result))
}
