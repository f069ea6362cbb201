//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the autoreply
//! server. Routes are organized by functionality:
//!
//! - `health`: Health checks, readiness, and metrics
//! - `matching`: Answering visitor messages and dry-running rule sets
//! - `rules`: Tenant rule CRUD plus CSV import/export
//! - `analytics`: Keyword usage reports
//! - `widget`: Widget settings served to the embed script

pub mod analytics;
pub mod health;
pub mod matching;
pub mod rules;
pub mod widget;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /).
///
/// # Response
///
/// ```json
/// {
///   "name": "Autoreply Server",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Autoreply Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/match",
            "/api/v1/evaluate",
            "/api/v1/widget/settings",
            "/api/v1/tenants/{tenant_id}/rules",
            "/api/v1/tenants/{tenant_id}/rules/{rule_id}",
            "/api/v1/tenants/{tenant_id}/rules/export",
            "/api/v1/tenants/{tenant_id}/rules/import",
            "/api/v1/tenants/{tenant_id}/analytics/keywords",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Reject blank tenant ids before they reach a store.
pub(crate) fn require_tenant(tenant_id: &str) -> ServerResult<&str> {
    let tenant_id = tenant_id.trim();
    if tenant_id.is_empty() {
        return Err(ServerError::BadRequest("tenant_id is required".to_string()));
    }
    Ok(tenant_id)
}
