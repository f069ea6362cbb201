use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rules::RuleError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Engine configuration error: {0}")]
    EngineConfig(#[from] autoreply::ConfigLoadError),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Rule(RuleError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServerError::Rule(RuleError::Csv(_)) => StatusCode::BAD_REQUEST,
            ServerError::Rule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::EngineConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Rule(RuleError::NotFound { .. }) => "RULE_NOT_FOUND",
            ServerError::Rule(RuleError::Csv(_)) => "CSV_ERROR",
            ServerError::Rule(_) => "VALIDATION_ERROR",
            ServerError::EngineConfig(_) => "ENGINE_CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        if status.is_server_error() {
            tracing::error!(code = %body.error.code, error = %body.error.message, "request failed");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn rule_errors_map_to_status() {
        let not_found = ServerError::from(RuleError::NotFound {
            tenant_id: "t".into(),
            rule_id: "r".into(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.error_code(), "RULE_NOT_FOUND");

        let invalid = ServerError::from(RuleError::Validation("keyword is required".into()));
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let csv = ServerError::from(RuleError::Csv("missing headers: response".into()));
        assert_eq!(csv.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_config_errors_are_500() {
        let err = ServerError::from(autoreply::ConfigLoadError::Validation("bad".into()));
        assert_eq!(err.error_code(), "ENGINE_CONFIG_ERROR");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn body_is_error_response() {
        let response = ServerError::BadRequest("tenant_id is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "BAD_REQUEST");
        assert_eq!(body.error.message, "Bad request: tenant_id is required");
    }
}
