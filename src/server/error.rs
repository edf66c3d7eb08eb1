//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::WorkflowError;

/// Error returned by HTTP handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// HTTP status of the response.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable description sent to the client.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::orchestrator::Step;
    use crate::error::AgentError;

    #[test]
    fn test_empty_input_maps_to_bad_request() {
        let err = ApiError::from(WorkflowError::EmptyInput);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "Message cannot be empty.");
    }

    #[test]
    fn test_generation_failure_maps_to_server_error() {
        let err = ApiError::from(WorkflowError::GenerationFailure {
            step: Step::Classify,
            source: AgentError::ApiRequest {
                message: "connection refused".to_string(),
                code: None,
            },
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail().contains("connection refused"));
    }
}
