use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_LEVEL: &str = "Invalid language level";

/// Failures talking to the model runtime.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("model runtime request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model runtime returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected model runtime response: {0}")]
    Decode(String),
    #[error("model runtime response has no message content")]
    MissingContent,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "simplification failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_verbatim() {
        assert_eq!(
            ServiceError::Validation(MISSING_FIELDS).to_string(),
            "Missing required fields"
        );
        assert_eq!(
            ServiceError::Validation(INVALID_LEVEL).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_failures_are_server_errors() {
        let err = ServiceError::from(GatewayError::Status {
            status: 404,
            message: "model 'mistral' not found".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("model 'mistral' not found"));
        assert_eq!(
            ServiceError::from(GatewayError::MissingContent).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
