//! Typed API error for HTTP handlers.
//!
//! Converts service errors into JSON responses with the matching status code.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fortune_core::CoreError;
use fortune_service::ServiceError;

/// API error with HTTP status code and human-readable message.
///
/// Serialized as `{"error": "message"}`. `Internal` logs the real error
/// server-side and returns a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 401 Unauthorized: no requester identity.
    Unauthorized(String),
    /// 403 Forbidden: the requester does not own the resource.
    Forbidden(String),
    /// 404 Not Found.
    NotFound(String),
    /// 409 Conflict: the resource is in a state that rejects the operation.
    Conflict(String),
    /// 502 Bad Gateway: the language model call failed.
    BadGateway(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            return Self::NotFound(err.to_string());
        }
        if err.is_duplicate() {
            return Self::Conflict(err.to_string());
        }
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Forbidden(msg) => Self::Forbidden(msg),
            ServiceError::Conflict(msg) => Self::Conflict(msg),
            ServiceError::Generation(e) => {
                tracing::warn!(error = %e, "generation failed");
                Self::BadGateway("fortune generation failed, please retry".to_owned())
            },
            other @ (ServiceError::Storage(_) | ServiceError::NotFound { .. }) => {
                Self::Internal(other.into())
            },
        }
    }
}
