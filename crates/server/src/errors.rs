use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ApiError;
use thiserror::Error;

/// JSON error body returned by every portal route.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "error": self.title,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ApiError> for JsonApiError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::TokenExpired(detail) => JsonApiError::new(StatusCode::UNAUTHORIZED, "Token Expired", Some(detail)),
            ApiError::Unauthorized(detail) => JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", Some(detail)),
            ApiError::Upstream { status: 404, detail } => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(detail))
            }
            ApiError::Upstream { detail, .. } => JsonApiError::new(StatusCode::BAD_GATEWAY, "Bad Gateway", Some(detail)),
            err @ ApiError::Decode(_) => JsonApiError::new(StatusCode::BAD_GATEWAY, "Bad Gateway", Some(err.to_string())),
            err @ ApiError::Network(_) => {
                JsonApiError::new(StatusCode::BAD_GATEWAY, "Upstream Unavailable", Some(err.to_string()))
            }
            ApiError::InvalidEndpoint(detail) => JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail)),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("api client: {0}")]
    Api(#[from] ApiError),
}
