use thiserror::Error;

/// Failures talking to the remote REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("token expired or invalid: {0}")]
    TokenExpired(String),
    #[error("unauthorized access: {0}")]
    Unauthorized(String),
    #[error("upstream returned {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// HTTP status reported by the API, when there was a response at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ApiError::TokenExpired(_) => Some(401),
            ApiError::Unauthorized(_) => Some(403),
            ApiError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::TokenExpired(_) => "token_expired",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Upstream { .. } => "upstream",
            ApiError::Network(_) => "network",
            ApiError::Decode(_) => "decode",
            ApiError::InvalidEndpoint(_) => "invalid_endpoint",
        }
    }
}
