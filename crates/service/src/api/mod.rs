//! Remote REST API access.
//!
//! [`ApiClient`] is the single place that knows how requests are built
//! (bearer token, query params, pagination) and how error statuses map onto
//! [`ApiError`]. The typed queries live in [`providers`] and [`email_activity`].

pub mod email_activity;
pub mod providers;
pub mod types;

use std::time::Duration;

use configs::{ApiConfig, NodeEnv};
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::errors::ApiError;
use crate::pagination::query::QueryPairs;
use crate::pagination::CanonicalPagination;

pub use types::Paging;

/// Extra request knobs for [`ApiClient::fetch_json`].
#[derive(Clone, Debug, Default)]
pub struct ApiOptions {
    pub params: Vec<(String, String)>,
    pub pagination: Option<CanonicalPagination>,
}

impl ApiOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn with_pagination(mut self, pagination: CanonicalPagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    node_env: NodeEnv,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, node_env: NodeEnv) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        Ok(Self { http, base_url, node_env })
    }

    pub fn from_config(cfg: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(cfg.url.trim(), Duration::from_secs(cfg.timeout_secs), cfg.node_env)
    }

    /// `base_url` + `path`, where `path` starts with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the final request URL: `params` first, then pagination, each
    /// overwriting an existing key of the same name.
    pub fn request_url(endpoint: &str, options: &ApiOptions) -> Result<Url, ApiError> {
        let mut url = Url::parse(endpoint).map_err(|e| ApiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if options.params.is_empty() && options.pagination.is_none() {
            return Ok(url);
        }

        let mut pairs = QueryPairs::parse(url.query());
        for (key, value) in &options.params {
            pairs.set(key, value.clone());
        }
        if let Some(p) = options.pagination {
            pairs.set("page", p.page.to_string());
            pairs.set("size", p.size.to_string());
        }
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&pairs.to_query_string()));
        }
        Ok(url)
    }

    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        options: ApiOptions,
    ) -> Result<T, ApiError> {
        let url = Self::request_url(endpoint, &options)?;
        let method = Method::GET;
        let token = token.map(str::trim).filter(|t| !t.is_empty());

        if self.node_env.is_development() {
            debug!(curl = %curl_snippet(&method, &url, token.is_some()), "api request");
        }

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            let message = status.canonical_reason().unwrap_or("No Content");
            return serde_json::from_value(serde_json::json!({ "message": message }))
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let body = response.bytes().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_client_error() || status.is_server_error() {
            let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            let err = status_error(status, &json);
            warn!(%method, path = url.path(), status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull a human-readable message out of an error body: `detail` as a string,
/// or the `msg` of the first entry when `detail` is a validation list.
pub fn error_detail(json: &Value) -> Option<String> {
    match json.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn status_error(status: StatusCode, json: &Value) -> ApiError {
    let detail = error_detail(json);
    match status {
        StatusCode::UNAUTHORIZED => {
            ApiError::TokenExpired(detail.unwrap_or_else(|| "Token expired or invalid".into()))
        }
        StatusCode::FORBIDDEN => ApiError::Unauthorized(detail.unwrap_or_else(|| "Unauthorized access".into())),
        _ => ApiError::Upstream {
            status: status.as_u16(),
            detail: detail.unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string()),
        },
    }
}

/// A copy-pasteable curl line for a request; the token itself is never logged.
fn curl_snippet(method: &Method, url: &Url, authorized: bool) -> String {
    let mut out = format!(
        "curl -X {method} '{url}' -H 'Content-Type: application/json'"
    );
    if authorized {
        out.push_str(" -H 'Authorization: Bearer <redacted>'");
    }
    out
}
