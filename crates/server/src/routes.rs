pub mod activity;
pub mod providers;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::types::Health;
use service::errors::ApiError;
use service::pagination::{ensure_canonical, Canonical, CanonicalOptions, CanonicalPagination};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};
use utoipa::OpenApi;

use crate::errors::JsonApiError;
use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Bearer token of the incoming request, forwarded as-is to the remote API.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim()).filter(|t| !t.is_empty())
}

/// Run the normalizer for `list`; a non-canonical request becomes a `302 Found`.
pub(crate) fn canonical_or_redirect(
    list: &'static str,
    path: &str,
    query: Option<&str>,
    options: &CanonicalOptions,
) -> Result<CanonicalPagination, Response> {
    match ensure_canonical(path, query, options) {
        Canonical::Accepted(pagination) => Ok(pagination),
        Canonical::Redirect { location, canonical } => {
            metrics::CANONICAL_REDIRECTS_TOTAL.with_label_values(&[list]).inc();
            info!(list, %location, page = canonical.page, size = canonical.size, "redirect to canonical pagination");
            Err((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
    }
}

/// Count an upstream call and turn its failure into the portal's error body.
pub(crate) fn upstream<T>(endpoint: &'static str, result: Result<T, ApiError>) -> Result<T, JsonApiError> {
    metrics::UPSTREAM_REQUESTS_TOTAL.with_label_values(&[endpoint]).inc();
    result.map_err(|e| {
        metrics::UPSTREAM_ERRORS_TOTAL.with_label_values(&[endpoint, e.kind()]).inc();
        warn!(endpoint, kind = e.kind(), error = %e, "upstream request failed");
        JsonApiError::from(e)
    })
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    metrics::init();

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/openapi.json", get(openapi_json));

    let lists = Router::new()
        .route("/providers", get(providers::list))
        .route("/activity", get(activity::list))
        .route("/activity/:id", get(activity::detail))
        .with_state(state);

    public.merge(lists).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                    .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
            )
            .layer(cors),
    )
}
