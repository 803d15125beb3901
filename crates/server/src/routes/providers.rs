use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
    Json,
};
use service::api::providers;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::{bearer_token, canonical_or_redirect, upstream};
use crate::state::ServerState;
use crate::view::ListView;

#[utoipa::path(
    get, path = "/providers", tag = "providers",
    params(
        ("page" = Option<u64>, Query, description = "1-based page; read as `{scope}:page` when the list is scoped"),
        ("size" = Option<u64>, Query, description = "Page size, 25..=100; read as `{scope}:size` when the list is scoped")
    ),
    responses(
        (status = 200, description = "One page of providers", body = crate::openapi::ProviderListDoc),
        (status = 302, description = "Redirect to the canonical pagination URL"),
        (status = 401, description = "Token expired or invalid"),
        (status = 403, description = "Unauthorized access"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Remote API failure or unreachable")
    )
)]
pub async fn list(State(state): State<ServerState>, uri: Uri, headers: HeaderMap) -> Result<Response, JsonApiError> {
    let options = &state.lists.providers;
    let pagination = match canonical_or_redirect("providers", uri.path(), uri.query(), options) {
        Ok(p) => p,
        Err(redirect) => return Ok(redirect),
    };

    let page = upstream("providers", providers::list(&state.api, bearer_token(&headers), pagination).await)?;
    info!(list = "providers", page = page.page, size = page.size, total = page.total, "list providers");
    Ok(Json(ListView::new(page, &uri, options.scope())).into_response())
}
