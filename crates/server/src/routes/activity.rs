use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Response},
    Json,
};
use service::api::{email_activity, types::EmailActivity};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::{bearer_token, canonical_or_redirect, upstream};
use crate::state::ServerState;
use crate::view::ListView;

#[utoipa::path(
    get, path = "/activity", tag = "activity",
    params(
        ("page" = Option<u64>, Query, description = "1-based page; read as `{scope}:page` when the list is scoped"),
        ("size" = Option<u64>, Query, description = "Page size, 25..=100; read as `{scope}:size` when the list is scoped")
    ),
    responses(
        (status = 200, description = "One page of email activity", body = crate::openapi::EmailActivityListDoc),
        (status = 302, description = "Redirect to the canonical pagination URL"),
        (status = 401, description = "Token expired or invalid"),
        (status = 403, description = "Unauthorized access"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Remote API failure or unreachable")
    )
)]
pub async fn list(State(state): State<ServerState>, uri: Uri, headers: HeaderMap) -> Result<Response, JsonApiError> {
    let options = &state.lists.activity;
    let pagination = match canonical_or_redirect("activity", uri.path(), uri.query(), options) {
        Ok(p) => p,
        Err(redirect) => return Ok(redirect),
    };

    let page = upstream("emails", email_activity::list(&state.api, bearer_token(&headers), pagination).await)?;
    info!(list = "activity", page = page.page, size = page.size, total = page.total, "list email activity");
    Ok(Json(ListView::new(page, &uri, options.scope())).into_response())
}

#[utoipa::path(
    get, path = "/activity/{id}", tag = "activity",
    params(("id" = String, Path, description = "Email id")),
    responses(
        (status = 200, description = "Email with its delivery events", body = crate::openapi::EmailActivityDoc),
        (status = 400, description = "Invalid email id"),
        (status = 401, description = "Token expired or invalid"),
        (status = 403, description = "Unauthorized access"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Remote API failure or unreachable")
    )
)]
pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<EmailActivity>, JsonApiError> {
    let email = upstream("email_detail", email_activity::detail(&state.api, bearer_token(&headers), &id).await)?;
    info!(email_id = %email.id, events = email.events.len(), "email activity detail");
    Ok(Json(email))
}
