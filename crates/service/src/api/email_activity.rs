use url::Url;

use crate::errors::ApiError;
use crate::pagination::CanonicalPagination;

use super::types::{EmailActivity, Paging};
use super::{ApiClient, ApiOptions};

const EMAIL_ACTIVITY_ENDPOINT: &str = "/emails";

/// Paginated email activity listing.
pub async fn list(
    client: &ApiClient,
    token: Option<&str>,
    pagination: CanonicalPagination,
) -> Result<Paging<EmailActivity>, ApiError> {
    client
        .fetch_json(
            &client.endpoint(EMAIL_ACTIVITY_ENDPOINT),
            token,
            ApiOptions::get().with_pagination(pagination),
        )
        .await
}

/// A single email, including its delivery events.
pub async fn detail(client: &ApiClient, token: Option<&str>, email_id: &str) -> Result<EmailActivity, ApiError> {
    let url = detail_url(client, email_id)?;
    client.fetch_json(&url, token, ApiOptions::get()).await
}

fn detail_url(client: &ApiClient, email_id: &str) -> Result<String, ApiError> {
    if email_id.trim().is_empty() {
        return Err(ApiError::InvalidEndpoint("email id must not be empty".into()));
    }
    let endpoint = client.endpoint(EMAIL_ACTIVITY_ENDPOINT);
    let mut url = Url::parse(&endpoint).map_err(|e| ApiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidEndpoint(format!("{endpoint}: cannot be a base")))?
        .push(email_id);
    Ok(url.into())
}
