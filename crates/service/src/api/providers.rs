use crate::errors::ApiError;
use crate::pagination::CanonicalPagination;

use super::types::{Paging, Provider};
use super::{ApiClient, ApiOptions};

const PROVIDERS_ENDPOINT: &str = "/providers/";

/// Fetch one page of configured email providers.
pub async fn list(
    client: &ApiClient,
    token: Option<&str>,
    pagination: CanonicalPagination,
) -> Result<Paging<Provider>, ApiError> {
    client
        .fetch_json(
            &client.endpoint(PROVIDERS_ENDPOINT),
            token,
            ApiOptions::get().with_pagination(pagination),
        )
        .await
}
