use std::sync::Arc;

use configs::AppConfig;
use service::api::ApiClient;
use service::pagination::CanonicalOptions;

use crate::errors::StartupError;

/// Normalizer options for each paginated list.
#[derive(Clone, Debug, Default)]
pub struct ListSettings {
    pub providers: CanonicalOptions,
    pub activity: CanonicalOptions,
}

impl ListSettings {
    pub fn from_config(cfg: &configs::PaginationConfig) -> Result<Self, StartupError> {
        let settings = Self {
            providers: CanonicalOptions::from(&cfg.providers),
            activity: CanonicalOptions::from(&cfg.activity),
        };
        settings
            .providers
            .validate()
            .map_err(|e| StartupError::InvalidConfig(format!("pagination.providers: {e}")))?;
        settings
            .activity
            .validate()
            .map_err(|e| StartupError::InvalidConfig(format!("pagination.activity: {e}")))?;
        Ok(settings)
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub api: ApiClient,
    pub lists: Arc<ListSettings>,
}

impl ServerState {
    pub fn new(api: ApiClient, lists: ListSettings) -> Self {
        Self { api, lists: Arc::new(lists) }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, StartupError> {
        let api = ApiClient::from_config(&cfg.api)?;
        let lists = ListSettings::from_config(&cfg.pagination)?;
        Ok(Self::new(api, lists))
    }
}
