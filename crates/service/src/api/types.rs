use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::PagingInfo;

/// One page of a list endpoint, as the API returns it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub pages: u64,
    pub size: u64,
    pub total: u64,
}

impl<T> Paging<T> {
    pub fn info(&self) -> PagingInfo {
        PagingInfo { page: self.page, pages: self.pages, size: self.size, total: self.total }
    }
}

/// An email-sending provider configured for the project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub site: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
    Queued,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailActivity {
    pub id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    #[serde(default)]
    pub body: String,
    pub status: EmailStatus,
    pub provider: String,
    #[serde(default)]
    pub provider_message_id: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub sent_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub events: Vec<EmailEvent>,
}

/// A delivery event (delivered, opened, bounced, ...) reported by the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmailEvent {
    pub id: String,
    // the API spells it this way
    #[serde(rename = "emaild_id")]
    pub email_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub event_type: String,
    pub event_timestamp: String,
    #[serde(default)]
    pub details: BTreeMap<String, Value>,
}
