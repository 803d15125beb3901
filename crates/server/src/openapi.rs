use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PagingInfoDoc { pub page: u64, pub pages: u64, pub size: u64, pub total: u64 }

#[derive(ToSchema)]
pub struct PageWindowDoc {
    pub current_page: u64,
    pub last_page: u64,
    pub visible_pages: Vec<u64>,
    pub show_first: bool,
    pub show_last: bool,
    pub show_leading_ellipsis: bool,
    pub show_trailing_ellipsis: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub start_record: u64,
    pub end_record: u64,
    pub total: u64,
}

#[derive(ToSchema)]
pub struct PageLinkDoc { pub page: u64, pub href: String, pub current: bool }

#[derive(ToSchema)]
pub struct SizeLinkDoc { pub size: u64, pub href: String, pub selected: bool }

#[derive(ToSchema)]
pub struct PagerLinksDoc {
    /// `"51-62 of 62"`, absent for an empty list
    pub range: Option<String>,
    pub first: Option<String>,
    pub previous: Option<String>,
    pub pages: Vec<PageLinkDoc>,
    pub next: Option<String>,
    pub last: Option<String>,
    pub sizes: Vec<SizeLinkDoc>,
}

#[derive(ToSchema)]
pub struct ProviderDoc {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub default: bool,
    pub site: String,
}

#[derive(ToSchema)]
pub struct ProviderListDoc {
    pub items: Vec<ProviderDoc>,
    pub paging: PagingInfoDoc,
    pub window: PageWindowDoc,
    pub links: PagerLinksDoc,
}

#[derive(ToSchema)]
pub struct EmailEventDoc {
    pub id: String,
    pub emaild_id: String,
    pub event_type: String,
    pub event_timestamp: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct EmailActivityDoc {
    pub id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    /// `sent`, `failed` or `queued`
    pub status: String,
    pub provider: String,
    pub provider_message_id: Option<String>,
    pub project_id: String,
    pub sent_at: Option<String>,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub events: Vec<EmailEventDoc>,
}

#[derive(ToSchema)]
pub struct EmailActivityListDoc {
    pub items: Vec<EmailActivityDoc>,
    pub paging: PagingInfoDoc,
    pub window: PageWindowDoc,
    pub links: PagerLinksDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::providers::list,
        crate::routes::activity::list,
        crate::routes::activity::detail,
    ),
    components(
        schemas(
            HealthResponse,
            PagingInfoDoc,
            PageWindowDoc,
            PageLinkDoc,
            SizeLinkDoc,
            PagerLinksDoc,
            ProviderDoc,
            ProviderListDoc,
            EmailEventDoc,
            EmailActivityDoc,
            EmailActivityListDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "providers"),
        (name = "activity")
    )
)]
pub struct ApiDoc;
