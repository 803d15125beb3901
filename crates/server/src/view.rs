use axum::http::Uri;
use serde::Serialize;
use service::api::Paging;
use service::pagination::{PageWindow, PagerLinks, PagingInfo, UrlNavigator};

/// JSON body of a paginated list route: one page of items plus everything a
/// client needs to draw the pagination bar.
#[derive(Debug, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub paging: PagingInfo,
    pub window: PageWindow,
    pub links: PagerLinks,
}

impl<T> ListView<T> {
    pub fn new(page: Paging<T>, uri: &Uri, scope: Option<&str>) -> Self {
        let paging = page.info();
        let window = PageWindow::compute(&paging);
        let navigator = UrlNavigator::new(uri.path(), uri.query(), scope);
        let links = PagerLinks::build(&navigator, &paging, &window);
        Self { items: page.items, paging, window, links }
    }
}
