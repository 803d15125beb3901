//! Turning pagination-bar interaction into navigation.
//!
//! A [`Paginator`] owns the current [`PagingInfo`] and hands every page or
//! page-size change to a [`Navigator`]: either an injected callback that the
//! caller uses to refetch, or URL navigation that rewrites the scoped
//! `page`/`size` query keys and lets the next request hit the normalizer.

use serde::Serialize;

use super::query::{scoped_key, QueryPairs};
use super::window::PageWindow;
use super::{CanonicalPagination, PagingInfo};

/// Page sizes offered by the size selector.
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [25, 50, 75, 100];

/// The query keys a navigation rewrites. Keys left as `None` are untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageTarget {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageTarget {
    pub fn page(page: u64) -> Self {
        Self { page: Some(page), size: None }
    }

    /// A size change always lands on page 1; the old record offset means
    /// nothing under a different size.
    pub fn resize(size: u64) -> Self {
        Self { page: Some(1), size: Some(size) }
    }
}

/// `path?query` with the scoped keys of `target` overwritten.
pub fn scoped_search(path: &str, query: Option<&str>, scope: Option<&str>, target: PageTarget) -> String {
    let mut params = QueryPairs::parse(query);
    if let Some(size) = target.size {
        params.set(&scoped_key(scope, "size"), size.to_string());
    }
    if let Some(page) = target.page {
        params.set(&scoped_key(scope, "page"), page.to_string());
    }
    params.to_href(path)
}

/// A single navigation, as seen by a [`Navigator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Full `(page, size)` after the change.
    pub next: CanonicalPagination,
    /// Only the keys that changed.
    pub target: PageTarget,
}

/// Whether the paginator should adopt the new page/size immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalUpdate {
    Apply,
    Skip,
}

pub trait Navigator {
    fn navigate(&mut self, request: NavigationRequest) -> LocalUpdate;
}

/// Callback navigation: the caller refetches, the paginator tracks the
/// new page locally until fresh metadata arrives.
pub struct Callback<F>(pub F);

impl<F> Navigator for Callback<F>
where
    F: FnMut(CanonicalPagination),
{
    fn navigate(&mut self, request: NavigationRequest) -> LocalUpdate {
        (self.0)(request.next);
        LocalUpdate::Apply
    }
}

/// URL navigation: builds the scoped href for the current location. The
/// page itself only changes once the new request has been served.
#[derive(Clone, Debug)]
pub struct UrlNavigator {
    path: String,
    query: Option<String>,
    scope: Option<String>,
    visited: Vec<String>,
}

impl UrlNavigator {
    pub fn new(path: impl Into<String>, query: Option<&str>, scope: Option<&str>) -> Self {
        Self {
            path: path.into(),
            query: query.map(str::to_string),
            scope: scope.filter(|s| !s.is_empty()).map(str::to_string),
            visited: Vec::new(),
        }
    }

    pub fn href(&self, target: PageTarget) -> String {
        scoped_search(&self.path, self.query.as_deref(), self.scope.as_deref(), target)
    }

    /// Hrefs navigated to so far, oldest first.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

impl Navigator for UrlNavigator {
    fn navigate(&mut self, request: NavigationRequest) -> LocalUpdate {
        let href = self.href(request.target);
        tracing::debug!(%href, "pagination navigation");
        self.visited.push(href);
        LocalUpdate::Skip
    }
}

pub struct Paginator<N> {
    meta: PagingInfo,
    navigator: N,
}

impl<N: Navigator> Paginator<N> {
    pub fn new(meta: PagingInfo, navigator: N) -> Self {
        Self { meta, navigator }
    }

    pub fn meta(&self) -> &PagingInfo {
        &self.meta
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::compute(&self.meta)
    }

    /// Fresh metadata from a refetch replaces the local view wholesale.
    pub fn sync(&mut self, meta: PagingInfo) {
        self.meta = meta;
    }

    /// Returns `false` when `page` is already current.
    pub fn go_to(&mut self, page: u64) -> bool {
        if page == self.meta.page {
            return false;
        }
        let request = NavigationRequest {
            next: CanonicalPagination { page, size: self.meta.size },
            target: PageTarget::page(page),
        };
        if self.navigator.navigate(request) == LocalUpdate::Apply {
            self.meta = PagingInfo { page, ..self.meta };
        }
        true
    }

    pub fn previous(&mut self) -> bool {
        self.meta.page > 1 && self.go_to(self.meta.page - 1)
    }

    pub fn next(&mut self) -> bool {
        self.meta.page < self.meta.pages && self.go_to(self.meta.page + 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.meta.pages > 0 && self.go_to(self.meta.pages)
    }

    pub fn change_size(&mut self, size: u64) {
        let request = NavigationRequest {
            next: CanonicalPagination { page: 1, size },
            target: PageTarget::resize(size),
        };
        if self.navigator.navigate(request) == LocalUpdate::Apply {
            self.meta = PagingInfo { page: 1, size, ..self.meta };
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub href: String,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SizeLink {
    pub size: u64,
    pub href: String,
    pub selected: bool,
}

/// Every control of a pagination bar, resolved to an href.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PagerLinks {
    pub range: Option<String>,
    pub first: Option<String>,
    pub previous: Option<String>,
    pub pages: Vec<PageLink>,
    pub next: Option<String>,
    pub last: Option<String>,
    pub sizes: Vec<SizeLink>,
}

impl PagerLinks {
    pub fn build(navigator: &UrlNavigator, meta: &PagingInfo, window: &PageWindow) -> Self {
        let href = |page: u64| navigator.href(PageTarget::page(page));

        Self {
            range: window.range_label(),
            first: window.show_first.then(|| href(1)),
            previous: window.has_previous.then(|| href(meta.page - 1)),
            pages: window
                .visible_pages
                .iter()
                .map(|&page| PageLink { page, href: href(page), current: window.is_current(page) })
                .collect(),
            next: window.has_next.then(|| href(meta.page + 1)),
            last: window.show_last.then(|| href(meta.pages)),
            sizes: PAGE_SIZE_OPTIONS
                .iter()
                .map(|&size| SizeLink {
                    size,
                    href: navigator.href(PageTarget::resize(size)),
                    selected: size == meta.size,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page: u64, pages: u64, size: u64) -> PagingInfo {
        PagingInfo { page, pages, size, total: pages * size }
    }

    #[test]
    fn resize_always_targets_first_page() {
        for current in [1, 4, 19] {
            let mut seen = Vec::new();
            let mut p = Paginator::new(meta(current, 20, 25), Callback(|next: CanonicalPagination| seen.push(next)));
            p.change_size(50);
            assert_eq!(p.meta().page, 1);
            assert_eq!(p.meta().size, 50);
            drop(p);
            assert_eq!(seen, vec![CanonicalPagination { page: 1, size: 50 }]);
        }
    }

    #[test]
    fn selecting_current_page_is_noop() {
        let mut calls = 0;
        let mut p = Paginator::new(meta(3, 10, 25), Callback(|_: CanonicalPagination| calls += 1));
        assert!(!p.go_to(3));
        assert!(p.go_to(4));
        assert_eq!(p.meta().page, 4);
        drop(p);
        assert_eq!(calls, 1);
    }

    #[test]
    fn callback_receives_full_pair_and_tracks_locally() {
        let mut seen = Vec::new();
        let mut p = Paginator::new(meta(1, 3, 75), Callback(|next: CanonicalPagination| seen.push(next)));
        assert!(!p.previous());
        assert!(p.next());
        assert!(p.last());
        assert!(!p.next());
        assert_eq!(p.window().current_page, 3);
        drop(p);
        assert_eq!(
            seen,
            vec![
                CanonicalPagination { page: 2, size: 75 },
                CanonicalPagination { page: 3, size: 75 },
            ]
        );
    }

    #[test]
    fn url_navigation_rewrites_scoped_keys_only() {
        let nav = UrlNavigator::new("/activity", Some("status=failed&activity%3Apage=2"), Some("activity"));
        let mut p = Paginator::new(meta(2, 10, 25), nav);
        assert!(p.go_to(5));
        p.change_size(100);
        // URL mode waits for the next request to change the page
        assert_eq!(p.meta().page, 2);
        assert_eq!(
            p.navigator().visited(),
            [
                "/activity?status=failed&activity%3Apage=5".to_string(),
                "/activity?status=failed&activity%3Apage=1&activity%3Asize=100".to_string(),
            ]
        );
    }

    #[test]
    fn sync_replaces_meta() {
        let mut p = Paginator::new(meta(1, 2, 25), Callback(|_: CanonicalPagination| {}));
        p.sync(meta(2, 8, 50));
        assert_eq!(*p.meta(), meta(2, 8, 50));
        // eight pages is past the show-all limit, so the window is clipped
        assert_eq!(p.window().visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(p.window().show_last);

        p.sync(meta(6, 7, 50));
        assert_eq!(p.window().visible_pages, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn scoped_search_without_scope() {
        assert_eq!(scoped_search("/providers", None, None, PageTarget::page(3)), "/providers?page=3");
        assert_eq!(
            scoped_search("/providers", Some("page=3&size=25"), None, PageTarget::resize(75)),
            "/providers?page=1&size=75"
        );
    }

    #[test]
    fn pager_links_for_middle_page() {
        let info = PagingInfo { page: 10, pages: 20, size: 25, total: 500 };
        let window = PageWindow::compute(&info);
        let nav = UrlNavigator::new("/providers", Some("page=10&size=25"), None);
        let links = PagerLinks::build(&nav, &info, &window);

        assert_eq!(links.range.as_deref(), Some("226-250 of 500"));
        assert_eq!(links.first.as_deref(), Some("/providers?page=1&size=25"));
        assert_eq!(links.previous.as_deref(), Some("/providers?page=9&size=25"));
        assert_eq!(links.next.as_deref(), Some("/providers?page=11&size=25"));
        assert_eq!(links.last.as_deref(), Some("/providers?page=20&size=25"));
        assert_eq!(links.pages.iter().map(|l| l.page).collect::<Vec<_>>(), vec![8, 9, 10, 11, 12]);
        assert_eq!(links.pages.iter().filter(|l| l.current).count(), 1);
        assert!(links.pages[2].current);
        assert_eq!(links.sizes.len(), PAGE_SIZE_OPTIONS.len());
        assert!(links.sizes[0].selected);
        assert_eq!(links.sizes[1].href, "/providers?page=1&size=50");
    }

    #[test]
    fn pager_links_on_single_page() {
        let info = PagingInfo { page: 1, pages: 1, size: 25, total: 3 };
        let window = PageWindow::compute(&info);
        let nav = UrlNavigator::new("/providers", None, None);
        let links = PagerLinks::build(&nav, &info, &window);
        assert!(links.first.is_none() && links.previous.is_none());
        assert!(links.next.is_none() && links.last.is_none());
        assert_eq!(links.pages.len(), 1);
        assert_eq!(links.range.as_deref(), Some("1-3 of 3"));
    }
}
