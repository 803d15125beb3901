//! Pagination core shared by every paginated list in the portal.
//!
//! - [`canonical`] turns whatever arrived in the query string into a bounded
//!   `(page, size)` pair, or tells the caller to redirect to the canonical URL.
//! - [`window`] works out which page controls a pagination bar shows.
//! - [`navigation`] maps user interaction back onto a callback or a URL.
//!
//! Everything in here is a pure function over small numeric inputs.

pub mod canonical;
pub mod navigation;
pub(crate) mod query;
pub mod window;

use serde::{Deserialize, Serialize};

pub use canonical::{ensure_canonical, Canonical, CanonicalOptions};
pub use navigation::{
    scoped_search, Callback, LocalUpdate, NavigationRequest, Navigator, PageLink, PageTarget,
    Paginator, PagerLinks, SizeLink, UrlNavigator, PAGE_SIZE_OPTIONS,
};
pub use window::PageWindow;

/// Inclusive page-size bounds enforced by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationBounds {
    pub min_size: u64,
    pub max_size: u64,
}

impl PaginationBounds {
    /// The bounds every list currently uses.
    pub const FIXED: PaginationBounds = PaginationBounds { min_size: 25, max_size: 100 };

    pub fn contains(&self, size: u64) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}

impl Default for PaginationBounds {
    fn default() -> Self { Self::FIXED }
}

/// A normalized `(page, size)` pair, ready to be sent to the remote API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

/// Server-reported metadata for one page of a larger result set.
///
/// `pages == ceil(total / size)` is assumed to be upheld by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub page: u64,
    pub pages: u64,
    pub size: u64,
    pub total: u64,
}
