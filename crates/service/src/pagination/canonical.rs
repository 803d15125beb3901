//! Canonical pagination for list routes.
//!
//! Every paginated route runs [`ensure_canonical`] before it fetches data. Any
//! query that is out of bounds or malformed is answered with a redirect to the
//! clamped URL, so one result set is only ever served under one URL.

use tracing::debug;

use super::query::{scoped_key, QueryPairs};
use super::{CanonicalPagination, PaginationBounds};

const SIZE_KEY: &str = "size";
const PAGE_KEY: &str = "page";

/// Per-call configuration for [`ensure_canonical`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalOptions {
    pub default_size: u64,
    pub default_page: u64,
    /// Namespace for the query keys (`"{scope}:page"`), so several lists can
    /// share one URL.
    pub scope: Option<String>,
    pub bounds: PaginationBounds,
}

impl Default for CanonicalOptions {
    fn default() -> Self {
        Self {
            default_size: 25,
            default_page: 1,
            scope: None,
            bounds: PaginationBounds::FIXED,
        }
    }
}

impl CanonicalOptions {
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = if scope.is_empty() { None } else { Some(scope) };
        self
    }

    pub fn with_default_size(mut self, size: u64) -> Self {
        self.default_size = size;
        self
    }

    pub fn with_default_page(mut self, page: u64) -> Self {
        self.default_page = page;
        self
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref().filter(|s| !s.is_empty())
    }

    pub fn size_key(&self) -> String {
        scoped_key(self.scope(), SIZE_KEY)
    }

    pub fn page_key(&self) -> String {
        scoped_key(self.scope(), PAGE_KEY)
    }

    /// Reject defaults the normalizer would itself rewrite.
    pub fn validate(&self) -> Result<(), String> {
        if !self.bounds.contains(self.default_size) {
            return Err(format!(
                "default page size {} is outside the allowed range {}..={}",
                self.default_size, self.bounds.min_size, self.bounds.max_size
            ));
        }
        if self.default_page < 1 {
            return Err("default page must be >= 1".into());
        }
        Ok(())
    }
}

impl From<&configs::ListPagination> for CanonicalOptions {
    fn from(cfg: &configs::ListPagination) -> Self {
        let options = CanonicalOptions::default()
            .with_default_size(cfg.default_size)
            .with_default_page(cfg.default_page);
        match &cfg.scope {
            Some(scope) => options.with_scope(scope.clone()),
            None => options,
        }
    }
}

/// Outcome of [`ensure_canonical`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Canonical {
    /// The request already carried canonical values.
    Accepted(CanonicalPagination),
    /// The request must be answered with `302 Found` pointing at `location`.
    Redirect {
        location: String,
        canonical: CanonicalPagination,
    },
}

impl Canonical {
    pub fn pagination(&self) -> CanonicalPagination {
        match self {
            Canonical::Accepted(p) => *p,
            Canonical::Redirect { canonical, .. } => *canonical,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Canonical::Redirect { .. })
    }
}

/// Clamp a parsed size into `bounds`; anything non-finite becomes the minimum.
pub fn clamp_page_size(raw: f64, bounds: PaginationBounds) -> u64 {
    if !raw.is_finite() || raw < bounds.min_size as f64 {
        return bounds.min_size;
    }
    if raw > bounds.max_size as f64 {
        return bounds.max_size;
    }
    raw.floor() as u64
}

/// Pages are 1-based; anything below 1, non-finite, or too large for a
/// `u64` becomes 1.
pub fn sanitize_page(raw: f64) -> u64 {
    // `u64::MAX as f64` rounds up to 2^64, the first value that does not fit
    if !raw.is_finite() || raw < 1.0 || raw >= u64::MAX as f64 {
        return 1;
    }
    raw.floor() as u64
}

fn parse_number(raw: Option<&str>, default: u64) -> f64 {
    match raw {
        Some(value) => value.trim().parse::<f64>().unwrap_or(f64::NAN),
        None => default as f64,
    }
}

/// Compute the canonical `(page, size)` for a request to `path` with the raw
/// (still percent-encoded) `query`.
///
/// Keys are looked up scoped first, then unscoped, then fall back to the
/// configured defaults. Empty values count as absent.
pub fn ensure_canonical(path: &str, query: Option<&str>, options: &CanonicalOptions) -> Canonical {
    let mut params = QueryPairs::parse(query);
    let size_key = options.size_key();
    let page_key = options.page_key();

    let raw_size = parse_number(
        params.get_non_empty(&size_key).or_else(|| params.get_non_empty(SIZE_KEY)),
        options.default_size,
    );
    let raw_page = parse_number(
        params.get_non_empty(&page_key).or_else(|| params.get_non_empty(PAGE_KEY)),
        options.default_page,
    );

    let canonical = CanonicalPagination {
        page: sanitize_page(raw_page),
        size: clamp_page_size(raw_size, options.bounds),
    };

    // NaN never compares equal, so garbage input always lands here.
    if canonical.size as f64 != raw_size || canonical.page as f64 != raw_page {
        params.set(&size_key, canonical.size.to_string());
        params.set(&page_key, canonical.page.to_string());
        let location = params.to_href(path);
        debug!(
            scope = options.scope().unwrap_or(""),
            raw_page, raw_size, page = canonical.page, size = canonical.size, %location,
            "non-canonical pagination"
        );
        return Canonical::Redirect { location, canonical };
    }

    Canonical::Accepted(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CanonicalOptions {
        CanonicalOptions::default()
    }

    fn accepted(page: u64, size: u64) -> Canonical {
        Canonical::Accepted(CanonicalPagination { page, size })
    }

    fn location(result: &Canonical) -> &str {
        match result {
            Canonical::Redirect { location, .. } => location,
            Canonical::Accepted(p) => panic!("expected redirect, got {p:?}"),
        }
    }

    #[test]
    fn missing_params_use_defaults_without_redirect() {
        assert_eq!(ensure_canonical("/providers", None, &opts()), accepted(1, 25));
        assert_eq!(ensure_canonical("/providers", Some(""), &opts()), accepted(1, 25));
    }

    #[test]
    fn canonical_input_is_accepted() {
        assert_eq!(ensure_canonical("/p", Some("page=1&size=25"), &opts()), accepted(1, 25));
        assert_eq!(ensure_canonical("/p", Some("page=7&size=75"), &opts()), accepted(7, 75));
    }

    #[test]
    fn oversized_page_size_is_clamped_and_redirected() {
        let result = ensure_canonical("/providers", Some("size=500"), &opts());
        assert_eq!(result.pagination(), CanonicalPagination { page: 1, size: 100 });
        assert_eq!(location(&result), "/providers?size=100&page=1");
    }

    #[test]
    fn undersized_page_size_is_clamped_and_redirected() {
        let result = ensure_canonical("/providers", Some("size=5"), &opts());
        assert_eq!(result.pagination(), CanonicalPagination { page: 1, size: 25 });
        assert!(result.is_redirect());
    }

    #[test]
    fn negative_page_is_reset() {
        let result = ensure_canonical("/providers", Some("page=-3&size=50"), &opts());
        assert_eq!(result.pagination(), CanonicalPagination { page: 1, size: 50 });
        assert_eq!(location(&result), "/providers?page=1&size=50");
    }

    #[test]
    fn fractional_values_are_floored_with_redirect() {
        let result = ensure_canonical("/p", Some("page=2.5&size=50.9"), &opts());
        assert_eq!(result.pagination(), CanonicalPagination { page: 2, size: 50 });
        assert!(result.is_redirect());
    }

    #[test]
    fn garbage_always_redirects() {
        let result = ensure_canonical("/p", Some("page=abc&size=lots"), &opts());
        assert_eq!(result.pagination(), CanonicalPagination { page: 1, size: 25 });
        assert_eq!(location(&result), "/p?page=1&size=25");

        let result = ensure_canonical("/p", Some("size=Infinity"), &opts());
        assert_eq!(result.pagination().size, 25);
        assert!(result.is_redirect());
    }

    #[test]
    fn numerically_equal_spellings_are_accepted() {
        // the comparison is on parsed numbers, not raw text
        assert_eq!(ensure_canonical("/p", Some("size=050&page=2.0"), &opts()), accepted(2, 50));
        assert_eq!(ensure_canonical("/p", Some("size=%2050%20"), &opts()), accepted(1, 50));
    }

    #[test]
    fn empty_values_fall_through_to_defaults() {
        assert_eq!(ensure_canonical("/p", Some("page=&size="), &opts()), accepted(1, 25));
    }

    #[test]
    fn other_params_and_order_are_preserved() {
        let result = ensure_canonical("/activity", Some("status=failed&size=1000&q=a+b"), &opts());
        assert_eq!(location(&result), "/activity?status=failed&size=100&q=a+b&page=1");
    }

    #[test]
    fn scoped_keys_win_over_unscoped() {
        let options = opts().with_scope("providers");
        let result = ensure_canonical(
            "/",
            Some("providers%3Apage=3&providers%3Asize=50&page=9&size=75"),
            &options,
        );
        assert_eq!(result, accepted(3, 50));
    }

    #[test]
    fn scoped_lookup_falls_back_to_unscoped_then_default() {
        let options = opts().with_scope("providers");
        assert_eq!(ensure_canonical("/", Some("page=4"), &options), accepted(4, 25));
        assert_eq!(ensure_canonical("/", None, &options), accepted(1, 25));
    }

    #[test]
    fn scoped_lists_do_not_interfere() {
        let options = opts().with_scope("providers");
        let result = ensure_canonical("/", Some("activity%3Apage=-1&activity%3Asize=9999"), &options);
        assert_eq!(result, accepted(1, 25));
    }

    #[test]
    fn scoped_redirect_rewrites_only_scoped_keys() {
        let options = opts().with_scope("activity");
        let result = ensure_canonical("/", Some("size=500&providers%3Apage=2"), &options);
        assert_eq!(
            location(&result),
            "/?size=500&providers%3Apage=2&activity%3Asize=100&activity%3Apage=1"
        );
    }

    #[test]
    fn redirect_target_is_canonical() {
        let inputs = [
            "size=500",
            "size=5",
            "page=-3&size=50",
            "page=abc",
            "page=2.5&size=99.9",
            "size=1e9&page=1e30",
            "page=0",
            "size=-Infinity&page=NaN",
        ];
        for scope in ["", "activity"] {
            let options = opts().with_scope(scope);
            for input in inputs {
                let first = ensure_canonical("/list", Some(input), &options);
                let Canonical::Redirect { location, canonical } = &first else {
                    panic!("{input} should redirect");
                };
                let query = location.split_once('?').map(|(_, q)| q);
                let second = ensure_canonical("/list", query, &options);
                assert_eq!(second, Canonical::Accepted(*canonical), "{input} with scope {scope:?}");
            }
        }
    }

    #[test]
    fn default_outside_bounds_redirects_bare_requests() {
        let options = opts().with_default_size(10);
        assert!(options.validate().is_err());
        let result = ensure_canonical("/p", None, &options);
        assert_eq!(location(&result), "/p?size=25&page=1");
    }

    #[test]
    fn validate_accepts_defaults_within_bounds() {
        assert!(opts().validate().is_ok());
        assert!(opts().with_default_size(100).validate().is_ok());
        assert!(opts().with_default_page(0).validate().is_err());
    }

    #[test]
    fn options_from_config() {
        let cfg = configs::ListPagination {
            default_size: 50,
            default_page: 2,
            scope: Some("activity".into()),
        };
        let options = CanonicalOptions::from(&cfg);
        assert_eq!(options.default_size, 50);
        assert_eq!(options.default_page, 2);
        assert_eq!(options.page_key(), "activity:page");
        assert_eq!(options.size_key(), "activity:size");
    }

    #[test]
    fn clamp_helpers() {
        let b = PaginationBounds::FIXED;
        assert_eq!(clamp_page_size(f64::NAN, b), 25);
        assert_eq!(clamp_page_size(24.9, b), 25);
        assert_eq!(clamp_page_size(100.5, b), 100);
        assert_eq!(clamp_page_size(60.7, b), 60);
        assert_eq!(sanitize_page(0.5), 1);
        assert_eq!(sanitize_page(f64::INFINITY), 1);
        assert_eq!(sanitize_page(12.0), 12);
        assert_eq!(sanitize_page(1e30), 1);
        assert_eq!(sanitize_page(18_446_744_073_709_551_616.0), 1);
        assert_eq!(sanitize_page(9_007_199_254_740_992.0), 9_007_199_254_740_992);
    }

    #[test]
    fn pages_beyond_u64_reset_to_first() {
        let result = ensure_canonical("/p", Some("page=18446744073709551616"), &opts());
        assert_eq!(location(&result), "/p?page=1&size=25");

        let result = ensure_canonical("/p", Some("page=1e30&size=50"), &opts());
        assert_eq!(location(&result), "/p?page=1&size=50");

        assert_eq!(ensure_canonical("/p", Some("page=9007199254740992"), &opts()), accepted(9_007_199_254_740_992, 25));
    }

    #[test]
    fn redirect_keeps_other_params_verbatim() {
        let result = ensure_canonical("/p", Some("q=a%20b&t=~x&bin=%FF&size=500"), &opts());
        assert_eq!(location(&result), "/p?q=a%20b&t=~x&bin=%FF&size=100&page=1");

        let options = opts().with_scope("activity");
        let result = ensure_canonical("/p", Some("q=%FF&activity%3Apage=0&filter=a+b"), &options);
        assert_eq!(location(&result), "/p?q=%FF&activity%3Apage=1&filter=a+b&activity%3Asize=25");
    }
}
