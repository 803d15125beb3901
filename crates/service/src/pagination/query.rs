//! Ordered view of an `application/x-www-form-urlencoded` query.
//!
//! Each parameter keeps its raw `key=value` text. Keys and values are decoded
//! for lookups only, so a rewrite touches nothing but the keys it sets and
//! every other parameter leaves exactly as it arrived.

use url::form_urlencoded;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Param {
    raw: String,
    key: String,
    value: String,
}

impl Param {
    fn from_raw(raw: &str) -> Self {
        let (key, value) = form_urlencoded::parse(raw.as_bytes())
            .next()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .unwrap_or_default();
        Self { raw: raw.to_string(), key, value }
    }

    fn encoded(key: &str, value: String) -> Self {
        let raw = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, &value)
            .finish();
        Self { raw, key: key.to_string(), value }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct QueryPairs {
    params: Vec<Param>,
}

impl QueryPairs {
    pub(crate) fn parse(query: Option<&str>) -> Self {
        let raw = query.unwrap_or("");
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let params = raw.split('&').filter(|seg| !seg.is_empty()).map(Param::from_raw).collect();
        Self { params }
    }

    /// First decoded value for `key`, if any.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|p| p.key == key).map(|p| p.value.as_str())
    }

    /// First non-empty value for `key`.
    pub(crate) fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Replace the first `key` in place and drop later duplicates; append if absent.
    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        let param = Param::encoded(key, value.into());
        match self.params.iter().position(|p| p.key == key) {
            Some(idx) => {
                self.params[idx] = param;
                let mut seen = 0usize;
                self.params.retain(|p| {
                    if p.key != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.params.push(param),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub(crate) fn to_query_string(&self) -> String {
        self.params.iter().map(|p| p.raw.as_str()).collect::<Vec<_>>().join("&")
    }

    /// `path` joined with the serialized pairs, omitting `?` when empty.
    pub(crate) fn to_href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

/// `"{scope}:{key}"`, or just `key` when there is no scope.
pub(crate) fn scoped_key(scope: Option<&str>, key: &str) -> String {
    match scope.filter(|s| !s.is_empty()) {
        Some(scope) => format!("{scope}:{key}"),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut q = QueryPairs::parse(Some("a=1&size=10&b=2&size=20"));
        q.set("size", "25");
        assert_eq!(q.to_query_string(), "a=1&size=25&b=2");
    }

    #[test]
    fn set_appends_missing_key() {
        let mut q = QueryPairs::parse(Some("?q=hello+world"));
        q.set("page", "1");
        assert_eq!(q.get("q"), Some("hello world"));
        assert_eq!(q.to_query_string(), "q=hello+world&page=1");
    }

    #[test]
    fn scoped_keys_are_percent_encoded() {
        let mut q = QueryPairs::parse(None);
        q.set(&scoped_key(Some("activity"), "page"), "2");
        assert_eq!(q.to_href("/activity"), "/activity?activity%3Apage=2");
        assert_eq!(QueryPairs::parse(Some("activity%3Apage=2")).get("activity:page"), Some("2"));
    }

    #[test]
    fn empty_scope_is_no_scope() {
        assert_eq!(scoped_key(Some(""), "size"), "size");
        assert_eq!(scoped_key(None, "size"), "size");
    }

    #[test]
    fn untouched_params_keep_their_raw_text() {
        let mut q = QueryPairs::parse(Some("q=a%20b&t=~x&bin=%FF&plus=a+b&bare&size=10"));
        assert_eq!(q.get("q"), Some("a b"));
        assert_eq!(q.get("bare"), Some(""));
        q.set("size", "25");
        q.set("page", "1");
        assert_eq!(q.to_query_string(), "q=a%20b&t=~x&bin=%FF&plus=a+b&bare&size=25&page=1");
    }

    #[test]
    fn keys_are_matched_after_decoding() {
        let mut q = QueryPairs::parse(Some("activity%3apage=4&x=1"));
        assert_eq!(q.get("activity:page"), Some("4"));
        q.set("activity:page", "1");
        assert_eq!(q.to_query_string(), "activity%3Apage=1&x=1");
    }

    #[test]
    fn empty_segments_are_dropped() {
        let q = QueryPairs::parse(Some("&a=1&&b=2&"));
        assert_eq!(q.to_query_string(), "a=1&b=2");
    }

    #[test]
    fn empty_values_are_skipped_by_non_empty_lookup() {
        let q = QueryPairs::parse(Some("page=&size=50"));
        assert_eq!(q.get("page"), Some(""));
        assert_eq!(q.get_non_empty("page"), None);
        assert_eq!(q.get_non_empty("size"), Some("50"));
    }
}
