//! Path and query-string assembly.
//!
//! Ids interpolated into a path go through [`segment`], so an id can never
//! add a path level or start a query of its own.
//!
//! Parameters are emitted in the order they are added, so each operation
//! fixes its own documented order. Unset parameters are skipped entirely.
//! Values are percent-encoded; the commas separating list values are not.

use std::borrow::Cow;
use std::fmt::Display;

/// Percent-encode one path segment. `/`, `?`, `#` and `%` are all escaped.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `name=value` when `value` is set. Used for `page` as well, which is
    /// passed through verbatim, sentinels included.
    pub(crate) fn param<V: Display>(mut self, name: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.pairs
                .push((name, urlencoding::encode(&value.to_string()).into_owned()));
        }
        self
    }

    /// v2 search filter: `q=<field> IN <v1>,<v2>`.
    pub(crate) fn filter(mut self, field: &str, values: &[String]) -> Self {
        if !values.is_empty() {
            let expression = format!("{}%20IN%20{}", urlencoding::encode(field), join(values));
            self.pairs.push(("q", expression));
        }
        self
    }

    /// v3 list parameter: `name=<v1>,<v2>`.
    pub(crate) fn list<V: Display>(mut self, name: &'static str, values: &[V]) -> Self {
        if !values.is_empty() {
            self.pairs.push((name, join(values)));
        }
        self
    }

    /// Append the query string (if any) to `path`.
    pub(crate) fn finish(self, path: String) -> String {
        if self.pairs.is_empty() {
            return path;
        }
        let query = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{query}")
    }
}

fn join<V: Display>(values: &[V]) -> String {
    values
        .iter()
        .map(|v| urlencoding::encode(&v.to_string()).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_escapes_path_and_query_delimiters() {
        assert_eq!(segment("test-service-id"), "test-service-id");
        assert_eq!(segment("x?purge=true"), "x%3Fpurge%3Dtrue");
        assert_eq!(segment("a/../b#frag"), "a%2F..%2Fb%23frag");
        assert_eq!(segment("50%"), "50%25");
    }

    #[test]
    fn empty_builder_leaves_path_untouched() {
        assert_eq!(QueryBuilder::new().finish("/v2/info".to_string()), "/v2/info");
    }

    #[test]
    fn unset_params_are_omitted() {
        let path = QueryBuilder::new()
            .param::<bool>("async", None)
            .param("purge", Some(true))
            .finish("/v2/services/abc".to_string());
        assert_eq!(path, "/v2/services/abc?purge=true");
    }

    #[test]
    fn filters_use_in_expressions() {
        let path = QueryBuilder::new()
            .filter("label", &["test label".to_string(), "other".to_string()])
            .param("page", Some(-1))
            .finish("/v2/services".to_string());
        assert_eq!(path, "/v2/services?q=label%20IN%20test%20label,other&page=-1");
    }

    #[test]
    fn list_params_are_comma_joined() {
        let path = QueryBuilder::new()
            .list("names", &["a", "b"])
            .list::<&str>("states", &[])
            .finish("/v3/tasks".to_string());
        assert_eq!(path, "/v3/tasks?names=a,b");
    }
}
