//! Request parameters of the cog index page.
//!
//! The page is driven by four query-string values: `ua` (include unapproved
//! repositories), `search`, `filter_tag` and `p` (page). They arrive as
//! untrusted strings and are sanitized before they reach the query engine.

use cogindex_utils::sanitize::{sanitize_page, sanitize_search, sanitize_tag};
use url::form_urlencoded;

use crate::types::QueryOptions;

/// Sanitized request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub include_unapproved: bool,
    pub search: String,
    pub tag: String,
    pub page: usize,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            include_unapproved: false,
            search: String::new(),
            tag: String::new(),
            page: 1,
        }
    }
}

/// Values replacing the current parameters when building a link. `None`
/// keeps the current value; an empty string drops the parameter.
#[derive(Debug, Clone, Default)]
pub struct LinkOverrides<'a> {
    pub include_unapproved: Option<bool>,
    pub page: Option<usize>,
    pub tag: Option<&'a str>,
    pub search: Option<&'a str>,
}

impl RequestParams {
    /// Builds parameters from raw query-string values. Absent values are
    /// passed as `None`.
    pub fn from_raw(
        ua: Option<&str>,
        search: Option<&str>,
        filter_tag: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        Self {
            include_unapproved: ua == Some("1"),
            search: search.map(sanitize_search).unwrap_or_default(),
            tag: filter_tag.map(sanitize_tag).unwrap_or_default(),
            page: page.map_or(1, sanitize_page),
        }
    }

    /// Builds parameters from a raw query string such as `ua=1&p=2`.
    pub fn from_query(query: &str) -> Self {
        let mut ua = None;
        let mut search = None;
        let mut filter_tag = None;
        let mut page = None;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "ua" => ua = Some(value),
                "search" => search = Some(value),
                "filter_tag" => filter_tag = Some(value),
                "p" => page = Some(value),
                _ => {}
            }
        }

        Self::from_raw(
            ua.as_deref(),
            search.as_deref(),
            filter_tag.as_deref(),
            page.as_deref(),
        )
    }

    pub fn to_query_options(&self, per_page: usize) -> QueryOptions {
        QueryOptions {
            tag: self.tag.clone(),
            search: self.search.clone(),
            page: self.page,
            per_page,
        }
    }

    /// Link to the page with `overrides` applied, keeping only non-default
    /// values.
    ///
    /// ```
    /// use cogindex_operations::params::{LinkOverrides, RequestParams};
    ///
    /// let params = RequestParams::from_raw(Some("1"), Some("music bot"), None, Some("2"));
    /// assert_eq!(params.url(&LinkOverrides::default()), "/?ua=1&p=2&search=music+bot");
    /// ```
    pub fn url(&self, overrides: &LinkOverrides<'_>) -> String {
        let include_unapproved = overrides
            .include_unapproved
            .unwrap_or(self.include_unapproved);
        let page = overrides.page.unwrap_or(self.page);
        let tag = overrides.tag.unwrap_or(&self.tag);
        let search = overrides.search.unwrap_or(&self.search);

        let mut query = form_urlencoded::Serializer::new(String::new());
        if include_unapproved {
            query.append_pair("ua", "1");
        }
        if page > 1 {
            query.append_pair("p", &page.to_string());
        }
        if !tag.is_empty() {
            query.append_pair("filter_tag", tag);
        }
        if !search.is_empty() {
            query.append_pair("search", search);
        }

        format!("/?{}", query.finish())
    }
}
