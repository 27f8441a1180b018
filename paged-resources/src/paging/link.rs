//! Navigation links and the query strings they carry
//!
//! [`LinkBuilder`] turns the current request URI into one [`Link`] per
//! [`Relation`]. The base is the request URI without its query string; the
//! query is rebuilt as the caller's extra [`QueryParams`] followed by
//! `page`, `size` and one `sort` parameter per order.
//!
//! # Example
//!
//! ```rust
//! use axum::{extract::Query, http::Uri};
//! use paged_resources::paging::{LinkBuilder, Order, QueryParams, Relation, Sort};
//!
//! let uri: Uri = "/users?search=alice&page=3".parse().unwrap();
//! let builder = LinkBuilder::new(&uri)
//!     .unwrap()
//!     .with_params(QueryParams::new().with("search", "alice"));
//!
//! let link = builder
//!     .build(0, 5, &Sort::from(Order::asc("name")), Relation::First)
//!     .unwrap();
//! assert_eq!(link.href, "/users?search=alice&page=0&size=5&sort=name,asc");
//! ```

use std::fmt;

use axum::{extract::Query, http::Uri};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use super::sort::Sort;
use crate::config::PagingConfig;
use crate::error::{Error, Result};

/// Characters escaped inside a query key or value
///
/// `,` stays literal so sort values read `name,asc`.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Relation of a link to the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// The page being returned
    #[serde(rename = "self")]
    Current,
    /// Page index 0
    First,
    /// The final page
    Last,
    /// The page after this one
    Next,
    /// The page before this one
    Previous,
}

impl Relation {
    /// Registered relation name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "self",
            Self::First => "first",
            Self::Last => "last",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hypermedia link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Target URI
    pub href: String,
    /// Relation to the current page
    pub rel: Relation,
}

impl Link {
    /// Create a link
    pub fn new(href: impl Into<String>, rel: Relation) -> Self {
        Self {
            href: href.into(),
            rel,
        }
    }

    /// Format as a `Link` header entry, `<href>; rel="next"`
    #[must_use]
    pub fn to_header_entry(&self) -> String {
        format!("<{}>; rel=\"{}\"", self.href, self.rel)
    }
}

/// Join links into a single `Link` header value
///
/// # Example
///
/// ```rust
/// use paged_resources::paging::{link_header, Link, Relation};
///
/// let links = [
///     Link::new("/users?page=1", Relation::Next),
///     Link::new("/users?page=0", Relation::Current),
/// ];
/// assert_eq!(
///     link_header(&links),
///     r#"</users?page=1>; rel="next", </users?page=0>; rel="self""#
/// );
/// ```
#[must_use]
pub fn link_header(links: &[Link]) -> String {
    links
        .iter()
        .map(Link::to_header_entry)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Ordered multimap of query parameters
///
/// Keys keep their first-insertion order; each key keeps its values in the
/// order they were added.
///
/// # Example
///
/// ```rust
/// use paged_resources::paging::QueryParams;
///
/// let params = QueryParams::new()
///     .with("tag", "rust")
///     .with("search", "alice")
///     .with("tag", "web");
///
/// assert_eq!(params.get("tag"), Some(&["rust".to_string(), "web".to_string()][..]));
/// assert_eq!(params.to_query_string(), "tag=rust&tag=web&search=alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`a=1&b=2&a=3`)
    ///
    /// Decoding is `application/x-www-form-urlencoded`, so `+` reads as a
    /// space. Pairs with an empty key are dropped. A bare key (`?flag`)
    /// becomes `flag` with an empty value and is written back as `flag=`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if the query cannot be decoded.
    pub fn parse(query: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| Error::BadRequest(format!("Invalid query string: {e}")))?;
        Ok(Self::from_pairs(pairs))
    }

    /// Query parameters of `uri`, read through axum's [`Query`] extractor
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if the query cannot be decoded.
    pub fn from_uri(uri: &Uri) -> Result<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
        Ok(Self::from_pairs(pairs))
    }

    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        pairs
            .into_iter()
            .filter(|(key, _)| !key.is_empty())
            .collect()
    }

    /// Append a value for `key`
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Builder form of [`QueryParams::add`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Values for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, values)| values.as_slice())
    }

    /// First value for `key`
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its values
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys with their values, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Flattened `(key, value)` pairs, one per value
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Encode as `key=value&key=value`
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut query = String::new();
        for (key, value) in self.pairs() {
            push_pair(&mut query, key, value);
        }
        query
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

/// Builds page links against one request URI
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: String,
    params: QueryParams,
    page_param: String,
    size_param: String,
    sort_param: String,
}

impl LinkBuilder {
    /// Builder rooted at `uri` with its query string removed, using the
    /// default parameter names
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](crate::error::Error::Http) if the URI has no
    /// path to link against (authority-form).
    pub fn new(uri: &Uri) -> Result<Self> {
        Self::from_config(uri, &PagingConfig::default())
    }

    /// Builder rooted at `uri` using the parameter names from `config`
    ///
    /// # Errors
    ///
    /// Same as [`LinkBuilder::new`].
    pub fn from_config(uri: &Uri, config: &PagingConfig) -> Result<Self> {
        Ok(Self {
            base: base_of(uri)?,
            params: QueryParams::new(),
            page_param: config.page_param.clone(),
            size_param: config.size_param.clone(),
            sort_param: config.sort_param.clone(),
        })
    }

    /// Extra parameters to repeat on every link, ahead of the paging ones
    #[must_use]
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Base URI links are built against
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Build the link for page index `page`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`](crate::error::Error::MalformedSort)
    /// if an order in `sort` cannot be written as `field,direction`.
    pub fn build(&self, page: u32, size: u32, sort: &Sort, rel: Relation) -> Result<Link> {
        let mut query = self.params.to_query_string();
        push_pair(&mut query, &self.page_param, &page.to_string());
        push_pair(&mut query, &self.size_param, &size.to_string());
        for value in sort.to_query_values()? {
            push_pair(&mut query, &self.sort_param, &value);
        }

        Ok(Link::new(format!("{}?{}", self.base, query), rel))
    }
}

/// Scheme, authority and path of `uri`
fn base_of(uri: &Uri) -> Result<String> {
    let mut builder = Uri::builder();
    if let Some(scheme) = uri.scheme() {
        builder = builder.scheme(scheme.clone());
    }
    if let Some(authority) = uri.authority() {
        builder = builder.authority(authority.clone());
    }
    let base = builder.path_and_query(uri.path()).build()?;
    Ok(base.to_string())
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }
    query.extend(utf8_percent_encode(key, QUERY_COMPONENT));
    query.push('=');
    query.extend(utf8_percent_encode(value, QUERY_COMPONENT));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Order;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_relation_names() {
        assert_eq!(Relation::Current.as_str(), "self");
        assert_eq!(Relation::Previous.to_string(), "previous");
        assert_eq!(
            serde_json::to_string(&Relation::Current).unwrap(),
            "\"self\""
        );
        assert_eq!(
            serde_json::from_str::<Relation>("\"next\"").unwrap(),
            Relation::Next
        );
    }

    #[test]
    fn test_link_serializes_href_and_rel() {
        let link = Link::new("/users?page=0&size=5", Relation::First);
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "href": "/users?page=0&size=5", "rel": "first" })
        );
    }

    #[test]
    fn test_base_strips_query() {
        let builder = LinkBuilder::new(&uri("/users?page=9&size=1")).unwrap();
        assert_eq!(builder.base(), "/users");
    }

    #[test]
    fn test_base_keeps_scheme_and_authority() {
        let builder =
            LinkBuilder::new(&uri("https://api.example.com:8443/v1/users?x=1")).unwrap();
        assert_eq!(builder.base(), "https://api.example.com:8443/v1/users");
    }

    #[test]
    fn test_authority_form_is_rejected() {
        let result = LinkBuilder::new(&uri("example.com:443"));
        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[test]
    fn test_build_without_extras_or_sort() {
        let builder = LinkBuilder::new(&uri("/users")).unwrap();
        let link = builder
            .build(2, 5, &Sort::unsorted(), Relation::Current)
            .unwrap();
        assert_eq!(link.href, "/users?page=2&size=5");
        assert_eq!(link.rel, Relation::Current);
    }

    #[test]
    fn test_build_repeats_multi_valued_extras_in_order() {
        let params = QueryParams::new()
            .with("tag", "a")
            .with("q", "x")
            .with("tag", "b");
        let builder = LinkBuilder::new(&uri("/items")).unwrap().with_params(params);
        let link = builder.build(0, 10, &Sort::unsorted(), Relation::First).unwrap();
        assert_eq!(link.href, "/items?tag=a&tag=b&q=x&page=0&size=10");
    }

    #[test]
    fn test_build_repeats_sort_per_order() {
        let sort = Sort::by([Order::asc("name"), Order::desc("age")]);
        let builder = LinkBuilder::new(&uri("/users")).unwrap();
        let link = builder.build(1, 5, &sort, Relation::Next).unwrap();
        assert_eq!(link.href, "/users?page=1&size=5&sort=name,asc&sort=age,desc");
    }

    #[test]
    fn test_build_rejects_malformed_order() {
        let builder = LinkBuilder::new(&uri("/users")).unwrap();
        let result = builder.build(0, 5, &Sort::from(Order::asc("")), Relation::First);
        assert!(matches!(result, Err(Error::MalformedSort(_))));
    }

    #[test]
    fn test_build_uses_configured_names() {
        let config = PagingConfig {
            page_param: "p".to_string(),
            size_param: "per_page".to_string(),
            sort_param: "order".to_string(),
            ..PagingConfig::default()
        };
        let builder = LinkBuilder::from_config(&uri("/users"), &config).unwrap();
        let link = builder
            .build(3, 7, &Sort::from(Order::desc("id")), Relation::Last)
            .unwrap();
        assert_eq!(link.href, "/users?p=3&per_page=7&order=id,desc");
    }

    #[test]
    fn test_extras_are_escaped() {
        let params = QueryParams::new().with("q", "a&b c=d");
        let builder = LinkBuilder::new(&uri("/search")).unwrap().with_params(params);
        let link = builder.build(0, 1, &Sort::unsorted(), Relation::First).unwrap();
        assert_eq!(link.href, "/search?q=a%26b%20c%3Dd&page=0&size=1");
    }

    #[test]
    fn test_query_params_parse() {
        let params =
            QueryParams::parse("search=alice+smith&tag=a&tag=b%2Cc&flag&=orphan").unwrap();
        assert_eq!(params.first("search"), Some("alice smith"));
        assert_eq!(
            params.get("tag"),
            Some(&["a".to_string(), "b,c".to_string()][..])
        );
        assert_eq!(params.first("flag"), Some(""));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_query_params_remove() {
        let mut params: QueryParams = [("page", "1"), ("search", "x"), ("page", "2")]
            .into_iter()
            .collect();
        assert_eq!(
            params.remove("page"),
            Some(vec!["1".to_string(), "2".to_string()])
        );
        assert!(!params.contains_key("page"));
        assert_eq!(params.remove("page"), None);
        assert_eq!(params.to_query_string(), "search=x");
    }

    #[test]
    fn test_query_params_empty() {
        let params = QueryParams::parse("").unwrap();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_query_params_from_uri() {
        let params = QueryParams::from_uri(&uri("/s?q=a+b&tag=x%26y&tag=z")).unwrap();
        assert_eq!(params.first("q"), Some("a b"));
        assert_eq!(
            params.get("tag"),
            Some(&["x&y".to_string(), "z".to_string()][..])
        );

        let params = QueryParams::from_uri(&uri("/s")).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_bare_key_is_written_with_empty_value() {
        let params = QueryParams::from_uri(&uri("/s?q=a+b&flag&page=1")).unwrap();
        assert_eq!(params.first("flag"), Some(""));

        let builder = LinkBuilder::new(&uri("/s"))
            .unwrap()
            .with_params(params.pairs().filter(|(key, _)| *key != "page").collect());
        let link = builder.build(0, 1, &Sort::unsorted(), Relation::First).unwrap();
        assert_eq!(link.href, "/s?q=a%20b&flag=&page=0&size=1");
    }

    #[test]
    fn test_link_header_entry() {
        let link = Link::new("/users?page=4&size=5", Relation::Last);
        assert_eq!(link.to_header_entry(), "</users?page=4&size=5>; rel=\"last\"");
    }
}
