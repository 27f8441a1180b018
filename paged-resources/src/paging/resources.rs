//! Pages decorated with navigation links
//!
//! [`PagedResources`] wraps a [`Page`] and, at construction, computes the
//! links a client needs to walk the data set:
//!
//! - `previous` when the page index is above zero and the data set is not empty
//! - `next` when another page follows
//! - `first`, always
//! - `last`, when the data set has at least one page
//! - `self`, always
//!
//! Links appear in that order.
//!
//! # Example
//!
//! ```rust
//! use axum::http::Uri;
//! use paged_resources::paging::{Page, PageRequest, PagedResources, Relation};
//!
//! let page = Page::new(vec!["carol", "dave"], PageRequest::of(1, 2), 6);
//! let uri: Uri = "/users?page=1&size=2".parse().unwrap();
//! let resources = PagedResources::new(page, &uri).unwrap();
//!
//! assert_eq!(
//!     resources.link(Relation::Next).map(|l| l.href.as_str()),
//!     Some("/users?page=2&size=2")
//! );
//! assert_eq!(
//!     resources.link(Relation::Last).map(|l| l.href.as_str()),
//!     Some("/users?page=2&size=2")
//! );
//! ```

use axum::{
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::link::{link_header, Link, LinkBuilder, QueryParams, Relation};
use super::page::{Page, Paged};
use super::sort::Sort;
use crate::error::Result;

/// A page of results plus its navigation links
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedResources<T> {
    #[serde(flatten)]
    page: Page<T>,
    links: Vec<Link>,
}

impl<T> PagedResources<T> {
    /// Wrap `page`, linking against `uri` with no extra query parameters
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`](crate::error::Error::MalformedSort)
    /// if the page's sort cannot be written into a link, or
    /// [`Error::Http`](crate::error::Error::Http) if `uri` has no path.
    pub fn new(page: Page<T>, uri: &Uri) -> Result<Self> {
        Self::with_params(page, QueryParams::new(), uri)
    }

    /// Wrap `page`, repeating `params` on every link ahead of the paging
    /// parameters
    ///
    /// # Errors
    ///
    /// Same as [`PagedResources::new`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum::http::Uri;
    /// use paged_resources::paging::{Page, PageRequest, PagedResources, QueryParams, Relation};
    ///
    /// let page = Page::new(vec![1], PageRequest::of(0, 1), 1);
    /// let uri = Uri::from_static("/users");
    /// let params = QueryParams::new().with("search", "alice");
    /// let resources = PagedResources::with_params(page, params, &uri).unwrap();
    ///
    /// assert_eq!(
    ///     resources.link(Relation::Current).unwrap().href,
    ///     "/users?search=alice&page=0&size=1"
    /// );
    /// ```
    pub fn with_params(page: Page<T>, params: QueryParams, uri: &Uri) -> Result<Self> {
        let builder = LinkBuilder::new(uri)?.with_params(params);
        Self::with_builder(page, &builder)
    }

    /// Wrap `page`, building links with a prepared [`LinkBuilder`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSort`](crate::error::Error::MalformedSort)
    /// if the page's sort cannot be written into a link.
    pub fn with_builder(page: Page<T>, builder: &LinkBuilder) -> Result<Self> {
        let links = match page_links(&page, builder) {
            Ok(links) => links,
            Err(err) => {
                tracing::warn!(base = builder.base(), error = %err, "Failed to build page links");
                return Err(err);
            }
        };

        tracing::debug!(
            base = builder.base(),
            page = page.number(),
            links = links.len(),
            "Built page links"
        );

        Ok(Self { page, links })
    }

    /// All links, in construction order
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The link for `rel`, if one was produced
    #[must_use]
    pub fn link(&self, rel: Relation) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    /// Whether a link for `rel` was produced
    #[must_use]
    pub fn has_link(&self, rel: Relation) -> bool {
        self.link(rel).is_some()
    }

    /// The wrapped page
    #[must_use]
    pub fn page(&self) -> &Page<T> {
        &self.page
    }

    /// Transform every element, keeping page metadata and links
    ///
    /// Links depend only on the page metadata, so they carry over unchanged.
    pub fn map<U, F>(self, f: F) -> PagedResources<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResources {
            page: self.page.map(f),
            links: self.links,
        }
    }

    /// Split into the page and its links
    pub fn into_parts(self) -> (Page<T>, Vec<Link>) {
        (self.page, self.links)
    }
}

impl<T> Paged for PagedResources<T> {
    type Item = T;

    fn number(&self) -> u32 {
        self.page.number()
    }

    fn size(&self) -> u32 {
        self.page.size()
    }

    fn total_pages(&self) -> u32 {
        self.page.total_pages()
    }

    fn total_elements(&self) -> u64 {
        self.page.total_elements()
    }

    fn number_of_elements(&self) -> u32 {
        self.page.number_of_elements()
    }

    fn sort(&self) -> &Sort {
        self.page.sort()
    }

    fn content(&self) -> &[T] {
        self.page.content()
    }

    fn has_previous(&self) -> bool {
        self.page.has_previous()
    }

    fn has_next(&self) -> bool {
        self.page.has_next()
    }

    fn is_first(&self) -> bool {
        self.page.is_first()
    }

    fn is_last(&self) -> bool {
        self.page.is_last()
    }

    fn has_content(&self) -> bool {
        self.page.has_content()
    }
}

impl<'a, T> IntoIterator for &'a PagedResources<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.content().iter()
    }
}

impl<T: Serialize> IntoResponse for PagedResources<T> {
    fn into_response(self) -> Response {
        let header_value = link_header(&self.links);
        let mut response = (StatusCode::OK, Json(&self)).into_response();

        if let Ok(value) = HeaderValue::from_str(&header_value) {
            response.headers_mut().insert(header::LINK, value);
        }

        response
    }
}

/// Links for `page` in emission order: previous, next, first, last, self
fn page_links<T>(page: &Page<T>, builder: &LinkBuilder) -> Result<Vec<Link>> {
    let size = page.size();
    let sort = page.sort();
    let mut links = Vec::with_capacity(5);

    // An empty data set has no page to step back to
    if page.has_previous() && page.total_pages() > 0 {
        links.push(builder.build(page.number() - 1, size, sort, Relation::Previous)?);
    }

    if page.has_next() {
        links.push(builder.build(page.number() + 1, size, sort, Relation::Next)?);
    }

    links.push(builder.build(0, size, sort, Relation::First)?);

    // No pages means no valid last index
    if page.total_pages() > 0 {
        links.push(builder.build(page.total_pages() - 1, size, sort, Relation::Last)?);
    }

    links.push(builder.build(page.number(), size, sort, Relation::Current)?);

    Ok(links)
}
