//! Axum extractors for paged endpoints
//!
//! - [`PageRequest`] reads `page`, `size` and `sort` from the query string
//! - [`CurrentRequest`] captures the request URI and the remaining query
//!   parameters, so links can be built without global request state
//!
//! Both read a [`PagingConfig`] from the request extensions when one has been
//! installed with `axum::Extension`, and fall back to the defaults otherwise.
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{routing::get, Extension, Router};
//! use paged_resources::prelude::*;
//!
//! async fn list_users(
//!     current: CurrentRequest,
//!     request: PageRequest,
//! ) -> Result<PagedResources<User>> {
//!     let (users, total) = repository.find_page(&request).await?;
//!     current.paged(Page::new(users, request, total))
//! }
//!
//! let app = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(Extension(config.paging.clone()));
//! ```

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{request::Parts, Uri},
};

use crate::config::PagingConfig;
use crate::error::{Error, Result};
use crate::paging::{LinkBuilder, Page, PageRequest, PagedResources, QueryParams, Sort};

fn paging_config(parts: &Parts) -> PagingConfig {
    parts
        .extensions
        .get::<PagingConfig>()
        .cloned()
        .unwrap_or_default()
}

impl PageRequest {
    /// Read a page request from parsed query parameters
    ///
    /// A missing page is 0; a missing size is `config.default_page_size`.
    /// Sizes are clamped into `1..=config.max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] when page or size is not a non-negative
    /// integer and [`Error::MalformedSort`] when a sort value does not parse.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_resources::config::PagingConfig;
    /// use paged_resources::paging::{Order, PageRequest, QueryParams};
    ///
    /// let params = QueryParams::parse("page=3&size=10&sort=name,desc").unwrap();
    /// let request = PageRequest::from_query_params(&params, &PagingConfig::default()).unwrap();
    /// assert_eq!(request, PageRequest::of(3, 10).with_sort(Order::desc("name")));
    /// ```
    pub fn from_query_params(params: &QueryParams, config: &PagingConfig) -> Result<Self> {
        let page = parse_number(params, &config.page_param)?.unwrap_or(0);
        let size = config.clamp_size(
            parse_number(params, &config.size_param)?.unwrap_or(config.default_page_size),
        );
        let sort = match params.get(&config.sort_param) {
            Some(values) => Sort::from_query_values(values)?,
            None => Sort::unsorted(),
        };

        Ok(Self { page, size, sort })
    }
}

fn parse_number(params: &QueryParams, key: &str) -> Result<Option<u32>> {
    match params.first(key).map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            Error::BadRequest(format!(
                "query parameter '{key}' must be a non-negative integer, got '{raw}'"
            ))
        }),
    }
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let config = paging_config(parts);

        QueryParams::from_uri(&parts.uri)
            .and_then(|params| PageRequest::from_query_params(&params, &config))
            .inspect_err(|err| {
                tracing::debug!(uri = %parts.uri, error = %err, "Rejected page request");
            })
    }
}

/// The request a paged response is being built for
///
/// Holds the request URI, the query parameters other than the paging ones,
/// and the paging configuration in effect.
#[derive(Debug, Clone)]
pub struct CurrentRequest {
    uri: Uri,
    params: QueryParams,
    config: PagingConfig,
}

impl CurrentRequest {
    /// Capture `uri`, keeping every query parameter except the paging ones
    ///
    /// # Errors
    ///
    /// Returns [`Error::BadRequest`] if the query cannot be decoded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum::http::Uri;
    /// use paged_resources::config::PagingConfig;
    /// use paged_resources::extract::CurrentRequest;
    ///
    /// let uri = Uri::from_static("/users?search=alice&page=4&size=5");
    /// let current = CurrentRequest::new(uri, PagingConfig::default()).unwrap();
    /// assert_eq!(current.params().to_query_string(), "search=alice");
    /// ```
    pub fn new(uri: Uri, config: PagingConfig) -> Result<Self> {
        let params = QueryParams::from_uri(&uri)?
            .pairs()
            .filter(|(key, _)| !config.is_paging_param(key))
            .collect();

        Ok(Self {
            uri,
            params,
            config,
        })
    }

    /// The request URI, query included
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Query parameters carried over to every link
    #[must_use]
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Paging configuration in effect for this request
    #[must_use]
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Link builder rooted at this request
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the request URI has no path.
    pub fn link_builder(&self) -> Result<LinkBuilder> {
        Ok(LinkBuilder::from_config(&self.uri, &self.config)?.with_params(self.params.clone()))
    }

    /// Decorate `page` with links back to this request
    ///
    /// # Errors
    ///
    /// Same as [`PagedResources::with_builder`].
    pub fn paged<T>(&self, page: Page<T>) -> Result<PagedResources<T>> {
        PagedResources::with_builder(page, &self.link_builder()?)
    }
}

impl<S> FromRequestParts<S> for CurrentRequest
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        // Nested routers see a stripped URI; links must point at the full one
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| parts.uri.clone());

        CurrentRequest::new(uri, paging_config(parts))
    }
}
