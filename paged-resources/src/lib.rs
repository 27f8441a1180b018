//! # paged-resources
//!
//! Paged REST collections with hypermedia navigation links for axum services.
//!
//! A [`Page`](paging::Page) of results is wrapped in a
//! [`PagedResources`](paging::PagedResources), which adds `previous`, `next`,
//! `first`, `last` and `self` links built from the current request URI.
//! Every non-paging query parameter on the request is carried over to each
//! link, and the page's sort is re-encoded as `sort=property,direction`.
//!
//! ## Features
//!
//! - **Extractors**: [`PageRequest`](paging::PageRequest) and
//!   [`CurrentRequest`](extract::CurrentRequest) read paging input straight
//!   from the request
//! - **Responses**: JSON body with a `links` array plus an RFC 8288 `Link` header
//! - **Configuration**: Figment-based defaults, TOML file and `PAGED_` environment
//! - **Observability**: JSON tracing output with an env filter
//!
//! ## Example
//!
//! ```rust,no_run
//! use paged_resources::prelude::*;
//! use axum::{routing::get, Extension, Router};
//!
//! async fn list_numbers(current: CurrentRequest, request: PageRequest) -> Result<PagedResources<u64>> {
//!     let total = 1_000;
//!     let start = request.offset();
//!     let end = (start + u64::from(request.size)).min(total);
//!     current.paged(Page::new((start..end).collect(), request, total))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let app: Router = Router::new()
//!         .route("/numbers", get(list_numbers))
//!         .layer(Extension(config.paging.clone()));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await
//!         .map_err(|e| Error::Internal(e.to_string()))?;
//!     axum::serve(listener, app).await
//!         .map_err(|e| Error::Internal(e.to_string()))?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod observability;
pub mod paging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, PagingConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::extract::CurrentRequest;
    pub use crate::observability::init_tracing;
    pub use crate::paging::{
        link_header, Direction, Link, LinkBuilder, Order, Page, PageRequest, Paged,
        PagedResources, QueryParams, Relation, Sort,
    };
}
