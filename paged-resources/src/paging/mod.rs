//! Paged collections with navigation links
//!
//! This module models one page of a larger result set and decorates it with
//! hypermedia links to the neighbouring pages.
//!
//! # Features
//!
//! - **Sorting**: [`Sort`], [`Order`] and [`Direction`], parsed from and
//!   rendered to `sort=property,direction` query values
//! - **Requests**: [`PageRequest`] carries page index, size and sort
//! - **Pages**: [`Page`] and the [`Paged`] accessor trait
//! - **Links**: [`LinkBuilder`] renders `previous`, `next`, `first`, `last`
//!   and `self` links against the request URI, preserving [`QueryParams`]
//! - **Responses**: [`PagedResources`] serializes the page plus its links and
//!   sets an RFC 8288 `Link` header
//!
//! # Example
//!
//! ```rust
//! use axum::http::Uri;
//! use paged_resources::paging::{Page, PageRequest, Paged, PagedResources, Relation};
//!
//! let uri = Uri::from_static("/users?page=2&size=5");
//! let page = Page::new(vec!["k", "l", "m", "n", "o"], PageRequest::of(2, 5), 23);
//! let resources = PagedResources::new(page, &uri).unwrap();
//!
//! assert_eq!(resources.total_pages(), 5);
//! assert_eq!(resources.link(Relation::Next).unwrap().href, "/users?page=3&size=5");
//! assert_eq!(resources.link(Relation::Current).unwrap().href, "/users?page=2&size=5");
//! ```

mod link;
mod page;
mod request;
mod resources;
mod sort;

pub use link::{link_header, Link, LinkBuilder, QueryParams, Relation};
pub use page::{Page, Paged};
pub use request::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use resources::PagedResources;
pub use sort::{Direction, Order, Sort};
