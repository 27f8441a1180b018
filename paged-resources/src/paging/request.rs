//! Page requests
//!
//! A [`PageRequest`] describes which page of a data set to fetch: a
//! zero-based page index, a page size and a [`Sort`]. Data-access code turns
//! it into an offset/limit pair; pages report it back through
//! [`Paged::pageable`](super::Paged::pageable) so callers can step forwards
//! and backwards.
//!
//! # Example
//!
//! ```rust
//! use paged_resources::paging::{Order, PageRequest};
//!
//! let request = PageRequest::of(2, 25).with_sort(Order::desc("created_at"));
//! assert_eq!(request.offset(), 50);
//! assert_eq!(request.next().page, 3);
//! assert_eq!(request.previous_or_first().page, 1);
//! ```

use serde::{Deserialize, Serialize};

use super::sort::Sort;

/// Default number of elements per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size accepted from a request
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Pageable descriptor: page index, size and sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Number of elements per page
    pub size: u32,
    /// Sort to apply
    #[serde(default)]
    pub sort: Sort,
}

impl PageRequest {
    /// Unsorted request for page `page` of `size` elements
    #[must_use]
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    /// Set the sort
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<Sort>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Number of elements to skip
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_resources::paging::PageRequest;
    ///
    /// assert_eq!(PageRequest::of(0, 20).offset(), 0);
    /// assert_eq!(PageRequest::of(3, 20).offset(), 60);
    /// ```
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Request for the following page
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    /// Request for the preceding page, or this one if it is the first
    #[must_use]
    pub fn previous_or_first(&self) -> Self {
        if self.has_previous() {
            Self {
                page: self.page - 1,
                size: self.size,
                sort: self.sort.clone(),
            }
        } else {
            self.first()
        }
    }

    /// Request for the first page
    #[must_use]
    pub fn first(&self) -> Self {
        Self {
            page: 0,
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    /// Whether a page precedes this one
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}
