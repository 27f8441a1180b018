//! Pages of results and the accessors shared by everything page-shaped

use serde::Serialize;

use super::request::PageRequest;
use super::sort::Sort;

/// Read-only view of a page of results
///
/// Implementors provide the raw metadata; navigation predicates and pageable
/// descriptors are derived from it.
///
/// # Example
///
/// ```rust
/// use paged_resources::paging::{Page, PageRequest, Paged};
///
/// let page = Page::new(vec!["a", "b"], PageRequest::of(1, 2), 5);
/// assert_eq!(page.total_pages(), 3);
/// assert!(page.has_previous());
/// assert!(page.has_next());
/// assert_eq!(page.next_pageable().map(|p| p.page), Some(2));
/// ```
pub trait Paged {
    /// Element type
    type Item;

    /// Zero-based index of this page
    fn number(&self) -> u32;

    /// Requested page size
    fn size(&self) -> u32;

    /// Number of pages in the whole data set
    fn total_pages(&self) -> u32;

    /// Number of elements in the whole data set
    fn total_elements(&self) -> u64;

    /// Number of elements on this page
    fn number_of_elements(&self) -> u32;

    /// Sort the page was fetched with
    fn sort(&self) -> &Sort;

    /// Elements on this page
    fn content(&self) -> &[Self::Item];

    /// Whether a page precedes this one
    fn has_previous(&self) -> bool {
        self.number() > 0
    }

    /// Whether a page follows this one
    fn has_next(&self) -> bool {
        u64::from(self.number()) + 1 < u64::from(self.total_pages())
    }

    /// Whether this is the first page
    fn is_first(&self) -> bool {
        !self.has_previous()
    }

    /// Whether this is the last page
    fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Whether this page holds any elements
    fn has_content(&self) -> bool {
        !self.content().is_empty()
    }

    /// Iterate over the elements on this page
    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.content().iter()
    }

    /// Request that produced this page
    fn pageable(&self) -> PageRequest {
        PageRequest::of(self.number(), self.size()).with_sort(self.sort().clone())
    }

    /// Request for the following page, if there is one
    fn next_pageable(&self) -> Option<PageRequest> {
        self.has_next().then(|| self.pageable().next())
    }

    /// Request for the preceding page, if there is one
    fn previous_pageable(&self) -> Option<PageRequest> {
        self.has_previous()
            .then(|| self.pageable().previous_or_first())
    }
}

/// One page of a larger data set
///
/// Produced by the data-access layer; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    number: u32,
    size: u32,
    total_pages: u32,
    total_elements: u64,
    number_of_elements: u32,
    sort: Sort,
    content: Vec<T>,
}

impl<T> Page<T> {
    /// Create a page from its content, the request that fetched it and the
    /// total number of elements in the data set
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_resources::paging::{Page, PageRequest, Paged};
    ///
    /// let page = Page::new(vec![1, 2, 3], PageRequest::of(4, 5), 23);
    /// assert_eq!(page.total_pages(), 5);
    /// assert_eq!(page.number_of_elements(), 3);
    /// assert!(page.is_last());
    /// ```
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let number_of_elements = u32::try_from(content.len()).unwrap_or(u32::MAX);
        Self {
            number: request.page,
            size: request.size,
            total_pages: calculate_total_pages(total_elements, request.size),
            total_elements,
            number_of_elements,
            sort: request.sort,
            content,
        }
    }

    /// Create a page with no content and no elements in the data set
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Create a page from metadata computed elsewhere
    ///
    /// `number_of_elements` is taken from `content`; `total_pages` is used
    /// as given.
    pub fn from_parts(
        content: Vec<T>,
        number: u32,
        size: u32,
        total_pages: u32,
        total_elements: u64,
        sort: Sort,
    ) -> Self {
        Self {
            number,
            size,
            total_pages,
            total_elements,
            number_of_elements: u32::try_from(content.len()).unwrap_or(u32::MAX),
            sort,
            content,
        }
    }

    /// Transform every element, keeping the page metadata
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_resources::paging::{Page, PageRequest, Paged};
    ///
    /// let page = Page::new(vec![1, 2], PageRequest::of(0, 2), 10);
    /// let mapped = page.map(|n| n * 10);
    /// assert_eq!(mapped.content(), &[10, 20]);
    /// assert_eq!(mapped.total_elements(), 10);
    /// ```
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            number: self.number,
            size: self.size,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            number_of_elements: self.number_of_elements,
            sort: self.sort,
            content: self.content.into_iter().map(f).collect(),
        }
    }

    /// Take the elements out of the page
    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

impl<T> Paged for Page<T> {
    type Item = T;

    fn number(&self) -> u32 {
        self.number
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn total_elements(&self) -> u64 {
        self.total_elements
    }

    fn number_of_elements(&self) -> u32 {
        self.number_of_elements
    }

    fn sort(&self) -> &Sort {
        &self.sort
    }

    fn content(&self) -> &[T] {
        &self.content
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

/// Calculate total pages, rounding up
///
/// A zero page size counts as a single page holding everything.
fn calculate_total_pages(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 1;
    }
    let size = u64::from(size);
    total.div_ceil(size).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Order;

    #[test]
    fn test_calculate_total_pages() {
        assert_eq!(calculate_total_pages(0, 20), 0);
        assert_eq!(calculate_total_pages(1, 20), 1);
        assert_eq!(calculate_total_pages(20, 20), 1);
        assert_eq!(calculate_total_pages(21, 20), 2);
        assert_eq!(calculate_total_pages(23, 5), 5);
        assert_eq!(calculate_total_pages(100, 0), 1);
    }

    #[test]
    fn test_middle_page() {
        let page = Page::new(vec![1, 2, 3, 4, 5], PageRequest::of(2, 5), 23);
        assert_eq!(page.number(), 2);
        assert_eq!(page.size(), 5);
        assert_eq!(page.total_pages(), 5);
        assert_eq!(page.total_elements(), 23);
        assert_eq!(page.number_of_elements(), 5);
        assert!(page.has_previous());
        assert!(page.has_next());
        assert!(!page.is_first());
        assert!(!page.is_last());
        assert!(page.has_content());
    }

    #[test]
    fn test_first_page() {
        let page = Page::new(vec!["a"], PageRequest::of(0, 1), 3);
        assert!(page.is_first());
        assert!(!page.has_previous());
        assert!(page.previous_pageable().is_none());
        assert_eq!(page.next_pageable(), Some(PageRequest::of(1, 1)));
    }

    #[test]
    fn test_last_page() {
        let page = Page::new(vec!["c"], PageRequest::of(2, 1), 3);
        assert!(page.is_last());
        assert!(!page.has_next());
        assert!(page.next_pageable().is_none());
        assert_eq!(page.previous_pageable(), Some(PageRequest::of(1, 1)));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<String> = Page::empty(PageRequest::of(0, 20));
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.number_of_elements(), 0);
        assert!(!page.has_content());
        assert!(!page.has_next());
        assert!(!page.has_previous());
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_from_parts_keeps_given_total_pages() {
        let page = Page::from_parts(vec!['a', 'b'], 3, 2, 10, 19, Sort::from(Order::asc("id")));
        assert_eq!(page.total_pages(), 10);
        assert_eq!(page.number_of_elements(), 2);
        assert!(page.has_next());
        assert_eq!(page.pageable(), PageRequest::of(3, 2).with_sort(Order::asc("id")));
    }

    #[test]
    fn test_pageable_carries_sort() {
        let request = PageRequest::of(1, 10).with_sort(Order::desc("name"));
        let page = Page::new(vec![0; 10], request.clone(), 35);
        assert_eq!(page.pageable(), request);
        assert_eq!(page.next_pageable().unwrap().sort, request.sort);
    }

    #[test]
    fn test_map_preserves_metadata() {
        let request = PageRequest::of(1, 2).with_sort(Order::asc("id"));
        let page = Page::new(vec![1, 2], request, 7);
        let mapped = page.clone().map(|n| n.to_string());
        assert_eq!(mapped.content(), &["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.number(), page.number());
        assert_eq!(mapped.total_pages(), page.total_pages());
        assert_eq!(mapped.sort(), page.sort());
    }

    #[test]
    fn test_iteration() {
        let page = Page::new(vec![1, 2, 3], PageRequest::of(0, 3), 3);
        assert_eq!(page.iter().sum::<i32>(), 6);
        assert_eq!((&page).into_iter().count(), 3);
        assert_eq!(page.into_content(), vec![1, 2, 3]);
    }

    #[test]
    fn test_serialize_camel_case() {
        let page = Page::new(vec!["x"], PageRequest::of(0, 1), 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["number"], 0);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["totalElements"], 2);
        assert_eq!(json["numberOfElements"], 1);
        assert_eq!(json["sort"], serde_json::json!([]));
        assert_eq!(json["content"], serde_json::json!(["x"]));
    }
}
