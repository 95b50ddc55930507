//! Pagination primitives shared by repositories and queries.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,

    /// Maximum number of items per page.
    pub page_size: u32,
}

impl PageRequest {
    /// Default number of items per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Creates a page request. Values below 1 are raised to 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of items to skip before this page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.limit()
    }

    /// Number of items on this page.
    pub fn limit(&self) -> usize {
        self.page_size.max(1) as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: usize,
}

impl<T> PagedResult<T> {
    /// Builds a page by slicing `all` according to `request`.
    pub fn from_all(all: Vec<T>, request: PageRequest) -> Self {
        let total_count = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_count,
        }
    }

    /// Returns an empty page for `request`.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            page_size: request.page_size,
            total_count: 0,
        }
    }

    /// Total number of pages (0 when there are no matches).
    pub fn total_pages(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        let size = self.page_size.max(1) as usize;
        self.total_count.div_ceil(size) as u32
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Projects every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_clamps_to_one() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn from_all_slices_requested_page() {
        let page = PagedResult::from_all((1..=25).collect::<Vec<_>>(), PageRequest::new(2, 10));
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next_page());
        assert!(page.has_previous_page());
    }

    #[test]
    fn last_partial_page() {
        let page = PagedResult::from_all((1..=25).collect::<Vec<_>>(), PageRequest::new(3, 10));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = PagedResult::from_all(vec![1, 2, 3], PageRequest::new(5, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: PagedResult<u8> = PagedResult::empty(PageRequest::default());
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next_page());
        assert!(!page.has_previous_page());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = PagedResult::from_all(vec![1, 2, 3], PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.page_size, 2);
    }
}
