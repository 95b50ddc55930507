use common::PageRequest;

/// Tunables for the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl ApplicationSettings {
    /// Builds a page request, falling back to the default page size.
    pub fn page_request(&self, page: u32, page_size: Option<u32>) -> PageRequest {
        PageRequest::new(page, page_size.unwrap_or(self.default_page_size))
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            default_page_size: PageRequest::DEFAULT_PAGE_SIZE,
            max_page_size: 100,
        }
    }
}

/// Serde default for `page` fields on paged queries.
pub(crate) fn first_page() -> u32 {
    1
}
