/// Pagination support for catalog queries
///
/// Mirrors the gateway's paging contract: pages are 1-based and sized by
/// `per_page`.
use serde::{Deserialize, Serialize};

/// Parameters for a single catalog page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 12,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// First page with the given size
    pub fn first(per_page: u32) -> Self {
        Self { page: 1, per_page }
    }
}

/// One page of results plus the paging totals reported by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub current_page: u32,
    pub per_page: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: &PageRequest) -> Self {
        let total_pages = ((total_items as f64) / (request.per_page as f64)).ceil() as u32;

        Self {
            items,
            total_pages: total_pages.max(1),
            current_page: request.page,
            per_page: request.per_page,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 25, &PageRequest::new(1, 12));
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page = Page::<i32>::new(vec![], 0, &PageRequest::first(12));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }
}
