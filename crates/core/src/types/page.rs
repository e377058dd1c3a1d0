//! Paginated result envelope.

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
///
/// Invariants, enforced by [`PageResult::new`]:
/// - `total_pages >= 1`, even for an empty result, so pagination controls
///   stay well-defined
/// - `1 <= current_page <= total_pages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// 1-based index of this page.
    pub current_page: u32,
    /// Total number of pages. Never 0.
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    /// Build a page, normalizing out-of-range pagination values.
    ///
    /// A reported `total_pages` of 0 becomes 1, and `current_page` is clamped
    /// into `1..=total_pages`.
    #[must_use]
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let current_page = current_page.clamp(1, total_pages);
        Self {
            items,
            current_page,
            total_pages,
        }
    }

    /// An empty single-page result.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 1)
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_reports_one_total_page() {
        let page: PageResult<u8> = PageResult::empty();
        assert!(page.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_new_normalizes_zero_total_pages() {
        let page: PageResult<u8> = PageResult::new(vec![], 1, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_new_clamps_current_page() {
        let page = PageResult::new(vec![1, 2], 9, 3);
        assert_eq!(page.current_page, 3);

        let page = PageResult::new(vec![1, 2], 0, 3);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn test_in_range_values_untouched() {
        let page = PageResult::new(vec!['a'], 2, 5);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.len(), 1);
    }
}
