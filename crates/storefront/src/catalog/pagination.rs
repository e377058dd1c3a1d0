//! Context-wide pagination state.

/// The single page index shared by one browsing context.
///
/// Page 3 of one tier has no defined correspondence to page 3 of another, so
/// switching the authoritative source resets to page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
}

impl Pager {
    #[must_use]
    pub const fn new() -> Self {
        Self { page: 1 }
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.page
    }

    /// Jump to a page the user selected. Applied only when
    /// `1 <= page <= total_pages` of the currently active source; returns
    /// whether the page changed.
    pub const fn set_page(&mut self, page: u32, total_pages: u32) -> bool {
        if page >= 1 && page <= total_pages && page != self.page {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Back to page 1. Used on any filter change.
    pub const fn reset(&mut self) {
        self.page = 1;
    }

    /// The authoritative source tier changed.
    pub const fn on_tier_change(&mut self) {
        self.page = 1;
    }

    /// An item was removed from the current page; `remaining_on_page` is the
    /// count left on it. Steps back one page when the removal emptied a page
    /// past the first, so the viewer is not stranded on an empty trailing
    /// page. Returns whether the page changed; either way the caller
    /// refetches.
    pub const fn on_item_removed(&mut self, remaining_on_page: usize) -> bool {
        if remaining_on_page == 0 && self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_page_one() {
        assert_eq!(Pager::new().current(), 1);
    }

    #[test]
    fn test_set_page_within_bounds() {
        let mut pager = Pager::new();
        assert!(pager.set_page(3, 5));
        assert_eq!(pager.current(), 3);
    }

    #[test]
    fn test_set_page_rejects_out_of_bounds() {
        let mut pager = Pager::new();
        assert!(!pager.set_page(0, 5));
        assert!(!pager.set_page(6, 5));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_tier_change_always_yields_page_one() {
        let mut pager = Pager::new();
        pager.set_page(4, 9);
        pager.on_tier_change();
        assert_eq!(pager.current(), 1);
        // idempotent
        pager.on_tier_change();
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_removal_emptying_later_page_steps_back() {
        let mut pager = Pager::new();
        pager.set_page(2, 2);
        assert!(pager.on_item_removed(0));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_removal_on_first_page_stays() {
        let mut pager = Pager::new();
        assert!(!pager.on_item_removed(0));
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_removal_with_items_remaining_stays() {
        let mut pager = Pager::new();
        pager.set_page(3, 4);
        assert!(!pager.on_item_removed(2));
        assert_eq!(pager.current(), 3);
    }
}
