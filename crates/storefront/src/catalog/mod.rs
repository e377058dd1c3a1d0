//! Catalog browsing: source selection and pagination.
//!
//! [`Catalog`] owns one query source per tier (plain, category, filtered),
//! the route/filter context, and the shared page index. Context setters are
//! synchronous pure transitions; [`Catalog::refresh`] is the single
//! asynchronous boundary that fetches the active tier's current page.

pub mod pagination;
pub mod selector;
pub mod source;

pub use pagination::Pager;
pub use selector::{Listing, SelectionContext, SourceKind, select};
pub use source::{FetchTicket, QuerySource, SourceState};

use std::sync::Arc;

use tracing::debug;

use saffron_core::{FilterCriteria, Product};

use crate::api::CatalogApi;

/// Catalog browsing state for one viewer context.
pub struct Catalog {
    api: Arc<dyn CatalogApi>,
    context: SelectionContext,
    pager: Pager,
    listing_page_size: u32,
    plain: QuerySource<Product>,
    category: QuerySource<Product>,
    filtered: QuerySource<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new(api: Arc<dyn CatalogApi>, listing_page_size: u32) -> Self {
        Self {
            api,
            context: SelectionContext::default(),
            pager: Pager::new(),
            listing_page_size,
            plain: QuerySource::new(),
            category: QuerySource::new(),
            filtered: QuerySource::new(),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &SelectionContext {
        &self.context
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.pager.current()
    }

    #[must_use]
    pub fn active_kind(&self) -> SourceKind {
        self.context.active_kind()
    }

    /// The active tier's output for rendering.
    #[must_use]
    pub fn listing(&self) -> Listing<'_> {
        select(&self.context, &self.plain, &self.category, &self.filtered)
    }

    /// Route navigation changed the category. Empty names count as absent.
    pub fn set_route_category(&mut self, category: Option<String>) {
        let category = category.filter(|c| !c.is_empty());
        if category == self.context.route_category {
            return;
        }

        let old_kind = self.context.active_kind();
        self.context.route_category = category;
        self.apply_context_change(old_kind);
    }

    /// The viewer changed the filter controls. Any change restarts from
    /// page 1, whether or not the active tier switches.
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        if filter == self.context.filter {
            return;
        }

        let old_kind = self.context.active_kind();
        self.context.filter = filter;
        self.pager.reset();
        self.apply_context_change(old_kind);
    }

    /// The viewer clicked a page control. Returns whether the page changed;
    /// out-of-range requests against the active source are ignored.
    pub fn set_page(&mut self, page: u32) -> bool {
        let total_pages = self.listing().result.map_or(1, |r| r.total_pages);
        let changed = self.pager.set_page(page, total_pages);
        if changed {
            self.invalidate_in_flight();
        }
        changed
    }

    /// Fetch the active tier's current page and apply the outcome, unless a
    /// context change supersedes the request while it is in flight.
    pub async fn refresh(&mut self) {
        let page = self.pager.current();
        let limit = self.listing_page_size;

        match self.context.active_kind() {
            SourceKind::Plain => {
                let ticket = self.plain.begin();
                let outcome = self.api.listing(page, limit).await;
                self.plain.resolve(ticket, outcome);
            }
            SourceKind::Category => {
                // active_kind only reports Category for a non-empty name
                let Some(name) = self.context.route_category.clone() else {
                    self.category.disable();
                    return;
                };
                let ticket = self.category.begin();
                let outcome = self.api.listing_by_category(&name, page, limit).await;
                self.category.resolve(ticket, outcome);
            }
            SourceKind::Filtered => {
                let filter = self.context.filter.clone();
                let ticket = self.filtered.begin();
                let outcome = self.api.listing_filtered(&filter, page).await;
                self.filtered.resolve(ticket, outcome);
            }
        }
    }

    fn apply_context_change(&mut self, old_kind: SourceKind) {
        let new_kind = self.context.active_kind();
        if new_kind != old_kind {
            debug!(%old_kind, %new_kind, "active listing tier changed");
            self.pager.on_tier_change();
        }
        self.invalidate_in_flight();
    }

    /// Responses for the superseded context must not be applied.
    fn invalidate_in_flight(&mut self) {
        self.plain.invalidate();
        self.category.invalidate();
        self.filtered.invalidate();
    }
}
