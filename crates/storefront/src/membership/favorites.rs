//! Favorite-set sync.
//!
//! Two views share one server collection: the unpaginated ID set used to
//! decorate listings (`is_favorited`), and a paged browse view for the
//! favorites screen. Every favorite mutation returns the full updated set,
//! which replaces the local one wholesale; the paged view is marked stale
//! and refetched on its next read.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use saffron_core::{Product, ProductId};

use crate::api::CatalogApi;
use crate::catalog::{Pager, QuerySource};
use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::notify::Notifier;

const SIGN_IN_PROMPT: &str = "Please log in to manage favorites";

/// The viewer's favorite products, as last confirmed by the server.
pub struct Favorites {
    api: Arc<dyn CatalogApi>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    /// `None` until the first successful fetch for an authenticated viewer.
    ids: Option<HashSet<ProductId>>,
    /// Paged browse view for the favorites screen.
    browse: QuerySource<Product>,
    pager: Pager,
    /// Set by confirmed mutations; the next ID read refetches.
    stale: bool,
}

impl Favorites {
    #[must_use]
    pub fn new(
        api: Arc<dyn CatalogApi>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            identity,
            notifier,
            ids: None,
            browse: QuerySource::new(),
            pager: Pager::new(),
            stale: false,
        }
    }

    /// Membership test used to decorate product cards.
    ///
    /// Always answers: `false` before the first successful fetch, while
    /// loading, and for anonymous viewers, so decoration can always render.
    #[must_use]
    pub fn is_favorited(&self, id: &ProductId) -> bool {
        self.ids.as_ref().is_some_and(|ids| ids.contains(id))
    }

    /// Ensure the ID set reflects the last confirmed server state, fetching
    /// when it was never loaded or a mutation marked it stale.
    ///
    /// A no-op for anonymous viewers: the set stays empty and no request is
    /// made.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous set stays untouched.
    pub async fn sync(&mut self) -> Result<(), ApiError> {
        if !self.identity.is_authenticated() {
            self.ids = None;
            return Ok(());
        }
        if self.ids.is_some() && !self.stale {
            return Ok(());
        }

        let ids = self.api.all_favorite_ids().await?;
        self.ids = Some(ids.into_iter().collect());
        self.stale = false;
        Ok(())
    }

    /// Add or remove a favorite, depending on current membership.
    ///
    /// Signed-out viewers get a sign-in prompt and no request is sent. On
    /// success the returned set replaces the local one wholesale; on failure
    /// the local set stays untouched and the server's message is forwarded.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn toggle(&mut self, id: &ProductId) {
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        if self.is_favorited(id) {
            match self.api.remove_favorite(id).await {
                Ok(ids) => {
                    self.replace(ids);
                    self.notifier.success("Item removed from favorites!");
                }
                Err(e) => self
                    .notifier
                    .error(&format!("Failed to remove: {}", e.user_message())),
            }
        } else {
            match self.api.add_favorite(id).await {
                Ok(ids) => {
                    self.replace(ids);
                    self.notifier.success("Item added to favorites!");
                }
                Err(e) => self
                    .notifier
                    .error(&format!("Failed to add: {}", e.user_message())),
            }
        }
    }

    /// Remove every favorite.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        match self.api.clear_favorites().await {
            Ok(()) => {
                self.replace(Vec::new());
                self.pager.reset();
                self.notifier.success("Favorites cleared");
            }
            Err(e) => self
                .notifier
                .error(&format!("Failed to clear favorites: {}", e.user_message())),
        }
    }

    /// Current page index of the browse view.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.pager.current()
    }

    /// Move the browse view to a page; out-of-range requests are ignored.
    pub fn set_page(&mut self, page: u32) -> bool {
        let total_pages = self.browse.data().map_or(1, |r| r.total_pages);
        let changed = self.pager.set_page(page, total_pages);
        if changed {
            self.browse.invalidate();
        }
        changed
    }

    /// Fetch the current page of the browse view. Disabled for anonymous
    /// viewers: no request, empty data.
    pub async fn refresh_page(&mut self) {
        if !self.identity.is_authenticated() {
            self.browse.disable();
            return;
        }

        let page = self.pager.current();
        let ticket = self.browse.begin();
        let outcome = self.api.favorites(page).await;
        self.browse.resolve(ticket, outcome);
    }

    /// The browse view's state for rendering.
    #[must_use]
    pub const fn browse_state(&self) -> &QuerySource<Product> {
        &self.browse
    }

    /// Identity was lost; drop member-scoped state and stop querying.
    pub fn on_logout(&mut self) {
        debug!("clearing favorites state on logout");
        self.ids = None;
        self.stale = false;
        self.browse.disable();
        self.pager.reset();
    }

    /// Wholesale replacement from a mutation response.
    ///
    /// The returned set is authoritative right now, but another mutation may
    /// still be in flight, so the collection is also marked stale: the next
    /// [`sync`](Self::sync) refetches and the last completed fetch wins.
    fn replace(&mut self, ids: Vec<ProductId>) {
        self.ids = Some(ids.into_iter().collect());
        self.stale = true;
        self.browse.invalidate();
    }
}
