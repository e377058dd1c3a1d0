//! Cart sync.
//!
//! Unlike favorites, cart mutations signal success only, so every confirmed
//! mutation is followed by a refetch of the current page. Removal that
//! empties a page past the first steps the pager back before the refetch so
//! the viewer never lands on an empty trailing page.

use std::sync::Arc;

use tracing::{debug, instrument};

use saffron_core::{CartSnapshot, ProductId};

use crate::api::CatalogApi;
use crate::catalog::Pager;
use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::notify::Notifier;

const SIGN_IN_PROMPT: &str = "Please log in to add items to cart";

/// The viewer's cart, as last confirmed by the server.
pub struct Cart {
    api: Arc<dyn CatalogApi>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    snapshot: CartSnapshot,
    pager: Pager,
    /// True until the first successful fetch and after every confirmed
    /// mutation whose follow-up refetch failed.
    stale: bool,
}

impl Cart {
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
            snapshot: CartSnapshot::empty(),
            pager: Pager::new(),
            stale: true,
        }
    }

    /// The current page of the cart as last confirmed by the server. Empty
    /// before the first fetch and for anonymous viewers.
    #[must_use]
    pub const fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Membership test against the confirmed page, used to decorate product
    /// cards. `false` before the first fetch and while anonymous.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.snapshot.lines.iter().any(|line| line.product.id == *id)
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.pager.current()
    }

    /// Move to a cart page; out-of-range requests are ignored. The caller
    /// refetches on change.
    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.pager.set_page(page, self.snapshot.total_pages);
        if changed {
            self.stale = true;
        }
        changed
    }

    /// Fetch the current cart page when it was never loaded or a mutation
    /// left it stale.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot stays untouched.
    pub async fn sync(&mut self) -> Result<(), ApiError> {
        if self.stale {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Unconditionally fetch the current cart page.
    ///
    /// Anonymous viewers get an empty snapshot and no request is made.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous snapshot stays untouched.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        if !self.identity.is_authenticated() {
            self.snapshot = CartSnapshot::empty();
            self.stale = false;
            return Ok(());
        }

        let snapshot = self.api.cart(self.pager.current()).await?;
        self.snapshot = snapshot;
        self.stale = false;
        Ok(())
    }

    /// Add one unit of a product to the cart.
    ///
    /// Signed-out viewers get a sign-in prompt and no request is sent. On
    /// failure the confirmed snapshot stays untouched and the server's
    /// message is forwarded.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add(&mut self, id: &ProductId) {
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        match self.api.add_to_cart(id).await {
            Ok(()) => {
                self.notifier.success("Item added to cart!");
                self.refetch_after_mutation().await;
            }
            Err(e) => self
                .notifier
                .error(&format!("Failed to add to cart: {}", e.user_message())),
        }
    }

    /// Replace a line's quantity. A quantity of zero is a removal and goes
    /// through [`remove`](Self::remove) without touching the quantity
    /// endpoint.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn edit_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id).await;
            return;
        }
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        match self.api.edit_cart_quantity(id, quantity).await {
            Ok(()) => self.refetch_after_mutation().await,
            Err(e) => self
                .notifier
                .error(&format!("Failed to update quantity: {}", e.user_message())),
        }
    }

    /// Remove one product's line from the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&mut self, id: &ProductId) {
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        let remaining = remaining_after_removal(&self.snapshot, id);
        match self.api.remove_from_cart(Some(id)).await {
            Ok(()) => {
                self.notifier.success("Item removed from cart!");
                if self.pager.on_item_removed(remaining) {
                    debug!(page = self.pager.current(), "stepped back after removal emptied page");
                }
                self.refetch_after_mutation().await;
            }
            Err(e) => self
                .notifier
                .error(&format!("Failed to remove from cart: {}", e.user_message())),
        }
    }

    /// Remove every line from the cart.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        if !self.identity.is_authenticated() {
            self.notifier.error(SIGN_IN_PROMPT);
            return;
        }

        match self.api.remove_from_cart(None).await {
            Ok(()) => {
                self.snapshot = CartSnapshot::empty();
                self.pager.reset();
                self.stale = false;
                self.notifier.success("Cart cleared");
            }
            Err(e) => self
                .notifier
                .error(&format!("Failed to clear cart: {}", e.user_message())),
        }
    }

    /// Identity was lost; drop member-scoped state.
    pub fn on_logout(&mut self) {
        debug!("clearing cart state on logout");
        self.snapshot = CartSnapshot::empty();
        self.pager.reset();
        self.stale = true;
    }

    /// A mutation was confirmed, so the confirmed snapshot is out of date.
    /// Refetch now; if the refetch fails, keep the old snapshot, surface the
    /// error, and stay stale so the next sync retries.
    async fn refetch_after_mutation(&mut self) {
        self.stale = true;
        if let Err(e) = self.refresh().await {
            self.notifier.error(&e.user_message());
        }
    }
}

/// How many lines the confirmed page holds once `id` is removed. Removing a
/// product that is not on the confirmed page leaves the count unchanged.
fn remaining_after_removal(snapshot: &CartSnapshot, id: &ProductId) -> usize {
    let on_page = snapshot.lines.iter().any(|line| line.product.id == *id);
    if on_page {
        snapshot.lines.len() - 1
    } else {
        snapshot.lines.len()
    }
}
