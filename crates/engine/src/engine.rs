//! The state-reconciliation engine.
//!
//! [`Storefront`] owns the canonical in-memory catalog, cart, and session
//! and is the only place any of them mutate. After every completed operation
//! the following hold:
//!
//! - a product's `quantity_in_cart` is 0 exactly when the cart has no entry
//!   for it, and equal to the entry's quantity otherwise
//! - no cart entry has quantity 0; reaching 0 deletes the entry
//! - the persisted cart snapshot reflects the in-memory cart (write-through)
//!
//! Mutating operations take `&mut self`, so two mutations cannot interleave;
//! the serialization the consistency rules need is enforced by the borrow
//! checker rather than a mutation queue. Read accessors are `&self` and stay
//! usable while no operation is running.

use tracing::{debug, error, info, warn};

use greengrocer_core::{CartEntry, Product, ProductFields, ProductId, User, UserRole};

use crate::catalog::CatalogGateway;
use crate::error::{EngineError, Result};
use crate::store::{StateStore, keys};
use crate::view::View;

/// Client-side storefront controller.
///
/// Generic over its two leaf collaborators: `G` fetches and mutates product
/// records on the catalog service, `S` persists the session and cart blobs.
pub struct Storefront<G, S> {
    gateway: G,
    store: S,
    catalog: Vec<Product>,
    cart: Vec<CartEntry>,
    session: Option<User>,
    view: View,
}

impl<G: CatalogGateway, S: StateStore> Storefront<G, S> {
    /// Create an engine with an empty catalog, empty cart, and no session.
    #[must_use]
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            gateway,
            store,
            catalog: Vec::new(),
            cart: Vec::new(),
            session: None,
            view: View::default(),
        }
    }

    // =========================================================================
    // Startup restoration
    // =========================================================================

    /// Restore state after a process restart: session, then catalog, then
    /// cart reprojection, in that order, so that cart quantities are
    /// projected onto a catalog that already exists.
    ///
    /// Each step is independently fault-tolerant: a malformed blob or a
    /// failed fetch logs the condition and leaves that piece in its empty or
    /// anonymous default. Restoration as a whole never fails.
    pub async fn restore(&mut self) {
        self.restore_session().await;
        self.restore_catalog().await;
        self.restore_cart().await;
    }

    async fn restore_session(&mut self) {
        match self.store.get(keys::LOGGED_IN_USER).await {
            Ok(Some(blob)) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => {
                    debug!(user = %user.name, role = ?user.role, "restored session");
                    self.view = View::landing_for(user.role);
                    self.session = Some(user);
                }
                Err(error) => {
                    warn!(%error, "stored session is corrupt, staying anonymous");
                }
            },
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "could not read stored session, staying anonymous");
            }
        }
    }

    async fn restore_catalog(&mut self) {
        match self.gateway.list().await {
            Ok(products) => self.catalog = products,
            Err(error) => {
                warn!(%error, "catalog fetch failed, starting with an empty catalog");
                self.catalog = Vec::new();
            }
        }
    }

    async fn restore_cart(&mut self) {
        let entries = match self.store.get(keys::CART_ITEMS).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<CartEntry>>(&blob) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(%error, "stored cart snapshot is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                warn!(%error, "could not read stored cart, starting empty");
                Vec::new()
            }
        };

        // A quantity-0 line must not exist in the cart, even from a
        // hand-edited snapshot
        self.cart = entries.into_iter().filter(|e| e.quantity > 0).collect();
        Self::reproject(&mut self.catalog, &self.cart);
    }

    /// Recompute every product's cart annotation from the cart: matched
    /// products take the entry's quantity, everything else is forced to 0.
    /// A full reprojection, not an incremental merge.
    fn reproject(catalog: &mut [Product], cart: &[CartEntry]) {
        for product in catalog {
            product.quantity_in_cart = cart
                .iter()
                .find(|e| e.id == product.id)
                .map_or(0, |e| e.quantity);
        }
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Put a product in the cart at quantity 1.
    ///
    /// Re-adding an item already in the cart resets it to 1, it does not
    /// increment; [`increment`](Self::increment) is the accumulate path.
    /// The new snapshot is persisted before this returns.
    ///
    /// # Errors
    ///
    /// [`EngineError::NotFound`] if the product is not in the catalog.
    pub async fn add_to_cart(&mut self, id: ProductId) -> Result<()> {
        let product = self
            .catalog
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::NotFound(id))?;

        product.quantity_in_cart = 1;
        Self::upsert(&mut self.cart, id, 1);
        self.persist_cart().await;
        Ok(())
    }

    /// Raise a product's cart quantity by 1, creating the cart entry if the
    /// product was at 0. Unknown products are ignored.
    pub async fn increment(&mut self, id: ProductId) {
        let Some(product) = self.catalog.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "increment for unknown product ignored");
            return;
        };

        product.quantity_in_cart += 1;
        let quantity = product.quantity_in_cart;
        Self::upsert(&mut self.cart, id, quantity);
        self.persist_cart().await;
    }

    /// Lower a product's cart quantity by 1, floored at 0. Reaching 0
    /// removes the cart entry entirely; decrementing a product already at 0
    /// changes nothing. Unknown products are ignored.
    pub async fn decrement(&mut self, id: ProductId) {
        let Some(product) = self.catalog.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "decrement for unknown product ignored");
            return;
        };

        let quantity = product.quantity_in_cart.saturating_sub(1);
        product.quantity_in_cart = quantity;
        if quantity == 0 {
            self.cart.retain(|e| e.id != id);
        } else {
            Self::upsert(&mut self.cart, id, quantity);
        }
        self.persist_cart().await;
    }

    fn upsert(cart: &mut Vec<CartEntry>, id: ProductId, quantity: u32) {
        if let Some(entry) = cart.iter_mut().find(|e| e.id == id) {
            entry.quantity = quantity;
        } else {
            cart.push(CartEntry::new(id, quantity));
        }
    }

    /// Write-through of the cart snapshot. A storage failure is logged and
    /// absorbed; in-memory state has already moved on.
    async fn persist_cart(&self) {
        let blob = match serde_json::to_string(&self.cart) {
            Ok(blob) => blob,
            Err(error) => {
                error!(%error, "could not serialize cart snapshot");
                return;
            }
        };
        if let Err(error) = self.store.set(keys::CART_ITEMS, &blob).await {
            error!(%error, "could not persist cart snapshot");
        }
    }

    // =========================================================================
    // Catalog administration
    // =========================================================================

    /// Create a product on the catalog service, then resynchronize: the full
    /// catalog is refetched, replaced in memory, and cart quantities are
    /// reprojected onto it.
    ///
    /// # Errors
    ///
    /// [`EngineError::Gateway`] if the service call or the refetch fails; the
    /// prior in-memory catalog is retained either way.
    pub async fn create_product(&mut self, fields: ProductFields) -> Result<()> {
        self.gateway.create(&fields).await?;
        self.resync_catalog().await
    }

    /// Replace a product's display fields on the catalog service, then
    /// resynchronize as [`create_product`](Self::create_product) does.
    ///
    /// # Errors
    ///
    /// [`EngineError::Gateway`] if the service call or the refetch fails; the
    /// prior in-memory catalog is retained either way.
    pub async fn update_product(&mut self, id: ProductId, fields: ProductFields) -> Result<()> {
        self.gateway.update(id, &fields).await?;
        self.resync_catalog().await
    }

    /// Delete a product on the catalog service and drop it from the
    /// in-memory catalog directly, without a refetch.
    ///
    /// A matching cart entry is left in place; cart lookups tolerate the
    /// gap. See DESIGN.md for the no-cascade decision.
    ///
    /// # Errors
    ///
    /// [`EngineError::Gateway`] if the service call fails; nothing changes.
    pub async fn delete_product(&mut self, id: ProductId) -> Result<()> {
        self.gateway.delete(id).await?;
        self.catalog.retain(|p| p.id != id);
        info!(%id, "product deleted");
        Ok(())
    }

    async fn resync_catalog(&mut self) -> Result<()> {
        let mut products = self.gateway.list().await?;
        Self::reproject(&mut products, &self.cart);
        self.catalog = products;
        Ok(())
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Adopt `user` as the active session, persist it, and land on the
    /// role-appropriate screen. The record is trusted as-is; a storage
    /// failure is logged and the session still takes effect.
    pub async fn login(&mut self, user: User) {
        self.view = View::landing_for(user.role);

        match serde_json::to_string(&user) {
            Ok(blob) => {
                if let Err(error) = self.store.set(keys::LOGGED_IN_USER, &blob).await {
                    error!(%error, "could not persist session");
                }
            }
            Err(error) => error!(%error, "could not serialize session"),
        }

        info!(user = %user.name, role = ?user.role, "logged in");
        self.session = Some(user);
    }

    /// End the session: clear it, erase both persisted blobs, empty the
    /// cart, reset every product's cart annotation to 0, and return to
    /// anonymous browsing. A full cart wipe, not a save-for-later.
    ///
    /// In-memory state is wiped before storage is touched, so the
    /// catalog/cart consistency rules hold even if the erases fail (which is
    /// only logged).
    pub async fn logout(&mut self) {
        self.session = None;
        self.view = View::Browsing;
        self.cart.clear();
        for product in &mut self.catalog {
            product.quantity_in_cart = 0;
        }

        if let Err(error) = self.store.remove(keys::LOGGED_IN_USER).await {
            error!(%error, "could not erase stored session");
        }
        if let Err(error) = self.store.remove(keys::CART_ITEMS).await {
            error!(%error, "could not erase stored cart");
        }

        info!("logged out");
    }

    // =========================================================================
    // View selection
    // =========================================================================

    /// Switch to `view`. Administrative screens require an admin session;
    /// a denied transition leaves the current screen unchanged.
    ///
    /// Returns the screen now showing.
    pub fn select_view(&mut self, view: View) -> View {
        if view.requires_admin() && !self.role().is_some_and(UserRole::is_admin) {
            warn!(requested = ?view, current = ?self.view, "view requires an admin session");
            return self.view;
        }

        debug!(from = ?self.view, to = ?view, "view changed");
        self.view = view;
        self.view
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    /// The full catalog, cart annotations included.
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    /// The cart lines.
    #[must_use]
    pub fn cart(&self) -> &[CartEntry] {
        &self.cart
    }

    /// Total units across all cart lines (the navbar badge).
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|e| e.quantity).sum()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&User> {
        self.session.as_ref()
    }

    /// Role of the active session, if any.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.session.as_ref().map(|u| u.role)
    }

    /// The screen currently showing.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// The catalog gateway this engine talks to.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The blob store this engine persists to.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
