//! Integration tests for Greengrocer.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p greengrocer-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `engine_cart` - Cart reconciliation and write-through persistence
//! - `engine_restore` - Startup restoration and reprojection
//! - `engine_session` - Login/logout lifecycle and view gating
//! - `engine_admin` - Catalog administration and resynchronization
//!
//! This crate's library provides the shared plumbing: [`MockCatalog`], a
//! catalog service double with server-side state, [`FailingStore`], a store
//! whose every call fails, and fixture helpers.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, PoisonError};

use greengrocer_core::{
    CurrencyCode, Email, Price, Product, ProductFields, ProductId, User, UserId, UserRole,
};
use greengrocer_engine::{CatalogGateway, GatewayError, StateStore, StoreError};

// =============================================================================
// MockCatalog
// =============================================================================

/// A catalog service double.
///
/// Holds its own product list the way the real service does: `create`
/// assigns identifiers, `update`/`delete` mutate by id, `list` returns the
/// current state. Cloning shares the underlying state, so a test can keep a
/// handle and reshape the "server" while the engine owns another clone.
#[derive(Clone)]
pub struct MockCatalog {
    state: Arc<Mutex<MockCatalogState>>,
}

struct MockCatalogState {
    products: Vec<Product>,
    next_id: i32,
    available: bool,
    list_available: bool,
    list_calls: usize,
}

impl MockCatalog {
    /// A service seeded with products named `product-{id}`.
    #[must_use]
    pub fn with_products(ids: &[i32]) -> Self {
        let products = ids
            .iter()
            .map(|&id| Product::new(ProductId::new(id), product_fields(&format!("product-{id}"))))
            .collect::<Vec<_>>();
        let next_id = ids.iter().copied().max().unwrap_or(0) + 1;

        Self {
            state: Arc::new(Mutex::new(MockCatalogState {
                products,
                next_id,
                available: true,
                list_available: true,
                list_calls: 0,
            })),
        }
    }

    /// Simulate the service going down (or coming back).
    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    /// Fail only the listing endpoint, leaving mutations up.
    pub fn set_list_available(&self, available: bool) {
        self.lock().list_available = available;
    }

    /// How many times `list` has been called.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.lock().list_calls
    }

    /// Snapshot of the server-side product list.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockCatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unavailable() -> GatewayError {
        GatewayError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)
    }
}

impl CatalogGateway for MockCatalog {
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        let mut state = self.lock();
        state.list_calls += 1;
        if !state.available || !state.list_available {
            return Err(Self::unavailable());
        }
        Ok(state.products.clone())
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), GatewayError> {
        let mut state = self.lock();
        if !state.available {
            return Err(Self::unavailable());
        }
        let id = ProductId::new(state.next_id);
        state.next_id += 1;
        state.products.push(Product::new(id, fields.clone()));
        Ok(())
    }

    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), GatewayError> {
        let mut state = self.lock();
        if !state.available {
            return Err(Self::unavailable());
        }
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GatewayError::Status(reqwest::StatusCode::NOT_FOUND))?;
        product.fields = fields.clone();
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), GatewayError> {
        let mut state = self.lock();
        if !state.available {
            return Err(Self::unavailable());
        }
        if !state.products.iter().any(|p| p.id == id) {
            return Err(GatewayError::Status(reqwest::StatusCode::NOT_FOUND));
        }
        state.products.retain(|p| p.id != id);
        Ok(())
    }
}

// =============================================================================
// FailingStore
// =============================================================================

/// A store whose every call fails, for exercising the complete-or-log
/// persistence policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl FailingStore {
    fn broken() -> StoreError {
        StoreError::Io(std::io::Error::other("disk on fire"))
    }
}

impl StateStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(Self::broken())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(Self::broken())
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(Self::broken())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Display fields for a test product.
#[must_use]
pub fn product_fields(name: &str) -> ProductFields {
    ProductFields {
        name: name.to_owned(),
        price: Price::from_cents(199, CurrencyCode::USD),
        image: None,
        description: None,
    }
}

/// A user record the way a login flow would produce it.
///
/// # Panics
///
/// Never; the fixture email is valid.
#[must_use]
pub fn test_user(name: &str, role: UserRole) -> User {
    #[allow(clippy::unwrap_used)]
    let email = Email::parse(&format!("{name}@example.com")).unwrap();
    User {
        id: UserId::new(1),
        name: name.to_owned(),
        email,
        role,
        logged_in_at: None,
    }
}
