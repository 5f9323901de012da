//! Startup restoration scenarios.
//!
//! Restoration runs session, then catalog, then cart reprojection, and each
//! step degrades to its empty/anonymous default on failure without aborting
//! the rest.

#![allow(clippy::unwrap_used)]

use greengrocer_core::{CartEntry, ProductId, UserRole};
use greengrocer_engine::{MemoryStore, StateStore, Storefront, View, keys};
use greengrocer_integration_tests::{MockCatalog, test_user};

fn quantity_of(shop: &Storefront<MockCatalog, MemoryStore>, id: i32) -> u32 {
    shop.product(ProductId::new(id)).unwrap().quantity_in_cart
}

#[tokio::test]
async fn test_fresh_install_defaults() {
    let mut shop = Storefront::new(MockCatalog::with_products(&[1]), MemoryStore::new());
    shop.restore().await;

    assert!(shop.session().is_none());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.view(), View::Browsing);
    assert_eq!(shop.catalog().len(), 1);
}

#[tokio::test]
async fn test_reprojection_is_order_independent() {
    // Snapshot entries and catalog records deliberately out of order
    for ids in [[1, 2, 3], [3, 2, 1], [2, 3, 1]] {
        let store = MemoryStore::new();
        store
            .set(keys::CART_ITEMS, r#"[{"id":3,"qty":7},{"id":2,"qty":3}]"#)
            .await
            .unwrap();

        let mut shop = Storefront::new(MockCatalog::with_products(&ids), store);
        shop.restore().await;

        assert_eq!(quantity_of(&shop, 1), 0);
        assert_eq!(quantity_of(&shop, 2), 3);
        assert_eq!(quantity_of(&shop, 3), 7);
    }
}

#[tokio::test]
async fn test_malformed_cart_blob_restores_empty() {
    let store = MemoryStore::new();
    store.set(keys::CART_ITEMS, "not-json").await.unwrap();

    let mut shop = Storefront::new(MockCatalog::with_products(&[1, 2]), store);
    shop.restore().await;

    assert!(shop.cart().is_empty());
    assert_eq!(quantity_of(&shop, 1), 0);
    assert_eq!(quantity_of(&shop, 2), 0);
}

#[tokio::test]
async fn test_corrupt_session_blob_stays_anonymous() {
    let store = MemoryStore::new();
    store.set(keys::LOGGED_IN_USER, "]]][[[").await.unwrap();

    let mut shop = Storefront::new(MockCatalog::with_products(&[]), store);
    shop.restore().await;

    assert!(shop.session().is_none());
    assert_eq!(shop.view(), View::Browsing);
}

#[tokio::test]
async fn test_stored_session_lands_on_role_screen() {
    let store = MemoryStore::new();
    let admin = test_user("root", UserRole::Admin);
    store
        .set(keys::LOGGED_IN_USER, &serde_json::to_string(&admin).unwrap())
        .await
        .unwrap();

    let mut shop = Storefront::new(MockCatalog::with_products(&[]), store);
    shop.restore().await;

    assert_eq!(shop.session(), Some(&admin));
    assert_eq!(shop.view(), View::AdminCatalog);
}

#[tokio::test]
async fn test_catalog_outage_keeps_cart_lines() {
    let store = MemoryStore::new();
    store
        .set(keys::CART_ITEMS, r#"[{"id":1,"qty":2}]"#)
        .await
        .unwrap();

    let catalog = MockCatalog::with_products(&[1]);
    catalog.set_available(false);

    let mut shop = Storefront::new(catalog, store);
    shop.restore().await;

    // Empty catalog rather than a blocked client; the snapshot lines stay
    // and will project once a catalog exists again
    assert!(shop.catalog().is_empty());
    assert_eq!(shop.cart(), &[CartEntry::new(ProductId::new(1), 2)]);
}

#[tokio::test]
async fn test_snapshot_entry_for_deleted_product_is_tolerated() {
    let store = MemoryStore::new();
    store
        .set(keys::CART_ITEMS, r#"[{"id":9,"qty":4},{"id":1,"qty":1}]"#)
        .await
        .unwrap();

    // Product 9 no longer exists in the catalog
    let mut shop = Storefront::new(MockCatalog::with_products(&[1, 2]), store);
    shop.restore().await;

    assert_eq!(quantity_of(&shop, 1), 1);
    assert_eq!(quantity_of(&shop, 2), 0);
    assert_eq!(shop.cart().len(), 2);
    assert!(shop.product(ProductId::new(9)).is_none());
}
