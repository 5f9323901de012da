//! Session lifecycle and view gating scenarios.

#![allow(clippy::unwrap_used)]

use greengrocer_core::{ProductId, UserRole};
use greengrocer_engine::{MemoryStore, StateStore, Storefront, View, keys};
use greengrocer_integration_tests::{FailingStore, MockCatalog, test_user};

async fn shop_with(ids: &[i32]) -> Storefront<MockCatalog, MemoryStore> {
    let mut shop = Storefront::new(MockCatalog::with_products(ids), MemoryStore::new());
    shop.restore().await;
    shop
}

#[tokio::test]
async fn test_login_persists_session_blob() {
    let mut shop = shop_with(&[]).await;
    let user = test_user("asha", UserRole::Customer);

    shop.login(user.clone()).await;

    assert_eq!(shop.session(), Some(&user));
    let blob = shop
        .store()
        .get(keys::LOGGED_IN_USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(serde_json::from_str::<greengrocer_core::User>(&blob).unwrap(), user);
}

#[tokio::test]
async fn test_logout_is_a_full_cart_wipe() {
    let mut shop = shop_with(&[1, 2]).await;
    shop.login(test_user("asha", UserRole::Customer)).await;
    shop.add_to_cart(ProductId::new(1)).await.unwrap();
    shop.increment(ProductId::new(1)).await;

    shop.logout().await;

    assert!(shop.session().is_none());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.product(ProductId::new(1)).unwrap().quantity_in_cart, 0);
    assert_eq!(shop.view(), View::Browsing);

    // Both persisted blobs are gone, not merely emptied
    assert!(shop.store().get(keys::CART_ITEMS).await.unwrap().is_none());
    assert!(shop.store().get(keys::LOGGED_IN_USER).await.unwrap().is_none());
}

#[tokio::test]
async fn test_logout_stays_consistent_when_storage_fails() {
    let mut shop = Storefront::new(MockCatalog::with_products(&[1]), FailingStore);
    shop.restore().await;
    shop.login(test_user("asha", UserRole::Customer)).await;
    shop.add_to_cart(ProductId::new(1)).await.unwrap();

    shop.logout().await;

    // Storage errors are logged, not surfaced; memory is already consistent
    assert!(shop.session().is_none());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.product(ProductId::new(1)).unwrap().quantity_in_cart, 0);
}

#[tokio::test]
async fn test_view_gating_follows_session_role() {
    let mut shop = shop_with(&[]).await;

    // Anonymous: public screens only
    assert_eq!(shop.select_view(View::Login), View::Login);
    assert_eq!(shop.select_view(View::Signup), View::Signup);
    assert_eq!(shop.select_view(View::AdminCatalog), View::Signup);

    // Ordinary shopper: still no admin screens
    shop.login(test_user("asha", UserRole::Customer)).await;
    assert_eq!(shop.view(), View::Browsing);
    assert_eq!(shop.select_view(View::AdminEdit(None)), View::Browsing);
    assert_eq!(shop.select_view(View::Cart), View::Cart);

    // Admin: everything, and login landed on the admin catalog
    shop.login(test_user("root", UserRole::Admin)).await;
    assert_eq!(shop.view(), View::AdminCatalog);
    assert_eq!(
        shop.select_view(View::AdminEdit(Some(ProductId::new(3)))),
        View::AdminEdit(Some(ProductId::new(3)))
    );

    // Back to anonymous browsing after logout
    shop.logout().await;
    assert_eq!(shop.view(), View::Browsing);
    assert_eq!(shop.select_view(View::AdminCatalog), View::Browsing);
}
