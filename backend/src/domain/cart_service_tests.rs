//! Tests for the cart lifecycle service.

use std::sync::Arc;

use chrono::Utc;

use super::*;
use crate::domain::ports::{MockCartStore, MockProductRepository};
use crate::domain::{ErrorCode, ProductId};

fn sample_cart(id: i64, is_confirmed: bool) -> Cart {
    Cart {
        id: CartId::new(id),
        is_confirmed,
        total_price: 0.0,
        created_at: Utc::now(),
    }
}

fn sample_product(id: i64, name: &str, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price,
        created_at: now,
        updated_at: now,
    }
}

fn open_item(id: i64, cart_id: i64, product_id: i64, quantity: u32) -> OpenCartItem {
    OpenCartItem {
        id,
        cart_id: CartId::new(cart_id),
        product_id: ProductId::new(product_id),
        quantity,
    }
}

fn item(product_id: i64, quantity: u32) -> ItemQuantity {
    ItemQuantity {
        product_id: ProductId::new(product_id),
        quantity,
    }
}

fn service(
    store: MockCartStore,
    products: MockProductRepository,
) -> CartService<MockCartStore, MockProductRepository> {
    CartService::new(Arc::new(store), Arc::new(products))
}

#[tokio::test]
async fn create_cart_returns_the_inserted_cart() {
    let mut store = MockCartStore::new();
    store
        .expect_insert_cart()
        .times(1)
        .return_once(|| Ok(sample_cart(1, false)));

    let cart = service(store, MockProductRepository::new())
        .create_cart()
        .await
        .expect("create succeeds");

    assert_eq!(cart.id, CartId::new(1));
    assert!(!cart.is_confirmed);
}

#[tokio::test]
async fn create_cart_maps_a_connection_failure_to_service_unavailable() {
    let mut store = MockCartStore::new();
    store
        .expect_insert_cart()
        .times(1)
        .return_once(|| Err(CartStoreError::connection("store offline")));

    let error = service(store, MockProductRepository::new())
        .create_cart()
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn add_items_rejects_an_empty_payload_before_any_store_call() {
    let error = service(MockCartStore::new(), MockProductRepository::new())
        .add_items(AddItemsRequest {
            cart_id: Some(CartId::new(1)),
            items: Vec::new(),
        })
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "no items in the request payload");
}

#[tokio::test]
async fn add_items_rejects_a_zero_quantity() {
    let error = service(MockCartStore::new(), MockProductRepository::new())
        .add_items(AddItemsRequest {
            cart_id: None,
            items: vec![item(3, 0)],
        })
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(error.message().contains("at least 1"));
}

#[tokio::test]
async fn add_items_creates_a_cart_and_merges_duplicate_request_lines() {
    let mut store = MockCartStore::new();
    store
        .expect_insert_cart()
        .times(1)
        .return_once(|| Ok(sample_cart(1, false)));
    store
        .expect_open_items_for_products()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    store
        .expect_insert_open_item()
        .withf(|cart_id, product_id, quantity| {
            *cart_id == CartId::new(1) && *product_id == ProductId::new(3) && *quantity == 5
        })
        .times(1)
        .returning(|cart_id, product_id, quantity| {
            Ok(OpenCartItem {
                id: 10,
                cart_id,
                product_id,
                quantity,
            })
        });
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(10, 1, 3, 5)]));
    store
        .expect_set_total_price()
        .withf(|cart_id, total| *cart_id == CartId::new(1) && (total - 200.0).abs() < 1e-9)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(2)
        .returning(|_| Ok(vec![sample_product(3, "Tea", 40.0)]));

    let outcome = service(store, products)
        .add_items(AddItemsRequest {
            cart_id: None,
            items: vec![item(3, 2), item(3, 3)],
        })
        .await
        .expect("add succeeds");

    assert_eq!(outcome.cart_id, CartId::new(1));
    assert_eq!(outcome.total_price, 200.0);
    assert!(outcome.existing_products.is_empty());
}

#[tokio::test]
async fn add_items_falls_back_to_a_fresh_cart_when_the_target_is_confirmed() {
    let mut store = MockCartStore::new();
    store
        .expect_find_cart()
        .withf(|id| *id == CartId::new(7))
        .times(1)
        .returning(|id| Ok(Some(sample_cart(id.get(), true))));
    store
        .expect_insert_cart()
        .times(1)
        .return_once(|| Ok(sample_cart(8, false)));
    store
        .expect_open_items_for_products()
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    store
        .expect_insert_open_item()
        .withf(|cart_id, _, _| *cart_id == CartId::new(8))
        .times(1)
        .returning(|cart_id, product_id, quantity| {
            Ok(OpenCartItem {
                id: 20,
                cart_id,
                product_id,
                quantity,
            })
        });
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(20, 8, 2, 1)]));
    store
        .expect_set_total_price()
        .times(1)
        .returning(|_, _| Ok(()));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(2)
        .returning(|_| Ok(vec![sample_product(2, "Coffee", 100.0)]));

    let outcome = service(store, products)
        .add_items(AddItemsRequest {
            cart_id: Some(CartId::new(7)),
            items: vec![item(2, 1)],
        })
        .await
        .expect("add succeeds");

    assert_eq!(outcome.cart_id, CartId::new(8));
    assert_eq!(outcome.total_price, 100.0);
}

#[tokio::test]
async fn add_items_aborts_when_any_product_is_unknown() {
    let mut store = MockCartStore::new();
    store
        .expect_insert_cart()
        .times(1)
        .return_once(|| Ok(sample_cart(1, false)));
    store.expect_open_items_for_products().times(0);
    store.expect_insert_open_item().times(0);

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let error = service(store, products)
        .add_items(AddItemsRequest {
            cart_id: None,
            items: vec![item(42, 1)],
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "some products do not exist");
}

#[tokio::test]
async fn add_items_increments_an_existing_row_and_reports_its_pre_add_snapshot() {
    let mut store = MockCartStore::new();
    store
        .expect_find_cart()
        .times(1)
        .returning(|id| Ok(Some(sample_cart(id.get(), false))));
    store
        .expect_open_items_for_products()
        .times(1)
        .returning(|_, _| Ok(vec![open_item(10, 5, 3, 2)]));
    store
        .expect_set_item_quantity()
        .withf(|item_id, quantity| *item_id == 10 && *quantity == 5)
        .times(1)
        .returning(|item_id, quantity| {
            let mut row = open_item(10, 5, 3, 2);
            row.id = item_id;
            row.quantity = quantity;
            Ok(row)
        });
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(10, 5, 3, 5)]));
    store
        .expect_set_total_price()
        .withf(|_, total| (total - 200.0).abs() < 1e-9)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(2)
        .returning(|_| Ok(vec![sample_product(3, "Tea", 40.0)]));

    let outcome = service(store, products)
        .add_items(AddItemsRequest {
            cart_id: Some(CartId::new(5)),
            items: vec![item(3, 3)],
        })
        .await
        .expect("add succeeds");

    assert_eq!(outcome.total_price, 200.0);
    assert_eq!(outcome.existing_products.len(), 1);
    assert_eq!(outcome.existing_products[0].name, "Tea");
    assert_eq!(outcome.existing_products[0].price, 40.0);
}

#[tokio::test]
async fn add_items_rejects_a_quantity_overflow_without_writing() {
    let mut store = MockCartStore::new();
    store
        .expect_find_cart()
        .times(1)
        .returning(|id| Ok(Some(sample_cart(id.get(), false))));
    store
        .expect_open_items_for_products()
        .times(1)
        .returning(|_, _| Ok(vec![open_item(10, 5, 3, u32::MAX)]));
    store.expect_set_item_quantity().times(0);
    store.expect_insert_open_item().times(0);
    store.expect_set_total_price().times(0);

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(1)
        .returning(|_| Ok(vec![sample_product(3, "Tea", 40.0)]));

    let error = service(store, products)
        .add_items(AddItemsRequest {
            cart_id: Some(CartId::new(5)),
            items: vec![item(3, 1)],
        })
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn edit_items_rejects_duplicate_product_ids() {
    let error = service(MockCartStore::new(), MockProductRepository::new())
        .edit_items(EditItemsRequest {
            cart_id: CartId::new(5),
            items: vec![item(3, 1), item(3, 2)],
        })
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "duplicate product id in the request payload");
}

#[tokio::test]
async fn edit_items_rejects_an_unknown_cart() {
    let mut store = MockCartStore::new();
    store.expect_find_cart().times(1).returning(|_| Ok(None));

    let mut products = MockProductRepository::new();
    products.expect_find_by_ids().times(0);

    let error = service(store, products)
        .edit_items(EditItemsRequest {
            cart_id: CartId::new(9),
            items: vec![item(3, 1)],
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "cart 9 not found or already confirmed");
}

#[tokio::test]
async fn edit_items_rejects_a_confirmed_cart() {
    let mut store = MockCartStore::new();
    store
        .expect_find_cart()
        .times(1)
        .returning(|id| Ok(Some(sample_cart(id.get(), true))));

    let error = service(store, MockProductRepository::new())
        .edit_items(EditItemsRequest {
            cart_id: CartId::new(5),
            items: vec![item(3, 1)],
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn edit_items_overwrites_deletes_and_skips_in_request_order() {
    let mut store = MockCartStore::new();
    store
        .expect_find_cart()
        .times(1)
        .returning(|id| Ok(Some(sample_cart(id.get(), false))));
    store
        .expect_open_items_for_products()
        .times(1)
        .returning(|_, _| Ok(vec![open_item(10, 5, 1, 1), open_item(11, 5, 2, 2)]));
    store
        .expect_set_item_quantity()
        .withf(|item_id, quantity| *item_id == 10 && *quantity == 4)
        .times(1)
        .returning(|_, quantity| {
            let mut row = open_item(10, 5, 1, 1);
            row.quantity = quantity;
            Ok(row)
        });
    store
        .expect_delete_open_item()
        .withf(|item_id| *item_id == 11)
        .times(1)
        .returning(|_| Ok(()));
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(10, 5, 1, 4)]));
    store
        .expect_set_total_price()
        .withf(|_, total| (total - 200.0).abs() < 1e-9)
        .times(1)
        .returning(|_, _| Ok(()));

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .withf(|ids| ids.len() == 3)
        .times(1)
        .returning(|_| {
            Ok(vec![
                sample_product(1, "Tea", 50.0),
                sample_product(2, "Coffee", 30.0),
                sample_product(3, "Cocoa", 20.0),
            ])
        });
    products
        .expect_find_by_ids()
        .withf(|ids| ids == [ProductId::new(1)])
        .times(1)
        .returning(|_| Ok(vec![sample_product(1, "Tea", 50.0)]));

    let outcome = service(store, products)
        .edit_items(EditItemsRequest {
            cart_id: CartId::new(5),
            // Product 3 exists but has no row in the cart, so it is skipped.
            items: vec![item(1, 4), item(2, 0), item(3, 2)],
        })
        .await
        .expect("edit succeeds");

    assert_eq!(outcome.updated.len(), 1);
    assert_eq!(outcome.updated[0].id, 10);
    assert_eq!(outcome.updated[0].quantity, 4);
    assert_eq!(outcome.removed, vec![ProductId::new(2)]);
    assert_eq!(outcome.total_price, 200.0);
}

#[tokio::test]
async fn confirm_cart_rejects_a_cart_with_no_open_items() {
    let mut store = MockCartStore::new();
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    store.expect_confirm_cart().times(0);

    let error = service(store, MockProductRepository::new())
        .confirm_cart(ConfirmCartRequest {
            cart_id: CartId::new(5),
        })
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "no items to confirm in this cart");
}

#[tokio::test]
async fn confirm_cart_quotes_the_open_items_and_runs_the_atomic_move() {
    let mut store = MockCartStore::new();
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(10, 5, 1, 2), open_item(11, 5, 2, 1)]));
    store
        .expect_confirm_cart()
        .withf(|cart_id, total| *cart_id == CartId::new(5) && (total - 180.0).abs() < 1e-9)
        .times(1)
        .returning(|cart_id, total| {
            let mut cart = sample_cart(cart_id.get(), true);
            cart.total_price = total;
            Ok(cart)
        });

    let mut products = MockProductRepository::new();
    products.expect_find_by_ids().times(1).returning(|_| {
        Ok(vec![
            sample_product(1, "Tea", 50.0),
            sample_product(2, "Coffee", 100.0),
        ])
    });

    let outcome = service(store, products)
        .confirm_cart(ConfirmCartRequest {
            cart_id: CartId::new(5),
        })
        .await
        .expect("confirm succeeds");

    // Two distinct products: subtotal 200, tier rate 0.1, discount 20.
    assert_eq!(outcome.cart_id, CartId::new(5));
    assert_eq!(outcome.total_price, 180.0);
}

#[tokio::test]
async fn confirm_cart_fails_when_an_item_lost_its_product() {
    let mut store = MockCartStore::new();
    store
        .expect_open_items()
        .times(1)
        .returning(|_| Ok(vec![open_item(10, 5, 9, 1)]));
    store.expect_confirm_cart().times(0);

    let mut products = MockProductRepository::new();
    products
        .expect_find_by_ids()
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let error = service(store, products)
        .confirm_cart(ConfirmCartRequest {
            cart_id: CartId::new(5),
        })
        .await
        .expect_err("internal");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "could not calculate total price");
}

#[tokio::test]
async fn carts_with_items_passes_the_store_listing_through() {
    let mut store = MockCartStore::new();
    store.expect_carts_with_open_items().times(1).returning(|| {
        Ok(vec![CartWithItems {
            cart: sample_cart(5, false),
            items: vec![open_item(10, 5, 1, 2)],
        }])
    });

    let carts = service(store, MockProductRepository::new())
        .carts_with_items()
        .await
        .expect("query succeeds");

    assert_eq!(carts.len(), 1);
    assert_eq!(carts[0].cart.id, CartId::new(5));
    assert_eq!(carts[0].items.len(), 1);
}
