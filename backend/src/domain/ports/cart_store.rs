//! Port for cart and cart-item persistence.
//!
//! Each operation is atomic in the adapter. The confirmation transition is
//! deliberately a single compound operation ([`CartStore::confirm_cart`])
//! rather than a snapshot/flag/delete sequence, so a mid-sequence failure
//! cannot leave a cart half confirmed.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Cart, CartId, CartWithItems, OpenCartItem, ProductId};

/// Errors raised by cart store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartStoreError {
    /// Store connection could not be established.
    #[error("cart store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("cart store query failed: {message}")]
    Query { message: String },
    /// No cart exists with this identifier.
    #[error("cart {id} not found")]
    CartNotFound { id: CartId },
    /// No open item row exists with this identifier.
    #[error("open cart item {id} not found")]
    ItemNotFound { id: i64 },
}

impl CartStoreError {
    /// Construct a [`CartStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`CartStoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`CartStoreError::CartNotFound`].
    pub fn cart_not_found(id: CartId) -> Self {
        Self::CartNotFound { id }
    }

    /// Construct a [`CartStoreError::ItemNotFound`].
    pub fn item_not_found(id: i64) -> Self {
        Self::ItemNotFound { id }
    }
}

/// Port for cart lifecycle storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Insert a fresh open cart with a zero total.
    async fn insert_cart(&self) -> Result<Cart, CartStoreError>;

    /// Fetch a cart by id, `None` when absent.
    async fn find_cart(&self, id: CartId) -> Result<Option<Cart>, CartStoreError>;

    /// Persist a recomputed total on a cart.
    async fn set_total_price(&self, id: CartId, total_price: f64) -> Result<(), CartStoreError>;

    /// Fetch every open item of a cart.
    async fn open_items(&self, cart_id: CartId) -> Result<Vec<OpenCartItem>, CartStoreError>;

    /// Fetch the cart's open items whose product id appears in `product_ids`.
    async fn open_items_for_products(
        &self,
        cart_id: CartId,
        product_ids: &[ProductId],
    ) -> Result<Vec<OpenCartItem>, CartStoreError>;

    /// Insert a new open item row.
    ///
    /// Callers uphold the one-row-per-`(cart, product)` invariant by merging
    /// into an existing row instead of inserting a second one.
    async fn insert_open_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<OpenCartItem, CartStoreError>;

    /// Overwrite the quantity of an existing open item row.
    async fn set_item_quantity(
        &self,
        item_id: i64,
        quantity: u32,
    ) -> Result<OpenCartItem, CartStoreError>;

    /// Delete an open item row.
    async fn delete_open_item(&self, item_id: i64) -> Result<(), CartStoreError>;

    /// Atomically confirm a cart: snapshot every open item into a confirmed
    /// item, set `is_confirmed` and the final total, and delete the open
    /// items, all as one operation.
    async fn confirm_cart(&self, cart_id: CartId, total_price: f64) -> Result<Cart, CartStoreError>;

    /// Fetch every cart currently holding at least one open item, newest
    /// first (`created_at` descending, id descending on ties), each joined
    /// with its open items.
    async fn carts_with_open_items(&self) -> Result<Vec<CartWithItems>, CartStoreError>;
}
