//! Driving ports for cart lifecycle use cases.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Cart, CartId, CartWithItems, Error, ItemQuantity, OpenCartItem, ProductId};

/// Request to add quantities to a cart (additive semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    /// Target cart. Absent, unknown, or already-confirmed ids all fall back
    /// to a fresh cart.
    pub cart_id: Option<CartId>,
    /// Product/quantity pairs, processed in order.
    pub items: Vec<ItemQuantity>,
}

/// Name and price of a product as read before an add was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product name at read time.
    pub name: String,
    /// Unit price at read time.
    pub price: f64,
}

/// Outcome of an add: the cart actually used and its recomputed total.
///
/// `existing_products` lists the name/price of products that already had a
/// row in the cart before this request, read before the update. Products
/// added fresh by the request are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsOutcome {
    /// The cart the items landed in.
    pub cart_id: CartId,
    /// Total after the add.
    pub total_price: f64,
    /// Pre-update snapshots of products that already had rows.
    pub existing_products: Vec<ProductSnapshot>,
}

/// Request to overwrite quantities in a cart (absolute semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemsRequest {
    /// Target cart; must exist and be unconfirmed.
    pub cart_id: CartId,
    /// Product/quantity pairs, processed in order. Zero removes the row.
    pub items: Vec<ItemQuantity>,
}

/// Outcome of an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemsOutcome {
    /// Rows whose quantity was overwritten, in request order.
    pub updated: Vec<OpenCartItem>,
    /// Product ids whose rows were removed, in request order.
    pub removed: Vec<ProductId>,
    /// Total after the edit.
    pub total_price: f64,
}

/// Request to confirm a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCartRequest {
    /// Cart to confirm.
    pub cart_id: CartId,
}

/// Outcome of a confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCartOutcome {
    /// The confirmed cart.
    pub cart_id: CartId,
    /// Final total written at confirmation.
    pub total_price: f64,
}

/// Driving port for cart mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCommand: Send + Sync {
    /// Create a fresh open cart with a zero total.
    async fn create_cart(&self) -> Result<Cart, Error>;

    /// Add quantities to a cart, merging into existing rows.
    async fn add_items(&self, request: AddItemsRequest) -> Result<AddItemsOutcome, Error>;

    /// Overwrite quantities on existing rows; zero removes.
    async fn edit_items(&self, request: EditItemsRequest) -> Result<EditItemsOutcome, Error>;

    /// Confirm a cart, snapshotting its open items.
    async fn confirm_cart(&self, request: ConfirmCartRequest) -> Result<ConfirmCartOutcome, Error>;
}

/// Driving port for cart reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartQuery: Send + Sync {
    /// Every cart currently holding open items, newest first.
    async fn carts_with_items(&self) -> Result<Vec<CartWithItems>, Error>;
}
