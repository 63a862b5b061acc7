//! Cart data model: carts plus their open and confirmed item collections.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

/// Stable cart identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(i64);

impl CartId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cart row.
///
/// `is_confirmed` only ever transitions false → true; `total_price` holds
/// the pricing engine's output as of the last mutation and may legitimately
/// be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Store-assigned identifier.
    pub id: CartId,
    /// Whether the cart has been confirmed.
    pub is_confirmed: bool,
    /// Total as of the last recompute.
    pub total_price: f64,
    /// Creation timestamp, stamped by the store.
    pub created_at: DateTime<Utc>,
}

/// An open item row: the live contents of an unconfirmed cart.
///
/// At most one row exists per `(cart_id, product_id)` pair; quantity is
/// always at least 1 (zero means the row is deleted, never stored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenCartItem {
    /// Store-assigned row identifier.
    pub id: i64,
    /// Owning cart.
    pub cart_id: CartId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Units of the product in the cart.
    pub quantity: u32,
}

/// A confirmed item row: the append-only snapshot taken at confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedCartItem {
    /// Store-assigned row identifier.
    pub id: i64,
    /// Owning cart.
    pub cart_id: CartId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Units captured at confirmation time.
    pub quantity: u32,
}

/// A product-id/quantity pair as submitted by callers.
///
/// Interpretation depends on the operation: additive for adds, absolute for
/// edits (where zero requests removal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuantity {
    /// Referenced product.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: u32,
}

/// A cart joined with its current open items, as served by the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWithItems {
    /// The cart row.
    #[serde(flatten)]
    pub cart: Cart,
    /// Its open items.
    pub items: Vec<OpenCartItem>,
}
