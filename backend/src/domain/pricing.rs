//! Tiered cart pricing.
//!
//! Pricing is a pure calculation over the cart's open items; callers persist
//! the resulting total explicitly. The discount is keyed on the number of
//! distinct products in the cart (D): a fixed rate table covers D = 1..=7,
//! and the discount amount is `rate × D × 100` flat currency units, so the
//! total can legitimately drop below zero for cheap, varied carts.
//!
//! Any D outside the table (0, or 8 and above) falls through to rate 1.0.
//! That fallthrough is inherited behaviour of unknown intent, kept until a
//! product owner rules on it; D = 0 is unreachable in practice because the
//! empty cart short-circuits to a zero quote.

use serde::Serialize;

use crate::domain::ProductId;

/// An open item joined with the unit price it carries today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedItem {
    /// Referenced product.
    pub product_id: ProductId,
    /// Units in the cart.
    pub quantity: u32,
    /// Current unit price of the product.
    pub unit_price: f64,
}

/// The result of pricing a cart's open items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Σ quantity × unit price over all items.
    pub subtotal: f64,
    /// Flat discount amount subtracted from the subtotal.
    pub discount: f64,
    /// `subtotal - discount`, never floored.
    pub total: f64,
    /// Number of distinct products that keyed the discount tier.
    pub distinct_products: usize,
}

impl PriceQuote {
    /// The quote for an empty cart.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            subtotal: 0.0,
            discount: 0.0,
            total: 0.0,
            distinct_products: 0,
        }
    }
}

/// Discount rate for a distinct-product count.
///
/// Counts outside 1..=7 fall through to 1.0 (see the module docs).
#[must_use]
pub const fn discount_rate(distinct_products: usize) -> f64 {
    match distinct_products {
        1 => 0.0,
        2 => 0.1,
        3 => 0.2,
        4 => 0.3,
        5 => 0.4,
        6 => 0.5,
        7 => 0.6,
        _ => 1.0,
    }
}

/// Price a cart's open items.
///
/// Items are expected to already be one row per product (the open-item
/// uniqueness invariant); repeated product ids would still count once
/// towards the tier but their quantities each contribute to the subtotal.
///
/// # Examples
/// ```
/// use backend::domain::pricing::{PricedItem, quote};
/// use backend::domain::ProductId;
///
/// let items = [
///     PricedItem { product_id: ProductId::new(1), quantity: 2, unit_price: 50.0 },
///     PricedItem { product_id: ProductId::new(2), quantity: 1, unit_price: 100.0 },
/// ];
/// let quote = quote(&items);
/// assert_eq!(quote.total, 180.0);
/// ```
#[must_use]
pub fn quote(items: &[PricedItem]) -> PriceQuote {
    if items.is_empty() {
        return PriceQuote::zero();
    }

    let mut product_ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let distinct_products = product_ids.len();

    let subtotal: f64 = items
        .iter()
        .map(|item| f64::from(item.quantity) * item.unit_price)
        .sum();
    let discount = discount_rate(distinct_products) * (distinct_products as f64 * 100.0);

    PriceQuote {
        subtotal,
        discount,
        total: subtotal - discount,
        distinct_products,
    }
}
