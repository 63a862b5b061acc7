//! Cart lifecycle domain service.
//!
//! Orchestrates the open → confirmed cart flow: additive item adds with a
//! lenient fallback to a fresh cart, absolute item edits, and the atomic
//! confirmation move. Every multi-step mutation runs under an async mutex
//! scoped to the cart id, so the validate, mutate, recompute, persist
//! sequence is serialised per cart while distinct carts proceed in parallel.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::ports::{
    AddItemsOutcome, AddItemsRequest, CartCommand, CartQuery, CartStore, CartStoreError,
    ConfirmCartOutcome, ConfirmCartRequest, EditItemsOutcome, EditItemsRequest, ProductRepository,
    ProductRepositoryError, ProductSnapshot,
};
use crate::domain::pricing::{self, PricedItem};
use crate::domain::{
    Cart, CartId, CartWithItems, Error, ItemQuantity, OpenCartItem, Product, ProductId,
};

fn map_store_error(error: CartStoreError) -> Error {
    match error {
        CartStoreError::Connection { message } => {
            Error::service_unavailable(format!("cart store unavailable: {message}"))
        }
        CartStoreError::Query { message } => {
            Error::internal(format!("cart store error: {message}"))
        }
        CartStoreError::CartNotFound { id } => Error::not_found(format!("cart {id} not found")),
        CartStoreError::ItemNotFound { id } => {
            Error::internal(format!("open cart item {id} vanished mid-update"))
        }
    }
}

fn map_product_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
        ProductRepositoryError::DuplicateName { name } => {
            Error::internal(format!("unexpected duplicate product name '{name}'"))
        }
        ProductRepositoryError::NotFound { id } => {
            Error::not_found(format!("product {id} not found"))
        }
    }
}

fn quantity_overflow(product_id: ProductId) -> Error {
    Error::invalid_request(format!("quantity for product {product_id} is too large"))
}

/// Collapse a request's items to one entry per product, summing quantities.
///
/// Rejects an empty payload and any zero quantity up front, so no write
/// happens for an invalid request. First-occurrence order is preserved.
fn merge_quantities(items: &[ItemQuantity]) -> Result<Vec<ItemQuantity>, Error> {
    if items.is_empty() {
        return Err(Error::invalid_request("no items in the request payload"));
    }
    let mut merged: Vec<ItemQuantity> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            return Err(Error::invalid_request(format!(
                "quantity must be at least 1 for product {}",
                item.product_id
            )));
        }
        match merged
            .iter_mut()
            .find(|entry| entry.product_id == item.product_id)
        {
            Some(entry) => {
                entry.quantity = entry
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(|| quantity_overflow(item.product_id))?;
            }
            None => merged.push(*item),
        }
    }
    Ok(merged)
}

/// A store write staged during an add, applied only once every merge in the
/// request is known to fit in a `u32`.
enum PlannedWrite {
    Overwrite { item_id: i64, quantity: u32 },
    Insert { product_id: ProductId, quantity: u32 },
}

/// Registry of per-cart async mutexes.
///
/// Grows with the number of distinct carts this process has mutated and is
/// never pruned; carts are small and never deleted, so the growth is bounded
/// by cart creation.
type CartLocks = Arc<Mutex<HashMap<CartId, Arc<AsyncMutex<()>>>>>;

/// Cart lifecycle service implementing the cart driving ports.
#[derive(Clone)]
pub struct CartService<S, P> {
    store: Arc<S>,
    products: Arc<P>,
    locks: CartLocks,
}

impl<S, P> CartService<S, P>
where
    S: CartStore,
    P: ProductRepository,
{
    /// Build a service over a cart store and a product repository.
    pub fn new(store: Arc<S>, products: Arc<P>) -> Self {
        Self {
            store,
            products,
            locks: Arc::default(),
        }
    }

    fn cart_lock(&self, id: CartId) -> Result<Arc<AsyncMutex<()>>, Error> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| Error::internal("cart lock registry poisoned"))?;
        Ok(Arc::clone(locks.entry(id).or_default()))
    }

    /// Resolve the cart an add should land in, holding its lock.
    ///
    /// An absent, unknown, or already-confirmed cart id falls back to a
    /// fresh cart. The lookup happens under the cart's lock, so a cart
    /// confirmed by a concurrent request is seen as confirmed here and the
    /// fallback still applies.
    async fn resolve_open_cart(
        &self,
        requested: Option<CartId>,
    ) -> Result<(Cart, OwnedMutexGuard<()>), Error> {
        if let Some(id) = requested {
            let guard = self.cart_lock(id)?.lock_owned().await;
            let cart = self.store.find_cart(id).await.map_err(map_store_error)?;
            if let Some(cart) = cart.filter(|cart| !cart.is_confirmed) {
                return Ok((cart, guard));
            }
        }
        let cart = self.store.insert_cart().await.map_err(map_store_error)?;
        let guard = self.cart_lock(cart.id)?.lock_owned().await;
        Ok((cart, guard))
    }

    /// Fetch every product in `product_ids`, all-or-nothing.
    ///
    /// Callers pass distinct ids; a shorter result means at least one id is
    /// unknown and the whole operation aborts before any write.
    async fn fetch_all_products(&self, product_ids: &[ProductId]) -> Result<Vec<Product>, Error> {
        let products = self
            .products
            .find_by_ids(product_ids)
            .await
            .map_err(map_product_error)?;
        if products.len() != product_ids.len() {
            return Err(Error::not_found("some products do not exist"));
        }
        Ok(products)
    }

    /// Join open items with current unit prices for the pricing engine.
    ///
    /// An item whose product no longer exists (deleted after it was added)
    /// has no price to quote; that surfaces as an internal computation
    /// failure rather than a pricing guess.
    async fn price_items(&self, items: &[OpenCartItem]) -> Result<Vec<PricedItem>, Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let mut product_ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();
        let products = self
            .products
            .find_by_ids(&product_ids)
            .await
            .map_err(map_product_error)?;
        let unit_prices: HashMap<ProductId, f64> = products
            .into_iter()
            .map(|product| (product.id, product.price))
            .collect();
        items
            .iter()
            .map(|item| {
                unit_prices
                    .get(&item.product_id)
                    .copied()
                    .map(|unit_price| PricedItem {
                        product_id: item.product_id,
                        quantity: item.quantity,
                        unit_price,
                    })
                    .ok_or_else(|| Error::internal("could not calculate total price"))
            })
            .collect()
    }

    /// Recompute a cart's total from its open items and persist it.
    async fn reprice(&self, cart_id: CartId) -> Result<f64, Error> {
        let items = self
            .store
            .open_items(cart_id)
            .await
            .map_err(map_store_error)?;
        let priced = self.price_items(&items).await?;
        let quote = pricing::quote(&priced);
        self.store
            .set_total_price(cart_id, quote.total)
            .await
            .map_err(map_store_error)?;
        Ok(quote.total)
    }
}

#[async_trait]
impl<S, P> CartCommand for CartService<S, P>
where
    S: CartStore,
    P: ProductRepository,
{
    async fn create_cart(&self) -> Result<Cart, Error> {
        self.store.insert_cart().await.map_err(map_store_error)
    }

    async fn add_items(&self, request: AddItemsRequest) -> Result<AddItemsOutcome, Error> {
        let merged = merge_quantities(&request.items)?;
        let (cart, _guard) = self.resolve_open_cart(request.cart_id).await?;

        let product_ids: Vec<ProductId> = merged.iter().map(|item| item.product_id).collect();
        let products = self.fetch_all_products(&product_ids).await?;
        let existing = self
            .store
            .open_items_for_products(cart.id, &product_ids)
            .await
            .map_err(map_store_error)?;

        // Snapshot before mutating; the response reports the products that
        // already had rows, at their pre-add state.
        let existing_products: Vec<ProductSnapshot> = existing
            .iter()
            .filter_map(|row| products.iter().find(|product| product.id == row.product_id))
            .map(|product| ProductSnapshot {
                name: product.name.clone(),
                price: product.price,
            })
            .collect();

        let mut writes = Vec::with_capacity(merged.len());
        for item in &merged {
            match existing.iter().find(|row| row.product_id == item.product_id) {
                Some(row) => {
                    let quantity = row
                        .quantity
                        .checked_add(item.quantity)
                        .ok_or_else(|| quantity_overflow(item.product_id))?;
                    writes.push(PlannedWrite::Overwrite {
                        item_id: row.id,
                        quantity,
                    });
                }
                None => writes.push(PlannedWrite::Insert {
                    product_id: item.product_id,
                    quantity: item.quantity,
                }),
            }
        }
        for write in writes {
            match write {
                PlannedWrite::Overwrite { item_id, quantity } => {
                    self.store
                        .set_item_quantity(item_id, quantity)
                        .await
                        .map_err(map_store_error)?;
                }
                PlannedWrite::Insert {
                    product_id,
                    quantity,
                } => {
                    self.store
                        .insert_open_item(cart.id, product_id, quantity)
                        .await
                        .map_err(map_store_error)?;
                }
            }
        }

        let total_price = self.reprice(cart.id).await?;
        Ok(AddItemsOutcome {
            cart_id: cart.id,
            total_price,
            existing_products,
        })
    }

    async fn edit_items(&self, request: EditItemsRequest) -> Result<EditItemsOutcome, Error> {
        if request.items.is_empty() {
            return Err(Error::invalid_request("no items in the request payload"));
        }
        let mut seen = HashSet::with_capacity(request.items.len());
        for item in &request.items {
            if !seen.insert(item.product_id) {
                return Err(Error::invalid_request(
                    "duplicate product id in the request payload",
                ));
            }
        }

        let _guard = self.cart_lock(request.cart_id)?.lock_owned().await;
        let cart = self
            .store
            .find_cart(request.cart_id)
            .await
            .map_err(map_store_error)?;
        if cart.is_none_or(|cart| cart.is_confirmed) {
            return Err(Error::not_found(format!(
                "cart {} not found or already confirmed",
                request.cart_id
            )));
        }

        let product_ids: Vec<ProductId> =
            request.items.iter().map(|item| item.product_id).collect();
        self.fetch_all_products(&product_ids).await?;
        let existing = self
            .store
            .open_items_for_products(request.cart_id, &product_ids)
            .await
            .map_err(map_store_error)?;

        let mut updated = Vec::new();
        let mut removed = Vec::new();
        for item in &request.items {
            // Quantities are absolute here; products without an existing row
            // are skipped, never created.
            let Some(row) = existing.iter().find(|row| row.product_id == item.product_id) else {
                continue;
            };
            if item.quantity > 0 {
                let row = self
                    .store
                    .set_item_quantity(row.id, item.quantity)
                    .await
                    .map_err(map_store_error)?;
                updated.push(row);
            } else {
                self.store
                    .delete_open_item(row.id)
                    .await
                    .map_err(map_store_error)?;
                removed.push(item.product_id);
            }
        }

        let total_price = self.reprice(request.cart_id).await?;
        Ok(EditItemsOutcome {
            updated,
            removed,
            total_price,
        })
    }

    async fn confirm_cart(&self, request: ConfirmCartRequest) -> Result<ConfirmCartOutcome, Error> {
        let _guard = self.cart_lock(request.cart_id)?.lock_owned().await;
        let items = self
            .store
            .open_items(request.cart_id)
            .await
            .map_err(map_store_error)?;
        // An unknown cart and an empty one are indistinguishable here, and
        // both read as "nothing to confirm".
        if items.is_empty() {
            return Err(Error::not_found("no items to confirm in this cart"));
        }

        let priced = self.price_items(&items).await?;
        let quote = pricing::quote(&priced);
        let cart = self
            .store
            .confirm_cart(request.cart_id, quote.total)
            .await
            .map_err(map_store_error)?;
        Ok(ConfirmCartOutcome {
            cart_id: cart.id,
            total_price: cart.total_price,
        })
    }
}

#[async_trait]
impl<S, P> CartQuery for CartService<S, P>
where
    S: CartStore,
    P: ProductRepository,
{
    async fn carts_with_items(&self) -> Result<Vec<CartWithItems>, Error> {
        self.store
            .carts_with_open_items()
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
