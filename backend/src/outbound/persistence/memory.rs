//! In-memory implementation of the catalog and cart store ports.
//!
//! Rows live in plain `Vec` tables behind one `RwLock`, with identifiers
//! assigned from per-table counters and timestamps taken from an injected
//! clock. Holding a single lock for the whole call is what makes each port
//! operation atomic, including the confirmation move.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::warn;

use crate::domain::ports::{
    CartStore, CartStoreError, ProductPage, ProductRepository, ProductRepositoryError,
};
use crate::domain::{
    Cart, CartId, CartWithItems, ConfirmedCartItem, OpenCartItem, Product, ProductChanges,
    ProductDraft, ProductId,
};

#[derive(Default)]
struct Tables {
    products: Vec<Product>,
    carts: Vec<Cart>,
    open_items: Vec<OpenCartItem>,
    confirmed_items: Vec<ConfirmedCartItem>,
    next_product_id: i64,
    next_cart_id: i64,
    next_open_item_id: i64,
    next_confirmed_item_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// Process-local store implementing both driven ports.
///
/// Clones share the same tables, so one instance can back the catalog and
/// the cart store at once.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamping timestamps from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, &'static str> {
        self.tables.read().map_err(|_| {
            warn!("in-memory store lock poisoned");
            "store lock poisoned"
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, &'static str> {
        self.tables.write().map_err(|_| {
            warn!("in-memory store lock poisoned");
            "store lock poisoned"
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn list_page(
        &self,
        request: PageRequest,
        name_filter: &str,
    ) -> Result<ProductPage, ProductRepositoryError> {
        let tables = self.read().map_err(ProductRepositoryError::connection)?;
        let mut matching: Vec<Product> = tables
            .products
            .iter()
            .filter(|product| product.name.contains(name_filter))
            .cloned()
            .collect();
        matching.sort_by(|left, right| left.name.cmp(&right.name));
        let total_items = matching.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let products = matching
            .into_iter()
            .skip(offset)
            .take(request.limit() as usize)
            .collect();
        Ok(ProductPage {
            products,
            total_items,
        })
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let tables = self.read().map_err(ProductRepositoryError::connection)?;
        Ok(tables
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let tables = self.read().map_err(ProductRepositoryError::connection)?;
        Ok(tables
            .products
            .iter()
            .filter(|product| ids.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError> {
        let mut tables = self.write().map_err(ProductRepositoryError::connection)?;
        if tables
            .products
            .iter()
            .any(|product| product.name == draft.name())
        {
            return Err(ProductRepositoryError::duplicate_name(draft.name()));
        }
        let now = self.clock.utc();
        let id = next_id(&mut tables.next_product_id);
        let product = Product {
            id: ProductId::new(id),
            name: draft.name().to_owned(),
            price: draft.price(),
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, ProductRepositoryError> {
        let mut tables = self.write().map_err(ProductRepositoryError::connection)?;
        let index = tables
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| ProductRepositoryError::not_found(id))?;
        if let Some(name) = changes.name() {
            if tables
                .products
                .iter()
                .any(|product| product.id != id && product.name == name)
            {
                return Err(ProductRepositoryError::duplicate_name(name));
            }
        }
        let now = self.clock.utc();
        let product = &mut tables.products[index];
        if let Some(name) = changes.name() {
            product.name = name.to_owned();
        }
        if let Some(price) = changes.price() {
            product.price = price;
        }
        product.updated_at = now;
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError> {
        let mut tables = self.write().map_err(ProductRepositoryError::connection)?;
        let index = tables
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| ProductRepositoryError::not_found(id))?;
        // Open items referencing the product are left in place; pricing
        // reports them as a computation failure when next touched.
        tables.products.remove(index);
        Ok(())
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn insert_cart(&self) -> Result<Cart, CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        let id = next_id(&mut tables.next_cart_id);
        let cart = Cart {
            id: CartId::new(id),
            is_confirmed: false,
            total_price: 0.0,
            created_at: self.clock.utc(),
        };
        tables.carts.push(cart.clone());
        Ok(cart)
    }

    async fn find_cart(&self, id: CartId) -> Result<Option<Cart>, CartStoreError> {
        let tables = self.read().map_err(CartStoreError::connection)?;
        Ok(tables.carts.iter().find(|cart| cart.id == id).cloned())
    }

    async fn set_total_price(&self, id: CartId, total_price: f64) -> Result<(), CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        let cart = tables
            .carts
            .iter_mut()
            .find(|cart| cart.id == id)
            .ok_or_else(|| CartStoreError::cart_not_found(id))?;
        cart.total_price = total_price;
        Ok(())
    }

    async fn open_items(&self, cart_id: CartId) -> Result<Vec<OpenCartItem>, CartStoreError> {
        let tables = self.read().map_err(CartStoreError::connection)?;
        Ok(tables
            .open_items
            .iter()
            .filter(|item| item.cart_id == cart_id)
            .cloned()
            .collect())
    }

    async fn open_items_for_products(
        &self,
        cart_id: CartId,
        product_ids: &[ProductId],
    ) -> Result<Vec<OpenCartItem>, CartStoreError> {
        let tables = self.read().map_err(CartStoreError::connection)?;
        Ok(tables
            .open_items
            .iter()
            .filter(|item| item.cart_id == cart_id && product_ids.contains(&item.product_id))
            .cloned()
            .collect())
    }

    async fn insert_open_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<OpenCartItem, CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        if !tables.carts.iter().any(|cart| cart.id == cart_id) {
            return Err(CartStoreError::cart_not_found(cart_id));
        }
        let id = next_id(&mut tables.next_open_item_id);
        let item = OpenCartItem {
            id,
            cart_id,
            product_id,
            quantity,
        };
        tables.open_items.push(item.clone());
        Ok(item)
    }

    async fn set_item_quantity(
        &self,
        item_id: i64,
        quantity: u32,
    ) -> Result<OpenCartItem, CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        let item = tables
            .open_items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CartStoreError::item_not_found(item_id))?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    async fn delete_open_item(&self, item_id: i64) -> Result<(), CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        let index = tables
            .open_items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| CartStoreError::item_not_found(item_id))?;
        tables.open_items.remove(index);
        Ok(())
    }

    async fn confirm_cart(
        &self,
        cart_id: CartId,
        total_price: f64,
    ) -> Result<Cart, CartStoreError> {
        let mut tables = self.write().map_err(CartStoreError::connection)?;
        let cart_index = tables
            .carts
            .iter()
            .position(|cart| cart.id == cart_id)
            .ok_or_else(|| CartStoreError::cart_not_found(cart_id))?;
        let moved: Vec<(ProductId, u32)> = tables
            .open_items
            .iter()
            .filter(|item| item.cart_id == cart_id)
            .map(|item| (item.product_id, item.quantity))
            .collect();
        for (product_id, quantity) in moved {
            let id = next_id(&mut tables.next_confirmed_item_id);
            tables.confirmed_items.push(ConfirmedCartItem {
                id,
                cart_id,
                product_id,
                quantity,
            });
        }
        tables.open_items.retain(|item| item.cart_id != cart_id);
        let cart = &mut tables.carts[cart_index];
        cart.is_confirmed = true;
        cart.total_price = total_price;
        Ok(cart.clone())
    }

    async fn carts_with_open_items(&self) -> Result<Vec<CartWithItems>, CartStoreError> {
        let tables = self.read().map_err(CartStoreError::connection)?;
        let mut carts: Vec<CartWithItems> = tables
            .carts
            .iter()
            .filter(|cart| tables.open_items.iter().any(|item| item.cart_id == cart.id))
            .map(|cart| CartWithItems {
                cart: cart.clone(),
                items: tables
                    .open_items
                    .iter()
                    .filter(|item| item.cart_id == cart.id)
                    .cloned()
                    .collect(),
            })
            .collect();
        carts.sort_by(|left, right| {
            right
                .cart
                .created_at
                .cmp(&left.cart.created_at)
                .then(right.cart.id.cmp(&left.cart.id))
        });
        Ok(carts)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
