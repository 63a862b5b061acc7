//! Cart lifecycle HTTP handlers.
//!
//! ```text
//! POST /cart
//! POST /cart/items
//! PUT  /cart/items
//! POST /cart/{cart_id}/confirm
//! GET  /cart/history
//! ```
//!
//! The item payloads for adds and edits share one body shape; adds treat
//! quantities as increments while edits treat them as replacements.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::{
    AddItemsOutcome, AddItemsRequest, ConfirmCartRequest, EditItemsOutcome, EditItemsRequest,
    ProductSnapshot,
};
use crate::domain::{CartId, CartWithItems, Error, ItemQuantity, OpenCartItem, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_entry_error, missing_field_error, not_an_array_error,
};

const CART_ID_FIELD: FieldName = FieldName::new("cartId");
const ITEMS_FIELD: FieldName = FieldName::new("items");

/// Request payload shared by the add and edit endpoints.
///
/// `items` stays untyped until [`parse_items`] runs so a non-array value maps
/// to the documented validation error instead of a bare deserialisation
/// failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemsBody {
    pub cart_id: Option<i64>,
    pub items: Option<Value>,
}

/// Response payload for cart creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartResponse {
    pub message: &'static str,
    pub cart_id: i64,
}

/// Response payload for an add.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsResponse {
    pub message: &'static str,
    pub total_price: f64,
    pub cart_id: i64,
    /// Name/price snapshots of products that already had a row in the cart,
    /// read before the update was applied.
    pub items: Vec<ProductSnapshot>,
}

impl From<AddItemsOutcome> for AddItemsResponse {
    fn from(value: AddItemsOutcome) -> Self {
        Self {
            message: "products added to cart",
            total_price: value.total_price,
            cart_id: value.cart_id.get(),
            items: value.existing_products,
        }
    }
}

/// Response payload for an edit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditItemsResponse {
    pub update_items: Vec<OpenCartItem>,
    pub delete_items: Vec<ProductId>,
    pub total_price: f64,
}

impl From<EditItemsOutcome> for EditItemsResponse {
    fn from(value: EditItemsOutcome) -> Self {
        Self {
            update_items: value.updated,
            delete_items: value.removed,
            total_price: value.total_price,
        }
    }
}

/// Response payload for a confirmation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCartResponse {
    pub message: &'static str,
    pub cart_id: i64,
    pub total_price: f64,
}

/// Response payload for the history view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartHistoryResponse {
    pub cart_items_details: Vec<CartWithItems>,
}

fn parse_items(items: Option<Value>) -> Result<Vec<ItemQuantity>, Error> {
    let Some(items) = items else {
        return Err(missing_field_error(ITEMS_FIELD));
    };
    let Some(entries) = items.as_array() else {
        return Err(not_an_array_error(ITEMS_FIELD));
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_item(index, entry))
        .collect()
}

fn parse_item(index: usize, entry: &Value) -> Result<ItemQuantity, Error> {
    let Some(entry) = entry.as_object() else {
        return Err(invalid_entry_error(
            ITEMS_FIELD,
            index,
            "each item must be an object",
        ));
    };
    let product_id = entry
        .get("productId")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            invalid_entry_error(ITEMS_FIELD, index, "each item needs an integer productId")
        })?;
    let quantity = entry
        .get("quantity")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            invalid_entry_error(ITEMS_FIELD, index, "each item needs an integer quantity")
        })?;
    let quantity = u32::try_from(quantity)
        .map_err(|_| invalid_entry_error(ITEMS_FIELD, index, "quantity out of range"))?;
    Ok(ItemQuantity {
        product_id: ProductId::new(product_id),
        quantity,
    })
}

/// Create an empty cart.
#[post("/cart")]
pub async fn create_cart(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let cart = state.carts.create_cart().await?;
    Ok(HttpResponse::Created().json(CreateCartResponse {
        message: "cart created",
        cart_id: cart.id.get(),
    }))
}

/// Add products to a cart, creating a fresh cart when none is usable.
#[post("/cart/items")]
pub async fn add_items(
    state: web::Data<HttpState>,
    payload: web::Json<CartItemsBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let items = parse_items(body.items)?;
    let outcome = state
        .carts
        .add_items(AddItemsRequest {
            cart_id: body.cart_id.map(CartId::new),
            items,
        })
        .await?;
    Ok(HttpResponse::Created().json(AddItemsResponse::from(outcome)))
}

/// Overwrite cart item quantities; a zero quantity removes the item.
#[put("/cart/items")]
pub async fn edit_items(
    state: web::Data<HttpState>,
    payload: web::Json<CartItemsBody>,
) -> ApiResult<web::Json<EditItemsResponse>> {
    let body = payload.into_inner();
    let cart_id = body
        .cart_id
        .ok_or_else(|| missing_field_error(CART_ID_FIELD))?;
    let items = parse_items(body.items)?;
    let outcome = state
        .carts
        .edit_items(EditItemsRequest {
            cart_id: CartId::new(cart_id),
            items,
        })
        .await?;
    Ok(web::Json(EditItemsResponse::from(outcome)))
}

/// Confirm a cart, snapshotting its open items and closing it.
#[post("/cart/{cart_id}/confirm")]
pub async fn confirm_cart(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ConfirmCartResponse>> {
    let outcome = state
        .carts
        .confirm_cart(ConfirmCartRequest {
            cart_id: CartId::new(path.into_inner()),
        })
        .await?;
    Ok(web::Json(ConfirmCartResponse {
        message: "cart confirmed",
        cart_id: outcome.cart_id.get(),
        total_price: outcome.total_price,
    }))
}

/// List carts that still hold open items, newest first.
#[get("/cart/history")]
pub async fn cart_history(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CartHistoryResponse>> {
    let carts = state.carts_query.carts_with_items().await?;
    Ok(web::Json(CartHistoryResponse {
        cart_items_details: carts,
    }))
}

#[cfg(test)]
#[path = "cart_tests.rs"]
mod tests;
