//! Product catalog HTTP handlers.
//!
//! ```text
//! GET    /products
//! POST   /products
//! PUT    /products/{id}
//! DELETE /products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Paged;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    CreateProductRequest, DeleteProductRequest, ListProductsRequest, UpdateProductRequest,
};
use crate::domain::{Product, ProductId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const NAME_FIELD: FieldName = FieldName::new("name");
const PRICE_FIELD: FieldName = FieldName::new("price");

/// Query parameters accepted by the listing endpoint. Absent values fall
/// back to the configured listing defaults.
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub query: Option<String>,
}

/// Request payload for creating a product.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductBody {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Request payload for updating a product. Absent fields keep their stored
/// values.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Response payload describing one product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            price: value.price,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for the listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
}

impl From<Paged<Product>> for ProductListResponse {
    fn from(value: Paged<Product>) -> Self {
        Self {
            products: value.items.into_iter().map(ProductResponse::from).collect(),
            total_items: value.total_items,
            total_pages: value.total_pages,
            current_page: value.current_page,
        }
    }
}

/// Response payload for create and update mutations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMutationResponse {
    pub message: &'static str,
    pub product: ProductResponse,
}

/// Response payload for a deletion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductResponse {
    pub message: &'static str,
}

/// List one page of the catalog, filtered by a name substring.
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ListProductsQuery>,
) -> ApiResult<web::Json<ProductListResponse>> {
    let query = query.into_inner();
    let defaults = state.list_defaults;
    let page = state
        .catalog_query
        .list_products(ListProductsRequest {
            page: query.page.unwrap_or(defaults.page),
            limit: query.limit.unwrap_or(defaults.limit),
            query: query.query.unwrap_or_default(),
        })
        .await?;
    Ok(web::Json(ProductListResponse::from(page)))
}

/// Create a product with a unique name and positive price.
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let name = body.name.ok_or_else(|| missing_field_error(NAME_FIELD))?;
    let price = body.price.ok_or_else(|| missing_field_error(PRICE_FIELD))?;
    let product = state
        .catalog
        .create_product(CreateProductRequest { name, price })
        .await?;
    Ok(HttpResponse::Created().json(ProductMutationResponse {
        message: "product created",
        product: ProductResponse::from(product),
    }))
}

/// Update a product's name and/or price.
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateProductBody>,
) -> ApiResult<web::Json<ProductMutationResponse>> {
    let body = payload.into_inner();
    let product = state
        .catalog
        .update_product(UpdateProductRequest {
            id: ProductId::new(path.into_inner()),
            name: body.name,
            price: body.price,
        })
        .await?;
    Ok(web::Json(ProductMutationResponse {
        message: "product updated",
        product: ProductResponse::from(product),
    }))
}

/// Delete a product from the catalog.
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<DeleteProductResponse>> {
    state
        .catalog
        .delete_product(DeleteProductRequest {
            id: ProductId::new(path.into_inner()),
        })
        .await?;
    Ok(web::Json(DeleteProductResponse {
        message: "product deleted",
    }))
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
