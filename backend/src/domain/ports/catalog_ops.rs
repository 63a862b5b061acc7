//! Driving ports for catalog use cases.
//!
//! The HTTP adapter consumes these traits; the catalog service implements
//! them. Requests carry already-present fields (the adapter rejects missing
//! ones); content validation happens in the service.

use async_trait::async_trait;
use pagination::Paged;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Product, ProductId};

/// Request to list one page of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsRequest {
    /// One-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Substring filter on the product name; empty matches everything.
    pub query: String,
}

/// Request to create a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    /// Product name, unique across the catalog.
    pub name: String,
    /// Unit price.
    pub price: f64,
}

/// Request to update a product. Absent fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    /// Product to update.
    pub id: ProductId,
    /// Replacement name, if changing.
    pub name: Option<String>,
    /// Replacement price, if changing.
    pub price: Option<f64>,
}

/// Request to delete a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductRequest {
    /// Product to delete.
    pub id: ProductId,
}

/// Driving port for catalog reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// List one page of products matching the filter, name-ascending.
    async fn list_products(&self, request: ListProductsRequest) -> Result<Paged<Product>, Error>;
}

/// Driving port for catalog mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a product with a unique name and positive price.
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error>;

    /// Update a product's name and/or price.
    async fn update_product(&self, request: UpdateProductRequest) -> Result<Product, Error>;

    /// Delete a product. Cart items referencing it are left behind.
    async fn delete_product(&self, request: DeleteProductRequest) -> Result<(), Error>;
}
