//! Product catalog domain service.
//!
//! Implements the catalog driving ports: paged listing plus create, update,
//! and delete. Content validation happens here; name uniqueness is the
//! store's constraint and arrives as a port error.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paged};

use crate::domain::ports::{
    CatalogCommand, CatalogQuery, CreateProductRequest, DeleteProductRequest, ListProductsRequest,
    ProductRepository, ProductRepositoryError, UpdateProductRequest,
};
use crate::domain::{Error, Product, ProductChanges, ProductDraft};

fn map_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
        ProductRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("product name '{name}' is already taken"))
        }
        ProductRepositoryError::NotFound { id } => {
            Error::not_found(format!("product {id} not found"))
        }
    }
}

fn map_page_request_error(error: pagination::PageRequestError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Catalog service implementing the catalog driving ports.
#[derive(Clone)]
pub struct CatalogService<R> {
    product_repo: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new service with the product repository.
    pub fn new(product_repo: Arc<R>) -> Self {
        Self { product_repo }
    }
}

#[async_trait]
impl<R> CatalogQuery for CatalogService<R>
where
    R: ProductRepository,
{
    async fn list_products(&self, request: ListProductsRequest) -> Result<Paged<Product>, Error> {
        let page_request =
            PageRequest::new(request.page, request.limit).map_err(map_page_request_error)?;

        let page = self
            .product_repo
            .list_page(page_request, &request.query)
            .await
            .map_err(map_repository_error)?;

        Ok(Paged::new(page.products, page.total_items, page_request))
    }
}

#[async_trait]
impl<R> CatalogCommand for CatalogService<R>
where
    R: ProductRepository,
{
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error> {
        let draft = ProductDraft::new(request.name, request.price)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.product_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_product(&self, request: UpdateProductRequest) -> Result<Product, Error> {
        let changes = ProductChanges::try_from_parts(request.name, request.price)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if changes.is_empty() {
            return Err(Error::invalid_request(
                "update must change the name or the price",
            ));
        }

        self.product_repo
            .update(request.id, &changes)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_product(&self, request: DeleteProductRequest) -> Result<(), Error> {
        self.product_repo
            .delete(request.id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
