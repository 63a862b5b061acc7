//! Port for product catalog persistence.
//!
//! Adapters provide CRUD over the product table plus the paged, filtered
//! listing the catalog endpoints need. Name uniqueness is enforced by the
//! adapter and surfaces as [`ProductRepositoryError::DuplicateName`], so
//! callers never need a check-then-write sequence.

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::{Product, ProductChanges, ProductDraft, ProductId};

/// Errors raised by product repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductRepositoryError {
    /// Repository connection could not be established.
    #[error("product repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("product repository query failed: {message}")]
    Query { message: String },
    /// The name is already taken by another product.
    #[error("product name '{name}' is already taken")]
    DuplicateName { name: String },
    /// No product exists with this identifier.
    #[error("product {id} not found")]
    NotFound { id: ProductId },
}

impl ProductRepositoryError {
    /// Construct a [`ProductRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`ProductRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`ProductRepositoryError::DuplicateName`].
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Construct a [`ProductRepositoryError::NotFound`].
    pub fn not_found(id: ProductId) -> Self {
        Self::NotFound { id }
    }
}

/// One page of products together with the unpaged match count.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    /// Products on the requested page, name-ascending.
    pub products: Vec<Product>,
    /// Total products matching the filter across all pages.
    pub total_items: u64,
}

/// Port for product catalog storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one page of products whose names contain `name_filter`,
    /// ordered by name ascending. An empty filter matches everything.
    async fn list_page(
        &self,
        request: PageRequest,
        name_filter: &str,
    ) -> Result<ProductPage, ProductRepositoryError>;

    /// Fetch a product by id, `None` when absent.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Fetch every product whose id appears in `ids`.
    ///
    /// Missing ids are simply absent from the result; callers compare
    /// lengths when they need all-or-nothing existence.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Insert a new product, stamping timestamps.
    ///
    /// Fails with [`ProductRepositoryError::DuplicateName`] when the name is
    /// taken.
    async fn insert(&self, draft: &ProductDraft) -> Result<Product, ProductRepositoryError>;

    /// Apply a partial update, bumping `updated_at`.
    ///
    /// Fails with [`ProductRepositoryError::NotFound`] when the product is
    /// absent and [`ProductRepositoryError::DuplicateName`] when a name
    /// change collides with another product.
    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, ProductRepositoryError>;

    /// Delete a product.
    ///
    /// Open or confirmed cart items referencing the product are left in
    /// place; the next recompute over an affected cart fails instead. Fails
    /// with [`ProductRepositoryError::NotFound`] when the product is absent.
    async fn delete(&self, id: ProductId) -> Result<(), ProductRepositoryError>;
}
