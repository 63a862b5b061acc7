//! Domain ports and supporting types for the hexagonal boundary.

mod cart_ops;
mod cart_store;
mod catalog_ops;
mod product_repository;

#[cfg(test)]
pub use cart_ops::{MockCartCommand, MockCartQuery};
pub use cart_ops::{
    AddItemsOutcome, AddItemsRequest, CartCommand, CartQuery, ConfirmCartOutcome,
    ConfirmCartRequest, EditItemsOutcome, EditItemsRequest, ProductSnapshot,
};
#[cfg(test)]
pub use cart_store::MockCartStore;
pub use cart_store::{CartStore, CartStoreError};
#[cfg(test)]
pub use catalog_ops::{MockCatalogCommand, MockCatalogQuery};
pub use catalog_ops::{
    CatalogCommand, CatalogQuery, CreateProductRequest, DeleteProductRequest, ListProductsRequest,
    UpdateProductRequest,
};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductPage, ProductRepository, ProductRepositoryError};
