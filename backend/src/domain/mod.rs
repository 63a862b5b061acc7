//! Domain model and services for the shopping-cart backend.
//!
//! Purpose: Define strongly typed domain entities, the driving and driven
//! ports, and the services that orchestrate them. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — API error payload and its stable identifiers.
//! - Product, ProductDraft, ProductChanges — catalog entities and inputs.
//! - Cart, OpenCartItem, ConfirmedCartItem — cart aggregate rows.
//! - CatalogService / CartService — driving-port implementations.
//! - ports — repository and use-case traits at the hexagonal boundary.

pub mod cart;
pub mod cart_service;
pub mod catalog_service;
pub mod error;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod trace_id;

pub use self::cart::{Cart, CartId, CartWithItems, ConfirmedCartItem, ItemQuantity, OpenCartItem};
pub use self::cart_service::CartService;
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::product::{Product, ProductChanges, ProductDraft, ProductId, ProductValidationError};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such cart"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
