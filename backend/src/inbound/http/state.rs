//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CartCommand, CartQuery, CatalogCommand, CatalogQuery};

/// Fallback paging values applied when a listing request omits `page` or
/// `limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefaults {
    /// One-based page number to assume.
    pub page: u32,
    /// Page size to assume.
    pub limit: u32,
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self { page: 1, limit: 7 }
    }
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub carts: Arc<dyn CartCommand>,
    pub carts_query: Arc<dyn CartQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn CatalogCommand>,
    pub catalog_query: Arc<dyn CatalogQuery>,
    pub carts: Arc<dyn CartCommand>,
    pub carts_query: Arc<dyn CartQuery>,
    pub list_defaults: ListDefaults,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports, ListDefaults::default())
    }
}

impl HttpState {
    /// Construct state from a ports bundle and listing defaults.
    pub fn new(ports: HttpStatePorts, list_defaults: ListDefaults) -> Self {
        let HttpStatePorts {
            catalog,
            catalog_query,
            carts,
            carts_query,
        } = ports;
        Self {
            catalog,
            catalog_query,
            carts,
            carts_query,
            list_defaults,
        }
    }
}
