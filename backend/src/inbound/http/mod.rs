//! HTTP inbound adapter exposing REST endpoints.

pub mod cart;
pub mod error;
pub mod health;
pub mod products;
pub mod state;
pub mod validation;

pub use error::ApiResult;
