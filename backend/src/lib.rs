//! Shopping cart backend: product catalog, cart lifecycle, and tiered
//! pricing behind an HTTP API.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
