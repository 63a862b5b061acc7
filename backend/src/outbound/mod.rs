//! Outbound adapters implementing domain ports for infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of the domain port traits:
//!
//! - **persistence**: the in-memory catalog and cart store
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
