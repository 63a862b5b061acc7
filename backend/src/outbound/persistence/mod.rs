//! In-memory persistence adapters.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by process-local tables behind a single `RwLock`.
//!
//! # Architecture
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: The store only translates between its row tables and
//!   domain types. No business logic resides here.
//! - **Atomic calls**: Every port method takes the table lock once, so each
//!   call observes and produces a consistent state. The confirmation move is
//!   a single write-locked transition.
//! - **Strongly typed errors**: All failures are mapped to the domain port
//!   error types; lock poisoning surfaces as a connection error.

mod memory;

pub use memory::InMemoryStore;
