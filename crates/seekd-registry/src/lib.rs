//! Seekd Registry - cluster node registry backends
//!
//! This crate provides:
//! - The `Node` membership model and its identity-key semantics
//! - The `NodeRegistry` trait abstraction over registry backends
//! - SQL backend for the shared cluster store (MySQL/PostgreSQL via SeaORM)
//! - Embedded RocksDB backend for standalone deployments

pub mod embedded;
pub mod entity;
pub mod model;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export the registry trait
pub use traits::NodeRegistry;

// Re-export backends
pub use embedded::EmbeddedNodeRegistry;
pub use sql::ExternalDbNodeRegistry;

// Re-export model types
pub use model::{Node, RegistryMode};
