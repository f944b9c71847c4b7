//! Node registry trait
//!
//! Defines the interface every registry backend implements. The single
//! registry instance is owned by the bootstrap path for the process
//! lifetime; commands borrow it and perform at most one mutation per
//! process run.

use async_trait::async_trait;

use seekd_common::Result;

use crate::model::{Node, RegistryMode};

/// Ordered CRUD over the set of registered cluster nodes
#[async_trait]
pub trait NodeRegistry: Send + Sync + std::fmt::Debug {
    /// Which backend this registry runs against
    fn mode(&self) -> RegistryMode;

    /// Current membership snapshot, in registration order
    ///
    /// Fails with `StoreUnavailable` if the backing store cannot be
    /// reached.
    async fn list_nodes(&self) -> Result<Vec<Node>>;

    /// Upsert a node by its identity key
    ///
    /// Idempotent: registering the same node twice yields the same
    /// membership as registering it once. A later write with the same
    /// identity key but different service/rest ports wins. Fails with
    /// `InvalidNode` when the address is empty or any port is zero.
    async fn add_node(&self, node: &Node) -> Result<()>;

    /// Delete any entry matching the node's identity key
    ///
    /// Service and rest ports on the supplied node are ignored for
    /// matching. Succeeds silently when no entry matches.
    async fn remove_node(&self, node: &Node) -> Result<()>;
}
