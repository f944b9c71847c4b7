//! Embedded registry backend using RocksDB
//!
//! Standalone (single-node) membership storage under the data
//! directory. Exactly one process owns the data directory at a time,
//! so no cross-process guarantees are provided.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{DB, IteratorMode, Options};
use serde::{Deserialize, Serialize};
use tracing::debug;

use seekd_common::{Result, SeekdError};

use crate::model::{Node, RegistryMode};
use crate::traits::NodeRegistry;

const CF_NODES: &str = "nodes";

/// Stored node record, keeping the original registration instant so
/// listings stay in registration order across re-registrations.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct NodeRecord {
    #[serde(flatten)]
    node: Node,
    registered_at: i64,
}

/// Node registry backed by an embedded RocksDB under the data directory
#[derive(Debug)]
pub struct EmbeddedNodeRegistry {
    db: Arc<DB>,
}

impl EmbeddedNodeRegistry {
    /// Open (or create) the registry database at `<data_path>/registry`
    pub fn open(data_path: &Path) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let path = data_path.join("registry");
        let db = DB::open_cf(&opts, &path, [CF_NODES])
            .map_err(|e| SeekdError::StoreUnavailable(format!("rocksdb open error: {}", e)))?;
        debug!("Opened embedded node registry at <{}>", path.display());

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_NODES)
            .ok_or_else(|| SeekdError::Internal(format!("column family '{}' not found", CF_NODES)))
    }

    fn record_key(node: &Node) -> String {
        format!("{}:{}", node.server_address, node.membership_port)
    }

    fn get_record(&self, key: &str) -> Result<Option<NodeRecord>> {
        let cf = self.cf()?;
        let bytes = self
            .db
            .get_cf(cf, key.as_bytes())
            .map_err(|e| SeekdError::StoreUnavailable(format!("rocksdb get error: {}", e)))?;

        match bytes {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)
                    .map_err(|e| SeekdError::Internal(format!("corrupt node record: {}", e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl NodeRegistry for EmbeddedNodeRegistry {
    fn mode(&self) -> RegistryMode {
        RegistryMode::Embedded
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let cf = self.cf()?;
        let mut records: Vec<NodeRecord> = Vec::new();

        for entry in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_, value) = entry
                .map_err(|e| SeekdError::StoreUnavailable(format!("rocksdb scan error: {}", e)))?;
            let record: NodeRecord = serde_json::from_slice(&value)
                .map_err(|e| SeekdError::Internal(format!("corrupt node record: {}", e)))?;
            records.push(record);
        }

        records.sort_by_key(|r| r.registered_at);
        Ok(records.into_iter().map(|r| r.node).collect())
    }

    async fn add_node(&self, node: &Node) -> Result<()> {
        node.validate()?;

        let key = Self::record_key(node);

        // Keep the original registration instant on re-registration so
        // the display order is stable.
        let registered_at = match self.get_record(&key)? {
            Some(existing) => existing.registered_at,
            None => chrono::Utc::now().timestamp_millis(),
        };

        let record = NodeRecord {
            node: node.clone(),
            registered_at,
        };
        let bytes = serde_json::to_vec(&record)
            .map_err(|e| SeekdError::Internal(format!("encode node record: {}", e)))?;

        let cf = self.cf()?;
        self.db
            .put_cf(cf, key.as_bytes(), bytes)
            .map_err(|e| SeekdError::StoreUnavailable(format!("rocksdb put error: {}", e)))?;

        Ok(())
    }

    async fn remove_node(&self, node: &Node) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .delete_cf(cf, Self::record_key(node).as_bytes())
            .map_err(|e| SeekdError::StoreUnavailable(format!("rocksdb delete error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(dir: &tempfile::TempDir) -> EmbeddedNodeRegistry {
        EmbeddedNodeRegistry::open(dir.path()).expect("open registry")
    }

    fn node(address: &str, membership_port: u32) -> Node {
        Node::new(address.to_string(), membership_port, 32191, 32192)
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);
        let n = node("host1", 5701);

        registry.add_node(&n).await.unwrap();
        registry.add_node(&n).await.unwrap();

        assert_eq!(registry.list_nodes().await.unwrap(), vec![n]);
    }

    #[tokio::test]
    async fn test_later_write_wins_on_same_identity() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        registry.add_node(&node("host1", 5701)).await.unwrap();
        let updated = Node::new("host1".to_string(), 5701, 40000, 40001);
        registry.add_node(&updated).await.unwrap();

        assert_eq!(registry.list_nodes().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn test_remove_missing_node_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        registry
            .remove_node(&Node::identity("host9".to_string(), 5701))
            .await
            .unwrap();

        assert!(registry.list_nodes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_address_different_membership_ports_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        registry.add_node(&node("host1", 5701)).await.unwrap();
        registry.add_node(&node("host1", 5702)).await.unwrap();

        assert_eq!(registry.list_nodes().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_membership_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let registry = registry(&dir);
            registry.add_node(&node("host1", 5701)).await.unwrap();
        }

        let registry = registry(&dir);
        assert_eq!(registry.list_nodes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_node() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir);

        let err = registry
            .add_node(&node("", 5701))
            .await
            .unwrap_err();
        assert!(matches!(err, SeekdError::InvalidNode(_)));
    }
}
