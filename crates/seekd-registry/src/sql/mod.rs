//! SQL-based registry backend (MySQL/PostgreSQL via SeaORM)
//!
//! This backend holds the authoritative node list for a cluster in one
//! `node_info` table shared by every member and every admin tool. Rows
//! are scoped by cluster name and upserts go through a store-side
//! conflict clause, so concurrent writes against the same identity key
//! serialize to a last-writer-wins outcome without any client-side
//! coordination.

use async_trait::async_trait;
use sea_orm::{sea_query::OnConflict, *};

use seekd_common::{Result, SeekdError};

use crate::entity::node_info;
use crate::model::{Node, RegistryMode};
use crate::traits::NodeRegistry;

/// Node registry backed by the shared cluster store
#[derive(Debug)]
pub struct ExternalDbNodeRegistry {
    db: DatabaseConnection,
    cluster_name: String,
}

impl ExternalDbNodeRegistry {
    /// Create a registry over an established store connection
    ///
    /// The connection is exclusively owned by this registry for the
    /// process lifetime and released when the process exits.
    pub fn new(db: DatabaseConnection, cluster_name: String) -> Self {
        Self { db, cluster_name }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Map a store error onto the registry error taxonomy
///
/// Connectivity loss surfaces as `StoreUnavailable`; everything else is
/// an internal store failure.
fn store_err(e: DbErr) -> SeekdError {
    match e {
        DbErr::Conn(e) => SeekdError::StoreUnavailable(e.to_string()),
        DbErr::ConnectionAcquire(e) => SeekdError::StoreUnavailable(e.to_string()),
        e => SeekdError::Internal(format!("store error: {}", e)),
    }
}

fn model_to_node(model: node_info::Model) -> Node {
    Node {
        server_address: model.server_address,
        membership_port: model.membership_port as u32,
        service_port: model.service_port as u32,
        rest_port: model.rest_port as u32,
    }
}

#[async_trait]
impl NodeRegistry for ExternalDbNodeRegistry {
    fn mode(&self) -> RegistryMode {
        RegistryMode::ExternalDb
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let models = node_info::Entity::find()
            .filter(node_info::Column::ClusterName.eq(self.cluster_name.as_str()))
            .order_by_asc(node_info::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(model_to_node).collect())
    }

    async fn add_node(&self, node: &Node) -> Result<()> {
        node.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let entity = node_info::ActiveModel {
            cluster_name: Set(self.cluster_name.clone()),
            server_address: Set(node.server_address.clone()),
            membership_port: Set(node.membership_port as i32),
            service_port: Set(node.service_port as i32),
            rest_port: Set(node.rest_port as i32),
            gmt_create: Set(now),
            gmt_modified: Set(now),
            ..Default::default()
        };

        // Store-side upsert keyed on (cluster_name, server_address,
        // membership_port); a re-registration keeps the original row id
        // so registration order survives updates.
        node_info::Entity::insert(entity)
            .on_conflict(
                OnConflict::columns([
                    node_info::Column::ClusterName,
                    node_info::Column::ServerAddress,
                    node_info::Column::MembershipPort,
                ])
                .update_columns([
                    node_info::Column::ServicePort,
                    node_info::Column::RestPort,
                    node_info::Column::GmtModified,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(())
    }

    async fn remove_node(&self, node: &Node) -> Result<()> {
        // Matching is on the identity key only; a zero rows-affected
        // outcome is a successful no-op.
        node_info::Entity::delete_many()
            .filter(node_info::Column::ClusterName.eq(self.cluster_name.as_str()))
            .filter(node_info::Column::ServerAddress.eq(node.server_address.as_str()))
            .filter(node_info::Column::MembershipPort.eq(node.membership_port as i32))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE_INFO_DDL: &str = "CREATE TABLE node_info (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        cluster_name TEXT NOT NULL,
        server_address TEXT NOT NULL,
        membership_port INTEGER NOT NULL,
        service_port INTEGER NOT NULL,
        rest_port INTEGER NOT NULL,
        gmt_create TEXT NOT NULL,
        gmt_modified TEXT NOT NULL,
        UNIQUE (cluster_name, server_address, membership_port)
    )";

    async fn registry() -> ExternalDbNodeRegistry {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("in-memory store");
        db.execute_unprepared(NODE_INFO_DDL).await.expect("schema");
        ExternalDbNodeRegistry::new(db, "test-cluster".to_string())
    }

    fn node(address: &str, membership_port: u32) -> Node {
        Node::new(address.to_string(), membership_port, 32191, 32192)
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let registry = registry().await;
        let n = node("host1", 5701);

        registry.add_node(&n).await.unwrap();
        registry.add_node(&n).await.unwrap();

        assert_eq!(registry.list_nodes().await.unwrap(), vec![n]);
    }

    #[tokio::test]
    async fn test_later_write_wins_on_same_identity() {
        let registry = registry().await;
        registry.add_node(&node("host1", 5701)).await.unwrap();

        let updated = Node::new("host1".to_string(), 5701, 40000, 40001);
        registry.add_node(&updated).await.unwrap();

        let nodes = registry.list_nodes().await.unwrap();
        assert_eq!(nodes, vec![updated]);
    }

    #[tokio::test]
    async fn test_remove_matches_identity_key_only() {
        let registry = registry().await;
        registry.add_node(&node("host1", 5701)).await.unwrap();

        // Service/rest ports on the removal node differ and are ignored
        registry
            .remove_node(&Node::identity("host1".to_string(), 5701))
            .await
            .unwrap();

        assert!(registry.list_nodes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_node_is_silent() {
        let registry = registry().await;
        registry.add_node(&node("host1", 5701)).await.unwrap();

        registry
            .remove_node(&Node::identity("host9".to_string(), 5701))
            .await
            .unwrap();

        assert_eq!(registry.list_nodes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_registration_order() {
        let registry = registry().await;
        registry.add_node(&node("host1", 5701)).await.unwrap();
        registry.add_node(&node("host2", 5701)).await.unwrap();
        registry.add_node(&node("host3", 5701)).await.unwrap();

        // Re-registering host1 must not move it to the back
        registry.add_node(&node("host1", 5701)).await.unwrap();

        let addresses: Vec<String> = registry
            .list_nodes()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.server_address)
            .collect();
        assert_eq!(addresses, vec!["host1", "host2", "host3"]);
    }

    #[tokio::test]
    async fn test_clusters_do_not_collide() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared(NODE_INFO_DDL).await.unwrap();

        let a = ExternalDbNodeRegistry::new(db.clone(), "cluster-a".to_string());
        let b = ExternalDbNodeRegistry::new(db, "cluster-b".to_string());

        a.add_node(&node("host1", 5701)).await.unwrap();
        b.add_node(&node("host2", 5701)).await.unwrap();

        assert_eq!(a.list_nodes().await.unwrap().len(), 1);
        assert_eq!(b.list_nodes().await.unwrap().len(), 1);
        assert_eq!(a.list_nodes().await.unwrap()[0].server_address, "host1");
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_node() {
        let registry = registry().await;
        let err = registry
            .add_node(&Node::identity("host1".to_string(), 5701))
            .await
            .unwrap_err();
        assert!(matches!(err, SeekdError::InvalidNode(_)));
        assert!(registry.list_nodes().await.unwrap().is_empty());
    }
}
