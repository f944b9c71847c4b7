//! Cluster bootstrap sequencer
//!
//! Decides which registry backend to construct from configuration and
//! validates preconditions before the daemon is allowed to proceed.
//! Each operator verb maps to exactly one entry point here, and no verb
//! performs more than one registry mutation per process run.

use tracing::info;

use seekd_common::{Result, SeekdError};
use seekd_registry::{EmbeddedNodeRegistry, ExternalDbNodeRegistry, Node, NodeRegistry};

use crate::model::Configuration;

/// Validate the data directory and construct the registry backend
///
/// Selected exactly once per process from the cluster flag: cluster
/// mode resolves the shared-store connection first and builds the SQL
/// registry; standalone mode opens the embedded registry under the
/// data directory.
pub async fn build_registry(config: &Configuration) -> Result<Box<dyn NodeRegistry>> {
    let data_path = config.data_path();
    if !data_path.exists() {
        return Err(SeekdError::Config(format!(
            "data dir <{}> does not exist",
            data_path.display()
        )));
    }
    info!("Using data directory <{}>", data_path.display());

    if config.is_cluster() {
        let db = config.database_connection().await?;
        Ok(Box::new(ExternalDbNodeRegistry::new(db, config.cluster_name())))
    } else {
        Ok(Box::new(EmbeddedNodeRegistry::open(&data_path)?))
    }
}

/// The node this server registers itself under, built from its own
/// configuration (a node always registers itself, never a remote peer)
pub fn local_node(config: &Configuration) -> Node {
    Node::new(
        config.server_address(),
        config.membership_port(),
        config.service_port(),
        config.rest_port(),
    )
}

/// `start`: validate membership before the daemon may serve
///
/// In cluster mode an empty membership is a fatal misconfiguration with
/// its own exit condition; the daemon must not start with zero known
/// peers. The actual serving path is out of scope and only begins once
/// this validation succeeds.
pub async fn start(config: &Configuration, registry: &dyn NodeRegistry) -> Result<()> {
    if config.is_cluster() {
        let nodes = registry.list_nodes().await?;
        if nodes.is_empty() {
            return Err(SeekdError::EmptyClusterMembership);
        }

        info!("Registered nodes:");
        for node in &nodes {
            info!("  {}", node);
        }
    } else {
        info!("Starting in standalone mode");
    }

    Ok(())
}

/// `addNode`: register this server in the cluster
pub async fn add_node(config: &Configuration, registry: &dyn NodeRegistry) -> Result<()> {
    if !config.is_cluster() {
        return Err(SeekdError::IllegalMode("add node".to_string()));
    }

    let node = local_node(config);
    info!("Adding node: {}", node);
    registry.add_node(&node).await?;

    display_nodes(registry, "Registered nodes:").await
}

/// `removeNode`: remove a server from the cluster by identity key
///
/// Matching ignores service and rest ports, so the operator only names
/// the server address and membership port.
pub async fn remove_node(
    config: &Configuration,
    registry: &dyn NodeRegistry,
    server: &str,
    membership_port: u32,
) -> Result<()> {
    if !config.is_cluster() {
        return Err(SeekdError::IllegalMode("remove node".to_string()));
    }

    let node = Node::identity(server.to_string(), membership_port);
    info!("Removing node: {}", node);
    registry.remove_node(&node).await?;

    display_nodes(registry, "Registered nodes:").await
}

/// Re-list and display the full membership for operator confirmation
async fn display_nodes(registry: &dyn NodeRegistry, header: &str) -> Result<()> {
    info!("{}", header);
    for node in registry.list_nodes().await? {
        info!("  {}", node);
    }
    Ok(())
}
