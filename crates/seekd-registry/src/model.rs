//! Membership model for the node registry

use serde::{Deserialize, Serialize};

use seekd_common::SeekdError;

/// One cluster participant's network identity
///
/// Identity key = (`server_address`, `membership_port`); two nodes with
/// the same key are the same participant regardless of the other ports.
/// Nodes are immutable value objects — an update is a remove followed
/// by an add, never an in-place mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub server_address: String,
    pub membership_port: u32,
    pub service_port: u32,
    pub rest_port: u32,
}

impl Node {
    pub fn new(server_address: String, membership_port: u32, service_port: u32, rest_port: u32) -> Self {
        Self {
            server_address,
            membership_port,
            service_port,
            rest_port,
        }
    }

    /// Node carrying only the identity key, used for removal matching
    pub fn identity(server_address: String, membership_port: u32) -> Self {
        Self {
            server_address,
            membership_port,
            service_port: 0,
            rest_port: 0,
        }
    }

    /// True when `other` names the same cluster participant
    pub fn same_identity(&self, other: &Node) -> bool {
        self.server_address == other.server_address && self.membership_port == other.membership_port
    }

    /// Validate the node before registration
    ///
    /// The address must be non-empty and every port positive.
    pub fn validate(&self) -> Result<(), SeekdError> {
        if self.server_address.is_empty() {
            return Err(SeekdError::InvalidNode("server address is empty".to_string()));
        }
        if self.membership_port == 0 || self.service_port == 0 || self.rest_port == 0 {
            return Err(SeekdError::InvalidNode(format!(
                "all ports must be positive: {}",
                self
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{serverAddress: {}, membershipPort: {}, servicePort: {}, restPort: {}}}",
            self.server_address, self.membership_port, self.service_port, self.rest_port
        )
    }
}

/// Which registry backend a process is running against
///
/// Selected exactly once during bootstrap from the cluster flag and
/// never re-selected mid-process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryMode {
    /// Shared SQL store reachable by every cluster member (cluster mode)
    ExternalDb,
    /// Embedded RocksDB under the data directory (standalone mode)
    Embedded,
}

impl std::fmt::Display for RegistryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryMode::ExternalDb => write!(f, "external_db"),
            RegistryMode::Embedded => write!(f, "embedded"),
        }
    }
}
