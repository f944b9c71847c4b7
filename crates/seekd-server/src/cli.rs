//! Command line surface for the seekd binary
//!
//! Three operator-facing verbs, modeled as a closed enum so dispatch is
//! compile-time exhaustive. Bad or missing arguments are rejected by the
//! parser itself with the usage exit code.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "seekd", about = "Distributed search-index daemon", version)]
pub struct Cli {
    /// Full path to the config (defaults to $APP_HOME/config/seekd.yml)
    #[arg(long = "config", default_value = "config/seekd.yml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate cluster membership and start the daemon
    Start,

    /// Register this server in the cluster (cluster mode only)
    #[command(name = "addNode")]
    AddNode,

    /// Remove a server from the cluster (cluster mode only)
    #[command(name = "removeNode")]
    RemoveNode {
        /// Server to remove from cluster
        #[arg(long = "server", required = true)]
        server: String,

        /// Membership port of server to remove from cluster
        #[arg(long = "membershipPort", required = true)]
        membership_port: u32,
    },
}
