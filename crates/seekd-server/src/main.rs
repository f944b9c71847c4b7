//! Main entry point for the seekd search daemon.
//!
//! Each invocation is short-lived: parse the verb, load configuration,
//! build the registry connection, perform at most one registry read and
//! one write, print, and exit with the mapped code.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use seekd_common::error::{EXIT_FATAL, EXIT_SUCCESS};
use seekd_server::cli::{Cli, Command};
use seekd_server::model::Configuration;
use seekd_server::model::config::resolve_config_path;
use seekd_server::{bootstrap, startup};

// Exit codes are returned rather than passed to process::exit so the
// logging guard is dropped and buffered file output is flushed on
// every exit path.
#[tokio::main]
async fn main() -> ExitCode {
    // Bad or missing arguments exit here with the usage code
    let cli = Cli::parse();

    let configuration = match Configuration::new(&cli.config) {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let _logging_guard = match startup::init_logging(&configuration.logging_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialise logging: {}", e);
            return ExitCode::from(EXIT_FATAL as u8);
        }
    };

    info!(
        "Using config <{}>",
        resolve_config_path(&cli.config).display()
    );

    match run(cli.command, &configuration).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Dispatch the verb to its bootstrap entry point
async fn run(command: Command, configuration: &Configuration) -> seekd_common::Result<()> {
    let registry = bootstrap::build_registry(configuration).await?;

    match command {
        Command::Start => bootstrap::start(configuration, registry.as_ref()).await,
        Command::AddNode => bootstrap::add_node(configuration, registry.as_ref()).await,
        Command::RemoveNode {
            server,
            membership_port,
        } => {
            bootstrap::remove_node(configuration, registry.as_ref(), &server, membership_port).await
        }
    }
}
