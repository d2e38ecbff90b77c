//! Ask-user server entry point
//!
//! Loads configuration, builds the broker, and serves the REST facade that
//! the dashboard polls.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use askuser_api::AskUserServer;
use askuser_broker::AskUserBroker;
use askuser_common::SystemConfig;

#[derive(Parser)]
#[command(name = "askuser-server")]
#[command(version = "0.1.0")]
#[command(about = "Human-in-the-loop ask-user broker and dashboard API")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration and exit
    ValidateConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    askuser_common::init_tracing_with_level(log_level)?;

    let config = if std::path::Path::new(&cli.config).exists() {
        SystemConfig::load(&cli.config)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        SystemConfig::default()
    };

    match cli.command {
        Some(Commands::ValidateConfig) => {
            println!("✓ Configuration is valid");
            println!("  Bind address: {}:{}", config.server.host, config.server.port);
            println!("  Tool wait timeout: {:?}", config.ask_user.wait_timeout());
            Ok(())
        }
        Some(Commands::Serve { host, port }) => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

async fn serve(config: SystemConfig) -> Result<()> {
    let broker = Arc::new(AskUserBroker::new());
    info!(
        host = %config.server.host,
        port = config.server.port,
        "starting ask-user server"
    );
    AskUserServer::new(config, Some(broker)).run().await
}
