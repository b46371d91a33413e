//! groupmux server.
//!
//! ```text
//!   config.toml ──▶ loader + validation ──▶ mount (builtin catalog)
//!                                               │
//!                                               ▼
//!                                        Router ──build──▶ RouteTable
//!                                                              │
//!   client ◀──────────── axum (trace, timeout) ◀── dispatch ◀──┘
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::net::TcpListener;

use groupmux::config::{self, AppConfig};
use groupmux::http::builtin::builtin_catalog;
use groupmux::http::{HttpRouteTable, HttpServer};
use groupmux::observability::init_logging;

#[derive(Parser)]
#[command(name = "groupmux")]
#[command(about = "Serve a route tree declared in TOML", long_about = None)]
struct Cli {
    /// Path to the TOML config; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built route table
    Routes,
    /// Start the HTTP server
    Serve,
}

fn build_table(config: &AppConfig) -> Result<HttpRouteTable, config::MountError> {
    let router = config::mount(&config.routes, &builtin_catalog())?;
    Ok(router.build())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Routes => {
            let table = build_table(&config)?;
            for entry in table.entries() {
                println!("{:<8} {}", entry.method(), entry.path());
            }
        }
        Commands::Serve => {
            init_logging(&config.logging)?;
            tracing::info!(
                bind_address = %config.server.bind_address,
                request_timeout_secs = config.server.request_timeout_secs,
                "Configuration loaded"
            );

            let table = build_table(&config)?;
            let listener = TcpListener::bind(&config.server.bind_address).await?;
            HttpServer::new(table, config.server).run(listener).await?;

            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
