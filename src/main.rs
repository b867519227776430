//! Chat gateway (v1)
//!
//! A synchronous HTTP gateway in front of a Rasa conversational backend,
//! built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                   CHAT GATEWAY                   │
//!    POST /webhook      │  ┌──────────┐   ┌───────────┐   ┌─────────────┐  │
//!    ───────────────────┼─▶│   http   │──▶│  gateway  │──▶│ downstream  │──┼──▶ Rasa
//!                       │  │  server  │   │  handler  │   │   client    │  │   webhook
//!                       │  └──────────┘   └─────┬─────┘   └──────┬──────┘  │
//!    JSON envelope      │                       │                │         │
//!    ◀──────────────────┼───────────────── envelope ◀── normalizer◀┘        │
//!                       │                                                  │
//!                       │  config · observability · lifecycle              │
//!                       └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use chat_gateway::config::resolve_config;
use chat_gateway::http::GatewayServer;
use chat_gateway::lifecycle::Shutdown;
use chat_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "chat-gateway", version)]
#[command(about = "HTTP gateway in front of a Rasa REST webhook", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(args.config.as_deref())?;
    logging::init_logging(&config.observability)?;
    logging::log_startup(&config);

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    shutdown.listen_for_signals();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
