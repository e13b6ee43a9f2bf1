//! Muster gateway binary.
//!
//! Usage:
//!   muster-api --config config.toml
//!   muster-api --port 8080
//!   muster-api --port 8080 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `MUSTER_API_KEY` - Bearer key required on the webhook surface (recommended)
//! - `MUSTER_BIND_ADDR` - Gateway bind address (default: 127.0.0.1)
//! - `CRCON_API_KEY` - Bearer key for the game-server admin API

use muster_api::{serve, ApiKeyConfig, AppState};
use muster_coordinator::{AppConfig, Dispatcher};
use muster_rcon::RconClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,muster_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments (simple for now)
    let args: Vec<String> = std::env::args().collect();
    let mut port: u16 = 8080;
    let mut config_path: Option<String> = None;
    let mut bind_addr: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().expect("Invalid port number");
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    bind_addr = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Muster gateway");
                println!();
                println!("Usage: muster-api [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>    Port to listen on (default: 8080)");
                println!(
                    "  -b, --bind <ADDR>    Bind address (default: 127.0.0.1, env: MUSTER_BIND_ADDR)"
                );
                println!("  -c, --config <FILE>  Path to config.toml file");
                println!("  -h, --help           Show this help message");
                println!();
                println!("Environment variables:");
                println!("  MUSTER_API_KEY       Webhook bearer key (recommended for production)");
                println!("  MUSTER_BIND_ADDR     Bind address (overridden by --bind flag)");
                println!("  CRCON_API_KEY        Bearer key for the game-server admin API");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // Determine bind address (CLI flag > env var > default 127.0.0.1)
    let host = bind_addr
        .or_else(|| std::env::var("MUSTER_BIND_ADDR").ok())
        .unwrap_or_else(|| "127.0.0.1".to_string());

    if host == "0.0.0.0" {
        tracing::warn!(
            "Gateway binding to 0.0.0.0 — this exposes the webhook to all network interfaces. \
             Ensure MUSTER_API_KEY is set and a firewall is in place."
        );
    }

    // Webhook authentication key
    let api_key = std::env::var("MUSTER_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!(
            "MUSTER_API_KEY not set — the webhook will run without authentication. \
             This is acceptable for local development but NOT for production."
        );
    }

    // Load dispatcher configuration
    let config = if let Some(path) = config_path {
        tracing::info!(path = %path, "Loading configuration");
        AppConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        AppConfig::default()
    };

    // One client serves both roster lookups and player messaging
    let client = Arc::new(RconClient::new(
        config.admin_api.base_url.clone(),
        config.admin_api.resolve_api_key(),
    ));

    let dispatcher = Arc::new(Dispatcher::new(config, client.clone(), client));
    let state = Arc::new(AppState::new(dispatcher));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    serve(state, addr, api_key.map(ApiKeyConfig::new)).await?;

    Ok(())
}
