//! Liga HTTP Server Binary
//!
//! This is the main entry point for the matchday composition REST API
//! server. It initializes the league service backend, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) league service (default)
//! cargo run --bin liga-server --features "local-league,http-server"
//!
//! # Run with a backend picked from a config file
//! LIGA_CONFIG=liga.toml cargo run --bin liga-server --features "http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `LEAGUE_BACKEND`: League service backend ("local")
//! - `LIGA_CONFIG`: Path to a TOML config file (overrides `LEAGUE_BACKEND`)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use liga_rust::http::{create_router, AppState};
use liga_rust::league::{LeagueBackendType, LeagueConfig, LeagueServiceFactory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Liga HTTP Server");

    // Select the league service backend: config file first, env fallback.
    let league = match env::var("LIGA_CONFIG") {
        Ok(path) => {
            let config = LeagueConfig::from_file(&path)?;
            info!("League backend '{}' from {}", config.league.backend, path);
            LeagueServiceFactory::from_config(&config)?
        }
        Err(_) => {
            let backend = LeagueBackendType::from_env();
            info!("League backend {:?} from environment", backend);
            LeagueServiceFactory::create(backend)?
        }
    };

    // Create application state
    let state = AppState::new(league);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
