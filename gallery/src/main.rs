//! App gallery server entry point

use clap::Parser;
use gallery::cli::{Cli, Commands};
use gallery::config::{get_database_url, get_host, get_port, HealthConfig, ScreenshotConfig};
use gallery::db::{self, traits::SqliteAppRepository};
use gallery::{logging, server, AppState};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
    database_url: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: get_host(),
            port: get_port(),
            database_url: get_database_url(),
        }
    }

    fn from_args(host: String, port: u16, database_url: String) -> Self {
        Self {
            host,
            port,
            database_url,
        }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init()?;

    match cli.command {
        Some(Commands::Health(args)) => gallery::cli::health::execute(&args).await,
        Some(Commands::Serve(args)) => {
            run_server(ServerConfig::from_args(
                args.host(),
                args.port(),
                args.database_url(),
            ))
            .await
        }
        None => run_server(ServerConfig::from_env()).await,
    }
}

async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!(
        "App gallery v{} starting (database: {})",
        env!("CARGO_PKG_VERSION"),
        config.database_url
    );

    let pool = db::create_pool(&config.database_url).await?;
    let repository = Arc::new(SqliteAppRepository::new(pool));

    let health_config = HealthConfig::from_env();
    let screenshot_config = ScreenshotConfig::from_env();
    info!(
        probe_timeout_secs = health_config.probe_timeout.as_secs(),
        health_ttl_secs = health_config.cache_ttl.as_secs(),
        screenshot_capacity = screenshot_config.cache_capacity,
        "Caches configured"
    );

    let state = AppState::from_config(repository, &health_config, &screenshot_config)?;
    server::run(state, &config.bind_addr()).await?;
    Ok(())
}
