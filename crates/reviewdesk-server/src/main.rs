mod config;

use crate::config::AppConfig;
use clap::Parser;
use reviewdesk_api::{AppState, init_server_start_time, router};
use reviewdesk_github::{GithubApiClient, GithubToken};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reviewdesk")]
#[command(about = "Browse your pull requests and reply to review comments")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Initialize tracing; RUST_LOG takes precedence over the config file
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Initialize server start time for health endpoint
    init_server_start_time();

    info!("Configuration loaded successfully");

    // Resolve the repository the UI operates on
    let repo = match config.resolve_repository() {
        Ok(repo) => repo,
        Err(e) => {
            error!("Failed to resolve repository: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Serving pull requests for {}", repo);

    // Create GitHub API client
    let token = GithubToken::new(config.github.token.clone());
    if token.is_empty() {
        warn!("github.token is empty; GitHub requests will be unauthenticated and fail");
    }
    let github_client = match GithubApiClient::new(&token, config.github.api_url.as_deref(), repo)
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create GitHub API client: {}", e);
            std::process::exit(1);
        }
    };

    // Create application state
    let app_state = match AppState::new(Arc::new(github_client), config.ui.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to compile templates: {}", e);
            std::process::exit(1);
        }
    };

    let app = router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server with graceful shutdown
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Wait for SIGINT or SIGTERM for graceful shutdown
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
