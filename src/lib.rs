pub mod backends;
pub mod config;
pub mod endpoints;
pub mod normalize;

use crate::config::config::Config;
use std::net::SocketAddr;
use tracing_subscriber::{self, prelude::*};

pub async fn run(config: Config) {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bridge.log_level));

    if config.logging.log_to_file {
        // Create a file appender
        let file_appender = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(
                std::fs::File::create(&config.logging.log_file_path)
                    .expect("Failed to create log file"),
            );

        // Create a stdout appender
        let stdout_appender = tracing_subscriber::fmt::layer();

        // Combine both appenders
        tracing_subscriber::registry()
            .with(filter)
            .with(file_appender)
            .with(stdout_appender)
            .try_init()
            .expect("Failed to initialize logging");
    } else {
        // Just stdout if file logging is disabled
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("🔧 Starting Concord '{}'", config.bridge.id);

    // Build the router once for all endpoints
    let app = endpoints::build_router(&config).expect("Failed to initialize backends");

    // Parse the bind address from config
    let addr: SocketAddr = format!(
        "{}:{}",
        config.network.http.bind_address, config.network.http.bind_port
    )
    .parse()
    .expect("Invalid bind address or port");

    tracing::info!("🚀 Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind HTTP listener");
    axum::serve(listener, app).await.unwrap();
}
