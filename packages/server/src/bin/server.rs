//! Real-time chat relay server.
//!
//! Serves the chat page and relays presence and chat events between all
//! connected WebSocket clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lobby-server
//! cargo run --bin lobby-server -- --host 0.0.0.0 --port 5000 --static-dir packages/server/static
//! ```

use std::sync::Arc;

use clap::Parser;
use lobby_server::{app::build_server, config::ServerConfig};
use lobby_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &config.log_level,
    );

    if config.secret_key.is_default() {
        tracing::warn!("Using the built-in secret key; set LOBBY_SECRET_KEY in production");
    }
    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in static directory '{}'",
            config.static_dir.display()
        );
    }
    tracing::debug!("Configuration: {:?}", config);

    let server = build_server(&config, Arc::new(SystemClock));
    if let Err(e) = server.run(config.bind_addr()).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
