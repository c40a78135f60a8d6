//! Terminal chat client for the Lobby relay.
//!
//! Connects to the server, announces the given email, and sends each line
//! typed at the ">" prompt as a chat message. Incoming messages are printed
//! as `[HH:MM] sender: text`. Automatically reconnects on disconnection
//! (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lobby-client -- --email alice@example.com
//! cargo run --bin lobby-client -- -e bob@example.com -n Bob -u ws://127.0.0.1:5000/ws
//! ```

use clap::Parser;

use lobby_client::{run_client, session::Profile};
use lobby_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "lobby-client")]
#[command(about = "Terminal client for the Lobby chat relay", long_about = None)]
struct Args {
    /// Email to announce when joining
    #[arg(short = 'e', long)]
    email: String,

    /// Display name used as the message sender (defaults to the email)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let profile = Profile {
        name: args.name.unwrap_or_else(|| args.email.clone()),
        email: args.email,
    };

    if let Err(e) = run_client(args.url, profile).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
