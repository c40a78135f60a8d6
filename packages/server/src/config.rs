//! Server configuration.
//!
//! Every option can be given as a command-line flag or an environment variable.

use std::{fmt, path::PathBuf, time::Duration};

use clap::Parser;

use crate::domain::DisconnectPolicy;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SECRET_KEY: &str = "secret!";

#[derive(Parser, Debug, Clone)]
#[command(name = "lobby-server")]
#[command(about = "Real-time chat relay over WebSocket", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "LOBBY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "LOBBY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding index.html and the page's assets
    #[arg(long, env = "LOBBY_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Secret used for session signing; never sent to clients
    #[arg(
        long,
        env = "LOBBY_SECRET_KEY",
        default_value = DEFAULT_SECRET_KEY,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub secret_key: SecretKey,

    /// Remove a user from the online count once all of their connections have closed
    #[arg(long, env = "LOBBY_FORGET_ON_DISCONNECT")]
    pub forget_on_disconnect: bool,

    /// Close connections that stay silent for this many seconds
    #[arg(long, env = "LOBBY_IDLE_TIMEOUT_SECS")]
    pub idle_timeout_secs: Option<u64>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn disconnect_policy(&self) -> DisconnectPolicy {
        if self.forget_on_disconnect {
            DisconnectPolicy::Forget
        } else {
            DisconnectPolicy::Retain
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Session-signing secret. Its value never appears in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether the built-in development secret is in use
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SECRET_KEY
    }
}

impl From<String> for SecretKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}
