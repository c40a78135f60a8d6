//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{
    error::ClientError,
    session::{Profile, run_client_session},
    ui::spawn_input_thread,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Consecutive failures after `error`, given the count before it.
///
/// A session that connected and later dropped starts the count over.
fn next_failed_attempts(previous: u32, error: &ClientError) -> u32 {
    match error {
        ClientError::ConnectionLost(_) => 1,
        _ => previous + 1,
    }
}

/// Run the WebSocket client with reconnection logic
///
/// Every reconnect announces the same identity again; the server treats a
/// repeated join of the same email as a no-op for the online count.
pub async fn run_client(url: String, profile: Profile) -> Result<(), ClientError> {
    let mut input = spawn_input_thread(format!("{}> ", profile.name));
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            profile.email,
            failed_attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &profile, &mut input).await {
            Ok(()) => {
                // If the session ended normally (user exit), don't reconnect
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                failed_attempts = next_failed_attempts(failed_attempts, &e);

                if failed_attempts >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    failed_attempts + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
