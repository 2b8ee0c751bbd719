//! Sophia Server
//!
//! JSON-over-HTTP front end for the conversational orchestrator. One
//! [`sophia_brain::Brain`] is shared by every request; per-session
//! serialization happens inside it.
//!
//! | Method | Path                        | Operation                 |
//! |--------|-----------------------------|---------------------------|
//! | POST   | `/brain/session`            | create a session          |
//! | POST   | `/brain/message`            | process one utterance     |
//! | GET    | `/brain/context/:id`        | export a session          |
//! | DELETE | `/brain/context/:id`        | delete a session          |
//! | GET    | `/brain/provenance`         | ledger statistics         |
//! | POST   | `/brain/provenance/review`  | review tracked content    |
//! | GET    | `/brain/capabilities`       | capability listing        |
//! | GET    | `/health`                   | liveness and counts       |

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use sophia_brain::Brain;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Reap interval is a fraction of the idle timeout, at least one second
fn reap_interval(idle_timeout: Duration) -> Duration {
    (idle_timeout / 4).max(Duration::from_secs(1))
}

fn spawn_reaper(brain: Arc<Brain>, idle_timeout: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(reap_interval(idle_timeout));
        loop {
            ticker.tick().await;
            brain.reap_idle_sessions();
        }
    });
}

/// Start the HTTP server
///
/// Builds the orchestrator from `config.brain`, starts the idle-session
/// reaper when a timeout is configured, and serves until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Sophia server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model name: {}", config.brain.model_name);
    info!("History limit: {} messages", config.brain.max_history);

    let idle_timeout = config.brain.idle_timeout();
    let state = AppState::new(Brain::new(config.brain.clone()));

    if !idle_timeout.is_zero() {
        info!("Session idle timeout: {} seconds", idle_timeout.as_secs());
        spawn_reaper(Arc::clone(&state.brain), idle_timeout);
    }

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
