//! HTTP API for rendering and sharing meeting summaries.
//!
//! This crate is the chat UI's side of the renderer: the browser posts model
//! output and gets back the HTML fragment to display, built by the same
//! renderer the email path uses. It also accepts share requests and hands the
//! composed message to a [`Mailer`].
//!
//! # Routes
//!
//! ```text
//! POST /api/render   { content, stripGreeting?, locale? } → { html, codeBlocks, greetingStripped }
//! POST /api/share    { recipients, subject?, prompt?, summary } → { ok, sent, subject }
//! GET  /api/config   → { version, defaultLocale, locales, stripGreeting }
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use recap_mail::LogMailer;
//! use recap_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     run_server(config, Arc::new(LogMailer)).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use recap_mail::{Composer, Mailer};
use recap_renderer::Renderer;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
    /// Application version reported by `/api/config`.
    pub version: String,
    /// Renderer used for chat messages.
    pub renderer: Renderer,
    /// Composer used for shared summaries.
    pub composer: Composer,
}

impl Default for ServerConfig {
    fn default() -> Self {
        server_config_from_recap_config(&recap_config::Config::default(), String::new())
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(
    config: ServerConfig,
    mailer: Arc<dyn Mailer>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let body_limit = config.body_limit;

    let state = Arc::new(AppState {
        renderer: config.renderer,
        composer: config.composer,
        mailer,
        version: config.version,
    });
    let app = app::create_router(state, body_limit);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Recap config.
#[must_use]
pub fn server_config_from_recap_config(
    config: &recap_config::Config,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        body_limit: config.server.body_limit,
        version,
        renderer: config.renderer(),
        composer: Composer::from_config(config),
    }
}
