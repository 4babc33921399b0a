//! `recap serve` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use recap_config::{CliSettings, Config};
use recap_mail::LogMailer;
use recap_server::{run_server, server_config_from_recap_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover recap.toml).
    #[arg(short, long, env = "RECAP_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request tracing and delivery logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        match &config.config_path {
            Some(path) => output.info(&format!("Config: {}", path.display())),
            None => output.info("Config: defaults (no recap.toml found)"),
        }
        output.info(&format!(
            "Greeting stripping: {} (locale {})",
            if config.render.strip_greeting {
                "enabled"
            } else {
                "disabled"
            },
            config.render.locale
        ));
        output.warning("Email delivery: log only");

        let server_config = server_config_from_recap_config(&config, version.to_owned());
        run_server(server_config, Arc::new(LogMailer))
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
