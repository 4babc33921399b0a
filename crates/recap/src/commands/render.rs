//! `recap render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use recap_config::{CliSettings, Config};

use crate::commands::read_input;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Summary file to render (default: stdin).
    file: Option<PathBuf>,

    /// Keep a leading greeting line.
    #[arg(long)]
    keep_greeting: bool,

    /// Greeting locale (overrides config).
    #[arg(short, long)]
    locale: Option<String>,

    /// Path to configuration file (default: auto-discover recap.toml).
    #[arg(short, long, env = "RECAP_CONFIG")]
    config: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let text = read_input(self.file.as_deref())?;

        let output = config.renderer().render_with_stats(&text);
        tracing::debug!(
            code_blocks = output.code_blocks,
            greeting_stripped = output.greeting_stripped,
            "Rendered summary"
        );

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output.html)?;
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            strip_greeting: self.keep_greeting.then_some(false),
            locale: self.locale.clone(),
            ..Default::default()
        }
    }
}
