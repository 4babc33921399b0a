//! `recap email` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use recap_config::Config;
use recap_mail::{ComposedEmail, Composer, LogMailer, Mailer, ShareRequest};

use crate::commands::read_input;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the email command.
#[derive(Args)]
pub(crate) struct EmailArgs {
    /// Summary file to share (default: stdin).
    file: Option<PathBuf>,

    /// Recipient address. Repeat or separate with commas.
    #[arg(short = 't', long = "to", required = true)]
    recipients: Vec<String>,

    /// Subject line (default: first line of the summary).
    #[arg(short, long)]
    subject: Option<String>,

    /// Prompt the summary was generated from.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Hand the message to the mailer instead of printing it.
    #[arg(long)]
    send: bool,

    /// Path to configuration file (default: auto-discover recap.toml).
    #[arg(short, long, env = "RECAP_CONFIG")]
    config: Option<PathBuf>,
}

impl EmailArgs {
    /// Execute the email command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or the message is rejected.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let summary = read_input(self.file.as_deref())?;
        let email = self.compose(&config, summary)?;

        if self.send {
            LogMailer.send(&email)?;
            output.success(&format!(
                "Sent \"{}\" to {} recipient(s)",
                email.subject,
                email.to.len()
            ));
        } else {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &email)?;
            writeln!(stdout)?;
            output.warning("Not sent (use --send to deliver)");
        }

        Ok(())
    }

    fn compose(&self, config: &Config, summary: String) -> Result<ComposedEmail, CliError> {
        let request = ShareRequest {
            recipients: self.recipients.clone(),
            subject: self.subject.clone(),
            prompt: self.prompt.clone(),
            summary,
        };
        Ok(Composer::from_config(config).compose(&request)?)
    }
}
