//! Delivery seam.

use crate::{ComposedEmail, MailError};

/// Sends composed emails.
///
/// Implementations own transport, retries and credentials. The HTTP server
/// holds one behind an `Arc<dyn Mailer>`.
pub trait Mailer: Send + Sync {
    /// Deliver `email`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Delivery`] when the transport fails.
    fn send(&self, email: &ComposedEmail) -> Result<(), MailError>;
}

/// Mailer that logs messages instead of sending them.
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &ComposedEmail) -> Result<(), MailError> {
        tracing::info!(
            from = %email.from,
            to = ?email.to,
            subject = %email.subject,
            html_len = email.html.len(),
            "Email delivery disabled, message logged only"
        );
        Ok(())
    }
}
