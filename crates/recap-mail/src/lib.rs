//! Email composition for shared meeting summaries.
//!
//! Turns a share request (recipients, optional subject and prompt, the
//! summary text) into a ready-to-send message whose HTML body is produced by
//! the same renderer the chat UI uses. Delivery is behind the [`Mailer`]
//! trait; this crate ships only [`LogMailer`], which records the message
//! instead of talking to an SMTP server.
//!
//! # Example
//!
//! ```
//! use recap_config::Config;
//! use recap_mail::{Composer, ShareRequest};
//!
//! let composer = Composer::from_config(&Config::default());
//! let email = composer
//!     .compose(&ShareRequest {
//!         recipients: vec!["ana@example.com".to_owned()],
//!         subject: None,
//!         prompt: None,
//!         summary: "Hi!\n**Weekly sync**\n- ship it".to_owned(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(email.subject, "Weekly sync");
//! assert!(email.html.contains("<strong>Weekly sync</strong>"));
//! ```

mod compose;
mod mailer;
mod recipients;

pub use compose::{ComposedEmail, Composer, ShareRequest, derive_subject};
pub use mailer::{LogMailer, Mailer};
pub use recipients::normalize_recipients;

/// Email composition or delivery error.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// No usable recipient after normalisation.
    #[error("No recipients")]
    NoRecipients,
    /// A recipient is not a plausible address.
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
    /// More recipients than allowed.
    #[error("Too many recipients: {count} (maximum {max})")]
    TooManyRecipients {
        /// Number of recipients after normalisation.
        count: usize,
        /// Configured maximum.
        max: usize,
    },
    /// Summary is blank.
    #[error("Summary is empty")]
    EmptySummary,
    /// Delivery backend failure.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
