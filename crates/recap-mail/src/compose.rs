//! Share request → composed email.

use std::fmt::Write;

use recap_config::{Config, EmailConfig};
use recap_renderer::{Renderer, escape_html};
use serde::{Deserialize, Serialize};

use crate::MailError;
use crate::recipients::normalize_recipients;

/// Maximum subject length (in characters) when derived from the summary.
const DERIVED_SUBJECT_MAX_CHARS: usize = 80;

/// Request to share a summary by email.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShareRequest {
    /// Recipient addresses. Entries may contain `,`/`;` separated lists.
    pub recipients: Vec<String>,
    /// Explicit subject line.
    pub subject: Option<String>,
    /// Instruction the summary was generated from, shown above it.
    pub prompt: Option<String>,
    /// Summary text as written by the model (and possibly edited by the user).
    pub summary: String,
}

/// Message ready to hand to a [`Mailer`](crate::Mailer).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComposedEmail {
    /// Sender address.
    pub from: String,
    /// Normalised recipient addresses.
    pub to: Vec<String>,
    /// Single-line subject.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// Builds emails from share requests.
#[derive(Clone, Debug)]
pub struct Composer {
    renderer: Renderer,
    email: EmailConfig,
}

impl Composer {
    /// Create a composer with an explicit renderer and email settings.
    #[must_use]
    pub fn new(renderer: Renderer, email: EmailConfig) -> Self {
        Self { renderer, email }
    }

    /// Create a composer from the application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.renderer(), config.email.clone())
    }

    /// Maximum recipients per message.
    #[must_use]
    pub fn max_recipients(&self) -> usize {
        self.email.max_recipients
    }

    /// Compose an email for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::EmptySummary`] for a blank summary and the
    /// recipient errors of [`normalize_recipients`].
    pub fn compose(&self, request: &ShareRequest) -> Result<ComposedEmail, MailError> {
        if request.summary.trim().is_empty() {
            return Err(MailError::EmptySummary);
        }
        let to = normalize_recipients(&request.recipients, self.email.max_recipients)?;

        let summary = self.renderer.strip_greeting(request.summary.trim());
        let subject = derive_subject(
            request.subject.as_deref(),
            summary,
            &self.email.default_subject,
        );
        let html = self.html_body(request.prompt.as_deref(), &request.summary);

        tracing::debug!(
            recipients = to.len(),
            subject = %subject,
            html_len = html.len(),
            "Composed summary email"
        );

        Ok(ComposedEmail {
            from: self.email.from.clone(),
            to,
            subject,
            html,
            text: summary.replace("\r\n", "\n"),
        })
    }

    fn html_body(&self, prompt: Option<&str>, summary: &str) -> String {
        let mut html = String::with_capacity(summary.len() * 2 + 256);
        html.push_str(r#"<div style="font-family: Inter, Arial, sans-serif; line-height: 1.5;">"#);
        let _ = write!(html, "<h2>{}</h2>", escape_html(&self.email.heading));

        if let Some(prompt) = prompt.map(str::trim).filter(|p| !p.is_empty()) {
            let _ = write!(
                html,
                "<p><strong>Prompt:</strong> {}</p><hr/>",
                escape_html(prompt)
            );
        }

        let _ = write!(html, "<div>{}</div>", self.renderer.render(summary.trim()));

        html.push_str("<hr/>");
        if !self.email.footer.trim().is_empty() {
            let _ = write!(html, "<small>{}</small>", escape_html(&self.email.footer));
        }
        html.push_str("</div>");
        html
    }
}

/// Pick the subject line for a shared summary.
///
/// Uses the explicit subject if it has any content. Otherwise takes the first
/// non-blank line of the summary with markdown markers removed, cut to 80
/// characters. Falls back to `default` when both are empty. Whitespace runs,
/// including newlines, collapse to single spaces so the result is always one
/// header-safe line.
///
/// # Examples
///
/// ```
/// use recap_mail::derive_subject;
///
/// assert_eq!(derive_subject(Some("  Q3 sync "), "ignored", "Default"), "Q3 sync");
/// assert_eq!(derive_subject(None, "## **Q3 planning**\n- a", "Default"), "Q3 planning");
/// assert_eq!(derive_subject(Some(" "), "", "Default"), "Default");
/// ```
pub fn derive_subject(explicit: Option<&str>, summary: &str, default: &str) -> String {
    if let Some(subject) = explicit.map(collapse_whitespace).filter(|s| !s.is_empty()) {
        return subject;
    }

    let derived = summary
        .lines()
        .map(strip_line_markers)
        .find(|line| !line.is_empty())
        .map(|line| {
            collapse_whitespace(&line)
                .chars()
                .take(DERIVED_SUBJECT_MAX_CHARS)
                .collect::<String>()
                .trim_end()
                .to_owned()
        });

    match derived {
        Some(subject) if !subject.is_empty() => subject,
        _ => collapse_whitespace(default),
    }
}

/// Drop heading, bullet and emphasis markers from a summary line.
fn strip_line_markers(line: &str) -> String {
    let line = line.trim();
    let line = line.trim_start_matches('#');
    let line = line.trim_start();
    let line = line.strip_prefix("- ").unwrap_or(line);
    line.replace('*', "").replace("```", "").trim().to_owned()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
