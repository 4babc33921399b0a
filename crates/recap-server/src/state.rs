//! Application state.
//!
//! Shared state for all request handlers.

use std::borrow::Cow;
use std::sync::Arc;

use recap_mail::{Composer, Mailer};
use recap_renderer::Renderer;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Renderer for chat messages.
    pub(crate) renderer: Renderer,
    /// Email composer for shared summaries.
    pub(crate) composer: Composer,
    /// Delivery backend.
    pub(crate) mailer: Arc<dyn Mailer>,
    /// Application version.
    pub(crate) version: String,
}

impl AppState {
    /// Renderer with per-request overrides applied.
    ///
    /// Borrows the shared renderer when the request changes nothing.
    pub(crate) fn renderer_for(
        &self,
        strip_greeting: Option<bool>,
        locale: Option<&str>,
    ) -> Cow<'_, Renderer> {
        if strip_greeting.is_none() && locale.is_none() {
            return Cow::Borrowed(&self.renderer);
        }

        let mut renderer = self.renderer.clone();
        if let Some(enabled) = strip_greeting {
            renderer = renderer.with_greeting_stripping(enabled);
        }
        if let Some(locale) = locale {
            renderer = renderer.with_locale(locale);
        }
        Cow::Owned(renderer)
    }
}
