//! Share API endpoint.
//!
//! Composes a summary email and hands it to the configured mailer.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use recap_mail::ShareRequest;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for POST /api/share.
#[derive(Serialize)]
pub(crate) struct ShareResponse {
    ok: bool,
    /// Number of recipients the message went to.
    sent: usize,
    /// Subject line used.
    subject: String,
}

/// Handle POST /api/share.
pub(crate) async fn share_summary(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, ServerError> {
    let email = state.composer.compose(&request)?;

    // Mailer implementations may block on network I/O
    let mailer = Arc::clone(&state.mailer);
    let email = tokio::task::spawn_blocking(move || mailer.send(&email).map(|()| email))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    tracing::info!(recipients = email.to.len(), subject = %email.subject, "Summary shared");

    Ok(Json(ShareResponse {
        ok: true,
        sent: email.to.len(),
        subject: email.subject,
    }))
}
