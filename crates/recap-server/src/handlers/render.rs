//! Render API endpoint.
//!
//! Converts a chat message to the HTML fragment the UI displays.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use recap_renderer::RenderOutput;
use serde::Deserialize;

use crate::state::AppState;

/// Request body for POST /api/render.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RenderRequest {
    /// Message text.
    content: String,
    /// Override greeting stripping for this message.
    #[serde(default)]
    strip_greeting: Option<bool>,
    /// Override greeting locale for this message.
    #[serde(default)]
    locale: Option<String>,
}

/// Handle POST /api/render.
pub(crate) async fn render_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RenderRequest>,
) -> Json<RenderOutput> {
    let renderer = state.renderer_for(request.strip_greeting, request.locale.as_deref());
    Json(renderer.render_with_stats(&request.content))
}
