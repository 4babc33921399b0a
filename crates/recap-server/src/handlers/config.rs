//! Configuration API endpoint.
//!
//! Returns client-side configuration for the chat UI.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/config.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigResponse {
    /// Application version.
    version: String,
    /// Greeting locale used when a request names none.
    default_locale: String,
    /// Locales with greeting words.
    locales: Vec<String>,
    /// Whether greetings are stripped by default.
    strip_greeting: bool,
}

/// Handle GET /api/config.
pub(crate) async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let vocabulary = state.renderer.vocabulary();
    Json(ConfigResponse {
        version: state.version.clone(),
        default_locale: state.renderer.locale().to_owned(),
        locales: vocabulary.locales().map(str::to_owned).collect(),
        strip_greeting: state.renderer.strips_greeting(),
    })
}
