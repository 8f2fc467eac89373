//! Axum route handlers for settings, the provider catalog, and the
//! selection hand-off used by the context-menu flow.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::providers::catalog::{all_providers, ProviderInfo};
use crate::settings::SettingsData;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// Loads the full configuration document, defaults filled for absent keys.
pub async fn handle_get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsData>, AppError> {
    Ok(Json(state.settings.load().await?))
}

/// PUT /api/v1/settings
///
/// Persists the full document and echoes it back. Provider ids are stored
/// as-is — an id we cannot dispatch surfaces later, at generation time.
pub async fn handle_put_settings(
    State(state): State<AppState>,
    Json(data): Json<SettingsData>,
) -> Result<Json<SettingsData>, AppError> {
    state.settings.save(&data).await?;
    info!("Settings saved (provider: {})", data.ai_provider);
    Ok(Json(data))
}

/// GET /api/v1/providers
pub async fn handle_list_providers() -> Json<Vec<ProviderInfo>> {
    Json(all_providers())
}

#[derive(Debug, Deserialize)]
pub struct StashSelectionRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TakeSelectionResponse {
    pub text: Option<String>,
}

/// POST /api/v1/selection
///
/// Stashes text captured from a host-page selection for the next popup open.
pub async fn handle_stash_selection(
    State(state): State<AppState>,
    Json(request): Json<StashSelectionRequest>,
) -> Result<StatusCode, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    state.settings.stash_selection(&request.text).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/selection/take
///
/// Returns the stashed selection and deletes it — consumed exactly once.
/// `text` is `null` when nothing is stashed.
pub async fn handle_take_selection(
    State(state): State<AppState>,
) -> Result<Json<TakeSelectionResponse>, AppError> {
    let text = state.settings.take_selection().await?;
    Ok(Json(TakeSelectionResponse { text }))
}
