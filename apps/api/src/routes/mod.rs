pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::providers::validation;
use crate::settings::handlers as settings;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route(
            "/api/v1/proposals/generate",
            post(generation::handle_generate),
        )
        // Key validation
        .route("/api/v1/keys/validate", post(validation::handle_validate_key))
        // Settings API
        .route(
            "/api/v1/settings",
            get(settings::handle_get_settings).put(settings::handle_put_settings),
        )
        .route("/api/v1/providers", get(settings::handle_list_providers))
        // Selection hand-off (context-menu flow)
        .route("/api/v1/selection", post(settings::handle_stash_selection))
        .route(
            "/api/v1/selection/take",
            post(settings::handle_take_selection),
        )
        .with_state(state)
}
