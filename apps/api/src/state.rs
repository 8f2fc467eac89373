use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// Configuration store — read fully before a call, never cached across
    /// calls.
    pub settings: SettingsStore,
    /// Shared outbound HTTP client for provider calls and key validation.
    pub http: reqwest::Client,
}
