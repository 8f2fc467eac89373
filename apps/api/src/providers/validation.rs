//! API-key validation — one lightweight authenticated GET per provider.
//!
//! An explicit rejection (non-2xx) and a transport failure are reported with
//! different messages so the user can tell a bad key from a bad network.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::providers::{adapter_for, ProviderId};
use crate::state::AppState;

/// Outcome of a key check. `error` is absent when the key is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeyValidation {
    fn accepted() -> Self {
        KeyValidation {
            valid: true,
            error: None,
        }
    }

    fn rejected(message: &str) -> Self {
        KeyValidation {
            valid: false,
            error: Some(message.to_string()),
        }
    }
}

/// Checks whether `api_key` is accepted by `provider`.
///
/// A blank key short-circuits without network I/O. Otherwise the provider's
/// validation probe is issued once; 2xx means valid.
pub async fn validate_key(
    http: &reqwest::Client,
    provider: ProviderId,
    api_key: &str,
) -> KeyValidation {
    if api_key.trim().is_empty() {
        return KeyValidation::rejected("API key is required");
    }

    let probe = adapter_for(provider).validation_request(api_key);
    let mut request = http.get(&probe.url);
    if let Some(token) = &probe.bearer_token {
        request = request.bearer_auth(token);
    }

    match request.send().await {
        Ok(response) if response.status().is_success() => {
            info!("API key accepted by {provider}");
            KeyValidation::accepted()
        }
        Ok(response) => {
            warn!(
                "API key rejected by {provider} (status {})",
                response.status()
            );
            KeyValidation::rejected("Invalid API key")
        }
        Err(e) => {
            warn!("Key validation against {provider} failed before a status: {e}");
            KeyValidation::rejected("Failed to validate API key")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateKeyRequest {
    pub provider: ProviderId,
    pub api_key: String,
}

/// POST /api/v1/keys/validate
///
/// Never an HTTP error: rejection reasons travel in the body so the settings
/// surface can render them inline.
pub async fn handle_validate_key(
    State(state): State<AppState>,
    Json(request): Json<ValidateKeyRequest>,
) -> Json<KeyValidation> {
    Json(validate_key(&state.http, request.provider, &request.api_key).await)
}
