//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{generate_proposal, DiagnosticTrace, GenerationResult};
use crate::settings::ProposalSettings;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateProposalRequest {
    pub job_text: String,
    /// Style override for this call; stored defaults apply when absent.
    #[serde(default)]
    pub settings: Option<ProposalSettings>,
}

#[derive(Debug, Serialize)]
pub struct GenerateProposalResponse {
    pub proposal: GenerationResult,
    /// Trace of the call that produced the proposal. Clients keep it hidden
    /// unless the user opens the debug panel.
    pub trace: DiagnosticTrace,
    /// Whether the client surface should write the text into the host page.
    pub auto_inject: bool,
}

/// POST /api/v1/proposals/generate
///
/// Full generation flow: stored config is read fresh, the prompt is built,
/// one provider call is made. Failures come back as structured errors
/// carrying the diagnostic trace.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateProposalRequest>,
) -> Result<Json<GenerateProposalResponse>, AppError> {
    let settings = match request.settings {
        Some(settings) => settings,
        None => state.settings.proposal_defaults().await?,
    };
    let provider_config = state.settings.provider_config().await?;
    let custom_template = state.settings.custom_prompt().await?;
    let auto_inject = state.settings.auto_inject().await?;

    let outcome = generate_proposal(
        &state.http,
        &request.job_text,
        &settings,
        &provider_config,
        &custom_template,
    )
    .await
    .map_err(|failure| AppError::Generation(Box::new(failure)))?;

    Ok(Json(GenerateProposalResponse {
        proposal: outcome.proposal,
        trace: outcome.trace,
        auto_inject,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_settings_are_optional() {
        let request: GenerateProposalRequest =
            serde_json::from_str(r#"{"job_text":"Build a site"}"#).unwrap();
        assert_eq!(request.job_text, "Build a site");
        assert!(request.settings.is_none());
    }

    #[test]
    fn test_request_accepts_inline_settings() {
        let request: GenerateProposalRequest = serde_json::from_str(
            r#"{"job_text":"X","settings":{"tone":"Friendly","goal":"Build Rapport","language":"Auto-detect"}}"#,
        )
        .unwrap();
        assert!(request.settings.is_some());
    }
}
