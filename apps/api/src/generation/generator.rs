//! Proposal generation — orchestrates one generation call end to end.
//!
//! Flow: validate input → resolve provider config → build prompt → dispatch
//! to the provider adapter → single HTTP call → parse → wrap with timestamp.
//! A diagnostic trace is filled incrementally along the way and returned on
//! both arms, reflecting exactly what was known when the call ended. One
//! attempt only — failures surface immediately, the caller may retry by hand.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generation::prompts::build_prompt;
use crate::providers::{adapter_for, ProviderError, ProviderId};
use crate::settings::{ProposalSettings, ProviderConfig};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A successfully generated proposal. Transient — returned to the caller and
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub text: String,
    /// Epoch milliseconds at completion.
    pub timestamp: i64,
}

/// Request/response data captured during one call, for the client's debug
/// panel. Rebuilt from scratch on every call; the API key only ever appears
/// masked.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiagnosticTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

/// Success payload: the proposal plus the trace of the call that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutcome {
    pub proposal: GenerationResult,
    pub trace: DiagnosticTrace,
}

/// Everything that can go wrong during one generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Please enter a job description")]
    EmptyInput,

    #[error("{provider} API key not configured. Please go to Settings and add your API key.")]
    MissingApiKey { provider: String },

    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A failed call together with whatever trace data existed at the point of
/// failure.
#[derive(Debug)]
pub struct GenerationFailure {
    pub error: GenerateError,
    pub trace: DiagnosticTrace,
}

impl GenerationFailure {
    fn new(error: GenerateError, mut trace: DiagnosticTrace) -> Self {
        trace.error_detail = Some(error.to_string());
        GenerationFailure { error, trace }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generation call.
///
/// Steps:
/// 1. Empty (trimmed) job text fails fast — no network I/O.
/// 2. Blank API key fails fast — no request is even built.
/// 3. Build the prompt (custom template override or built-in).
/// 4. Resolve the adapter from the configured provider id; unknown ids fail.
/// 5. One POST to the provider; parse the vendor shape into plain text.
pub async fn generate_proposal(
    http: &reqwest::Client,
    job_text: &str,
    settings: &ProposalSettings,
    provider_config: &ProviderConfig,
    custom_template: &str,
) -> Result<GenerateOutcome, GenerationFailure> {
    let mut trace = DiagnosticTrace {
        api_key: Some(mask_api_key(&provider_config.api_key)),
        ..DiagnosticTrace::default()
    };

    // Step 1: input validation
    if job_text.trim().is_empty() {
        return Err(GenerationFailure::new(GenerateError::EmptyInput, trace));
    }

    // Step 2: key presence — checked before any request exists
    if provider_config.api_key.trim().is_empty() {
        return Err(GenerationFailure::new(
            GenerateError::MissingApiKey {
                provider: provider_config.provider.clone(),
            },
            trace,
        ));
    }

    // Step 3: prompt
    let prompt = build_prompt(job_text, settings, custom_template);
    debug!("Built prompt ({} chars)", prompt.len());

    // Step 4: adapter dispatch
    let provider = match provider_config.provider.parse::<ProviderId>() {
        Ok(provider) => provider,
        Err(()) => {
            return Err(GenerationFailure::new(
                GenerateError::UnsupportedProvider(provider_config.provider.clone()),
                trace,
            ))
        }
    };
    let adapter = adapter_for(provider);

    let request = adapter.build_request(&provider_config.api_key, &provider_config.model, &prompt);
    // Gemini carries the key in the URL; the trace must never hold it raw.
    trace.request_url = Some(request.url.replace(
        &provider_config.api_key,
        &mask_api_key(&provider_config.api_key),
    ));
    trace.request_body = Some(request.body.clone());

    info!(
        "Dispatching generation to {provider} (model: {})",
        provider_config.model
    );

    // Step 5: single call, no retries
    let mut outbound = http.post(&request.url).json(&request.body);
    if let Some(token) = &request.bearer_token {
        outbound = outbound.bearer_auth(token);
    }

    let response = match outbound.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Generation call to {provider} failed before a status: {e}");
            return Err(GenerationFailure::new(
                ProviderError::Network(e).into(),
                trace,
            ));
        }
    };

    let status = response.status().as_u16();
    trace.response_status = Some(status);
    trace.response_headers = Some(
        response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    );

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return Err(GenerationFailure::new(
                ProviderError::Network(e).into(),
                trace,
            ))
        }
    };
    trace.response_body =
        Some(serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body.clone())));

    let text = match adapter.parse_response(status, &body) {
        Ok(text) => text,
        Err(e) => {
            warn!("Generation via {provider} failed: {e}");
            return Err(GenerationFailure::new(e.into(), trace));
        }
    };

    info!("Generation via {provider} succeeded ({} chars)", text.len());

    Ok(GenerateOutcome {
        proposal: GenerationResult {
            text,
            timestamp: Utc::now().timestamp_millis(),
        },
        trace,
    })
}

/// Masks a key down to its first 10 characters for trace display.
fn mask_api_key(api_key: &str) -> String {
    if api_key.trim().is_empty() {
        return "No key found".to_string();
    }
    let prefix: String = api_key.chars().take(10).collect();
    format!("{prefix}...")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str, api_key: &str) -> ProviderConfig {
        ProviderConfig {
            provider: provider.to_string(),
            api_key: api_key.to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
        }
    }

    // The fail-fast paths below run against a client with no server behind
    // it; reaching the network would surface as a Network error instead of
    // the asserted variant.

    #[tokio::test]
    async fn test_empty_job_text_fails_without_network_io() {
        let http = reqwest::Client::new();
        let failure = generate_proposal(
            &http,
            "   \n ",
            &ProposalSettings::default(),
            &config("groq", "gsk_test"),
            "",
        )
        .await
        .unwrap_err();

        assert!(matches!(failure.error, GenerateError::EmptyInput));
        assert!(failure.trace.request_url.is_none());
        assert_eq!(
            failure.trace.error_detail.as_deref(),
            Some("Please enter a job description")
        );
    }

    #[tokio::test]
    async fn test_blank_api_key_fails_without_network_io() {
        let http = reqwest::Client::new();
        let failure = generate_proposal(
            &http,
            "Build me a website",
            &ProposalSettings::default(),
            &config("gemini", "  "),
            "",
        )
        .await
        .unwrap_err();

        match &failure.error {
            GenerateError::MissingApiKey { provider } => assert_eq!(provider, "gemini"),
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
        assert!(failure.trace.request_url.is_none());
        assert_eq!(failure.trace.api_key.as_deref(), Some("No key found"));
        assert!(failure
            .trace
            .error_detail
            .as_deref()
            .unwrap()
            .contains("API key not configured"));
    }

    #[tokio::test]
    async fn test_empty_input_checked_before_missing_key() {
        let http = reqwest::Client::new();
        let failure = generate_proposal(
            &http,
            "",
            &ProposalSettings::default(),
            &config("groq", ""),
            "",
        )
        .await
        .unwrap_err();
        assert!(matches!(failure.error, GenerateError::EmptyInput));
    }

    #[tokio::test]
    async fn test_unrecognized_provider_fails_before_dispatch() {
        let http = reqwest::Client::new();
        let failure = generate_proposal(
            &http,
            "Build me a website",
            &ProposalSettings::default(),
            &config("openai", "sk-test"),
            "",
        )
        .await
        .unwrap_err();

        match &failure.error {
            GenerateError::UnsupportedProvider(id) => assert_eq!(id, "openai"),
            other => panic!("expected UnsupportedProvider, got {other:?}"),
        }
        assert!(failure.trace.request_url.is_none());
    }

    #[test]
    fn test_mask_keeps_at_most_ten_characters() {
        assert_eq!(mask_api_key("gsk_0123456789abcdef"), "gsk_012345...");
        assert_eq!(mask_api_key("short"), "short...");
        assert_eq!(mask_api_key(""), "No key found");
        assert_eq!(mask_api_key("   "), "No key found");
    }

    #[test]
    fn test_trace_serializes_only_populated_fields() {
        let trace = DiagnosticTrace {
            api_key: Some("gsk_012345...".to_string()),
            response_status: Some(429),
            ..DiagnosticTrace::default()
        };
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "api_key": "gsk_012345...", "response_status": 429 })
        );
    }
}
