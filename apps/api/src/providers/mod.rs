//! Provider adapters — one per LLM vendor.
//!
//! An adapter translates between the normalized generation request (prompt,
//! model, fixed sampling parameters) and the vendor's wire format, in both
//! directions. Adapters are pure request-shapers and response-parsers; the
//! orchestrator owns the actual HTTP call. No retries, no backoff anywhere —
//! every failure surfaces on first attempt.

pub mod catalog;
pub mod gemini;
pub mod groq;
pub mod huggingface;
pub mod validation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token cap applied to every generation call, all vendors.
pub const MAX_TOKENS: u32 = 500;
/// Sampling temperature applied to every generation call, all vendors.
pub const TEMPERATURE: f64 = 0.7;

/// Identifier of a supported vendor. Wire form is the lowercase id the
/// settings page stores (`"groq"`, `"gemini"`, `"huggingface"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Groq,
    Gemini,
    HuggingFace,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Groq => "groq",
            ProviderId::Gemini => "gemini",
            ProviderId::HuggingFace => "huggingface",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groq" => Ok(ProviderId::Groq),
            "gemini" => Ok(ProviderId::Gemini),
            "huggingface" => Ok(ProviderId::HuggingFace),
            _ => Err(()),
        }
    }
}

/// Failures at the provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-2xx status. The raw body is kept for
    /// the diagnostic trace.
    #[error("provider returned HTTP {status}")]
    Http { status: u16, body: String },

    /// 2xx response whose body does not contain the expected text path.
    #[error("could not find generated text in the provider response")]
    MalformedResponse,

    /// Transport-level failure before any HTTP status was available.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A fully shaped outbound generation request.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    /// `Authorization: Bearer …` value; `None` for vendors that carry the key
    /// in the URL instead.
    pub bearer_token: Option<String>,
    pub body: serde_json::Value,
}

/// A lightweight authenticated GET used to check that a key is accepted.
#[derive(Debug, Clone)]
pub struct ValidationProbe {
    pub url: String,
    pub bearer_token: Option<String>,
}

/// Per-vendor request shaping and response parsing.
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Shapes the vendor-specific POST for one generation call.
    fn build_request(&self, api_key: &str, model: &str, prompt: &str) -> ProviderRequest;

    /// Extracts the generated text from a raw response. Non-2xx statuses fail
    /// with [`ProviderError::Http`] without attempting to parse a success
    /// shape; a 2xx body missing the vendor's text path fails with
    /// [`ProviderError::MalformedResponse`].
    fn parse_response(&self, status: u16, body: &str) -> Result<String, ProviderError>;

    /// Shapes the key-validation GET for this vendor.
    fn validation_request(&self, api_key: &str) -> ValidationProbe;
}

/// Looks up the adapter for a provider id.
pub fn adapter_for(id: ProviderId) -> &'static dyn ProviderAdapter {
    match id {
        ProviderId::Groq => &groq::Groq,
        ProviderId::Gemini => &gemini::Gemini,
        ProviderId::HuggingFace => &huggingface::HuggingFace,
    }
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
