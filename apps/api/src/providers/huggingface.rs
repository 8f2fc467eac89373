//! Hugging Face — serverless inference API. Responds with either a bare
//! object or a one-element array depending on the model, so parsing accepts
//! both shapes.

use serde::Deserialize;
use serde_json::json;

use crate::providers::{
    is_success, ProviderAdapter, ProviderError, ProviderId, ProviderRequest, ValidationProbe,
    MAX_TOKENS, TEMPERATURE,
};

const INFERENCE_BASE: &str = "https://api-inference.huggingface.co/models";
const WHOAMI_URL: &str = "https://huggingface.co/api/whoami";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

pub struct HuggingFace;

impl ProviderAdapter for HuggingFace {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    fn build_request(&self, api_key: &str, model: &str, prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: format!("{INFERENCE_BASE}/{model}"),
            bearer_token: Some(api_key.to_string()),
            body: json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": MAX_TOKENS,
                    "temperature": TEMPERATURE,
                },
            }),
        }
    }

    fn parse_response(&self, status: u16, body: &str) -> Result<String, ProviderError> {
        if !is_success(status) {
            return Err(ProviderError::Http {
                status,
                body: body.to_string(),
            });
        }

        match serde_json::from_str(body).map_err(|_| ProviderError::MalformedResponse)? {
            InferenceResponse::Many(generations) => generations
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or(ProviderError::MalformedResponse),
            InferenceResponse::One(generation) => Ok(generation.generated_text),
        }
    }

    fn validation_request(&self, api_key: &str) -> ValidationProbe {
        ValidationProbe {
            url: WHOAMI_URL.to_string(),
            bearer_token: Some(api_key.to_string()),
        }
    }
}
