//! Google Gemini — generateContent API. The key travels in the query string,
//! not in a header.

use serde::Deserialize;
use serde_json::json;

use crate::providers::{
    is_success, ProviderAdapter, ProviderError, ProviderId, ProviderRequest, ValidationProbe,
};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

pub struct Gemini;

impl ProviderAdapter for Gemini {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn build_request(&self, api_key: &str, model: &str, prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: format!("{API_BASE}/{model}:generateContent?key={api_key}"),
            bearer_token: None,
            body: json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
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

        let response: GenerateContentResponse =
            serde_json::from_str(body).map_err(|_| ProviderError::MalformedResponse)?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(ProviderError::MalformedResponse)
    }

    fn validation_request(&self, api_key: &str) -> ValidationProbe {
        ValidationProbe {
            url: format!("{API_BASE}?key={api_key}"),
            bearer_token: None,
        }
    }
}
