//! Groq — OpenAI-compatible chat-completions API.

use serde::Deserialize;
use serde_json::json;

use crate::providers::{
    is_success, ProviderAdapter, ProviderError, ProviderId, ProviderRequest, ValidationProbe,
    MAX_TOKENS, TEMPERATURE,
};

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODELS_URL: &str = "https://api.groq.com/openai/v1/models";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

pub struct Groq;

impl ProviderAdapter for Groq {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn build_request(&self, api_key: &str, model: &str, prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: CHAT_COMPLETIONS_URL.to_string(),
            bearer_token: Some(api_key.to_string()),
            body: json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": MAX_TOKENS,
                "temperature": TEMPERATURE,
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

        let completion: ChatCompletion =
            serde_json::from_str(body).map_err(|_| ProviderError::MalformedResponse)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ProviderError::MalformedResponse)
    }

    fn validation_request(&self, api_key: &str) -> ValidationProbe {
        ValidationProbe {
            url: MODELS_URL.to_string(),
            bearer_token: Some(api_key.to_string()),
        }
    }
}
