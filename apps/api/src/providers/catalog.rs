//! Provider catalog — static metadata the settings surface renders.

use serde::Serialize;

/// Provider metadata exposed to the settings surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub models: &'static [&'static str],
    pub api_url: &'static str,
    pub free_limit: &'static str,
    pub setup_url: &'static str,
}

/// All supported providers and their display info, in picker order.
pub fn all_providers() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            id: "groq",
            name: "Groq",
            description: "Ultra-fast inference, most generous free tier",
            models: &[
                "llama-3.3-70b-versatile",
                "llama-3.1-8b-instant",
                "gemma2-9b-it",
            ],
            api_url: "https://api.groq.com/openai/v1/chat/completions",
            free_limit: "14,400 requests/day",
            setup_url: "https://console.groq.com/keys",
        },
        ProviderInfo {
            id: "gemini",
            name: "Google Gemini",
            description: "High-quality responses from Google",
            models: &["gemini-2.0-flash", "gemini-1.5-flash-001"],
            api_url: "https://generativelanguage.googleapis.com/v1beta/models/",
            free_limit: "1,500 requests/day",
            setup_url: "https://aistudio.google.com/app/apikey",
        },
        ProviderInfo {
            id: "huggingface",
            name: "Hugging Face",
            description: "Completely free, open-source models",
            models: &[
                "meta-llama/Llama-3.1-8B-Instruct",
                "deepseek-ai/DeepSeek-V3-0324",
            ],
            api_url: "https://api-inference.huggingface.co/models/",
            free_limit: "Unlimited (rate limited)",
            setup_url: "https://huggingface.co/settings/tokens",
        },
    ]
}
