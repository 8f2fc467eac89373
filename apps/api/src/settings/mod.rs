//! Settings — the configuration document shared with the extension surfaces.
//!
//! Field names and enum labels are the storage contract: they must match what
//! the settings page and popup already read and write (`aiProvider`,
//! `"Fast Closure"`, `"Auto-detect"`, …). Do not rename.

pub mod handlers;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use store::SettingsStore;

/// Default provider when the store holds none.
pub const DEFAULT_PROVIDER: &str = "groq";
/// Default model when the store holds none.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Proposal tone presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Bold,
    Professional,
    Friendly,
    Confident,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Bold => "Bold",
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Confident => "Confident",
        }
    }
}

/// What the proposal is optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Fast Closure")]
    FastClosure,
    #[serde(rename = "Build Rapport")]
    BuildRapport,
    #[serde(rename = "Show Expertise")]
    ShowExpertise,
    #[serde(rename = "Competitive Edge")]
    CompetitiveEdge,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::FastClosure => "Fast Closure",
            Goal::BuildRapport => "Build Rapport",
            Goal::ShowExpertise => "Show Expertise",
            Goal::CompetitiveEdge => "Competitive Edge",
        }
    }
}

/// Output-language choice. `Auto-detect` defers to the heuristic detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageChoice {
    #[serde(rename = "Auto-detect")]
    AutoDetect,
    English,
    Russian,
    Spanish,
    French,
}

impl fmt::Display for LanguageChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LanguageChoice::AutoDetect => "Auto-detect",
            LanguageChoice::English => "English",
            LanguageChoice::Russian => "Russian",
            LanguageChoice::Spanish => "Spanish",
            LanguageChoice::French => "French",
        };
        f.write_str(label)
    }
}

/// Style settings for one generation call. Immutable once the call starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSettings {
    pub tone: Tone,
    pub goal: Goal,
    pub language: LanguageChoice,
}

impl Default for ProposalSettings {
    fn default() -> Self {
        ProposalSettings {
            tone: Tone::Bold,
            goal: Goal::FastClosure,
            language: LanguageChoice::AutoDetect,
        }
    }
}

/// Provider selection assembled from the store at call time. The provider id
/// stays a raw string until orchestrator dispatch so an unrecognized value
/// surfaces as an unsupported-provider failure, not a decode error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

/// The full configuration document behind `GET/PUT /api/v1/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    pub ai_provider: String,
    pub api_keys: BTreeMap<String, String>,
    pub selected_model: String,
    pub default_settings: ProposalSettings,
    pub custom_prompt: String,
    pub auto_inject: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        SettingsData {
            ai_provider: DEFAULT_PROVIDER.to_string(),
            api_keys: BTreeMap::new(),
            selected_model: DEFAULT_MODEL.to_string(),
            default_settings: ProposalSettings::default(),
            custom_prompt: String::new(),
            auto_inject: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_serializes_with_spaced_labels() {
        let json = serde_json::to_string(&Goal::FastClosure).unwrap();
        assert_eq!(json, r#""Fast Closure""#);
        let back: Goal = serde_json::from_str(r#""Competitive Edge""#).unwrap();
        assert_eq!(back, Goal::CompetitiveEdge);
    }

    #[test]
    fn test_language_choice_auto_detect_label() {
        let json = serde_json::to_string(&LanguageChoice::AutoDetect).unwrap();
        assert_eq!(json, r#""Auto-detect""#);
    }

    #[test]
    fn test_proposal_settings_round_trips_ui_labels() {
        let json = r#"{"tone":"Confident","goal":"Build Rapport","language":"Spanish"}"#;
        let settings: ProposalSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.tone, Tone::Confident);
        assert_eq!(settings.goal, Goal::BuildRapport);
        assert_eq!(settings.language, LanguageChoice::Spanish);
        assert_eq!(serde_json::to_string(&settings).unwrap(), json);
    }

    #[test]
    fn test_unknown_tone_is_rejected() {
        let result: Result<ProposalSettings, _> = serde_json::from_str(
            r#"{"tone":"Sarcastic","goal":"Fast Closure","language":"English"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_document_uses_storage_field_names() {
        let data = SettingsData::default();
        let value = serde_json::to_value(&data).unwrap();
        for key in [
            "aiProvider",
            "apiKeys",
            "selectedModel",
            "defaultSettings",
            "customPrompt",
            "autoInject",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
    }

    #[test]
    fn test_defaults_match_first_run_behavior() {
        let data = SettingsData::default();
        assert_eq!(data.ai_provider, "groq");
        assert_eq!(data.selected_model, "llama-3.3-70b-versatile");
        assert_eq!(data.default_settings, ProposalSettings::default());
        assert!(data.api_keys.is_empty());
        assert!(!data.auto_inject);
    }
}
