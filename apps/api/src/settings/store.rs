//! Configuration-store client.
//!
//! The store is a plain key-value service with get/set semantics, eventually
//! consistent across the extension's surfaces. Structured values (`apiKeys`,
//! `defaultSettings`, `autoInject`) are JSON-encoded; scalar strings are
//! stored raw. `SettingsStore` owns the key layout and typed decoding; the
//! `KeyValue` trait underneath is swappable, redis in production.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::errors::AppError;
use crate::settings::{
    ProposalSettings, ProviderConfig, SettingsData, DEFAULT_MODEL, DEFAULT_PROVIDER,
};

const KEY_AI_PROVIDER: &str = "aiProvider";
const KEY_API_KEYS: &str = "apiKeys";
const KEY_SELECTED_MODEL: &str = "selectedModel";
const KEY_DEFAULT_SETTINGS: &str = "defaultSettings";
const KEY_CUSTOM_PROMPT: &str = "customPrompt";
const KEY_AUTO_INJECT: &str = "autoInject";
const KEY_SELECTED_TEXT: &str = "selectedText";

/// Minimal key-value contract the settings layer needs from its backing
/// store. Carried as `Arc<dyn KeyValue>` so tests can swap in an in-memory
/// map without a redis instance.
#[async_trait]
pub trait KeyValue: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn del(&self, key: &str) -> anyhow::Result<()>;
}

/// Redis-backed store. A multiplexed connection is established per operation;
/// the redis crate pools nothing here and the call volume is tiny.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValue for RedisStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let _: () = con.set(key, value).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> anyhow::Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let _: () = con.del(key).await?;
        Ok(())
    }
}

/// Typed access to the configuration document. Values are read fresh on every
/// call — nothing is cached across generation calls.
#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValue>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValue>) -> Self {
        Self { kv }
    }

    /// Loads the full settings document, filling defaults for absent keys.
    pub async fn load(&self) -> Result<SettingsData, AppError> {
        Ok(SettingsData {
            ai_provider: self
                .get_raw(KEY_AI_PROVIDER)
                .await?
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            api_keys: self.get_json(KEY_API_KEYS).await?.unwrap_or_default(),
            selected_model: self
                .get_raw(KEY_SELECTED_MODEL)
                .await?
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            default_settings: self
                .get_json(KEY_DEFAULT_SETTINGS)
                .await?
                .unwrap_or_default(),
            custom_prompt: self.get_raw(KEY_CUSTOM_PROMPT).await?.unwrap_or_default(),
            auto_inject: self.get_json(KEY_AUTO_INJECT).await?.unwrap_or(false),
        })
    }

    /// Persists the full settings document under the per-key layout.
    /// `selectedText` is ephemeral and untouched by a settings save.
    pub async fn save(&self, data: &SettingsData) -> Result<(), AppError> {
        self.set_raw(KEY_AI_PROVIDER, &data.ai_provider).await?;
        self.set_json(KEY_API_KEYS, &data.api_keys).await?;
        self.set_raw(KEY_SELECTED_MODEL, &data.selected_model)
            .await?;
        self.set_json(KEY_DEFAULT_SETTINGS, &data.default_settings)
            .await?;
        self.set_raw(KEY_CUSTOM_PROMPT, &data.custom_prompt).await?;
        self.set_json(KEY_AUTO_INJECT, &data.auto_inject).await?;
        Ok(())
    }

    /// Assembles the provider selection for one generation call: selected
    /// provider, its key from the per-provider map (empty when unset), and
    /// the selected model.
    pub async fn provider_config(&self) -> Result<ProviderConfig, AppError> {
        let provider = self
            .get_raw(KEY_AI_PROVIDER)
            .await?
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let api_keys: BTreeMap<String, String> =
            self.get_json(KEY_API_KEYS).await?.unwrap_or_default();
        let api_key = api_keys.get(&provider).cloned().unwrap_or_default();
        let model = self
            .get_raw(KEY_SELECTED_MODEL)
            .await?
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(ProviderConfig {
            provider,
            api_key,
            model,
        })
    }

    /// Default style settings applied when a generate request carries none.
    pub async fn proposal_defaults(&self) -> Result<ProposalSettings, AppError> {
        Ok(self
            .get_json(KEY_DEFAULT_SETTINGS)
            .await?
            .unwrap_or_default())
    }

    pub async fn custom_prompt(&self) -> Result<String, AppError> {
        Ok(self.get_raw(KEY_CUSTOM_PROMPT).await?.unwrap_or_default())
    }

    pub async fn auto_inject(&self) -> Result<bool, AppError> {
        Ok(self.get_json(KEY_AUTO_INJECT).await?.unwrap_or(false))
    }

    /// Stashes text captured from a host-page selection.
    pub async fn stash_selection(&self, text: &str) -> Result<(), AppError> {
        self.set_raw(KEY_SELECTED_TEXT, text).await
    }

    /// Takes the stashed selection, deleting it. Consumed exactly once: a
    /// second take returns `None`.
    pub async fn take_selection(&self) -> Result<Option<String>, AppError> {
        let text = self.get_raw(KEY_SELECTED_TEXT).await?;
        if text.is_some() {
            self.kv
                .del(KEY_SELECTED_TEXT)
                .await
                .map_err(|e| AppError::Store(e.to_string()))?;
        }
        Ok(text)
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, AppError> {
        self.kv
            .get(key)
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.kv
            .set(key, value)
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, AppError> {
        match self.get_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::Store(format!("corrupt value under '{key}': {e}"))),
            None => Ok(None),
        }
    }

    async fn set_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Store(format!("cannot encode value for '{key}': {e}")))?;
        self.set_raw(key, &raw).await
    }
}
