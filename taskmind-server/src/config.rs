//! Server configuration assembled from CLI arguments and the optional chat
//! settings file.

use anyhow::{Context, Result};
use std::path::Path;
use taskmind_core::chat::completion::OpenRouterConfig;
use taskmind_types::ChatSettings;
use validator::Validate;

use crate::cli::ServeArgs;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: String,
    pub frontend_url: String,
    pub openrouter_api_key: String,
    pub base_url: String,
    pub chat: ChatSettings,
}

impl ServerConfig {
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let chat = match &args.chat_config {
            Some(path) => load_chat_settings(path)?,
            None => ChatSettings::default(),
        };

        let openrouter_api_key = args.openrouter_api_key.clone().unwrap_or_default();
        if openrouter_api_key.is_empty() {
            tracing::warn!("⚠️ OPENROUTER_API_KEY is not set; chat requests will fail upstream");
        }

        Ok(Self {
            port: args.port,
            bind: args.bind.clone(),
            frontend_url: args.frontend_url.clone(),
            openrouter_api_key,
            base_url: args.base_url.clone(),
            chat,
        })
    }

    pub fn openrouter(&self) -> OpenRouterConfig {
        OpenRouterConfig {
            base_url: self.base_url.clone(),
            api_key: self.openrouter_api_key.clone(),
            referer: self.chat.referer.clone(),
            title: self.chat.title.clone(),
            ..OpenRouterConfig::default()
        }
    }
}

pub fn load_chat_settings(path: &Path) -> Result<ChatSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chat settings from {}", path.display()))?;
    let settings: ChatSettings =
        serde_json::from_str(&content).context("Failed to parse chat settings JSON")?;
    settings.validate().context("Invalid chat settings")?;
    tracing::info!("📄 Loaded chat settings from {}", path.display());
    Ok(settings)
}
