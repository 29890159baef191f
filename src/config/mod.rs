use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,
    pub provider: ProviderKind,
    pub model: String,
    /// Base URL of the generation endpoint; `None` uses the provider's public API.
    pub api_base: Option<String>,
    /// Environment variable holding the endpoint credential.
    pub credential_env: String,
    pub timeout_secs: u64,
    /// Artificial delay before a simulated record is returned.
    pub simulated_latency_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: "2025-10-01".into(),
            provider: ProviderKind::Gemini,
            model: "gemini-2.5-flash".into(),
            api_base: None,
            credential_env: "API_KEY".into(),
            timeout_secs: 30,
            simulated_latency_ms: 1_500,
        }
    }
}

impl Config {
    /// Defaults, overlaid with the TOML file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    pub fn api_base(&self) -> &str {
        match (&self.api_base, &self.provider) {
            (Some(base), _) => base.as_str(),
            (None, ProviderKind::Gemini) => "https://generativelanguage.googleapis.com",
            (None, ProviderKind::OpenAI) => "https://api.openai.com/v1",
        }
    }
}
