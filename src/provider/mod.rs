use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::NexusResult;
use crate::wire::GenerationRequest;

pub mod gemini;
pub mod openai;

/// A generation-capable endpoint. Returns the raw text the model produced;
/// interpreting it is the caller's job.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, req: &GenerationRequest) -> NexusResult<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config, api_key: String) -> Result<DynProvider> {
    let client = Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let base = cfg.api_base().to_string();

    match cfg.provider {
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiProvider::new(
            client,
            base,
            cfg.model.clone(),
            api_key,
        ))),
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(
            client,
            base,
            cfg.model.clone(),
            api_key,
        ))),
    }
}
