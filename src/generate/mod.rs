use anyhow::Result;
use std::time::Duration;
use uuid::Uuid;

use crate::catalog::Category;
use crate::config::Config;
use crate::credential::try_get_credential;
use crate::errors::{NexusError, NexusResult};
use crate::prompt;
use crate::provider::{make_provider, DynProvider};
use crate::wire::{GenerationRequest, PartialEntry};

pub const SIMULATION_TITLE_CHARS: usize = 20;
pub const SIMULATION_PRICE: f64 = 99.99;
pub const SIMULATION_TAGS: [&str; 3] = ["Simulation", "Neural-Model", "Predictive"];
pub const SIMULATION_DESCRIPTION: &str =
    "Simulation mode: no generation credential is configured, so this asset was \
     synthesized locally without contacting the neural network.";

/// Turns prompts into partial listings. With no credential configured it
/// runs in simulation mode and never touches the network.
pub struct GenerationClient {
    provider: Option<DynProvider>,
    timeout: Duration,
    simulated_latency: Duration,
}

impl GenerationClient {
    /// Looks up the credential named in `cfg`; its absence selects simulation mode.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let provider = match try_get_credential(&cfg.credential_env) {
            Some(key) => Some(make_provider(cfg, key)?),
            None => {
                tracing::warn!(
                    env = %cfg.credential_env,
                    "no generation credential; running in simulation mode"
                );
                None
            }
        };
        Ok(Self::new(provider, cfg))
    }

    pub fn new(provider: Option<DynProvider>, cfg: &Config) -> Self {
        Self {
            provider,
            timeout: Duration::from_secs(cfg.timeout_secs),
            simulated_latency: Duration::from_millis(cfg.simulated_latency_ms),
        }
    }

    pub fn is_simulated(&self) -> bool {
        self.provider.is_none()
    }

    /// One generation attempt. `None` means nothing usable came back; the
    /// cause has already been logged. No retry.
    pub async fn generate(&self, prompt: &str) -> Option<PartialEntry> {
        let Some(provider) = &self.provider else {
            return Some(self.simulate(prompt).await);
        };

        let req = GenerationRequest::structured(
            prompt::product_instruction(prompt),
            prompt::entry_schema(),
        );

        let outcome = self
            .send_with_timeout(provider, &req)
            .await
            .and_then(|text| PartialEntry::from_response_text(&text));

        match outcome {
            Ok(partial) => {
                tracing::debug!(?partial, "generation succeeded");
                Some(partial)
            }
            Err(e) => {
                tracing::error!(provider = provider.name(), error = %e, "generation failed");
                None
            }
        }
    }

    /// Raw text call for free-form requests. `None` in simulation mode.
    pub async fn complete(&self, req: &GenerationRequest) -> Option<NexusResult<String>> {
        let provider = self.provider.as_ref()?;
        Some(self.send_with_timeout(provider, req).await)
    }

    async fn send_with_timeout(
        &self,
        provider: &DynProvider,
        req: &GenerationRequest,
    ) -> NexusResult<String> {
        match tokio::time::timeout(self.timeout, provider.send(req)).await {
            Ok(res) => res,
            Err(_) => Err(NexusError::Timeout(format!(
                "no reply within {}s",
                self.timeout.as_secs()
            ))),
        }
    }

    async fn simulate(&self, prompt: &str) -> PartialEntry {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
        let record = simulated_entry(prompt);
        tracing::info!(title = ?record.title, "returning simulated record");
        record
    }
}

/// The deterministic part of a simulated record plus a random signature suffix.
pub fn simulated_entry(prompt: &str) -> PartialEntry {
    let prefix: String = prompt.trim().chars().take(SIMULATION_TITLE_CHARS).collect();
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();

    PartialEntry {
        title: Some(format!("Simulated: {prefix}...")),
        description: Some(SIMULATION_DESCRIPTION.to_string()),
        price: Some(SIMULATION_PRICE),
        category: Some(Category::LogoBundle),
        tags: Some(SIMULATION_TAGS.iter().map(|t| t.to_string()).collect()),
        origin_signature: Some(format!("SIM-{suffix}")),
    }
}
