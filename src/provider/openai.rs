use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::Provider;
use crate::errors::{NexusError, NexusResult};
use crate::wire::GenerationRequest;

/// OpenAI-compatible chat-completions endpoint. The instruction goes out as a
/// single user message; when a schema is requested it is appended to the
/// message and the response is forced to a JSON object.
pub struct OpenAIProvider {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, api_base: String, model: String, api_key: String) -> Self {
        Self { client, api_base, model, api_key }
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn send(&self, req: &GenerationRequest) -> NexusResult<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let content = match &req.response_schema {
            Some(schema) => format!(
                "{}\n\nThe JSON object must match this JSON Schema:\n{}",
                req.instruction, schema
            ),
            None => req.instruction.clone(),
        };

        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": content }
            ],
            "temperature": 0.7,
        });
        if req.wants_json() {
            body["response_format"] = json!({ "type": "json_object" });
        }

        tracing::debug!(%url, body = %body, "openai request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, raw = %text, "openai response");

        if !status.is_success() {
            return Err(NexusError::Status { status: status.as_u16(), body: text });
        }

        // Minimal structs to parse the chat response
        #[derive(Deserialize)]
        struct ChatMessage {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChatMessage,
        }
        #[derive(Deserialize)]
        struct ChatResponse {
            #[serde(default)]
            choices: Vec<Choice>,
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| NexusError::Malformed(format!("openai envelope: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(NexusError::EmptyBody)
    }
}
