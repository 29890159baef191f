use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Provider;
use crate::errors::{NexusError, NexusResult};
use crate::wire::GenerationRequest;

/// Google `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(client: Client, api_base: String, model: String, api_key: String) -> Self {
        Self { client, api_base, model, api_key }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<PartIn<'a>>,
}

#[derive(Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentOut>,
}

#[derive(Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini's schema dialect: upper-case type names, no `additionalProperties`.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| k.as_str() != "additionalProperties")
                .map(|(k, v)| {
                    let v = match (k.as_str(), v) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(v),
                    };
                    (k.clone(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn send(&self, req: &GenerationRequest) -> NexusResult<String> {
        let url = self.url();
        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts: vec![PartIn { text: &req.instruction }] }],
            generation_config: req.response_schema.as_ref().map(|s| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: to_gemini_schema(s),
            }),
        };

        tracing::debug!(
            %url,
            body = %serde_json::to_string(&body).unwrap_or_default(),
            "gemini request"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, raw = %text, "gemini response");

        if !status.is_success() {
            return Err(NexusError::Status { status: status.as_u16(), body: text });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| NexusError::Malformed(format!("gemini envelope: {e}")))?;

        let content: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(NexusError::EmptyBody);
        }
        Ok(content)
    }
}
