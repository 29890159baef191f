use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::catalog::Category;
use crate::errors::{NexusError, NexusResult};

/// ========================================
/// Generation request / untrusted response
/// ========================================

/// Provider-neutral request: one instruction plus an optional JSON Schema
/// (standard lower-case dialect) the response must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn text(instruction: impl Into<String>) -> Self {
        Self { instruction: instruction.into(), response_schema: None }
    }

    pub fn structured(instruction: impl Into<String>, schema: Value) -> Self {
        Self { instruction: instruction.into(), response_schema: Some(schema) }
    }

    pub fn wants_json(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// A listing as returned by the generator. Every field may be missing;
/// defaults are applied by `catalog::assemble`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_signature: Option<String>,
}

impl PartialEntry {
    /// Parse generator output. The text must hold a JSON object (bare, or the
    /// first balanced `{...}` inside surrounding prose/fences). Individual
    /// fields with the wrong type are dropped rather than failing the record.
    pub fn from_response_text(text: &str) -> NexusResult<PartialEntry> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(NexusError::EmptyBody);
        }

        let value = match serde_json::from_str::<Value>(trimmed) {
            Ok(v) => v,
            Err(strict_err) => {
                let obj = extract_first_json_object(trimmed)
                    .ok_or_else(|| NexusError::Malformed(strict_err.to_string()))?;
                serde_json::from_str::<Value>(&obj)
                    .map_err(|e| NexusError::Malformed(e.to_string()))?
            }
        };

        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(NexusError::Malformed(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    fn from_map(map: &Map<String, Value>) -> PartialEntry {
        PartialEntry {
            title: field(map, &["title"]).and_then(Value::as_str).map(str::to_string),
            description: field(map, &["description"]).and_then(Value::as_str).map(str::to_string),
            price: field(map, &["price"]).and_then(Value::as_f64),
            category: field(map, &["category", "type"])
                .and_then(Value::as_str)
                .and_then(Category::parse),
            tags: field(map, &["tags"]).and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            origin_signature: field(map, &["originSignature", "dnaSignature"])
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

fn field<'a>(map: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|n| map.get(*n))
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Extracts the first top-level JSON object substring from a string.
/// Handles nested braces and braces inside string literals; returns None if not found.
pub fn extract_first_json_object(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut start = None;
    let mut depth = 0usize;
    let mut in_str = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_str {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_str = false;
            }
            continue;
        }
        match b {
            b'"' if start.is_some() => in_str = true,
            b'{' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(st) = start {
                        return Some(s[st..=i].to_string());
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// ========================================
/// Session log
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogSource {
    System,
    Network,
    AiAgent,
    Security,
}

impl LogSource {
    pub fn code(self) -> &'static str {
        match self {
            LogSource::System => "SYSTEM",
            LogSource::Network => "NETWORK",
            LogSource::AiAgent => "AI_AGENT",
            LogSource::Security => "SECURITY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub source: LogSource,
}

impl LogEntry {
    pub fn new(source: LogSource, message: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), timestamp: Utc::now(), message: message.into(), source }
    }

    /// Single terminal-style line, as fed to the summarizer.
    pub fn line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.source.code(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "title": "Holo Ledger",
        "description": "A ledger for holograms.",
        "price": 42.5,
        "category": "SPREADSHEET",
        "tags": ["finance", "holo"],
        "originSignature": "DNA-ABC-123"
    }"#;

    #[test]
    fn parses_full_object_exactly() {
        let p = PartialEntry::from_response_text(FULL).unwrap();
        assert_eq!(p.title.as_deref(), Some("Holo Ledger"));
        assert_eq!(p.description.as_deref(), Some("A ledger for holograms."));
        assert_eq!(p.price, Some(42.5));
        assert_eq!(p.category, Some(Category::Spreadsheet));
        assert_eq!(p.tags, Some(vec!["finance".to_string(), "holo".to_string()]));
        assert_eq!(p.origin_signature.as_deref(), Some("DNA-ABC-123"));
    }

    #[test]
    fn wrong_typed_fields_become_absent() {
        let p = PartialEntry::from_response_text(
            r#"{"title": 7, "price": "cheap", "category": "HOLOGRAM", "tags": "a,b"}"#,
        )
        .unwrap();
        assert_eq!(p, PartialEntry::default());
    }

    #[test]
    fn non_string_tags_are_dropped() {
        let p = PartialEntry::from_response_text(r#"{"tags": ["ok", 3, null, "fine"]}"#).unwrap();
        assert_eq!(p.tags, Some(vec!["ok".to_string(), "fine".to_string()]));
    }

    #[test]
    fn accepts_legacy_keys() {
        let p = PartialEntry::from_response_text(
            r#"{"type": "EBOOK", "dnaSignature": "DNA-OLD-001"}"#,
        )
        .unwrap();
        assert_eq!(p.category, Some(Category::Ebook));
        assert_eq!(p.origin_signature.as_deref(), Some("DNA-OLD-001"));
    }

    #[test]
    fn recovers_object_from_fenced_text() {
        let text = format!("Here you go:\n```json\n{FULL}\n```");
        let p = PartialEntry::from_response_text(&text).unwrap();
        assert_eq!(p.title.as_deref(), Some("Holo Ledger"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            PartialEntry::from_response_text("quantum interference"),
            Err(NexusError::Malformed(_))
        ));
        assert!(matches!(
            PartialEntry::from_response_text("{not json}"),
            Err(NexusError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(matches!(
            PartialEntry::from_response_text("[1, 2]"),
            Err(NexusError::Malformed(_))
        ));
    }

    #[test]
    fn empty_text_is_empty_body() {
        assert!(matches!(PartialEntry::from_response_text("  \n"), Err(NexusError::EmptyBody)));
    }

    #[test]
    fn extraction_ignores_braces_inside_strings() {
        let s = r#"noise {"title": "a } b", "n": {"x": 1}} tail"#;
        assert_eq!(
            extract_first_json_object(s).as_deref(),
            Some(r#"{"title": "a } b", "n": {"x": 1}}"#)
        );
        assert_eq!(extract_first_json_object("no braces"), None);
    }

    #[test]
    fn log_line_carries_source_code() {
        let e = LogEntry::new(LogSource::AiAgent, "hello");
        assert!(e.line().ends_with("AI_AGENT: hello"));
    }

    #[test]
    fn log_source_code_matches_wire_form() {
        for source in [
            LogSource::System,
            LogSource::Network,
            LogSource::AiAgent,
            LogSource::Security,
        ] {
            let wire = serde_json::to_string(&source).unwrap();
            assert_eq!(wire, format!("\"{}\"", source.code()));
        }
    }
}
