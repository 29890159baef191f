use serde_json::{json, Value};

use crate::catalog::Category;

/// Instruction for turning a free-text request into one listing.
pub fn product_instruction(user_prompt: &str) -> String {
    let labels: Vec<&str> = Category::GENERATABLE.iter().map(|c| c.label()).collect();
    let (last, rest) = match labels.split_last() {
        Some((last, rest)) => (*last, rest.join(", ")),
        None => ("", String::new()),
    };
    format!(
        "Generate a futuristic digital product listing based on this user request: \"{prompt}\".\n\
         The product should be one of: {rest}, or {last}.\n\
         Use the category codes {codes}.\n\
         Return JSON only.",
        prompt = user_prompt.trim(),
        rest = rest,
        last = last,
        codes = Category::GENERATABLE
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// JSON Schema for a generated listing.
pub fn entry_schema() -> Value {
    let codes: Vec<&str> = Category::GENERATABLE.iter().map(|c| c.code()).collect();
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "price": { "type": "number" },
            "category": { "type": "string", "enum": codes },
            "tags": { "type": "array", "items": { "type": "string" } },
            "originSignature": {
                "type": "string",
                "description": "A unique alphanumeric code like DNA-XXX-YYY"
            }
        },
        "required": ["title", "description", "price", "category", "tags", "originSignature"]
    })
}

pub fn log_summary_instruction(lines: &[String]) -> String {
    format!(
        "Analyze these system logs and provide a 1-sentence futuristic status report \
         formatted like a command terminal output: {}",
        lines.join("\n")
    )
}
