use super::{CatalogEntry, Category};

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    title: &str,
    description: &str,
    price: f64,
    category: Category,
    size: &str,
    tags: &[&str],
    signature: &str,
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price,
        category,
        size: Some(size.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image_url: format!("https://picsum.photos/400/400?random={id}"),
        origin_signature: signature.to_string(),
        created_by: None,
    }
}

/// Listings present at process start, newest first.
pub fn seed_entries() -> Vec<CatalogEntry> {
    vec![
        seed(
            "1",
            "Crypto Spreadsheet Pro",
            "Multi-chain portfolio tracker with live formulas and tax-lot views.",
            49.99,
            Category::Spreadsheet,
            "12MB",
            &["finance", "excel"],
            "DNA-7X2-QF9",
        ),
        seed(
            "2",
            "Neon Genesis Logo Bundle",
            "400 vector marks rendered in synthwave and holographic palettes.",
            129.00,
            Category::LogoBundle,
            "400GB",
            &["branding", "vector", "cyberpunk"],
            "DNA-1K8-ZZ3",
        ),
        seed(
            "3",
            "Prompt Engineering Codex",
            "Field-tested prompt chains for research, coding and copywriting agents.",
            29.00,
            Category::LlmPrompt,
            "3MB",
            &["llm", "prompts", "productivity"],
            "DNA-4P0-LM5",
        ),
        seed(
            "4",
            "Quantum Wealth Advisory",
            "Monthly allocation signals from an ensemble of forecasting models.",
            499.00,
            Category::FinancialService,
            "SaaS",
            &["finance", "advisory"],
            "DNA-9Q1-WA7",
        ),
        seed(
            "5",
            "The Autonomous Founder",
            "An ebook on running a company staffed by agents.",
            19.99,
            Category::Ebook,
            "8MB",
            &["ebook", "startup"],
            "DNA-3E6-AF2",
        ),
        seed(
            "6",
            "Sentinel-7B Fine-Tune",
            "Instruction-tuned small model for fraud triage.",
            899.00,
            Category::AiModel,
            "14GB",
            &["model", "security", "ai"],
            "DNA-8M7-SN1",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_unattributed() {
        let seeds = seed_entries();
        let ids: HashSet<_> = seeds.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), seeds.len());
        assert!(seeds.iter().all(|e| e.created_by.is_none()));
    }
}
