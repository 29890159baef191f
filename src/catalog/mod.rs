use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

mod assemble;
mod seed;

pub use assemble::{assemble, assemble_at, CREATED_BY, DEFAULT_PRICE, DEFAULT_TAGS};
pub use seed::seed_entries;

/// Closed set of listing categories. Serialized with the upper-snake wire codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Ebook,
    Spreadsheet,
    #[default]
    LogoBundle,
    LlmPrompt,
    FinancialService,
    AiModel,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ebook,
        Category::Spreadsheet,
        Category::LogoBundle,
        Category::LlmPrompt,
        Category::FinancialService,
        Category::AiModel,
    ];

    /// Categories the generator is allowed to produce.
    pub const GENERATABLE: [Category; 5] = [
        Category::Ebook,
        Category::Spreadsheet,
        Category::LogoBundle,
        Category::LlmPrompt,
        Category::FinancialService,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::Ebook => "EBOOK",
            Category::Spreadsheet => "SPREADSHEET",
            Category::LogoBundle => "LOGO_BUNDLE",
            Category::LlmPrompt => "LLM_PROMPT",
            Category::FinancialService => "FINANCIAL_SERVICE",
            Category::AiModel => "AI_MODEL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Ebook => "Ebook",
            Category::Spreadsheet => "Spreadsheet",
            Category::LogoBundle => "Logo Bundle",
            Category::LlmPrompt => "LLM Prompt",
            Category::FinancialService => "Financial Service",
            Category::AiModel => "AI Model",
        }
    }

    /// Lenient parse: accepts wire codes and human labels in any case,
    /// with spaces or dashes in place of underscores.
    pub fn parse(raw: &str) -> Option<Category> {
        let norm: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        Category::ALL.into_iter().find(|c| c.code() == norm)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One listing in the marketplace. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub tags: Vec<String>,
    pub image_url: String,
    pub origin_signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl CatalogEntry {
    /// Case-insensitive substring match on the title or any tag.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// In-memory listing store, newest first.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: VecDeque<CatalogEntry>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the built-in seed listings.
    pub fn seeded() -> Self {
        Self::from_entries(seed_entries())
    }

    /// Keeps the given order: the first element is the head of the store.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries: entries.into() }
    }

    /// Prepends `entry`. No deduplication; id uniqueness is the creator's job.
    pub fn insert(&mut self, entry: CatalogEntry) {
        tracing::info!(id = %entry.id, title = %entry.title, "catalog insert");
        self.entries.push_front(entry);
    }

    /// Entries whose title or tags contain `query`, ignoring case, in store order.
    pub fn list(&self, query: &str) -> Vec<&CatalogEntry> {
        let needle = query.to_lowercase();
        self.entries.iter().filter(|e| e.matches(&needle)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, tags: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            title: title.into(),
            description: "desc".into(),
            price: 10.0,
            category: Category::Ebook,
            size: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: format!("https://picsum.photos/400/400?random={id}"),
            origin_signature: format!("DNA-{id}"),
            created_by: None,
        }
    }

    fn ids(v: &[&CatalogEntry]) -> Vec<String> {
        v.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn empty_query_lists_everything_in_store_order() {
        let store = CatalogStore::from_entries(vec![
            entry("a", "Alpha", &[]),
            entry("b", "Beta", &["x"]),
            entry("c", "Gamma", &["y"]),
        ]);
        assert_eq!(ids(&store.list("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn insert_prepends() {
        let mut store = CatalogStore::from_entries(vec![entry("seed", "Seed", &[])]);
        store.insert(entry("e1", "First", &[]));
        store.insert(entry("e2", "Second", &[]));
        assert_eq!(ids(&store.list("")), vec!["e2", "e1", "seed"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn list_matches_title_or_tag_ignoring_case() {
        let store = CatalogStore::from_entries(vec![
            entry("a", "Crypto Spreadsheet Pro", &["finance", "excel"]),
            entry("b", "Neon Logo Pack", &["Branding", "CYBER"]),
            entry("c", "Prompt Codex", &["llm"]),
        ]);
        assert_eq!(ids(&store.list("CRYPTO")), vec!["a"]);
        assert_eq!(ids(&store.list("cyber")), vec!["b"]);
        // unanchored substring inside a tag
        assert_eq!(ids(&store.list("ranD")), vec!["b"]);
        // substring inside a title word
        assert_eq!(ids(&store.list("eads")), vec!["a"]);
    }

    #[test]
    fn description_is_not_searched() {
        let mut e = entry("a", "Alpha", &[]);
        e.description = "hidden quasar".into();
        let store = CatalogStore::from_entries(vec![e]);
        assert!(store.list("quasar").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let store = CatalogStore::seeded();
        assert!(store.list("zzz-no-match").is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut store = CatalogStore::new();
        store.insert(entry("same", "Twin", &[]));
        store.insert(entry("same", "Twin", &[]));
        assert_eq!(store.list("twin").len(), 2);
    }

    #[test]
    fn category_parse_is_lenient() {
        assert_eq!(Category::parse("LOGO_BUNDLE"), Some(Category::LogoBundle));
        assert_eq!(Category::parse("logo bundle"), Some(Category::LogoBundle));
        assert_eq!(Category::parse(" Financial-Service "), Some(Category::FinancialService));
        assert_eq!(Category::parse("AI_MODEL"), Some(Category::AiModel));
        assert_eq!(Category::parse("HOLOGRAM"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn category_serializes_as_wire_code() {
        let s = serde_json::to_string(&Category::LlmPrompt).unwrap();
        assert_eq!(s, "\"LLM_PROMPT\"");
    }
}
