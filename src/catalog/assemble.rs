use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{CatalogEntry, Category};
use crate::wire::PartialEntry;

pub const DEFAULT_TITLE: &str = "Unknown Asset";
pub const DEFAULT_DESCRIPTION: &str = "No description data.";
pub const DEFAULT_PRICE: f64 = 99.00;
pub const DEFAULT_TAGS: [&str; 2] = ["AI", "Generated"];
pub const DEFAULT_SIZE: &str = "400GB";
pub const CREATED_BY: &str = "Cortana-Live-Agent-X";

/// Build a complete listing from untrusted generator output, stamped now.
pub fn assemble(partial: PartialEntry) -> CatalogEntry {
    let token = Uuid::new_v4().simple().to_string();
    assemble_at(partial, Utc::now(), &token[..8])
}

/// Per-field defaulting. Pure: the clock and uniqueness token are inputs.
pub fn assemble_at(partial: PartialEntry, now: DateTime<Utc>, token: &str) -> CatalogEntry {
    let millis = now.timestamp_millis();
    let unique = format!("{millis}-{token}");

    CatalogEntry {
        id: format!("gen-{unique}"),
        title: non_blank(partial.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: non_blank(partial.description)
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        price: partial
            .price
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(DEFAULT_PRICE),
        category: partial.category.unwrap_or_default(),
        size: Some(DEFAULT_SIZE.to_string()),
        tags: partial
            .tags
            .unwrap_or_else(|| DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()),
        image_url: format!("https://picsum.photos/400/400?random={unique}"),
        origin_signature: non_blank(partial.origin_signature)
            .unwrap_or_else(|| format!("DNA-{millis}")),
        created_by: Some(CREATED_BY.to_string()),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
    }

    fn full() -> PartialEntry {
        PartialEntry {
            title: Some("Holo Ledger".into()),
            description: Some("Ledger for holograms.".into()),
            price: Some(12.5),
            category: Some(Category::Spreadsheet),
            tags: Some(vec!["finance".into()]),
            origin_signature: Some("DNA-AAA-BBB".into()),
        }
    }

    #[test]
    fn complete_partial_is_copied_verbatim() {
        let e = assemble_at(full(), now(), "deadbeef");
        assert_eq!(e.id, "gen-1700000000123-deadbeef");
        assert_eq!(e.title, "Holo Ledger");
        assert_eq!(e.description, "Ledger for holograms.");
        assert_eq!(e.price, 12.5);
        assert_eq!(e.category, Category::Spreadsheet);
        assert_eq!(e.tags, vec!["finance".to_string()]);
        assert_eq!(e.origin_signature, "DNA-AAA-BBB");
        assert_eq!(e.image_url, "https://picsum.photos/400/400?random=1700000000123-deadbeef");
        assert_eq!(e.created_by.as_deref(), Some(CREATED_BY));
    }

    #[test]
    fn missing_title_defaults() {
        let e = assemble_at(PartialEntry { title: None, ..full() }, now(), "t");
        assert_eq!(e.title, DEFAULT_TITLE);
        let e = assemble_at(PartialEntry { title: Some("   ".into()), ..full() }, now(), "t");
        assert_eq!(e.title, DEFAULT_TITLE);
        assert_eq!(e.description, "Ledger for holograms.");
    }

    #[test]
    fn missing_description_defaults() {
        let e = assemble_at(PartialEntry { description: None, ..full() }, now(), "t");
        assert_eq!(e.description, DEFAULT_DESCRIPTION);
        assert_eq!(e.title, "Holo Ledger");
    }

    #[test]
    fn invalid_price_defaults() {
        for bad in [None, Some(-1.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let e = assemble_at(PartialEntry { price: bad, ..full() }, now(), "t");
            assert_eq!(e.price, DEFAULT_PRICE);
        }
        let e = assemble_at(PartialEntry { price: Some(0.0), ..full() }, now(), "t");
        assert_eq!(e.price, 0.0);
    }

    #[test]
    fn missing_category_defaults_to_logo_bundle() {
        let e = assemble_at(PartialEntry { category: None, ..full() }, now(), "t");
        assert_eq!(e.category, Category::LogoBundle);
    }

    #[test]
    fn missing_tags_default_but_empty_tags_stay() {
        let e = assemble_at(PartialEntry { tags: None, ..full() }, now(), "t");
        assert_eq!(e.tags, vec!["AI".to_string(), "Generated".to_string()]);
        let e = assemble_at(PartialEntry { tags: Some(vec![]), ..full() }, now(), "t");
        assert!(e.tags.is_empty());
    }

    #[test]
    fn missing_signature_is_time_based() {
        let e = assemble_at(PartialEntry { origin_signature: None, ..full() }, now(), "t");
        assert_eq!(e.origin_signature, "DNA-1700000000123");
    }

    #[test]
    fn fresh_assemblies_get_distinct_ids() {
        let a = assemble(full());
        let b = assemble(full());
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("gen-"));
    }
}
