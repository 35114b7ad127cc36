//! Deck catalog rendering.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::deck::{Category, Deck};
use crate::error::Result;

/// How the catalog is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFormat {
    /// One block per deck.
    #[default]
    Plain,
    /// Aligned columns.
    Table,
    /// JSON array of deck summaries.
    Json,
}

/// The catalog entry for one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    /// Deck identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: Category,
    /// Number of cards.
    pub card_count: usize,
    /// Last time the deck was studied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<DateTime<Utc>>,
}

impl From<&Deck> for DeckSummary {
    fn from(deck: &Deck) -> Self {
        Self {
            id: deck.id.clone(),
            name: deck.name.clone(),
            description: deck.description.clone(),
            category: deck.category,
            card_count: deck.card_count(),
            last_studied: deck.last_studied,
        }
    }
}

/// Describe how long ago a deck was studied.
#[must_use]
pub fn format_last_studied(last_studied: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last) = last_studied else {
        return "Never studied".to_string();
    };

    // Clock skew can put `last` in the future.
    match (now - last).num_days() {
        days if days <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days if days < 7 => format!("{days} days ago"),
        days if days < 30 => format!("{} weeks ago", days / 7),
        days => format!("{} months ago", days / 30),
    }
}

/// Category name with a leading capital, as shown on catalog badges.
#[must_use]
pub fn category_badge(category: Category) -> String {
    let name = category.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the catalog.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(decks: &[Deck], format: CatalogFormat, now: DateTime<Utc>) -> Result<String> {
    match format {
        CatalogFormat::Plain => Ok(render_plain(decks, now)),
        CatalogFormat::Table => Ok(render_table(decks, now)),
        CatalogFormat::Json => {
            let summaries: Vec<DeckSummary> = decks.iter().map(DeckSummary::from).collect();
            Ok(serde_json::to_string_pretty(&summaries)?)
        }
    }
}

fn render_plain(decks: &[Deck], now: DateTime<Utc>) -> String {
    if decks.is_empty() {
        return empty_hint();
    }

    let mut out = String::from("Your Decks\n==========\n");
    for deck in decks {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}  {}  [{}]",
            deck.category.icon(),
            deck.name,
            category_badge(deck.category)
        );
        if !deck.description.is_empty() {
            let _ = writeln!(out, "    {}", deck.description);
        }
        let _ = writeln!(
            out,
            "    {} cards · {}",
            deck.card_count(),
            format_last_studied(deck.last_studied, now)
        );
        let _ = writeln!(out, "    study: tango study {}", deck.id);
    }
    let _ = write!(out, "\nCreate a deck: tango create --name <NAME> --card <JAPANESE|ROMAJI|ENGLISH>");
    out
}

fn render_table(decks: &[Deck], now: DateTime<Utc>) -> String {
    if decks.is_empty() {
        return empty_hint();
    }

    let id_width = decks
        .iter()
        .map(|d| d.id.chars().count())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = decks
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!(
        "{:<id_width$}  {:<name_width$}  {:<10}  {:>5}  LAST STUDIED",
        "ID", "NAME", "CATEGORY", "CARDS"
    );
    for deck in decks {
        let _ = write!(
            out,
            "\n{:<id_width$}  {:<name_width$}  {:<10}  {:>5}  {}",
            deck.id,
            deck.name,
            deck.category.as_str(),
            deck.card_count(),
            format_last_studied(deck.last_studied, now)
        );
    }
    out
}

fn empty_hint() -> String {
    "No decks yet. Create one with: tango create --name <NAME> --card <JAPANESE|ROMAJI|ENGLISH>"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::sample_decks;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2024-06-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_format_last_studied() {
        let now = now();
        assert_eq!(format_last_studied(None, now), "Never studied");
        assert_eq!(format_last_studied(Some(now - Duration::hours(3)), now), "Today");
        assert_eq!(format_last_studied(Some(now - Duration::days(1)), now), "Yesterday");
        assert_eq!(format_last_studied(Some(now - Duration::days(4)), now), "4 days ago");
        assert_eq!(format_last_studied(Some(now - Duration::days(15)), now), "2 weeks ago");
        assert_eq!(format_last_studied(Some(now - Duration::days(65)), now), "2 months ago");
    }

    #[test]
    fn test_future_last_studied_reads_today() {
        let now = now();
        assert_eq!(format_last_studied(Some(now + Duration::days(2)), now), "Today");
    }

    #[test]
    fn test_category_badge() {
        assert_eq!(category_badge(Category::Phrases), "Phrases");
        assert_eq!(category_badge(Category::Kanji), "Kanji");
    }

    #[test]
    fn test_render_plain() {
        let decks = sample_decks(now());
        let text = render(&decks, CatalogFormat::Plain, now()).unwrap();

        assert!(text.contains("会  Basic Greetings  [Phrases]"));
        assert!(text.contains("10 cards · Never studied"));
        assert!(text.contains("tango study hiragana-basics"));
        assert!(text.contains("tango create"));
    }

    #[test]
    fn test_render_table() {
        let decks = sample_decks(now());
        let text = render(&decks, CatalogFormat::Table, now()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("basic-greetings"));
        assert!(lines[2].contains("hiragana"));
    }

    #[test]
    fn test_render_json() {
        let decks = sample_decks(now());
        let text = render(&decks, CatalogFormat::Json, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["id"], "basic-greetings");
        assert_eq!(value[0]["cardCount"], 10);
        assert_eq!(value[1]["category"], "hiragana");
        assert!(value[0].get("lastStudied").is_none());
    }

    #[test]
    fn test_render_empty() {
        for format in [CatalogFormat::Plain, CatalogFormat::Table] {
            let text = render(&[], format, now()).unwrap();
            assert!(text.starts_with("No decks yet"));
        }
        assert_eq!(render(&[], CatalogFormat::Json, now()).unwrap(), "[]");
    }
}
