//! Core deck types for tango.
//!
//! The serialized field names follow the collection document layout
//! (`createdAt`, `lastStudied`), so decks written by earlier versions of the
//! app load unchanged.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a card within its deck.
pub type CardId = u32;

/// The subject a deck belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The hiragana syllabary.
    Hiragana,
    /// The katakana syllabary.
    Katakana,
    /// Kanji characters.
    Kanji,
    /// General vocabulary.
    #[default]
    Vocabulary,
    /// Common phrases.
    Phrases,
    /// Grammar points.
    Grammar,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Self::Hiragana,
        Self::Katakana,
        Self::Kanji,
        Self::Vocabulary,
        Self::Phrases,
        Self::Grammar,
    ];

    /// The stored value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
            Self::Kanji => "kanji",
            Self::Vocabulary => "vocabulary",
            Self::Phrases => "phrases",
            Self::Grammar => "grammar",
        }
    }

    /// Human-readable label used by the creation form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hiragana => "Hiragana",
            Self::Katakana => "Katakana",
            Self::Kanji => "Kanji",
            Self::Vocabulary => "Vocabulary",
            Self::Phrases => "Common Phrases",
            Self::Grammar => "Grammar",
        }
    }

    /// Single glyph shown next to a deck in the catalog.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Hiragana => "あ",
            Self::Katakana => "ア",
            Self::Kanji => "漢",
            Self::Vocabulary => "単",
            Self::Phrases => "会",
            Self::Grammar => "文",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected one of: hiragana, katakana, kanji, vocabulary, phrases, grammar)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// One Japanese/romaji/English triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Identifier, unique within the deck only.
    pub id: CardId,
    /// Japanese text (front face).
    pub japanese: String,
    /// Romanized reading; empty when not provided.
    #[serde(default)]
    pub romaji: String,
    /// English meaning (back face).
    pub english: String,
    /// Whether the card was marked as known in the current session.
    #[serde(default)]
    pub known: bool,
}

impl Card {
    /// Create an unknown card.
    #[must_use]
    pub fn new(
        id: CardId,
        japanese: impl Into<String>,
        romaji: impl Into<String>,
        english: impl Into<String>,
    ) -> Self {
        Self {
            id,
            japanese: japanese.into(),
            romaji: romaji.into(),
            english: english.into(),
            known: false,
        }
    }

    /// Romaji, if any was given.
    #[must_use]
    pub fn romaji(&self) -> Option<&str> {
        let romaji = self.romaji.trim();
        (!romaji.is_empty()).then_some(romaji)
    }
}

/// A named, categorized collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    /// Slug identifier assigned by the store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Subject of the deck.
    pub category: Category,
    /// Cards in study order.
    pub cards: Vec<Card>,
    /// When the deck was created.
    pub created_at: DateTime<Utc>,
    /// When the deck was last studied. Nothing writes this yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<DateTime<Utc>>,
}

impl Deck {
    /// Attach an identifier to a deck definition.
    #[must_use]
    pub fn from_new(id: String, new_deck: NewDeck) -> Self {
        Self {
            id,
            name: new_deck.name,
            description: new_deck.description,
            category: new_deck.category,
            cards: new_deck.cards,
            created_at: new_deck.created_at,
            last_studied: new_deck.last_studied,
        }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// A deck as submitted to the store, before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeck {
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Subject of the deck.
    pub category: Category,
    /// Cards in study order.
    pub cards: Vec<Card>,
    /// When the deck was created.
    pub created_at: DateTime<Utc>,
    /// When the deck was last studied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<DateTime<Utc>>,
}

/// Fields to merge into an existing deck. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<Category>,
    /// Replacement card list.
    pub cards: Option<Vec<Card>>,
    /// New last-studied timestamp.
    pub last_studied: Option<DateTime<Utc>>,
}

impl DeckUpdate {
    /// Whether the update carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.cards.is_none()
            && self.last_studied.is_none()
    }

    /// Merge the present fields into `deck`. The identifier never changes.
    pub fn apply_to(self, deck: &mut Deck) {
        if let Some(name) = self.name {
            deck.name = name;
        }
        if let Some(description) = self.description {
            deck.description = description;
        }
        if let Some(category) = self.category {
            deck.category = category;
        }
        if let Some(cards) = self.cards {
            deck.cards = cards;
        }
        if let Some(last_studied) = self.last_studied {
            deck.last_studied = Some(last_studied);
        }
    }
}

/// The decks written into an empty collection on first access.
#[must_use]
pub fn sample_decks(now: DateTime<Utc>) -> Vec<Deck> {
    let greetings = [
        ("こんにちは", "Konnichiwa", "Hello"),
        ("おはようございます", "Ohayou gozaimasu", "Good morning"),
        ("こんばんは", "Konbanwa", "Good evening"),
        ("さようなら", "Sayounara", "Goodbye"),
        ("ありがとう", "Arigatou", "Thank you"),
        ("すみません", "Sumimasen", "Excuse me / Sorry"),
        ("はじめまして", "Hajimemashite", "Nice to meet you"),
        ("お元気ですか", "O-genki desu ka", "How are you?"),
        ("元気です", "Genki desu", "I'm fine"),
        ("またね", "Mata ne", "See you later"),
    ];
    let hiragana = [
        ("あ", "a", "a as in father"),
        ("い", "i", "i as in machine"),
        ("う", "u", "u as in rule"),
        ("え", "e", "e as in pet"),
        ("お", "o", "o as in note"),
    ];

    vec![
        Deck {
            id: "basic-greetings".to_string(),
            name: "Basic Greetings".to_string(),
            description: "Essential Japanese greetings for everyday conversations".to_string(),
            category: Category::Phrases,
            cards: numbered_cards(&greetings),
            created_at: now,
            last_studied: None,
        },
        Deck {
            id: "hiragana-basics".to_string(),
            name: "Hiragana Basics".to_string(),
            description: "Learn the fundamental Japanese hiragana characters".to_string(),
            category: Category::Hiragana,
            cards: numbered_cards(&hiragana),
            created_at: now,
            last_studied: None,
        },
    ]
}

fn numbered_cards(rows: &[(&str, &str, &str)]) -> Vec<Card> {
    (1..)
        .zip(rows)
        .map(|(id, (japanese, romaji, english))| Card::new(id, *japanese, *romaji, *english))
        .collect()
}
