//! Deck persistence.
//!
//! The whole collection lives in one JSON document under [`COLLECTION_KEY`].
//! Every operation reads the full document, changes it in memory and writes
//! it back. The read-modify-write cycle is not atomic; a second writer on the
//! same database could lose updates.
//!
//! Operations never return errors. A missing backend or a failing one
//! degrades to an empty or negative result and is logged.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::deck::{sample_decks, Deck, DeckUpdate, NewDeck};
use crate::error::{Error, Result};
use crate::storage::DocumentStore;

/// Key of the collection document.
pub const COLLECTION_KEY: &str = "japaneseFlashcardDecks";

/// Number of trailing clock digits appended to a deck slug.
const ID_SUFFIX_DIGITS: usize = 4;

/// Asynchronous deck CRUD.
#[async_trait]
pub trait DeckRepository: Send + Sync {
    /// All decks in collection order.
    async fn list_all(&self) -> Vec<Deck>;

    /// The deck with the given identifier, if any.
    async fn get(&self, id: &str) -> Option<Deck>;

    /// Store a new deck and return its identifier.
    ///
    /// Returns an empty string when no backend is available.
    async fn create(&self, deck: NewDeck) -> String;

    /// Merge `update` into the deck with the given identifier.
    async fn update(&self, id: &str, update: DeckUpdate) -> bool;

    /// Remove the deck with the given identifier.
    async fn delete(&self, id: &str) -> bool;
}

/// [`DeckRepository`] over a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct DeckStore {
    backend: Option<Arc<dyn DocumentStore>>,
    seed_samples: bool,
}

impl DeckStore {
    /// Create a store writing to `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend: Some(backend),
            seed_samples: true,
        }
    }

    /// Create a store with no backend; every operation degrades.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            backend: None,
            seed_samples: true,
        }
    }

    /// Enable or disable seeding the sample decks into an empty collection.
    #[must_use]
    pub fn with_seed_samples(mut self, seed_samples: bool) -> Self {
        self.seed_samples = seed_samples;
        self
    }

    /// Whether a backend is attached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Where the collection lives, if anywhere.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.location())
    }

    fn backend(&self) -> Result<&dyn DocumentStore> {
        self.backend.as_deref().ok_or(Error::StorageUnavailable)
    }

    /// Read the collection as stored, without seeding. `None` means the
    /// collection has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is attached, the backend fails, or the
    /// document is not a valid deck array.
    pub fn try_read(&self) -> Result<Option<Vec<Deck>>> {
        match self.backend()?.get(COLLECTION_KEY)? {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    /// Read the collection, seeding it on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is attached, the backend fails, or the
    /// document is not a valid deck array.
    pub fn try_load(&self) -> Result<Vec<Deck>> {
        match self.try_read()? {
            Some(decks) => Ok(decks),
            None if self.seed_samples => {
                let decks = sample_decks(Utc::now());
                self.try_save(&decks)?;
                info!("Seeded {} sample decks", decks.len());
                Ok(decks)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Write the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is attached or the write fails.
    pub fn try_save(&self, decks: &[Deck]) -> Result<()> {
        let backend = self.backend()?;
        let document = serde_json::to_string(decks)?;
        backend.put(COLLECTION_KEY, &document)?;
        debug!("Saved {} decks", decks.len());
        Ok(())
    }

    fn load_or_log(&self) -> Option<Vec<Deck>> {
        match self.try_load() {
            Ok(decks) => Some(decks),
            Err(Error::StorageUnavailable) => None,
            Err(e) => {
                warn!("Failed to load decks: {}", e);
                None
            }
        }
    }

    fn save_or_log(&self, decks: &[Deck]) -> bool {
        match self.try_save(decks) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save decks: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl DeckRepository for DeckStore {
    async fn list_all(&self) -> Vec<Deck> {
        self.load_or_log().unwrap_or_default()
    }

    async fn get(&self, id: &str) -> Option<Deck> {
        self.load_or_log()?.into_iter().find(|deck| deck.id == id)
    }

    async fn create(&self, deck: NewDeck) -> String {
        let Some(mut decks) = self.load_or_log() else {
            return String::new();
        };

        let id = deck_id(&deck.name, Utc::now().timestamp_millis());
        decks.push(Deck::from_new(id.clone(), deck));

        // The id is returned even when the write fails.
        if self.save_or_log(&decks) {
            info!("Created deck {}", id);
        }
        id
    }

    async fn update(&self, id: &str, update: DeckUpdate) -> bool {
        let Some(mut decks) = self.load_or_log() else {
            return false;
        };
        let Some(deck) = decks.iter_mut().find(|deck| deck.id == id) else {
            debug!("Update for unknown deck {}", id);
            return false;
        };

        update.apply_to(deck);
        self.save_or_log(&decks)
    }

    async fn delete(&self, id: &str) -> bool {
        let Some(decks) = self.load_or_log() else {
            return false;
        };
        let before = decks.len();
        let remaining: Vec<Deck> = decks.into_iter().filter(|deck| deck.id != id).collect();

        if remaining.len() == before {
            debug!("Delete for unknown deck {}", id);
            return false;
        }
        let saved = self.save_or_log(&remaining);
        if saved {
            info!("Deleted deck {}", id);
        }
        saved
    }
}

/// Lowercase `name` and collapse every run of characters outside `[a-z0-9]`
/// into a single `-`, without leading or trailing separators.
#[must_use]
pub fn slugify(name: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM.get_or_init(|| Regex::new("[^a-z0-9]+").expect("valid slug pattern"));

    pattern
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Build a deck identifier from its name and a millisecond timestamp.
///
/// The suffix is the last four digits of the timestamp, so two decks with the
/// same name created a multiple of ten seconds apart collide.
#[must_use]
pub fn deck_id(name: &str, timestamp_millis: i64) -> String {
    let digits = timestamp_millis.to_string();
    let suffix = &digits[digits.len().saturating_sub(ID_SUFFIX_DIGITS)..];
    format!("{}-{}", slugify(name), suffix)
}
