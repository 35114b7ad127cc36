//! Deck creation form.
//!
//! Holds the draft deck while it is being edited, validates it, and submits
//! it to a [`DeckRepository`]. Validation failures never reach the store.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::deck::{Card, CardId, Category, NewDeck};
use crate::store::DeckRepository;

/// A problem with the draft, shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The deck name is blank.
    #[error("Deck name is required")]
    NameRequired,

    /// At least one card lacks Japanese or English text.
    #[error("All cards must have Japanese and English content")]
    CardFieldsRequired,

    /// Tried to remove the only remaining card row.
    #[error("You need at least one card in the deck")]
    LastCard,

    /// No row with the given id.
    #[error("No card row with id {0}")]
    UnknownRow(CardId),

    /// The store did not accept the deck.
    #[error("Failed to create deck. Please try again.")]
    CreateFailed,
}

/// Which text field of a card row to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    /// Japanese text.
    Japanese,
    /// Romaji reading.
    Romaji,
    /// English meaning.
    English,
}

/// One card row of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardDraft {
    /// Row identifier; becomes the card id.
    pub id: CardId,
    /// Japanese text.
    pub japanese: String,
    /// Optional romaji.
    pub romaji: String,
    /// English meaning.
    pub english: String,
}

impl CardDraft {
    fn empty(id: CardId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn is_complete(&self) -> bool {
        !self.japanese.trim().is_empty() && !self.english.trim().is_empty()
    }
}

/// State of the deck creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckForm {
    /// Deck name.
    pub name: String,
    /// Deck description.
    pub description: String,
    /// Deck category.
    pub category: Category,
    rows: Vec<CardDraft>,
    error: Option<FormError>,
}

impl Default for DeckForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckForm {
    /// A blank form with two empty card rows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: Category::default(),
            rows: vec![CardDraft::empty(1), CardDraft::empty(2)],
            error: None,
        }
    }

    /// A form pre-filled with the given rows. An empty list yields one blank
    /// row so the form always has something to edit.
    #[must_use]
    pub fn with_rows(rows: Vec<CardDraft>) -> Self {
        let rows = if rows.is_empty() {
            vec![CardDraft::empty(1)]
        } else {
            rows
        };
        Self {
            rows,
            ..Self::new()
        }
    }

    /// The card rows in order.
    #[must_use]
    pub fn rows(&self) -> &[CardDraft] {
        &self.rows
    }

    /// The message from the last failed action, if any.
    #[must_use]
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Append an empty row and return its id.
    pub fn add_row(&mut self) -> CardId {
        let id = self.rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        self.rows.push(CardDraft::empty(id));
        id
    }

    /// Remove the row with the given id. The last remaining row cannot be
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::LastCard`] when only one row is left.
    pub fn remove_row(&mut self, id: CardId) -> Result<(), FormError> {
        if self.rows.len() <= 1 {
            return Err(self.fail(FormError::LastCard));
        }
        self.rows.retain(|row| row.id != id);
        self.error = None;
        Ok(())
    }

    /// Set one text field of a row.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownRow`] if no row has the given id.
    pub fn set_card_field(
        &mut self,
        id: CardId,
        field: CardField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return Err(FormError::UnknownRow(id));
        };
        let value = value.into();
        match field {
            CardField::Japanese => row.japanese = value,
            CardField::Romaji => row.romaji = value,
            CardField::English => row.english = value,
        }
        Ok(())
    }

    /// Check the draft and build the deck to store.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> Result<NewDeck, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        if !self.rows.iter().all(CardDraft::is_complete) {
            return Err(FormError::CardFieldsRequired);
        }

        let cards = self
            .rows
            .iter()
            .map(|row| Card::new(row.id, &row.japanese, &row.romaji, &row.english))
            .collect();

        Ok(NewDeck {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category,
            cards,
            created_at: Utc::now(),
            last_studied: None,
        })
    }

    /// Validate and hand the deck to `store`, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, or
    /// [`FormError::CreateFailed`] if the store returned no identifier.
    pub async fn submit<R>(&mut self, store: &R) -> Result<String, FormError>
    where
        R: DeckRepository + ?Sized,
    {
        let deck = match self.validate() {
            Ok(deck) => deck,
            Err(e) => return Err(self.fail(e)),
        };
        self.error = None;

        let id = store.create(deck).await;
        if id.is_empty() {
            warn!("Deck store returned no identifier for '{}'", self.name);
            return Err(self.fail(FormError::CreateFailed));
        }
        debug!("Form submitted as deck {}", id);
        Ok(id)
    }

    fn fail(&mut self, error: FormError) -> FormError {
        self.error = Some(error.clone());
        error
    }
}
