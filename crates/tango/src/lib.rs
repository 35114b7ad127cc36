//! `tango` - Japanese vocabulary flashcards for the terminal
//!
//! This library holds the deck model, the persistent deck store, the study
//! session controller and the text views the `tango` binary drives.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod card_view;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod deck;
pub mod error;
pub mod form;
pub mod logging;
pub mod session;
pub mod storage;
pub mod store;
pub mod study;

pub use card_view::{Face, FlipCard};
pub use config::Config;
pub use deck::{Card, CardId, Category, Deck, DeckUpdate, NewDeck};
pub use error::{Error, Result};
pub use form::{DeckForm, FormError};
pub use logging::init_logging;
pub use session::StudySession;
pub use storage::DocumentStore;
pub use store::{DeckRepository, DeckStore};
pub use study::StudyScreen;
