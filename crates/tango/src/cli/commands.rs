//! CLI command definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Subcommand, ValueEnum};

use crate::catalog::CatalogFormat;
use crate::deck::Category;
use crate::form::CardDraft;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Deck identifier
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Create command arguments.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Deck name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// What the deck is for
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Deck category
    #[arg(short = 't', long, value_enum, default_value = "vocabulary")]
    pub category: CategoryArg,

    /// A card as "japanese|romaji|english" (romaji may be empty); repeatable
    #[arg(long = "card", value_name = "JAPANESE|ROMAJI|ENGLISH")]
    pub cards: Vec<CardArg>,

    /// Start studying the new deck right away
    #[arg(short, long)]
    pub study: bool,
}

/// Study command arguments.
#[derive(Debug, Args)]
pub struct StudyCommandArgs {
    /// Deck identifier
    pub id: String,

    /// Shuffle the cards before starting
    #[arg(short, long)]
    pub shuffle: bool,
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Deck identifier
    pub id: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New category
    #[arg(short = 't', long, value_enum)]
    pub category: Option<CategoryArg>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Deck identifier
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Hiragana
    Hiragana,
    /// Katakana
    Katakana,
    /// Kanji
    Kanji,
    /// Vocabulary
    Vocabulary,
    /// Common phrases
    Phrases,
    /// Grammar
    Grammar,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Hiragana => Self::Hiragana,
            CategoryArg::Katakana => Self::Katakana,
            CategoryArg::Kanji => Self::Kanji,
            CategoryArg::Vocabulary => Self::Vocabulary,
            CategoryArg::Phrases => Self::Phrases,
            CategoryArg::Grammar => Self::Grammar,
        }
    }
}

/// A card given on the command line.
///
/// Blank fields are accepted here; the creation form reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardArg {
    /// Japanese text.
    pub japanese: String,
    /// Romaji, possibly empty.
    pub romaji: String,
    /// English meaning.
    pub english: String,
}

impl FromStr for CardArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').collect();
        match parts.as_slice() {
            [japanese, english] => Ok(Self {
                japanese: japanese.trim().to_string(),
                romaji: String::new(),
                english: english.trim().to_string(),
            }),
            [japanese, romaji, english] => Ok(Self {
                japanese: japanese.trim().to_string(),
                romaji: romaji.trim().to_string(),
                english: english.trim().to_string(),
            }),
            _ => Err(format!(
                "expected \"japanese|romaji|english\" or \"japanese|english\", got \"{s}\""
            )),
        }
    }
}

impl CardArg {
    /// Turn the argument into a form row with the given id.
    #[must_use]
    pub fn into_draft(self, id: u32) -> CardDraft {
        CardDraft {
            id,
            japanese: self.japanese,
            romaji: self.romaji,
            english: self.english,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl From<OutputFormat> for CatalogFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Plain => Self::Plain,
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_arg_conversion() {
        assert_eq!(Category::from(CategoryArg::Kanji), Category::Kanji);
        assert_eq!(Category::from(CategoryArg::Phrases), Category::Phrases);
        assert_eq!(Category::from(CategoryArg::Vocabulary), Category::Vocabulary);
    }

    #[test]
    fn test_category_arg_covers_every_category() {
        let values = CategoryArg::value_variants();
        assert_eq!(values.len(), Category::ALL.len());
        for (arg, category) in values.iter().zip(Category::ALL) {
            assert_eq!(Category::from(*arg), category);
        }
    }

    #[test]
    fn test_card_arg_three_parts() {
        let card: CardArg = "水 | mizu | Water".parse().unwrap();
        assert_eq!(card.japanese, "水");
        assert_eq!(card.romaji, "mizu");
        assert_eq!(card.english, "Water");
    }

    #[test]
    fn test_card_arg_two_parts() {
        let card: CardArg = "お茶|Tea".parse().unwrap();
        assert_eq!(card.romaji, "");
        assert_eq!(card.english, "Tea");
    }

    #[test]
    fn test_card_arg_blank_english_is_parsed() {
        let card: CardArg = "猫|neko|".parse().unwrap();
        assert_eq!(card.english, "");
    }

    #[test]
    fn test_card_arg_rejects_bad_shape() {
        assert!("just one".parse::<CardArg>().is_err());
        assert!("a|b|c|d".parse::<CardArg>().is_err());
    }

    #[test]
    fn test_card_arg_into_draft() {
        let draft = "犬|inu|Dog".parse::<CardArg>().unwrap().into_draft(3);
        assert_eq!(draft.id, 3);
        assert_eq!(draft.english, "Dog");
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
        assert_eq!(CatalogFormat::from(OutputFormat::Table), CatalogFormat::Table);
    }
}
