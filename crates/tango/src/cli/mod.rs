//! Command-line interface for tango.
//!
//! This module provides the CLI structure for the `tango` binary. Handlers
//! live in the binary itself.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CardArg, CategoryArg, ConfigCommand, CreateCommand, DeleteCommand, ListCommand, OutputFormat,
    ShowCommand, StatusCommand, StudyCommandArgs, UpdateCommand,
};

/// tango - Japanese vocabulary flashcards
///
/// Keep decks of Japanese words and phrases and study them one card at a
/// time, marking the ones you already know.
#[derive(Debug, Parser)]
#[command(name = "tango")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Keep decks in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List your decks
    List(ListCommand),

    /// Show one deck and its cards
    Show(ShowCommand),

    /// Create a new deck
    Create(CreateCommand),

    /// Study a deck
    Study(StudyCommandArgs),

    /// Change a deck's name, description or category
    Update(UpdateCommand),

    /// Delete a deck
    Delete(DeleteCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "tango");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["tango", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["tango", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["tango", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["tango", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_list_format() {
        let cli = parse(&["tango", "list", "--format", "json"]);
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_create() {
        let cli = parse(&[
            "tango",
            "create",
            "--name",
            "Food",
            "--category",
            "phrases",
            "--card",
            "水|mizu|Water",
            "--card",
            "お茶|Tea",
            "--study",
        ]);
        match cli.command {
            Command::Create(cmd) => {
                assert_eq!(cmd.name, "Food");
                assert_eq!(cmd.category, CategoryArg::Phrases);
                assert_eq!(cmd.cards.len(), 2);
                assert_eq!(cmd.cards[1].english, "Tea");
                assert!(cmd.study);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_rejects_bad_card() {
        let result = Cli::try_parse_from(["tango", "create", "--name", "X", "--card", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_study() {
        let cli = parse(&["tango", "study", "basic-greetings", "--shuffle"]);
        match cli.command {
            Command::Study(cmd) => {
                assert_eq!(cmd.id, "basic-greetings");
                assert!(cmd.shuffle);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_update() {
        let cli = parse(&["tango", "update", "food-1234", "--category", "kanji"]);
        match cli.command {
            Command::Update(cmd) => {
                assert_eq!(cmd.id, "food-1234");
                assert_eq!(cmd.category, Some(CategoryArg::Kanji));
                assert!(cmd.name.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_and_status() {
        assert!(matches!(
            parse(&["tango", "delete", "x", "--yes"]).command,
            Command::Delete(DeleteCommand { yes: true, .. })
        ));
        assert!(matches!(
            parse(&["tango", "status", "--json"]).command,
            Command::Status(StatusCommand { json: true })
        ));
    }

    #[test]
    fn test_parse_config_subcommands() {
        assert!(matches!(
            parse(&["tango", "config", "path"]).command,
            Command::Config(ConfigCommand::Path)
        ));
        assert!(matches!(
            parse(&["tango", "config", "show", "--json"]).command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse(&["tango", "list", "-c", "/custom/config.toml", "--ephemeral"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(cli.ephemeral);
    }
}
