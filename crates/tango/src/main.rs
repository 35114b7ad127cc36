//! `tango` - CLI for Japanese vocabulary flashcards
//!
//! This binary wires the configuration, the deck store and the study screen
//! to the command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::{debug, warn};

use tango::cli::{
    Cli, Command, ConfigCommand, CreateCommand, DeleteCommand, ShowCommand, StatusCommand,
    StudyCommandArgs, UpdateCommand,
};
use tango::storage::{MemoryDocumentStore, SqliteDocumentStore};
use tango::{catalog, init_logging, Config, Deck, DeckForm, DeckRepository, DeckStore, DeckUpdate};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
        command => {
            let store = open_store(&config, cli.ephemeral);
            run(&store, &config, command).await
        }
    }
}

async fn run(store: &DeckStore, config: &Config, command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::List(cmd) => {
            let decks = store.list_all().await;
            println!("{}", catalog::render(&decks, cmd.format.into(), Utc::now())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Show(cmd) => handle_show(store, &cmd).await,
        Command::Create(cmd) => handle_create(store, config, cmd).await,
        Command::Study(cmd) => handle_study(store, config, &cmd).await,
        Command::Update(cmd) => handle_update(store, cmd).await,
        Command::Delete(cmd) => handle_delete(store, &cmd).await,
        Command::Status(cmd) => handle_status(store, config, &cmd),
        Command::Config(_) => unreachable!("config commands are handled before the store opens"),
    }
}

/// Open the configured backend. A database that cannot be opened leaves the
/// store unavailable rather than aborting, so reads come back empty.
fn open_store(config: &Config, ephemeral: bool) -> DeckStore {
    let store = if ephemeral {
        debug!("Using in-memory deck storage");
        DeckStore::new(Arc::new(MemoryDocumentStore::new()))
    } else {
        let path = config.database_path();
        match SqliteDocumentStore::open(&path) {
            Ok(backend) => DeckStore::new(Arc::new(backend)),
            Err(e) => {
                warn!("Deck storage unavailable at {}: {}", path.display(), e);
                DeckStore::unavailable()
            }
        }
    };
    store.with_seed_samples(config.storage.seed_samples)
}

fn deck_not_found() -> ExitCode {
    eprintln!("Deck not found");
    ExitCode::FAILURE
}

async fn handle_show(store: &DeckStore, cmd: &ShowCommand) -> anyhow::Result<ExitCode> {
    let Some(deck) = store.get(&cmd.id).await else {
        return Ok(deck_not_found());
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}  {}", deck.category.icon(), deck.name);
    if !deck.description.is_empty() {
        println!("{}", deck.description);
    }
    println!();
    println!("  Id:           {}", deck.id);
    println!("  Category:     {}", deck.category.label());
    println!("  Cards:        {}", deck.card_count());
    println!(
        "  Last studied: {}",
        catalog::format_last_studied(deck.last_studied, Utc::now())
    );
    println!();
    for card in &deck.cards {
        match card.romaji() {
            Some(romaji) => println!("  {} ({}) - {}", card.japanese, romaji, card.english),
            None => println!("  {} - {}", card.japanese, card.english),
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_create(
    store: &DeckStore,
    config: &Config,
    cmd: CreateCommand,
) -> anyhow::Result<ExitCode> {
    let rows = cmd
        .cards
        .into_iter()
        .zip(1..)
        .map(|(card, id)| card.into_draft(id))
        .collect();

    let mut form = DeckForm::with_rows(rows);
    form.name = cmd.name;
    form.description = cmd.description;
    form.category = cmd.category.into();

    let id = match form.submit(store).await {
        Ok(id) => id,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("Created deck {id}");

    if !cmd.study {
        return Ok(ExitCode::SUCCESS);
    }
    match store.get(&id).await {
        Some(deck) => study(&deck, config, false),
        None => Ok(deck_not_found()),
    }
}

async fn handle_study(
    store: &DeckStore,
    config: &Config,
    cmd: &StudyCommandArgs,
) -> anyhow::Result<ExitCode> {
    match store.get(&cmd.id).await {
        Some(deck) => study(&deck, config, cmd.shuffle),
        None => Ok(deck_not_found()),
    }
}

fn study(deck: &Deck, config: &Config, shuffle: bool) -> anyhow::Result<ExitCode> {
    let mut study_config = config.study.clone();
    study_config.shuffle_on_start |= shuffle;

    let mut screen = tango::StudyScreen::new(deck, &study_config);
    let summary = screen.run(io::stdin().lock(), io::stdout().lock())?;
    debug!(
        "Left deck {} with {} of {} known",
        deck.id, summary.known, summary.total
    );
    Ok(ExitCode::SUCCESS)
}

async fn handle_update(store: &DeckStore, cmd: UpdateCommand) -> anyhow::Result<ExitCode> {
    let update = DeckUpdate {
        name: cmd.name,
        description: cmd.description,
        category: cmd.category.map(Into::into),
        ..DeckUpdate::default()
    };
    if update.is_empty() {
        println!("Nothing to update. Pass --name, --description or --category.");
        return Ok(ExitCode::SUCCESS);
    }

    if store.update(&cmd.id, update).await {
        println!("Updated deck {}", cmd.id);
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(deck_not_found())
    }
}

async fn handle_delete(store: &DeckStore, cmd: &DeleteCommand) -> anyhow::Result<ExitCode> {
    if !cmd.yes {
        println!("This will permanently delete deck {}.", cmd.id);
        println!("Use --yes to confirm.");
        return Ok(ExitCode::SUCCESS);
    }

    if store.delete(&cmd.id).await {
        println!("Deleted deck {}", cmd.id);
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(deck_not_found())
    }
}

fn handle_status(
    store: &DeckStore,
    config: &Config,
    cmd: &StatusCommand,
) -> anyhow::Result<ExitCode> {
    let (health, deck_count) = match store.try_read() {
        Ok(Some(decks)) => ("ok".to_string(), decks.len()),
        Ok(None) => ("ok (no decks saved yet)".to_string(), 0),
        Err(e) => (e.to_string(), 0),
    };
    let location = store
        .location()
        .unwrap_or_else(|| config.database_path().display().to_string());

    if cmd.json {
        let status = serde_json::json!({
            "available": store.is_available(),
            "location": location,
            "decks": deck_count,
            "health": health,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("tango status");
        println!("------------");
        println!("Storage:  {location}");
        println!(
            "Backend:  {}",
            if store.is_available() { "available" } else { "unavailable" }
        );
        println!("Decks:    {deck_count}");
        println!("Health:   {health}");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:    {}", config.database_path().display());
                println!("  Seed samples:     {}", config.storage.seed_samples);
                println!();
                println!("[Study]");
                println!("  Shuffle on start: {}", config.study.shuffle_on_start);
                println!("  Show romaji:      {}", config.study.show_romaji);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
