//! Interactive study screen.
//!
//! Reads one command per line and redraws the current card after each one.
//! Input and output are generic so the loop runs the same against a terminal
//! or an in-memory buffer.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::card_view::FlipCard;
use crate::config::StudyConfig;
use crate::deck::Deck;
use crate::session::StudySession;

const HELP: &str = "\
Commands:
  n        next unknown card
  p        previous unknown card
  f, Enter flip the card
  k        mark as known
  s        shuffle
  r        reset progress
  q        quit
  ?        show this help";

/// A parsed line of study input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyCommand {
    /// Go to the next unknown card.
    Next,
    /// Go to the previous unknown card.
    Prev,
    /// Turn the card over.
    Flip,
    /// Mark the card as known.
    Known,
    /// Shuffle the working set.
    Shuffle,
    /// Clear progress.
    Reset,
    /// Leave the session.
    Quit,
    /// Print the command list.
    Help,
    /// Anything else.
    Unknown(String),
}

impl StudyCommand {
    /// Parse one input line. An empty line flips the card.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Prev,
            "" | "f" | "flip" => Self::Flip,
            "k" | "known" => Self::Known,
            "s" | "shuffle" => Self::Shuffle,
            "r" | "reset" => Self::Reset,
            "q" | "quit" | "exit" => Self::Quit,
            "?" | "h" | "help" => Self::Help,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// What the session looked like when the user left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudySummary {
    /// Cards marked as known.
    pub known: usize,
    /// Cards in the deck.
    pub total: usize,
}

/// Study screen for one deck.
#[derive(Debug, Clone)]
pub struct StudyScreen {
    name: String,
    description: String,
    session: StudySession,
    view: FlipCard,
}

impl StudyScreen {
    /// Open a study screen over a copy of the deck's cards.
    #[must_use]
    pub fn new(deck: &Deck, config: &StudyConfig) -> Self {
        let mut session = StudySession::for_deck(deck);
        if config.shuffle_on_start {
            session.shuffle();
        }
        Self {
            name: deck.name.clone(),
            description: deck.description.clone(),
            session,
            view: FlipCard::new(config.show_romaji),
        }
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    /// The card view state.
    #[must_use]
    pub fn view(&self) -> &FlipCard {
        &self.view
    }

    /// Apply a command. Returns `false` when the user asked to quit.
    pub fn apply(&mut self, command: &StudyCommand) -> bool {
        debug!("Study command {:?}", command);
        match command {
            StudyCommand::Next => {
                self.view.turn_front();
                self.session.advance();
            }
            StudyCommand::Prev => {
                self.view.turn_front();
                self.session.retreat();
            }
            StudyCommand::Flip => self.view.flip(),
            StudyCommand::Known => {
                if self.session.mark_current_known() {
                    self.view.turn_front();
                }
            }
            StudyCommand::Shuffle => {
                self.view.turn_front();
                self.session.shuffle();
            }
            StudyCommand::Reset => {
                self.view.turn_front();
                self.session.reset();
            }
            StudyCommand::Quit => return false,
            StudyCommand::Help | StudyCommand::Unknown(_) => {}
        }
        true
    }

    /// Progress line and the showing face of the current card.
    #[must_use]
    pub fn render(&self) -> String {
        let Some(card) = self.session.current_card() else {
            return "This deck has no cards.".to_string();
        };

        let mut out = format!(
            "Progress: {:.0}% · Cards remaining: {} / {}\n\n{}\n",
            self.session.progress().round(),
            self.session.remaining(),
            self.session.len(),
            self.view.render(card)
        );
        if self.session.is_complete() {
            out.push_str("\nAll cards known! r to start over, q to quit.\n");
        }
        out
    }

    /// Run the loop until `q` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> io::Result<StudySummary> {
        writeln!(output, "{}", self.name)?;
        if !self.description.is_empty() {
            writeln!(output, "{}", self.description)?;
        }
        writeln!(output, "(? for help)\n")?;

        let mut line = String::new();
        loop {
            writeln!(output, "{}", self.render())?;
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let command = StudyCommand::parse(&line);
            match &command {
                StudyCommand::Help => writeln!(output, "{HELP}\n")?,
                StudyCommand::Unknown(other) => {
                    writeln!(output, "Unknown command '{other}' (? for help)\n")?;
                }
                _ => {}
            }
            if !self.apply(&command) {
                break;
            }
        }

        let summary = StudySummary {
            known: self.session.known_count(),
            total: self.session.len(),
        };
        writeln!(output, "Known {} of {} cards.", summary.known, summary.total)?;
        Ok(summary)
    }
}
