//! Diagnostic logging.
//!
//! Cards and prompts own stdout, so every log line is written to stderr.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty the binary is, as chosen by `-q` and `-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    /// No flag: warnings too. Anything louder would scroll the card away.
    #[default]
    Normal,
    /// `-v`: store reads and writes, study commands.
    Verbose,
    /// `-vv`: everything.
    Trace,
}

impl Verbosity {
    /// Lowest level that gets printed.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn directive(self) -> String {
        format!("tango={}", self.to_level_filter())
    }
}

/// Install the global subscriber. A `RUST_LOG` value wins over `verbosity`.
///
/// Only the first call has any effect.
///
/// ```no_run
/// use tango::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

/// Route logs through the test harness so they show up only for failures.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
