//! Log output for the `edupulse` binary.
//!
//! Library code only emits `tracing` events. Storage fallbacks and failed
//! writes are reported at `warn`, so they show up at the default verbosity;
//! mutations and store lifecycle are `debug`, request payload sizes `trace`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much the binary reports on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings, which include out-of-sync storage.
    #[default]
    Normal,
    /// Every mutation (`-v`).
    Verbose,
    /// Text service traffic as well (`-vv`).
    Trace,
}

impl Verbosity {
    /// Resolve the `-q` flag and the `-v` count. `-q` wins.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level shown.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive for this crate's events, e.g. `edupulse=warn`.
    #[must_use]
    pub fn directive(self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.level()).to_lowercase()
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG`, when set, replaces the directive derived from `verbosity`.
/// Listings go to stdout, so they stay pipeable.
///
/// # Examples
///
/// ```no_run
/// use edupulse::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    // a second call keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}

/// Route warnings into the test harness output.
///
/// Any test may call this; only the first call installs a subscriber.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
