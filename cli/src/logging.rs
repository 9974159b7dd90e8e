//! Tracing setup for the `hyperlink` binary.
//!
//! Two rules drive everything here. First, stdout belongs to the
//! deliverable — a minted link, an address, a `--json` blob — so every
//! log line goes to stderr, where a shell pipeline won't accidentally
//! capture it next to a URL that spends money. Second, the protocol
//! library only ever logs public keys, and this module keeps it that way
//! by staying a formatting concern: no events are created here.
//!
//! Filtering follows the usual `RUST_LOG` directive syntax, e.g.
//! `RUST_LOG=hyperlink_cli=debug,hyperlink_protocol=debug`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for a person at a terminal.
    Pretty,
    /// JSON lines for anything that parses its logs.
    Json,
}

impl LogFormat {
    /// Parse a format name, defaulting to `Pretty` for anything that is
    /// not recognizably "json". A typo in a log flag should never stop
    /// someone from minting a link.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. Once per process, before any command
/// runs; a second call panics, which is the desired way to learn about it.
///
/// `default_level` applies when `RUST_LOG` is unset; the env var wins
/// otherwise.
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_thread_ids(false),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }
}
