//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the blockprint tracing/logging system.
///
/// Reads `BLOCKPRINT_LOG` for per-module log levels, e.g.
/// `BLOCKPRINT_LOG=blockprint_analysis::dominance=debug,blockprint=info`.
/// Falls back to `blockprint=info` if unset or invalid. Output goes to stderr
/// so that JSON on stdout stays clean.
///
/// Idempotent; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("blockprint=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();

        if installed.is_err() {
            // Another subscriber (e.g. a test harness) already owns the global slot.
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
