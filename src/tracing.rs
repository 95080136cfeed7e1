//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging render
//! passes and pointer state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=collate::interaction=debug` - module-level filtering
//! - `RUST_LOG=collate::typeset=trace` - includes skipped (unmapped) glyphs
//!
//! # Log Files
//!
//! Logs are written to `~/.config/collate/logs/collate.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::interaction::InteractionState;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "collate.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of interaction state for diffing around an update
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSnapshot {
    pub state: InteractionState,
    pub placements_version: u64,
    pub generation: u64,
}

impl InteractionSnapshot {
    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &InteractionSnapshot) -> Option<String> {
        let mut changes = Vec::new();
        if self.state != other.state {
            changes.push(format!("{} → {}", self.state.name(), other.state.name()));
        }
        if self.placements_version != other.placements_version {
            changes.push(format!(
                "placements v{} → v{}",
                self.placements_version, other.placements_version
            ));
        }
        if self.generation != other.generation {
            changes.push(format!("render #{}", other.generation));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
