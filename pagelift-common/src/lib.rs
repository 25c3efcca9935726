//! Common types shared across the Pagelift workspace.
//!
//! This crate defines the shared error type, the output-format enum used by
//! the CLI and the formatter, and the centralised tracing initialisation. It
//! is intentionally lightweight so every crate can depend on it without
//! pulling in the browser or parsing stacks.
use serde::{Deserialize, Serialize};

pub mod observability;

/// Output encoding for the formatted extraction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
}

/// Error types used across the Pagelift workspace.
#[derive(thiserror::Error, Debug)]
pub enum PageliftError {
    /// The browser driver reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Navigation exceeded the configured timeout.
    #[error("page load timed out")]
    Timeout,
}

/// Convenient alias for results that use [`PageliftError`].
pub type Result<T> = std::result::Result<T, PageliftError>;
