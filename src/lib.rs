//! # dlb - Batching, Cached Translation CLI
//!
//! `dlb` translates text files line by line through the DeepL API. Lines
//! are sent in batches, duplicate strings are collapsed into a single API
//! request, and every translation is cached in a local SQLite database so
//! re-runs cost zero API characters.
//!
//! ## Quick Start
//!
//! ```bash
//! # Store the API key once
//! dlb set-api-key <your-key>
//!
//! # Translate a file from German to American English
//! dlb translate ./strings.txt ./strings.en.txt -s de -t en-us
//!
//! # Re-run for free: every line is served from the cache
//! dlb translate ./strings.txt ./strings.en.txt -s de -t en-us
//!
//! # Export source and translation side by side
//! dlb translate ./strings.txt ./strings.tsv -s de -t en-us --export
//!
//! # Translate a whole document (docx, pdf, ...)
//! dlb document ./report.docx ./report.en.docx -t en-us
//! ```
//!
//! ## Configuration
//!
//! The API key is resolved from `--api-key`, then the `DEEPL_AUTH_KEY`
//! environment variable, then `~/.config/dlb/config.toml`. The cache
//! lives at `~/.cache/dlb/translations.db`.

/// Translation cache persistence (SQLite).
pub mod cache;

/// Command-line interface definitions and handlers.
pub mod cli;

/// API key configuration and persistence.
pub mod config;

/// File system utilities.
pub mod fs;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// The translation engine: batching, dedup, cache reconciliation, and
/// the DeepL backend.
pub mod translation;

/// Terminal UI components (progress, spinner, colors).
pub mod ui;
