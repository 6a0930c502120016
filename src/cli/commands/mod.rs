//! Subcommand implementations.

/// API key management command handlers.
pub mod api_key;

/// Cache maintenance command handler.
pub mod cache;

/// Whole-document translation command handler.
pub mod document;

/// Line-by-line file translation command handler.
pub mod translate;
