//! API key configuration and persistence.

mod manager;

pub use manager::{API_KEY_ENV, ConfigFile, ConfigManager, resolve_api_key};
