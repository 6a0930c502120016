use anyhow::Result;

use crate::config::ConfigManager;
use crate::ui::Style;

pub fn run_set_api_key(api_key: &str) -> Result<()> {
    ConfigManager::new()?.store_api_key(api_key)?;
    println!("The API key has been stored for future API calls.");
    Ok(())
}

pub fn run_show_api_key() -> Result<()> {
    match ConfigManager::new()?.stored_api_key() {
        Some(key) => println!("Registered API key: {}", Style::value(key)),
        None => println!(
            "The API key is not set. Use {} to register one.",
            Style::code("dlb set-api-key")
        ),
    }
    Ok(())
}

pub fn run_clear_api_key() -> Result<()> {
    ConfigManager::new()?.store_api_key("")?;
    println!("The API key has been cleared.");
    Ok(())
}
