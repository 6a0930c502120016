use anyhow::Result;
use inquire::Confirm;

use crate::cache::{SqliteStore, TranslationStore};
use crate::ui::{Style, handle_prompt_cancellation};

/// Removes all cached translations, prompting for confirmation unless
/// `yes` is set.
pub fn run_reset_cache(yes: bool) -> Result<()> {
    if yes {
        return reset();
    }

    handle_prompt_cancellation(|| {
        let confirmed = Confirm::new("Remove all cached translations?")
            .with_default(false)
            .prompt()?;

        if confirmed {
            reset()
        } else {
            println!("Cache left untouched.");
            Ok(())
        }
    })
}

fn reset() -> Result<()> {
    let mut store = SqliteStore::open_default()?;
    store.reset_all()?;
    println!("{}", Style::success("The cache has been cleared"));
    Ok(())
}
