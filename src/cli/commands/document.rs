use anyhow::Result;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use super::translate::resolve_api_key;
use crate::cache::SqliteStore;
use crate::translation::{
    DeepLBackend, TranslationProcessor, validate_source_language, validate_target_language,
};
use crate::ui::{Spinner, Style};

pub struct DocumentOptions {
    pub input: String,
    pub output: String,
    pub api_key: Option<String>,
    pub source_language: Option<String>,
    pub target_language: String,
}

/// Runs a whole-document translation.
///
/// Documents are billed by DeepL at a minimum of 50,000 characters and
/// generally take seconds, but can take minutes under server load; the
/// operation stays cancellable the whole time.
pub async fn run_document(options: DocumentOptions) -> Result<()> {
    let api_key = resolve_api_key(options.api_key.as_deref())?;

    if let Some(source) = &options.source_language {
        validate_source_language(source)?;
    }
    validate_target_language(&options.target_language)?;

    let store = SqliteStore::open_default()?;
    let backend = DeepLBackend::new(
        api_key,
        options.source_language.clone(),
        options.target_language.clone(),
    );
    let processor = TranslationProcessor::new(store, backend, false);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let spinner = Spinner::new("Translating document... (Ctrl-C to cancel)");
    let result = processor
        .translate_document(
            Path::new(&options.input),
            Path::new(&options.output),
            &cancel,
        )
        .await;
    spinner.stop();

    match result {
        Ok(()) => {
            println!("{}", Style::success("Document translation completed"));
            println!("Written to {}", options.output);
            Ok(())
        }
        Err(error) if error.is_cancelled() => {
            println!("{}", Style::warning("Document translation cancelled"));
            println!("Note: the DeepL side may still complete and bill the document.");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}
