use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tokio_util::sync::CancellationToken;

use crate::cache::SqliteStore;
use crate::config;
use crate::translation::{
    BatchProgress, DeepLBackend, FileOptions, OutputFormat, TranslationProcessor,
    validate_source_language, validate_target_language,
};
use crate::ui::Style;

pub struct TranslateOptions {
    pub input: String,
    pub output: String,
    pub api_key: Option<String>,
    pub batch_size: usize,
    pub source_language: Option<String>,
    pub target_language: String,
    pub ignore_cache: bool,
    pub no_api_requests: bool,
    pub export: bool,
    pub delimiter: Option<char>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let api_key = resolve_api_key(options.api_key.as_deref())?;

    if let Some(source) = &options.source_language {
        validate_source_language(source)?;
    }
    validate_target_language(&options.target_language)?;

    if options.source_language.is_none() && !options.ignore_cache {
        bail!(
            "A source language must be set for the translation cache to be used.\n\
             Provide --source-language or pass --ignore-cache to skip cache lookups."
        );
    }

    let format = output_format(&options)?;

    let store = SqliteStore::open_default()?;
    let backend = DeepLBackend::new(
        api_key,
        options.source_language.clone(),
        options.target_language.clone(),
    );
    let processor = TranslationProcessor::new(store, backend, options.ignore_cache);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let file_options = FileOptions {
        chunk_size: options.batch_size,
        no_backend_requests: options.no_api_requests,
        format,
    };

    let bar = progress_bar();
    let on_progress = |progress: &BatchProgress| {
        bar.set_length(progress.total_items as u64);
        bar.set_position(progress.start_line as u64);
        bar.set_message(format!(
            "processing lines {} - {}",
            progress.start_line, progress.end_line
        ));
    };

    let result = processor
        .translate_file(
            Path::new(&options.input),
            Path::new(&options.output),
            &file_options,
            on_progress,
            &cancel,
        )
        .await;

    match result {
        Ok(summary) => {
            bar.finish_and_clear();
            println!("{}", Style::success("Translation completed"));
            println!(
                "{} lines written to {} ({} characters sent to DeepL)",
                summary.line_count, options.output, summary.characters_sent
            );
            Ok(())
        }
        Err(error) if error.is_cancelled() => {
            bar.finish_and_clear();
            println!("{}", Style::warning("Translation cancelled"));
            Ok(())
        }
        Err(error) => {
            bar.abandon();
            Err(error.into())
        }
    }
}

pub fn resolve_api_key(cli_key: Option<&str>) -> Result<String> {
    if let Some(key) = config::resolve_api_key(cli_key) {
        return Ok(key);
    }

    bail!(
        "No API key found\n\n\
         Provide one via:\n  \
         - CLI option: --api-key <key>\n  \
         - Environment: export {}=<key>\n  \
         - Stored: dlb set-api-key <key>",
        config::API_KEY_ENV
    )
}

fn output_format(options: &TranslateOptions) -> Result<OutputFormat> {
    if !options.export {
        return Ok(OutputFormat::Plain);
    }

    let delimiter = options.delimiter.unwrap_or('\t');
    if !delimiter.is_ascii() {
        bail!("The export delimiter must be a single ASCII character");
    }

    Ok(OutputFormat::Delimited {
        delimiter: delimiter as u8,
    })
}

#[allow(clippy::unwrap_used)]
fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    // unwrap is safe: template string is a compile-time constant
    bar.set_style(
        ProgressStyle::with_template("[{percent:>3}%] {bar:30.cyan/blue} {msg}").unwrap(),
    );
    bar
}
