use clap::Parser;

use dlb_cli::cli::commands::{api_key, cache, document, translate};
use dlb_cli::cli::{Args, Command};
use dlb_cli::translation::print_languages;
use dlb_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Command::Translate {
            input,
            output,
            api_key,
            batch_size,
            source_language,
            target_language,
            ignore_cache,
            no_api_requests,
            export,
            delimiter,
        } => {
            translate::run_translate(translate::TranslateOptions {
                input,
                output,
                api_key,
                batch_size,
                source_language,
                target_language,
                ignore_cache,
                no_api_requests,
                export,
                delimiter,
            })
            .await
        }
        Command::Document {
            input,
            output,
            api_key,
            source_language,
            target_language,
        } => {
            document::run_document(document::DocumentOptions {
                input,
                output,
                api_key,
                source_language,
                target_language,
            })
            .await
        }
        Command::ResetCache { yes } => cache::run_reset_cache(yes),
        Command::SetApiKey { api_key } => api_key::run_set_api_key(&api_key),
        Command::ShowApiKey => api_key::run_show_api_key(),
        Command::ClearApiKey => api_key::run_clear_api_key(),
        Command::Languages => {
            print_languages();
            Ok(())
        }
    };

    if let Err(error) = result {
        // {:?} on anyhow renders the full cause chain.
        eprintln!("{} {error:?}", Style::error("Error:"));
        std::process::exit(exitcode::SOFTWARE);
    }
}
