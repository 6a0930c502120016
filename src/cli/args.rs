use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dlb")]
#[command(about = "Batching, cached translation CLI for the DeepL API")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a file line by line, one translatable unit per line
    #[command(visible_alias = "t")]
    Translate {
        /// File to translate
        input: String,

        /// File the translated lines are written to
        output: String,

        /// DeepL API key; falls back to DEEPL_AUTH_KEY, then the stored key
        #[arg(short = 'a', long)]
        api_key: Option<String>,

        /// Number of lines to send in a single DeepL API call
        #[arg(short = 'b', long, default_value_t = 500)]
        batch_size: usize,

        /// Source language code; omit to auto-detect (requires --ignore-cache)
        #[arg(short = 's', long)]
        source_language: Option<String>,

        /// Target language code
        #[arg(short = 't', long, default_value = "en-us")]
        target_language: String,

        /// Skip cache lookups; every line is sent to DeepL, results are
        /// still cached
        #[arg(long)]
        ignore_cache: bool,

        /// Fail if a line is missing from the cache instead of calling the
        /// API; prevents accidental API usage while debugging
        #[arg(short = 'd', long)]
        no_api_requests: bool,

        /// Write a two-column (source, translated) export instead of plain
        /// translated lines
        #[arg(short = 'p', long)]
        export: bool,

        /// Column delimiter for --export; defaults to a tab
        #[arg(long, value_name = "CHAR", requires = "export")]
        delimiter: Option<char>,
    },

    /// Translate a whole document (docx, pptx, xlsx, pdf, html, txt)
    #[command(visible_alias = "d")]
    Document {
        /// Document to translate
        input: String,

        /// File the translated document is written to
        output: String,

        /// DeepL API key; falls back to DEEPL_AUTH_KEY, then the stored key
        #[arg(short = 'a', long)]
        api_key: Option<String>,

        /// Source language code; omit to auto-detect
        #[arg(short = 's', long)]
        source_language: Option<String>,

        /// Target language code
        #[arg(short = 't', long, default_value = "en-us")]
        target_language: String,
    },

    /// Remove all cached translations
    ResetCache {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Store the DeepL API key for future API calls
    SetApiKey {
        /// The key to store
        api_key: String,
    },

    /// Show the stored API key
    ShowApiKey,

    /// Remove the stored API key
    ClearApiKey,

    /// List supported language codes
    Languages,
}
