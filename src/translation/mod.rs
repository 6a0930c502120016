mod backend;
mod deepl;
mod error;
mod language;
mod processor;
mod progress;
mod record;

pub use backend::{TranslatedText, TranslationBackend};
pub use deepl::DeepLBackend;
pub use error::TranslationError;
pub use language::{
    SOURCE_LANGUAGES, TARGET_LANGUAGES, print_languages, validate_source_language,
    validate_target_language,
};
pub use processor::{
    BatchOutput, DEFAULT_CHUNK_SIZE, FileOptions, FileOutput, FileSummary, OutputFormat,
    TranslationProcessor,
};
pub use progress::BatchProgress;
pub use record::{Translation, index_key};
