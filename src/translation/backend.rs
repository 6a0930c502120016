//! Capability interface over the remote translation service.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use super::error::TranslationError;

/// One translated text, positionally aligned with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub text: String,
    /// The source language the backend detected, if it reported one.
    pub detected_source_language: Option<String>,
}

/// The remote translation service.
///
/// Implementations are injected into the processor at construction. The
/// batch call is the engine's only blocking operation and its only
/// cancellation point: `cancel` must abort the in-flight request and
/// surface [`TranslationError::Cancelled`] without applying any partial
/// response.
#[allow(async_fn_in_trait)]
pub trait TranslationBackend {
    /// The configured source language code, `None` for auto-detect.
    fn source_language(&self) -> Option<&str>;

    /// The configured target language code.
    fn target_language(&self) -> &str;

    /// Translates an ordered list of distinct texts. The response must
    /// contain exactly one entry per input text, in request order.
    async fn translate_texts(
        &self,
        texts: &[String],
        cancel: &CancellationToken,
    ) -> Result<Vec<TranslatedText>, TranslationError>;

    /// Translates a whole document as an opaque pass-through operation.
    ///
    /// Cancellation stops waiting for the remote side; it does not
    /// guarantee the remote side has stopped billable work.
    async fn translate_document(
        &self,
        input: &Path,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError>;
}
