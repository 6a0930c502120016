//! The error taxonomy of the translation engine.

use reqwest::StatusCode;
use thiserror::Error;

use crate::cache::StorageError;

/// Failures in the dedup/translate/cache-reconcile sequence.
///
/// Every variant surfaces to the outermost caller; the engine never
/// recovers locally. [`TranslationError::Cancelled`] is a control outcome
/// rather than a failure and is kept distinguishable via
/// [`TranslationError::is_cancelled`].
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Cache keys require a source language; auto-detect is only usable with
    /// the cache disabled.
    #[error(
        "a source language is required while the cache is enabled; \
         pass --ignore-cache to translate with auto-detect"
    )]
    MissingSourceLanguage,

    /// A backend request was about to be made while backend requests are
    /// disabled. Signals an unexpected cache miss during debugging.
    #[error(
        "{pending} uncached text(s) would be sent to the backend, \
         but backend requests are disabled"
    )]
    BackendDisabled { pending: usize },

    /// The backend response cardinality does not match the request.
    #[error("backend returned {received} translations for {sent} texts")]
    BackendMismatch { sent: usize, received: usize },

    #[error("backend request failed")]
    Request(#[from] reqwest::Error),

    #[error("backend rejected the request with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("document translation failed: {reason}")]
    Document { reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A chunk failed; carries the 1-based inclusive line range and the raw
    /// chunk text for diagnosis.
    #[error("failed to translate lines {start_line}-{end_line}")]
    Chunk {
        start_line: usize,
        end_line: usize,
        chunk_text: String,
        #[source]
        source: Box<TranslationError>,
    },

    /// The operation was cancelled by the caller. Not a failure.
    #[error("the translation was cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write the export file")]
    Export(#[from] csv::Error),
}

impl TranslationError {
    /// `true` when this is the cancellation outcome rather than a failure.
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Attributes a failure to the chunk's 1-based line range.
    ///
    /// Cancellation passes through untouched so it stays recognizable at
    /// the outermost caller.
    pub fn into_chunk(self, start_line: usize, end_line: usize, chunk: &[String]) -> Self {
        if self.is_cancelled() {
            return self;
        }

        Self::Chunk {
            start_line,
            end_line,
            chunk_text: chunk.join("\n"),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_not_wrapped_into_chunk() {
        let error = TranslationError::Cancelled.into_chunk(1, 2, &["a".to_string()]);
        assert!(error.is_cancelled());
    }

    #[test]
    fn chunk_carries_range_and_text() {
        let lines = vec!["first".to_string(), "second".to_string()];
        let error = TranslationError::BackendMismatch {
            sent: 2,
            received: 1,
        }
        .into_chunk(3, 4, &lines);

        let TranslationError::Chunk {
            start_line,
            end_line,
            chunk_text,
            source,
        } = error
        else {
            panic!("expected a chunk error");
        };

        assert_eq!(start_line, 3);
        assert_eq!(end_line, 4);
        assert_eq!(chunk_text, "first\nsecond");
        assert!(matches!(
            *source,
            TranslationError::BackendMismatch {
                sent: 2,
                received: 1
            }
        ));
    }
}
