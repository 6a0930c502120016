//! The cached translation record and its composite cache key.

/// A single cached translation fact.
///
/// The record is identified in the cache by [`Translation::index_key`], a
/// composite of the language pair and the exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Row identity assigned by the cache store; `None` until persisted.
    pub id: Option<i64>,
    /// The source text, trimmed.
    pub text: String,
    /// The translated text; empty while the backend response is pending.
    pub translated_text: String,
    /// Lower-cased source language code, or `""` when auto-detected and not
    /// yet reported by the backend.
    pub source_language: String,
    /// Lower-cased target language code.
    pub target_language: String,
}

impl Translation {
    /// Creates a record awaiting its backend response.
    pub fn pending(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            id: None,
            text: text.to_string(),
            translated_text: String::new(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// The composite cache key for this record.
    pub fn index_key(&self) -> String {
        index_key(&self.source_language, &self.target_language, &self.text)
    }
}

/// Derives the composite cache key from a language pair and source text.
///
/// This is an exact join on a literal separator. Trimming and lower-casing
/// are the caller's responsibility and happen before key derivation.
pub fn index_key(source_language: &str, target_language: &str, text: &str) -> String {
    format!("{source_language}|{target_language}|{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_key_joins_on_pipe() {
        assert_eq!(index_key("en", "de", "Hello"), "en|de|Hello");
    }

    #[test]
    fn index_key_does_not_normalize() {
        // Normalization is applied by callers, never inside the key itself.
        assert_ne!(index_key("EN", "DE", "hi"), index_key("en", "de", "hi"));
        assert_ne!(index_key("en", "de", " Hi "), index_key("en", "de", "Hi"));
    }

    #[test]
    fn record_key_uses_stored_fields() {
        let translation = Translation::pending("Hello", "en", "de");
        assert_eq!(translation.index_key(), "en|de|Hello");
    }

    #[test]
    fn pending_record_has_no_identity_and_no_translation() {
        let translation = Translation::pending("Hello", "", "de");
        assert!(translation.id.is_none());
        assert!(translation.translated_text.is_empty());
        assert_eq!(translation.source_language, "");
    }
}
