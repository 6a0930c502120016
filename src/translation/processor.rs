//! The batching, dedup and cache-reconciliation engine.

use std::collections::HashMap;
use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::cache::TranslationStore;
use crate::fs;

use super::backend::TranslationBackend;
use super::error::TranslationError;
use super::progress::BatchProgress;
use super::record::{Translation, index_key};

/// Engine-level default for lines per backend call. The command line
/// entrypoint passes its own, larger default.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// How the translated file is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One translated line per input line, joined with `\n`.
    Plain,
    /// Two-column `(source, translated)` table with an empty header row.
    Delimited { delimiter: u8 },
}

/// Options for a whole-file run.
#[derive(Debug, Clone)]
pub struct FileOptions {
    /// Lines per backend call; the last chunk may be smaller.
    pub chunk_size: usize,
    /// Fail instead of performing a backend request. Used to detect
    /// unexpected cache misses without spending API characters.
    pub no_backend_requests: bool,
    pub format: OutputFormat,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            no_backend_requests: false,
            format: OutputFormat::Plain,
        }
    }
}

/// Result of translating one chunk of lines.
#[derive(Debug)]
pub struct BatchOutput {
    /// Translations aligned 1:1 with the input lines.
    pub translations: Vec<Translation>,
    /// Characters of cache-miss text sent to the backend.
    pub characters_sent: u64,
}

/// Result of translating a whole file, before serialization.
#[derive(Debug)]
pub struct FileOutput {
    pub translations: Vec<Translation>,
    pub characters_sent: u64,
}

/// Summary of a completed file run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSummary {
    pub line_count: usize,
    pub characters_sent: u64,
}

/// Batches lines, resolves them against the cache, deduplicates the
/// misses, and reconciles backend responses back into line order.
pub struct TranslationProcessor<S, B> {
    store: S,
    backend: B,
    /// Skip cache lookups. Results are still written to the cache.
    ignore_cache: bool,
}

impl<S: TranslationStore, B: TranslationBackend> TranslationProcessor<S, B> {
    pub const fn new(store: S, backend: B, ignore_cache: bool) -> Self {
        Self {
            store,
            backend,
            ignore_cache,
        }
    }

    /// Translates one chunk of lines, returning results aligned 1:1 with
    /// the input, duplicates included.
    ///
    /// Each distinct trimmed text is sent to the backend at most once per
    /// chunk, and exactly one representative per distinct text is upserted
    /// into the cache — even when the cache was not consulted.
    pub async fn translate_batch(
        &self,
        lines: &[String],
        no_backend_requests: bool,
        cancel: &CancellationToken,
    ) -> Result<BatchOutput, TranslationError> {
        let source_language = self
            .backend
            .source_language()
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty());

        if source_language.is_none() && !self.ignore_cache {
            return Err(TranslationError::MissingSourceLanguage);
        }

        let target_language = self.backend.target_language().trim().to_lowercase();

        let mut translations: Vec<Translation> = Vec::with_capacity(lines.len());
        let mut pending: Vec<usize> = Vec::new();
        let mut characters_sent: u64 = 0;

        // Resolve each line against the cache; split out the misses.
        for line in lines {
            let trimmed = line.trim();

            let cached = if self.ignore_cache {
                None
            } else {
                let key = index_key(
                    source_language.as_deref().unwrap_or_default(),
                    &target_language,
                    trimmed,
                );
                self.store.lookup(&key)?
            };

            if let Some(translation) = cached {
                translations.push(translation);
            } else {
                characters_sent += trimmed.chars().count() as u64;
                translations.push(Translation::pending(
                    trimmed,
                    source_language.as_deref().unwrap_or_default(),
                    &target_language,
                ));
                pending.push(translations.len() - 1);
            }
        }

        // Collapse duplicate texts: the backend sees each distinct pending
        // text once, in first-seen order.
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        let mut group_of_text: HashMap<String, usize> = HashMap::new();
        for &index in &pending {
            let text = &translations[index].text;
            if let Some(&group) = group_of_text.get(text) {
                groups[group].1.push(index);
            } else {
                group_of_text.insert(text.clone(), groups.len());
                groups.push((text.clone(), vec![index]));
            }
        }

        if !groups.is_empty() {
            if no_backend_requests {
                return Err(TranslationError::BackendDisabled {
                    pending: groups.len(),
                });
            }

            let texts: Vec<String> = groups.iter().map(|(text, _)| text.clone()).collect();
            let results = self.backend.translate_texts(&texts, cancel).await?;

            if results.len() != groups.len() {
                return Err(TranslationError::BackendMismatch {
                    sent: groups.len(),
                    received: results.len(),
                });
            }

            // The distinct requests and the results are positionally
            // aligned; a result applies to every occurrence in its group.
            for ((_, members), result) in groups.iter().zip(&results) {
                for &index in members {
                    let translation = &mut translations[index];

                    // Only trust the detected language when no source
                    // language was configured; backends sometimes guess
                    // wrong, and explicit codes drive cache lookups.
                    if source_language.is_none()
                        && let Some(detected) = &result.detected_source_language
                    {
                        translation.source_language = detected.to_lowercase();
                    }

                    translation.translated_text = result.text.clone();
                }

                let mut representative = translations[members[0]].clone();
                self.store.upsert_by_key(&mut representative)?;
            }
        }

        Ok(BatchOutput {
            translations,
            characters_sent,
        })
    }

    /// Translates every line of `input` chunk by chunk, strictly in order.
    ///
    /// `on_progress` fires once per chunk, before that chunk's cache and
    /// backend work. Any chunk failure other than cancellation is wrapped
    /// with its 1-based line range and halts the run.
    pub async fn translate_lines<F>(
        &self,
        input: &Path,
        options: &FileOptions,
        mut on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<FileOutput, TranslationError>
    where
        F: FnMut(&BatchProgress),
    {
        // Read eagerly so the total is known for progress percentages.
        let contents = std::fs::read_to_string(input)?;
        let lines: Vec<String> = contents.lines().map(str::to_owned).collect();

        let total_items = lines.len();
        let chunk_size = options.chunk_size.max(1);

        let mut translations = Vec::with_capacity(total_items);
        let mut characters_sent: u64 = 0;
        let mut start_line = 1;

        for chunk in lines.chunks(chunk_size) {
            let end_line = start_line + chunk.len() - 1;

            on_progress(&BatchProgress {
                total_items,
                start_line,
                end_line,
            });

            let batch = self
                .translate_batch(chunk, options.no_backend_requests, cancel)
                .await
                .map_err(|error| error.into_chunk(start_line, end_line, chunk))?;

            translations.extend(batch.translations);
            characters_sent += batch.characters_sent;

            // Consecutive reported ranges deliberately share their
            // boundary line: the next chunk starts at the previous end.
            start_line = end_line;
        }

        Ok(FileOutput {
            translations,
            characters_sent,
        })
    }

    /// Translates `input` and writes the serialized result to `output`.
    ///
    /// Output is written only after every chunk has succeeded.
    pub async fn translate_file<F>(
        &self,
        input: &Path,
        output: &Path,
        options: &FileOptions,
        on_progress: F,
        cancel: &CancellationToken,
    ) -> Result<FileSummary, TranslationError>
    where
        F: FnMut(&BatchProgress),
    {
        let result = self
            .translate_lines(input, options, on_progress, cancel)
            .await?;

        let contents = match options.format {
            OutputFormat::Plain => render_plain(&result.translations),
            OutputFormat::Delimited { delimiter } => {
                render_delimited(&result.translations, delimiter)?
            }
        };
        fs::atomic_write(output, &contents)?;

        Ok(FileSummary {
            line_count: result.translations.len(),
            characters_sent: result.characters_sent,
        })
    }

    /// Whole-document pass-through; chunking and caching do not apply.
    pub async fn translate_document(
        &self,
        input: &Path,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError> {
        self.backend.translate_document(input, output, cancel).await
    }
}

fn render_plain(translations: &[Translation]) -> String {
    translations
        .iter()
        .map(|translation| translation.translated_text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_delimited(
    translations: &[Translation],
    delimiter: u8,
) -> Result<String, TranslationError> {
    let mut buffer = Vec::new();

    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(&mut buffer);

        writer.write_record(["", ""])?;
        for translation in translations {
            writer.write_record([
                translation.text.as_str(),
                translation.translated_text.as_str(),
            ])?;
        }
        writer.flush()?;
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, VecDeque};

    use tempfile::TempDir;

    use super::*;
    use crate::cache::StorageError;
    use crate::translation::backend::TranslatedText;

    /// In-memory store with the same upsert-by-key contract as the
    /// SQLite implementation.
    #[derive(Default)]
    struct MemoryStore {
        rows: RefCell<HashMap<String, Translation>>,
        next_id: Cell<i64>,
    }

    impl MemoryStore {
        fn row_count(&self) -> usize {
            self.rows.borrow().len()
        }

        fn row(&self, key: &str) -> Option<Translation> {
            self.rows.borrow().get(key).cloned()
        }
    }

    impl TranslationStore for &MemoryStore {
        fn lookup(&self, index_key: &str) -> Result<Option<Translation>, StorageError> {
            Ok(self.rows.borrow().get(index_key).cloned())
        }

        fn upsert_by_key(&self, translation: &mut Translation) -> Result<bool, StorageError> {
            let mut rows = self.rows.borrow_mut();
            let key = translation.index_key();

            let mut was_updated = false;
            if translation.id.is_none()
                && let Some(existing) = rows.get(&key)
            {
                translation.id = existing.id;
                was_updated = true;
            }

            if translation.id.is_none() {
                let id = self.next_id.get() + 1;
                self.next_id.set(id);
                translation.id = Some(id);
            }

            rows.insert(key, translation.clone());
            Ok(was_updated)
        }

        fn reset_all(&mut self) -> Result<(), StorageError> {
            self.rows.borrow_mut().clear();
            Ok(())
        }
    }

    /// Backend double that records every call and either replays scripted
    /// responses or echoes `<text>!` with a fixed detected language.
    struct FakeBackend {
        source_language: Option<String>,
        target_language: String,
        detected: Option<String>,
        scripted: RefCell<VecDeque<Vec<TranslatedText>>>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeBackend {
        fn new(source_language: Option<&str>, target_language: &str) -> Self {
            Self {
                source_language: source_language.map(str::to_owned),
                target_language: target_language.to_owned(),
                detected: None,
                scripted: RefCell::new(VecDeque::new()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn with_detected(mut self, detected: &str) -> Self {
            self.detected = Some(detected.to_owned());
            self
        }

        fn script(&self, texts: &[&str]) {
            self.scripted.borrow_mut().push_back(
                texts
                    .iter()
                    .map(|text| TranslatedText {
                        text: (*text).to_owned(),
                        detected_source_language: self.detected.clone(),
                    })
                    .collect(),
            );
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl TranslationBackend for &FakeBackend {
        fn source_language(&self) -> Option<&str> {
            self.source_language.as_deref()
        }

        fn target_language(&self) -> &str {
            &self.target_language
        }

        async fn translate_texts(
            &self,
            texts: &[String],
            cancel: &CancellationToken,
        ) -> Result<Vec<TranslatedText>, TranslationError> {
            if cancel.is_cancelled() {
                return Err(TranslationError::Cancelled);
            }

            self.calls.borrow_mut().push(texts.to_vec());

            let scripted = self.scripted.borrow_mut().pop_front();
            Ok(scripted.unwrap_or_else(|| {
                texts
                    .iter()
                    .map(|text| TranslatedText {
                        text: format!("{text}!"),
                        detected_source_language: self.detected.clone(),
                    })
                    .collect()
            }))
        }

        async fn translate_document(
            &self,
            _input: &Path,
            _output: &Path,
            _cancel: &CancellationToken,
        ) -> Result<(), TranslationError> {
            Ok(())
        }
    }

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| (*text).to_owned()).collect()
    }

    fn processor<'a>(
        store: &'a MemoryStore,
        backend: &'a FakeBackend,
        ignore_cache: bool,
    ) -> TranslationProcessor<&'a MemoryStore, &'a FakeBackend> {
        TranslationProcessor::new(store, backend, ignore_cache)
    }

    #[tokio::test]
    async fn duplicates_collapse_to_one_backend_request() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        backend.script(&["Hallo", "Welt"]);

        let output = processor(&store, &backend, false)
            .translate_batch(&lines(&["Hello", "World", "Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec![lines(&["Hello", "World"])]);
        let translated: Vec<&str> = output
            .translations
            .iter()
            .map(|t| t.translated_text.as_str())
            .collect();
        assert_eq!(translated, ["Hallo", "Welt", "Hallo"]);
    }

    #[tokio::test]
    async fn output_preserves_input_order_and_count() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");

        let input = lines(&["b", "a", "b", "c", "a"]);
        let output = processor(&store, &backend, false)
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output.translations.len(), input.len());
        let sources: Vec<&str> = output
            .translations
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(sources, ["b", "a", "b", "c", "a"]);
        // Distinct texts go out in first-seen order.
        assert_eq!(backend.calls(), vec![lines(&["b", "a", "c"])]);
    }

    #[tokio::test]
    async fn second_run_is_served_entirely_from_cache() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        let engine = processor(&store, &backend, false);

        let input = lines(&["Hello", "World"]);
        engine
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();
        let second = engine
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(backend.calls().len(), 1);
        assert_eq!(second.characters_sent, 0);
        assert_eq!(second.translations[0].translated_text, "Hello!");
    }

    #[tokio::test]
    async fn lines_are_trimmed_before_lookup_and_send() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("EN"), "DE");

        processor(&store, &backend, false)
            .translate_batch(&lines(&["  Hello  "]), false, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec![lines(&["Hello"])]);
        // Languages are normalized before key derivation.
        assert!(store.row("en|de|Hello").is_some());
    }

    #[tokio::test]
    async fn missing_source_language_fails_unless_cache_is_ignored() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(None, "de");

        let error = processor(&store, &backend, false)
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(error, TranslationError::MissingSourceLanguage));

        processor(&store, &backend, true)
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn ignore_cache_skips_lookups_but_still_writes() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        let engine = processor(&store, &backend, true);

        let input = lines(&["Hello"]);
        engine
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();
        engine
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();

        // The cache was never consulted, so both runs hit the backend,
        // and both runs still upserted the result.
        assert_eq!(backend.calls().len(), 2);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn retranslation_updates_the_existing_row_in_place() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        let engine = processor(&store, &backend, true);

        backend.script(&["Hallo"]);
        engine
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();
        let first_id = store.row("en|de|Hello").unwrap().id;

        backend.script(&["Hallo!"]);
        engine
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();

        let row = store.row("en|de|Hello").unwrap();
        assert_eq!(store.row_count(), 1);
        assert_eq!(row.id, first_id);
        assert_eq!(row.translated_text, "Hallo!");
    }

    #[tokio::test]
    async fn detected_language_applies_only_without_explicit_source() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(None, "de").with_detected("EN");

        let output = processor(&store, &backend, true)
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(output.translations[0].source_language, "en");

        let explicit = FakeBackend::new(Some("fr"), "de").with_detected("EN");
        let output = processor(&store, &explicit, true)
            .translate_batch(&lines(&["Hello"]), false, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(output.translations[0].source_language, "fr");
    }

    #[tokio::test]
    async fn response_count_mismatch_fails_without_cache_writes() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        backend.script(&["Hallo"]);

        let error = processor(&store, &backend, false)
            .translate_batch(
                &lines(&["Hello", "World"]),
                false,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            TranslationError::BackendMismatch {
                sent: 2,
                received: 1
            }
        ));
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn disabled_backend_fails_before_any_request() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");

        let error = processor(&store, &backend, false)
            .translate_batch(&lines(&["Hello"]), true, &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            TranslationError::BackendDisabled { pending: 1 }
        ));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn fully_cached_chunk_ignores_the_disabled_backend_flag() {
        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        let engine = processor(&store, &backend, false);

        let input = lines(&["Hello"]);
        engine
            .translate_batch(&input, false, &CancellationToken::new())
            .await
            .unwrap();
        engine
            .translate_batch(&input, true, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn cancellation_surfaces_unwrapped_and_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        std::fs::write(&input, "Hello\nWorld").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = processor(&store, &backend, false)
            .translate_lines(&input, &FileOptions::default(), |_| {}, &cancel)
            .await
            .unwrap_err();

        assert!(error.is_cancelled());
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn chunk_ranges_share_boundary_lines() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        std::fs::write(&input, "a\nb\nc\nd\ne").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");

        let options = FileOptions {
            chunk_size: 2,
            ..FileOptions::default()
        };
        let mut snapshots = Vec::new();
        processor(&store, &backend, false)
            .translate_lines(
                &input,
                &options,
                |progress| snapshots.push(*progress),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        // One notification per chunk; the next start is the previous end.
        let ranges: Vec<(usize, usize)> = snapshots
            .iter()
            .map(|progress| (progress.start_line, progress.end_line))
            .collect();
        assert_eq!(ranges, [(1, 2), (2, 3), (3, 3)]);
        assert!(snapshots.iter().all(|progress| progress.total_items == 5));
        assert_eq!(backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn characters_sent_sums_cache_misses_across_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        std::fs::write(&input, "abc\nde\nf").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");

        // Pre-populate one line so it never reaches the backend.
        let mut cached = Translation::pending("de", "en", "de");
        cached.translated_text = "die".to_string();
        (&store).upsert_by_key(&mut cached).unwrap();

        let options = FileOptions {
            chunk_size: 2,
            ..FileOptions::default()
        };
        let output = processor(&store, &backend, false)
            .translate_lines(&input, &options, |_| {}, &CancellationToken::new())
            .await
            .unwrap();

        // "abc" (3) in the first chunk and "f" (1) in the second.
        assert_eq!(output.characters_sent, 4);
    }

    #[tokio::test]
    async fn failing_chunk_is_attributed_to_its_line_range() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        std::fs::write(&input, "a\nb\nc\nd").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        backend.script(&["a!", "b!"]);
        backend.script(&["c!", "d!", "spurious"]);

        let options = FileOptions {
            chunk_size: 2,
            ..FileOptions::default()
        };
        let error = processor(&store, &backend, false)
            .translate_lines(&input, &options, |_| {}, &CancellationToken::new())
            .await
            .unwrap_err();

        let TranslationError::Chunk {
            start_line,
            end_line,
            chunk_text,
            source,
        } = error
        else {
            panic!("expected a chunk error");
        };
        assert_eq!((start_line, end_line), (2, 3));
        assert_eq!(chunk_text, "c\nd");
        assert!(matches!(
            *source,
            TranslationError::BackendMismatch {
                sent: 2,
                received: 3
            }
        ));
    }

    #[tokio::test]
    async fn plain_output_joins_translations_with_newlines() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        let output = temp_dir.path().join("output.txt");
        std::fs::write(&input, "Hello\nWorld\nHello").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        backend.script(&["Hallo", "Welt"]);

        let summary = processor(&store, &backend, false)
            .translate_file(
                &input,
                &output,
                &FileOptions::default(),
                |_| {},
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(summary.line_count, 3);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Hallo\nWelt\nHallo"
        );
    }

    #[tokio::test]
    async fn delimited_export_repeats_duplicates_under_an_empty_header() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        let output = temp_dir.path().join("output.psv");
        std::fs::write(&input, "Hello\nHello").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");
        backend.script(&["Hallo"]);

        let options = FileOptions {
            format: OutputFormat::Delimited { delimiter: b'|' },
            ..FileOptions::default()
        };
        processor(&store, &backend, false)
            .translate_file(&input, &output, &options, |_| {}, &CancellationToken::new())
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&output).unwrap();
        let rows: Vec<&str> = contents.lines().collect();
        assert_eq!(rows, ["|", "Hello|Hallo", "Hello|Hallo"]);
    }

    #[tokio::test]
    async fn empty_input_writes_an_empty_file_without_backend_calls() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input.txt");
        let output = temp_dir.path().join("output.txt");
        std::fs::write(&input, "").unwrap();

        let store = MemoryStore::default();
        let backend = FakeBackend::new(Some("en"), "de");

        let summary = processor(&store, &backend, false)
            .translate_file(
                &input,
                &output,
                &FileOptions::default(),
                |_| {},
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(summary.line_count, 0);
        assert_eq!(summary.characters_sent, 0);
        assert!(backend.calls().is_empty());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }
}
