//! DeepL REST API backend.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::backend::{TranslatedText, TranslationBackend};
use super::error::TranslationError;

const PAID_ENDPOINT: &str = "https://api.deepl.com";
const FREE_ENDPOINT: &str = "https://api-free.deepl.com";

/// How often an in-flight document translation is polled for completion.
const DOCUMENT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
struct TranslateTextRequest<'a> {
    text: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<&'a str>,
    target_lang: &'a str,
    preserve_formatting: bool,
}

#[derive(Debug, Deserialize)]
struct TranslateTextResponse {
    translations: Vec<TranslationPayload>,
}

#[derive(Debug, Deserialize)]
struct TranslationPayload {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DocumentHandle {
    document_id: String,
    document_key: String,
}

#[derive(Debug, Deserialize)]
struct DocumentStatus {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

/// Translation backend talking to the DeepL REST API.
pub struct DeepLBackend {
    client: Client,
    endpoint: &'static str,
    api_key: String,
    source_language: Option<String>,
    target_language: String,
}

impl DeepLBackend {
    pub fn new(
        api_key: String,
        source_language: Option<String>,
        target_language: String,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint_for_key(&api_key),
            api_key,
            source_language,
            target_language,
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
    }

    async fn require_success(response: Response) -> Result<Response, TranslationError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(TranslationError::Api { status, body })
    }

    async fn post_translate(
        &self,
        texts: &[String],
    ) -> Result<Vec<TranslatedText>, TranslationError> {
        let url = format!("{}/v2/translate", self.endpoint);

        let request = TranslateTextRequest {
            text: texts,
            source_lang: self.source_language.as_deref(),
            target_lang: &self.target_language,
            preserve_formatting: true,
        };

        let response = self
            .authorized(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        let payload: TranslateTextResponse =
            Self::require_success(response).await?.json().await?;

        Ok(payload
            .translations
            .into_iter()
            .map(|translation| TranslatedText {
                text: translation.text,
                detected_source_language: translation.detected_source_language,
            })
            .collect())
    }

    async fn upload_document(&self, input: &Path) -> Result<DocumentHandle, TranslationError> {
        let url = format!("{}/v2/document", self.endpoint);

        let file_name = input
            .file_name()
            .map_or_else(|| "document".to_string(), |name| name.to_string_lossy().into_owned());
        let contents = tokio::fs::read(input).await?;

        let mut form = Form::new()
            .text("target_lang", self.target_language.clone())
            .part("file", Part::bytes(contents).file_name(file_name));
        if let Some(source) = &self.source_language {
            form = form.text("source_lang", source.clone());
        }

        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::require_success(response).await?.json().await?)
    }

    async fn document_status(
        &self,
        handle: &DocumentHandle,
    ) -> Result<DocumentStatus, TranslationError> {
        let url = format!("{}/v2/document/{}", self.endpoint, handle.document_id);

        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "document_key": handle.document_key }))
            .send()
            .await?;
        Ok(Self::require_success(response).await?.json().await?)
    }

    async fn download_document(
        &self,
        handle: &DocumentHandle,
        output: &Path,
    ) -> Result<(), TranslationError> {
        let url = format!(
            "{}/v2/document/{}/result",
            self.endpoint, handle.document_id
        );

        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "document_key": handle.document_key }))
            .send()
            .await?;
        let contents = Self::require_success(response).await?.bytes().await?;

        tokio::fs::write(output, &contents).await?;
        Ok(())
    }

    /// Upload, poll at a fixed interval until done, download.
    async fn run_document(&self, input: &Path, output: &Path) -> Result<(), TranslationError> {
        let handle = self.upload_document(input).await?;

        loop {
            tokio::time::sleep(DOCUMENT_POLL_INTERVAL).await;

            let status = self.document_status(&handle).await?;
            match status.status.as_str() {
                "done" => break,
                "error" => {
                    return Err(TranslationError::Document {
                        reason: status
                            .error_message
                            .unwrap_or_else(|| "no error message reported".to_string()),
                    });
                }
                _ => {}
            }
        }

        self.download_document(&handle, output).await
    }
}

impl TranslationBackend for DeepLBackend {
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
        tokio::select! {
            () = cancel.cancelled() => Err(TranslationError::Cancelled),
            result = self.post_translate(texts) => result,
        }
    }

    async fn translate_document(
        &self,
        input: &Path,
        output: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), TranslationError> {
        // Cancellation stops the wait; the remote side may keep working.
        tokio::select! {
            () = cancel.cancelled() => Err(TranslationError::Cancelled),
            result = self.run_document(input, output) => result,
        }
    }
}

/// Free-tier keys (suffix `:fx`) are served from a separate host.
fn endpoint_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PAID_ENDPOINT
    }
}
