//! Validate, fetch, translate and encode a single referenced document

use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::{AzureDocumentTranslator, DocumentTranslationService};
use crate::core::config::{AppConfig, ServiceCredentials};
use crate::core::errors::{Result, TranslationError};
use crate::core::fetcher::{HttpFileFetcher, RemoteFileFetcher};
use crate::core::models::{
    FileReferenceList, SourceDocument, TranslatedFile, TRANSLATED_NAME_PREFIX,
};

pub const NO_FILES_MESSAGE: &str = "No files provided.";
pub const MISSING_LINK_MESSAGE: &str = "Download link is missing.";

/// One-shot proxy from a file reference to a translated, Base64-encoded document.
///
/// Holds no per-request state, so a single instance can be shared across
/// concurrent requests. Each call makes at most one download and one
/// translation request, in that order, and never retries.
#[derive(Clone)]
pub struct TranslationPipeline {
    fetcher: Arc<dyn RemoteFileFetcher>,
    translator: Arc<dyn DocumentTranslationService>,
}

impl TranslationPipeline {
    pub fn new(
        fetcher: Arc<dyn RemoteFileFetcher>,
        translator: Arc<dyn DocumentTranslationService>,
    ) -> Self {
        Self {
            fetcher,
            translator,
        }
    }

    /// Build the HTTP-backed pipeline with the configured timeouts
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = HttpFileFetcher::new(config.download_timeout())?;
        let translator = AzureDocumentTranslator::new(config.translate_timeout())?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(translator)))
    }

    /// Translate the first referenced file.
    ///
    /// Later entries in `request` are ignored.
    pub async fn translate(
        &self,
        request: &FileReferenceList,
        credentials: &ServiceCredentials,
    ) -> Result<TranslatedFile> {
        let reference = request
            .first()
            .ok_or_else(|| TranslationError::invalid_input(NO_FILES_MESSAGE))?;

        if reference.download_link.is_empty() {
            return Err(TranslationError::invalid_input(MISSING_LINK_MESSAGE));
        }

        let host = link_host(&reference.download_link);
        info!("Translating {} from {}", reference.name, host);

        let content = self
            .fetcher
            .fetch(&reference.download_link)
            .await
            .map_err(|e| {
                warn!("Download from {} failed: {}", host, e);
                e.into_download_failure()
            })?;

        // Owned buffer, dropped on every return path below
        let document = SourceDocument::new(reference, content);

        let response = self
            .translator
            .translate_document(&document, credentials)
            .await?;

        if !response.is_success() {
            let details = response.body_text();
            warn!(
                "Translation of {} failed with status {}: {}",
                document.name, response.status, details
            );
            return Err(TranslationError::UpstreamTranslationFailed {
                status: response.status,
                details,
            });
        }

        let translated = TranslatedFile {
            name: format!("{}{}", TRANSLATED_NAME_PREFIX, document.name),
            mime_type: response.mime_type(),
            content: general_purpose::STANDARD.encode(&response.body),
        };

        info!(
            "Translated {} into {} ({} bytes)",
            document.name,
            translated.name,
            response.body.len()
        );

        Ok(translated)
    }
}

/// Host part of a download link, for logging without query tokens
fn link_host(link: &str) -> String {
    reqwest::Url::parse(link)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "<invalid link>".to_string())
}
