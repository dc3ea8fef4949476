//! Azure Translator document translation client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

use crate::core::config::ServiceCredentials;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{SourceDocument, UpstreamResponse};

/// Source language of every translated document
pub const SOURCE_LANGUAGE: &str = "en";

/// Target language of every translated document
pub const TARGET_LANGUAGE: &str = "ja";

pub const API_VERSION: &str = "2024-05-01";

/// Multipart field carrying the document
pub const DOCUMENT_FIELD: &str = "document";

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// Submits a document to a translation service and returns its raw reply
#[async_trait]
pub trait DocumentTranslationService: Send + Sync {
    /// Send `document` for translation; a non-2xx reply is returned, not raised
    async fn translate_document(
        &self,
        document: &SourceDocument,
        credentials: &ServiceCredentials,
    ) -> Result<UpstreamResponse>;
}

/// Synchronous document translation against an Azure Translator resource
#[derive(Debug, Clone)]
pub struct AzureDocumentTranslator {
    client: reqwest::Client,
}

impl AzureDocumentTranslator {
    /// Create a translator whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { client })
    }

    /// Full translate URL for the configured endpoint
    pub fn translate_url(endpoint: &str) -> String {
        format!(
            "{}/translator/document:translate?api-version={}&sourceLanguage={}&targetLanguage={}",
            endpoint.trim_end_matches('/'),
            API_VERSION,
            SOURCE_LANGUAGE,
            TARGET_LANGUAGE
        )
    }

    fn document_form(document: &SourceDocument) -> Result<Form> {
        let part = Part::stream(document.content.clone())
            .file_name(document.name.clone())
            .mime_str(&document.mime_type)
            .map_err(|_| TranslationError::InvalidFormat {
                format: document.mime_type.clone(),
            })?;

        Ok(Form::new().part(DOCUMENT_FIELD, part))
    }
}

#[async_trait]
impl DocumentTranslationService for AzureDocumentTranslator {
    async fn translate_document(
        &self,
        document: &SourceDocument,
        credentials: &ServiceCredentials,
    ) -> Result<UpstreamResponse> {
        let form = Self::document_form(document)?;
        let url = Self::translate_url(&credentials.endpoint);

        debug!(
            "Submitting {} ({} bytes, {}) for translation",
            document.name,
            document.content.len(),
            document.mime_type
        );

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &credentials.subscription_key)
            .header(SUBSCRIPTION_REGION_HEADER, &credentials.region)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response.bytes().await.map_err(network_error)?;

        debug!("Translation service answered {} with {} bytes", status, body.len());

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

fn network_error(err: reqwest::Error) -> TranslationError {
    TranslationError::NetworkError {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn document() -> SourceDocument {
        SourceDocument {
            name: "a.txt".to_string(),
            mime_type: "text/plain".to_string(),
            content: Bytes::from_static(b"Hello, world"),
        }
    }

    fn translator() -> AzureDocumentTranslator {
        AzureDocumentTranslator::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_translate_url() {
        let expected = "https://res.cognitiveservices.azure.com/translator/document:translate\
            ?api-version=2024-05-01&sourceLanguage=en&targetLanguage=ja";

        assert_eq!(
            AzureDocumentTranslator::translate_url("https://res.cognitiveservices.azure.com"),
            expected
        );
        assert_eq!(
            AzureDocumentTranslator::translate_url("https://res.cognitiveservices.azure.com/"),
            expected
        );
    }

    #[tokio::test]
    async fn test_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translator/document:translate"))
            .and(query_param("api-version", API_VERSION))
            .and(query_param("sourceLanguage", "en"))
            .and(query_param("targetLanguage", "ja"))
            .and(header(SUBSCRIPTION_KEY_HEADER, "test-key"))
            .and(header(SUBSCRIPTION_REGION_HEADER, "japaneast"))
            .and(body_string_contains("name=\"document\"; filename=\"a.txt\""))
            .and(body_string_contains("Content-Type: text/plain"))
            .and(body_string_contains("Hello, world"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/plain")
                    .set_body_bytes("こんにちは、世界".as_bytes()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let credentials = ServiceCredentials::new("test-key", server.uri(), "japaneast");
        let response = assert_ok!(translator().translate_document(&document(), &credentials).await);

        assert!(response.is_success());
        assert_eq!(response.content_type.as_deref(), Some("text/plain"));
        assert_eq!(response.body.as_ref(), "こんにちは、世界".as_bytes());
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let credentials = ServiceCredentials::new("k", server.uri(), "r");
        let response = assert_ok!(translator().translate_document(&document(), &credentials).await);

        assert_eq!(response.status, 429);
        assert_eq!(response.body_text(), "rate limited");
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let translator = AzureDocumentTranslator::new(Duration::from_millis(200)).unwrap();
        let credentials = ServiceCredentials::new("k", server.uri(), "r");

        let result = translator.translate_document(&document(), &credentials).await;
        assert!(matches!(result, Err(TranslationError::NetworkError { .. })));
    }

    #[tokio::test]
    async fn test_invalid_mime_type_is_rejected_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut doc = document();
        doc.mime_type = "not a mime type".to_string();
        let credentials = ServiceCredentials::new("k", server.uri(), "r");

        let result = translator().translate_document(&doc, &credentials).await;
        assert!(matches!(result, Err(TranslationError::InvalidFormat { .. })));
    }
}
