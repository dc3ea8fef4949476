//! Retrieval of caller-referenced source files

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Downloads the raw bytes behind a caller-supplied link
#[async_trait]
pub trait RemoteFileFetcher: Send + Sync {
    /// Fetch the full body of `url`; any transport failure or non-2xx status is an error
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Plain HTTP GET fetcher
#[derive(Debug, Clone)]
pub struct HttpFileFetcher {
    client: reqwest::Client,
}

impl HttpFileFetcher {
    /// Create a fetcher whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self { client })
    }
}

/// Carry the client's own message; the URL is dropped since links may embed access tokens
fn download_error(err: reqwest::Error) -> TranslationError {
    TranslationError::DownloadFailed {
        message: err.without_url().to_string(),
    }
}

#[async_trait]
impl RemoteFileFetcher for HttpFileFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(download_error)?;

        let body = response.bytes().await.map_err(download_error)?;
        debug!("Fetched {} bytes", body.len());

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFileFetcher {
        HttpFileFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/a.docx"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146, 150]))
            .expect(1)
            .mount(&server)
            .await;

        let body = assert_ok!(fetcher().fetch(&format!("{}/files/a.docx", server.uri())).await);
        assert_eq!(body.as_ref(), &[0u8, 159, 146, 150]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = assert_err!(fetcher().fetch(&format!("{}/missing?sig=secret", server.uri())).await);
        match err {
            TranslationError::DownloadFailed { message } => {
                assert!(message.contains("404"), "{message}");
                assert!(!message.contains("sig=secret"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_error() {
        // Nothing listens on port 1
        assert_err!(fetcher().fetch("http://127.0.0.1:1/a.docx").await);
    }

    #[tokio::test]
    async fn test_malformed_url_is_error() {
        assert_err!(fetcher().fetch("not a url").await);
    }

    #[tokio::test]
    async fn test_timeout_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let fetcher = HttpFileFetcher::new(Duration::from_millis(200)).unwrap();
        assert_err!(fetcher.fetch(&format!("{}/slow", server.uri())).await);
    }
}
