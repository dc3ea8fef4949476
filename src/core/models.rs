//! Core data models for document translation

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Prefix added to the source name of every translated document
pub const TRANSLATED_NAME_PREFIX: &str = "translated_";

/// Media type reported when the translation service omits one
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Caller-supplied description of a file to translate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileReference {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mime_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub download_link: String,
}

/// Accept `null` wherever a string is expected, so validation sees an empty value
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FileReference {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        download_link: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            mime_type: mime_type.into(),
            download_link: download_link.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Inbound request body: `{ "openaiFileIdRefs": [...] }`
///
/// Only the first reference is ever translated; the rest are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileReferenceList {
    #[serde(default, rename = "openaiFileIdRefs")]
    pub file_id_refs: Option<Vec<FileReference>>,
}

impl FileReferenceList {
    pub fn new(refs: Vec<FileReference>) -> Self {
        Self {
            file_id_refs: Some(refs),
        }
    }

    /// The reference selected for translation
    pub fn first(&self) -> Option<&FileReference> {
        self.file_id_refs.as_ref().and_then(|refs| refs.first())
    }
}

/// Translated document ready for embedding in a JSON response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslatedFile {
    pub name: String,
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) of the translated bytes
    pub content: String,
}

/// Success response body: `{ "openaiFileResponse": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    #[serde(rename = "openaiFileResponse")]
    pub files: Vec<TranslatedFile>,
}

impl From<TranslatedFile> for FileResponse {
    fn from(file: TranslatedFile) -> Self {
        Self { files: vec![file] }
    }
}

/// Summary plus raw upstream body for a failed translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub details: String,
}

/// Downloaded source file staged in memory for the outbound request
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl SourceDocument {
    pub fn new(reference: &FileReference, content: Bytes) -> Self {
        Self {
            name: reference.name.clone(),
            mime_type: reference.mime_type.clone(),
            content,
        }
    }
}

/// Uninterpreted reply from the translation service
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Declared content type, falling back to [`DEFAULT_MIME_TYPE`] when absent or blank
    pub fn mime_type(&self) -> String {
        self.content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string()
    }

    /// Body decoded as text, replacing invalid UTF-8
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
