//! Document Translation Proxy - translate remotely hosted documents through Azure Translator
//!
//! A single HTTP operation takes a reference to a file, downloads it, submits it
//! to the Azure Translator document API (English to Japanese) and returns the
//! translated document Base64-encoded in a JSON response.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::{AzureDocumentTranslator, DocumentTranslationService},
    config::{AppConfig, ServiceCredentials},
    errors::TranslationError,
    fetcher::{HttpFileFetcher, RemoteFileFetcher},
    models::{ErrorDetail, FileReference, FileReferenceList, FileResponse, TranslatedFile},
    pipeline::TranslationPipeline,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
