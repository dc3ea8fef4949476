//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::core::config::{AppConfig, ServiceCredentials};
use crate::core::errors::{TranslationError, TRANSLATION_FAILED_MESSAGE};
use crate::core::models::{ErrorDetail, FileReference, FileReferenceList, FileResponse, TranslatedFile};
use crate::core::pipeline::TranslationPipeline;

pub const TRANSLATE_DOCUMENT_PATH: &str = "/DocumentTranslation/TranslateDocument";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<TranslationPipeline>,
    credentials: Arc<ServiceCredentials>,
}

impl AppState {
    pub fn new(pipeline: TranslationPipeline, credentials: ServiceCredentials) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            credentials: Arc::new(credentials),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health_check, translate_document),
    components(schemas(
        HealthResponse,
        FileReference,
        FileReferenceList,
        FileResponse,
        TranslatedFile,
        ErrorDetail
    )),
    tags((name = "DocumentTranslation", description = "Azure Translator document translation"))
)]
pub struct ApiDoc;

impl IntoResponse for TranslationError {
    fn into_response(self) -> Response {
        match self {
            TranslationError::UpstreamTranslationFailed { status, details } => {
                warn!("Translation service returned {}", status);
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let body = ErrorDetail {
                    message: TRANSLATION_FAILED_MESSAGE.to_string(),
                    details,
                };
                (status, Json(body)).into_response()
            }
            err if err.is_client_error() => {
                debug!("Client error: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            err => {
                error!("Internal service error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/",
    tag = "DocumentTranslation",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translate an uploaded document from English to Japanese
///
/// Downloads the first referenced file and translates it from English to Japanese
/// using Azure Translator. Additional references are ignored.
#[utoipa::path(
    post,
    path = "/DocumentTranslation/TranslateDocument",
    tag = "DocumentTranslation",
    request_body = FileReferenceList,
    responses(
        (status = 200, description = "Successful translation", body = FileResponse),
        (status = 400, description = "No file, missing download link, or the download failed", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain"),
        (status = "default", description = "Translation service error, status mirrored from the service", body = ErrorDetail)
    )
)]
async fn translate_document(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Option<FileReferenceList>>,
) -> Result<Json<FileResponse>, TranslationError> {
    let request = payload.unwrap_or_default();
    let file = state.pipeline.translate(&request, &state.credentials).await?;
    Ok(Json(FileResponse::from(file)))
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route(TRANSLATE_DOCUMENT_PATH, post(translate_document))
        .route(OPENAPI_PATH, get(openapi_spec))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config: AppConfig) -> anyhow::Result<()> {
    let pipeline = TranslationPipeline::from_config(&config)?;
    let state = AppState::new(pipeline, config.credentials());

    let app = router(state);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
