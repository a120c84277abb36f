//! HTTP server for the web UI and JSON API.
//!
//! One analysis per request: the session slot is atomically reset, the
//! pipeline runs to completion or first failure, and the result is both
//! stored and returned. No queueing, no cancellation; a slow upstream call
//! simply runs to its timeout.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rust_embed::RustEmbed;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{self, AnalysisError, ImageSource, VisionClient};
use crate::config::Config;
use crate::state::ResultStore;

#[derive(RustEmbed)]
#[folder = "src/server/assets"]
struct Assets;

pub struct Server {
    config: Config,
}

struct AppState {
    config: Config,
    store: ResultStore,
}

impl Server {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(AppState {
            config: self.config.clone(),
            store: ResultStore::new(),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .route("/", get(index))
            .route("/health", get(health_check))
            .route("/api/analyze", post(analyze))
            .route("/api/sessions/{id}", get(session_result))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr: SocketAddr =
            format!("{}:{}", self.config.server.bind, self.config.server.port).parse()?;

        info!("Starting HTTP server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

// Error response type
struct AppError(StatusCode, serde_json::Value);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

impl From<&AnalysisError> for AppError {
    fn from(e: &AnalysisError) -> Self {
        let status = match e {
            AnalysisError::MissingCredential => StatusCode::UNAUTHORIZED,
            AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AnalysisError::RequestFailed { .. }
            | AnalysisError::ResponseMalformed(_)
            | AnalysisError::EmptyResponse
            | AnalysisError::MalformedAnalysis { .. } => StatusCode::BAD_GATEWAY,
        };
        AppError(
            status,
            json!({
                "error": e.to_string(),
                "detail": e.raw_content(),
                "upstream_status": e.status_code(),
            }),
        )
    }
}

async fn index() -> Response {
    match Assets::get("index.html") {
        Some(file) => {
            let mime = mime_guess::from_path("index.html").first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref().to_string())], file.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "index.html not embedded").into_response(),
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    session_id: Option<String>,
    image_url: Option<String>,
    /// Base64-encoded image bytes; alternative to `image_url`.
    image_base64: Option<String>,
    mime_type: Option<String>,
    monthly_bill_usd: Option<f64>,
}

impl AnalyzeRequest {
    fn image_source(&self) -> Result<ImageSource, AnalysisError> {
        if let Some(url) = &self.image_url {
            return Ok(ImageSource::Url(url.clone()));
        }
        if let Some(encoded) = &self.image_base64 {
            let data = STANDARD.decode(encoded.trim()).map_err(|e| {
                AnalysisError::InvalidInput(format!("image_base64 is not valid base64: {e}"))
            })?;
            if data.is_empty() {
                return Err(AnalysisError::InvalidInput(
                    "image_base64 decoded to zero bytes".to_string(),
                ));
            }
            let mime = match &self.mime_type {
                Some(mime) if !mime.trim().is_empty() => mime.clone(),
                _ => analysis::image::sniff_mime(&data),
            };
            return Ok(ImageSource::Bytes { data, mime });
        }
        Err(AnalysisError::InvalidInput(
            "Provide either image_url or image_base64".to_string(),
        ))
    }
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session_id = req
        .session_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // Reset before anything can fail, so the slot never shows stale results.
    state.store.begin(&session_id).await;

    match run_analysis(&state, &req).await {
        Ok(outcome) => {
            state.store.complete(&session_id, outcome.clone()).await;
            Ok(Json(json!({
                "session_id": session_id,
                "outcome": outcome,
            })))
        }
        Err(e) => {
            state
                .store
                .fail(
                    &session_id,
                    e.to_string(),
                    e.raw_content().map(str::to_string),
                )
                .await;
            Err(AppError::from(&e))
        }
    }
}

async fn run_analysis(
    state: &Arc<AppState>,
    req: &AnalyzeRequest,
) -> Result<analysis::AnalysisOutcome, AnalysisError> {
    let source = req.image_source()?;
    let client = VisionClient::new(&state.config.api, None)?;
    let bill = req
        .monthly_bill_usd
        .unwrap_or(state.config.analysis.default_monthly_bill_usd);
    analysis::run_pipeline(&client, &source, bill).await
}

async fn session_result(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    match state.store.get(&id).await {
        Some(record) => Ok(Json(json!({ "session_id": id, "record": record }))),
        None => Err(AppError(
            StatusCode::NOT_FOUND,
            json!({ "error": format!("No such session: {id}") }),
        )),
    }
}
