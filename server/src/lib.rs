//! HTTP front end for the analysis pipeline.
//!
//! Three routes: `POST /api/query` runs one end-to-end analysis,
//! `GET /api/areas` enumerates what the snapshot covers, and
//! `GET /api/health` is a liveness probe. All state is cheap to clone;
//! nothing is shared between requests beyond the snapshot path.

use anyhow::Result;
use arealens_analysis::AnalysisPipeline;
use arealens_analysis::QueryResponse;
use arealens_analysis::Summarizer;
use arealens_dataset::DatasetStore;
use arealens_gemini::GeminiClient;
use arealens_gemini::GeminiConfig;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub addr: String,
    pub data_path: PathBuf,
    pub gemini: GeminiConfig,
}

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AnalysisPipeline>,
    store: DatasetStore,
}

impl AppState {
    pub fn new(opts: &ServerOptions) -> Result<Self> {
        let store = DatasetStore::new(&opts.data_path);
        let client = GeminiClient::new(opts.gemini.clone())?;
        let pipeline = AnalysisPipeline::new(store.clone(), Summarizer::new(client));
        Ok(Self {
            pipeline: Arc::new(pipeline),
            store,
        })
    }
}

pub async fn run_server(opts: ServerOptions) -> Result<()> {
    let state = AppState::new(&opts)?;
    let listener = TcpListener::bind(&opts.addr).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("arealens server listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/query", post(query_handler))
        .route("/api/areas", get(areas_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<String>,
    pub years: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

async fn query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    if request.query.is_empty() {
        return Err(AppError::bad_request("Query is required"));
    }
    Ok(Json(state.pipeline.run(&request.query).await))
}

async fn areas_handler(State(state): State<AppState>) -> Result<Json<AreasResponse>, AppError> {
    // Unlike the query route, an unusable snapshot here is a hard failure.
    let Some(dataset) = state.store.load() else {
        return Err(AppError::internal("Could not load data"));
    };
    let mut areas = dataset.areas();
    areas.sort_unstable();
    Ok(Json(AreasResponse {
        areas,
        years: dataset.years(),
    }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Real estate analysis API is running",
    })
}

#[derive(Debug)]
struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
