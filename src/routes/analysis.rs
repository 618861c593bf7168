use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use crate::{
    config::parse_delimiter,
    error::AppError,
    models::{AnalysisResponse, AnalyzeQuery, AnalyzeUrlRequest},
    services::{
        file_processor,
        profiler::AnalysisOptions,
        samples::{self, SampleInfo},
    },
    AppState,
};

const FILE_NAME_HEADER: &str = "x-file-name";

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/analyze", post(analyze_upload))
        .route("/analyze/url", post(analyze_url))
        .route("/samples", get(list_samples))
        .route("/samples/:name/analysis", get(analyze_sample))
        .layer(cors)
}

fn resolve_options(base: &AnalysisOptions, delimiter: Option<&str>) -> Result<AnalysisOptions, AppError> {
    match delimiter {
        Some(raw) => {
            let delimiter = parse_delimiter(raw).map_err(|e| AppError::InvalidInput(e.to_string()))?;
            let options = base.clone().with_delimiter(delimiter);
            options.validate()?;
            Ok(options)
        }
        None => Ok(base.clone()),
    }
}

#[axum::debug_handler]
pub async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyzeQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisResponse>, AppError> {
    let start = std::time::Instant::now();
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    file_processor::ensure_csv_content_type(content_type)?;

    let source = headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("upload")
        .to_string();
    tracing::info!("Received upload '{}' ({}KB)", source, body.len() / 1024);

    let options = resolve_options(&state.config.analysis, query.delimiter.as_deref())?;
    let analysis = file_processor::analyze_csv_bytes(body, options, state.config.max_file_size).await?;

    tracing::info!("Upload '{}' analyzed in {:?}", source, start.elapsed());
    Ok(Json(AnalysisResponse::new(source, analysis)))
}

pub async fn analyze_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeUrlRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::InvalidInput("No file URL provided".to_string()));
    }
    let options = resolve_options(&state.config.analysis, request.delimiter.as_deref())?;

    tracing::info!("Downloading file from URL (length {})...", request.url.len());
    let download_start = std::time::Instant::now();
    let file_data = file_processor::load_file_from_url(
        &request.url,
        state.config.max_file_size,
        Duration::from_secs(state.config.fetch_timeout_secs),
    )
    .await?;
    tracing::info!("File downloaded in {:?}", download_start.elapsed());

    let analysis = file_processor::analyze_csv_bytes(file_data, options, state.config.max_file_size).await?;
    Ok(Json(AnalysisResponse::new(request.url, analysis)))
}

pub async fn list_samples() -> Json<&'static [SampleInfo]> {
    Json(samples::list())
}

pub async fn analyze_sample(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let text = samples::get(&name).ok_or_else(|| AppError::SampleNotFound(name.clone()))?;

    let analysis = match state.sample_cache().get(&name) {
        Some(cached) => {
            tracing::debug!("Serving cached analysis for sample '{}'", name);
            cached
        }
        None => {
            // samples are always comma separated
            let options = state.config.analysis.clone().with_delimiter(',');
            let result = Arc::new(file_processor::analyze_text(text.to_string(), options).await?);
            state.sample_cache().insert(name.clone(), Arc::clone(&result));
            result
        }
    };

    Ok(Json(AnalysisResponse::new(format!("Sample: {}", name), (*analysis).clone())))
}
