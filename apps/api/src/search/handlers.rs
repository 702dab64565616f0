//! Axum route handlers for the Candidate Search API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::search::export::is_export_file_name;
use crate::search::models::{CandidateRecord, SearchCriteria};
use crate::state::AppState;

const FORM_PAGE: &str = include_str!("../../static/index.html");

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub markdown: String,
    pub candidates: Vec<CandidateRecord>,
    pub export_file: String,
    pub download_url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// The search form: three inputs, one button, a results table and a download link.
pub async fn handle_form() -> Html<&'static str> {
    Html(FORM_PAGE)
}

/// POST /api/v1/candidates/search
///
/// Runs one candidate search and returns the rendered table plus the artifact name.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = state.search.generate(&criteria).await?;

    let export_file = result
        .export_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Export("export path has no file name".to_string()))?;
    let download_url = format!("/api/v1/exports/{export_file}");

    Ok(Json(SearchResponse {
        markdown: result.markdown,
        candidates: result.candidates,
        export_file,
        download_url,
    }))
}

/// GET /api/v1/exports/:file_name
///
/// Streams back a previously written artifact as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_export_file_name(&file_name) {
        return Err(AppError::NotFound(format!("Export {file_name} not found")));
    }

    let path = state.search.export_dir().join(&file_name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Export {file_name} not found")));
        }
        Err(e) => {
            return Err(AppError::Internal(
                anyhow::Error::new(e).context(format!("reading {}", path.display())),
            ))
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}
