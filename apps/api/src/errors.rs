use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Every search failure ends here and is reported to the caller; none of them stop the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please fill in the job title, skills and location.")]
    MissingInput,

    #[error("Gemini API key is not configured. Set GEMINI_API_KEY to enable searching.")]
    Unconfigured,

    #[error("Candidate generation failed: {0}")]
    GenerationFailure(String),

    #[error("Could not parse the generated candidates ({0}). The model output varies between runs, please try again.")]
    ParseFailure(String),

    #[error("Could not write the export file: {0}")]
    Export(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingInput => "MISSING_INPUT",
            AppError::Unconfigured => "UNCONFIGURED",
            AppError::GenerationFailure(_) => "GENERATION_FAILURE",
            AppError::ParseFailure(_) => "PARSE_FAILURE",
            AppError::Export(_) => "EXPORT_FAILURE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::Unconfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::GenerationFailure(_) | AppError::ParseFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Export(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::GenerationFailure(detail) => {
                tracing::error!("Generation error: {detail}");
                self.to_string()
            }
            AppError::ParseFailure(detail) => {
                tracing::warn!("Parse error: {detail}");
                self.to_string()
            }
            AppError::Export(detail) => {
                tracing::error!("Export error: {detail}");
                self.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (self.status(), body).into_response()
    }
}
