//! Error types for the pipelines and the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Structural failures that reject a whole request. Anything finer grained
/// (a bad date on one sample, an unparsable reading) becomes a null cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("no records supplied")]
    EmptySequence,

    #[error("unparsable timestamp {value:?} in record {index}")]
    InvalidTimestamp { index: usize, value: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} model not loaded (missing or unreadable artifact)")]
    ModelUnavailable(&'static str),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("unsupported output_format {0:?}; expected \"json\" or \"csv\"")]
    UnsupportedFormat(String),

    #[error("scoring failed: {0:#}")]
    Scoring(anyhow::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::ModelUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ApiError::Pipeline(_) | ApiError::UnsupportedFormat(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Scoring(e) => {
                tracing::error!(detail = %format!("{e:#}"), "scoring error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Model scoring failed. Check server logs for details.".to_string(),
                )
            }
            ApiError::Csv(e) => {
                tracing::error!(detail = %e, "csv export error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render CSV output".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
