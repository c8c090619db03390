//! Error types for report generation
//!
//! Only document-level failures are represented here. Missing optional
//! content never produces an error; section renderers degrade to
//! placeholders instead.

use thiserror::Error;

/// Fatal error raised by the report pipeline
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Missing required field: score")]
    MissingScore,

    #[error("Score out of range (expected 0..=100): {0}")]
    ScoreOutOfRange(i64),

    #[error("Font error: {0}")]
    Font(String),

    #[error("PDF serialization error: {0}")]
    Serialization(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;

impl From<image::ImageError> for ReportError {
    fn from(err: image::ImageError) -> Self {
        ReportError::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(
            ReportError::MissingScore.to_string(),
            "Missing required field: score"
        );
        assert!(ReportError::ScoreOutOfRange(140).to_string().contains("140"));
        assert!(ReportError::Font("Comic".into()).to_string().starts_with("Font error"));
    }

    #[test]
    fn test_json_error_converts() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReportError::Json(_)));
    }
}
