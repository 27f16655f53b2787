use thiserror::Error;

/// Failures while turning a request into a relayed submission. None of
/// these reach the client as errors; see [`crate::outcome::acknowledge`].
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request body is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
}
