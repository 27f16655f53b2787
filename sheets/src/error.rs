//! Error types for the spreadsheet collaborator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    /// The credentials blob is not a usable service-account key.
    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    /// The private key could not be loaded or used for signing.
    #[error("service account key error: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// OAuth error from the token endpoint.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// Error envelope returned by the Sheets API.
    #[error("Sheets API error {code}: {message}")]
    Api {
        code: u16,
        status: Option<String>,
        message: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetsError {
    /// HTTP status of an API rejection, if this is one.
    pub fn code(&self) -> Option<u16> {
        match self {
            SheetsError::Api { code, .. } => Some(*code),
            SheetsError::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The API could not resolve the sheet name in the range, i.e. the tab
    /// does not exist.
    pub fn is_range_not_found(&self) -> bool {
        matches!(
            self,
            SheetsError::Api { code: 400, message, .. } if message.contains("Unable to parse range")
        )
    }
}
