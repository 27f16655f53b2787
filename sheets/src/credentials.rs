use serde::Deserialize;

use crate::error::SheetsError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The parts of a Google service-account JSON key this client uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
}

impl ServiceAccountKey {
    /// Parses the credentials blob as it is stored in the environment.
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        let key: ServiceAccountKey = serde_json::from_str(raw)
            .map_err(|e| SheetsError::Credentials(format!("not a service account key: {e}")))?;
        if key.client_email.trim().is_empty() {
            return Err(SheetsError::Credentials("client_email is empty".to_string()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(SheetsError::Credentials(
                "private_key is not a PEM block".to_string(),
            ));
        }
        Ok(key)
    }
}
