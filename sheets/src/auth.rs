//! Service-account OAuth 2.0 (JWT bearer grant).

use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Deserialize;
use serde::Serialize;

use crate::SPREADSHEETS_SCOPE;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion; Google caps this at one hour.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

/// Bearer token returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth error response from Google
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Mints access tokens for one service account.
pub struct ServiceAccountAuth {
    client: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for ServiceAccountAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountAuth")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountAuth {
    /// Loads the private key up front so a bad key is caught at startup.
    pub fn new(client: reqwest::Client, key: ServiceAccountKey) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(Self {
            client,
            key,
            encoding_key,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn assertion(&self) -> Result<String, SheetsError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    /// Exchanges a fresh assertion for a bearer token. One request, no retry.
    pub async fn access_token(&self) -> Result<AccessToken, SheetsError> {
        let assertion = self.assertion()?;
        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT,
            assertion: &assertion,
        };

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if let Ok(oauth_err) = serde_json::from_str::<OAuthErrorBody>(&body) {
                return Err(SheetsError::OAuth {
                    error: oauth_err.error,
                    description: oauth_err.error_description.unwrap_or_default(),
                });
            }

            return Err(SheetsError::OAuth {
                error: format!("HTTP {status}"),
                description: body,
            });
        }

        let token: AccessToken = response
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))?;
        tracing::debug!(expires_in = ?token.expires_in, "service account token issued");
        Ok(token)
    }
}
