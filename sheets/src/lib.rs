//! Google Sheets collaborator.
//!
//! Authenticates as a service account (RS256-signed JWT exchanged for an
//! access token) and appends rows with the Sheets v4 `values.append` call.
//!
//! Flow per call:
//! 1. Sign a JWT assertion with the service-account private key
//! 2. POST it to the key's `token_uri` for a bearer token
//! 3. Call the Sheets API with that token

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;

pub use auth::AccessToken;
pub use auth::ServiceAccountAuth;
pub use client::AppendResponse;
pub use client::DEFAULT_API_BASE;
pub use client::SheetInfo;
pub use client::SheetsClient;
pub use client::SpreadsheetInfo;
pub use credentials::ServiceAccountKey;
pub use error::SheetsError;

/// Scope needed to read metadata and append values.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
