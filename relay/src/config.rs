use std::path::PathBuf;

use chrono::FixedOffset;
use chrono::Offset;
use clap::Parser;
use confession_sheets::DEFAULT_API_BASE;

/// Sheet names tried in order when appending a row.
pub const DEFAULT_SHEET_NAMES: [&str; 4] = ["result_cr", "Sheet1", "responses", "data"];

/// Asia/Ho_Chi_Minh, which has no daylight saving.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Relay settings. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "confession-relay", version, about = "Proposal answer relay")]
pub struct RelayConfig {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory holding `index.html` and other static files.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Service-account key JSON for the spreadsheet integration.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS_JSON", hide_env_values = true)]
    pub credentials_json: Option<String>,

    #[arg(long, env = "SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Candidate sheet names, tried in order. Give a single name to write
    /// to one explicit target.
    #[arg(
        long,
        env = "SHEET_NAMES",
        value_delimiter = ',',
        default_values = DEFAULT_SHEET_NAMES
    )]
    pub sheet_names: Vec<String>,

    #[arg(long, env = "SHEETS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub sheets_api_base: String,

    /// UTC offset used when stamping rows.
    #[arg(
        long,
        env = "TIMESTAMP_UTC_OFFSET_HOURS",
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        allow_hyphen_values = true
    )]
    pub utc_offset_hours: i32,

    /// Reported by the health endpoint.
    #[arg(long, env = "APP_ENV", default_value = "development")]
    pub environment: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            credentials_json: None,
            spreadsheet_id: None,
            sheet_names: DEFAULT_SHEET_NAMES.map(String::from).to_vec(),
            sheets_api_base: DEFAULT_API_BASE.to_string(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            environment: "development".to_string(),
        }
    }
}

impl RelayConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credentials blob, treating an empty value as unset.
    pub fn credentials(&self) -> Option<&str> {
        self.credentials_json
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn spreadsheet(&self) -> Option<&str> {
        self.spreadsheet_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Sheet names with blanks removed.
    pub fn candidate_sheets(&self) -> Vec<String> {
        self.sheet_names
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn utc_offset(&self) -> FixedOffset {
        let default = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600);
        let configured = self
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt);
        match configured.or(default) {
            Some(offset) => offset,
            None => chrono::Utc.fix(),
        }
    }
}
