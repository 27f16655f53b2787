//! Optional spreadsheet delivery.
//!
//! The integration is decided once at startup. Appending never fails the
//! request: every result is reported back as an [`AppendReport`] for
//! logging and nothing else.

use confession_sheets::ServiceAccountKey;
use confession_sheets::SheetsClient;
use confession_sheets::SheetsError;
use confession_sheets::SpreadsheetInfo;
use thiserror::Error;

use crate::config::RelayConfig;
use crate::record::SheetRow;

#[derive(Debug)]
pub enum SheetsIntegration {
    /// Credentials or spreadsheet id missing.
    NotConfigured,
    /// Settings present but unusable (bad JSON, bad key, no sheet names).
    Degraded { reason: String },
    Ready {
        client: SheetsClient,
        targets: Vec<String>,
    },
}

/// Result of one best-effort append.
#[derive(Debug)]
pub enum AppendReport {
    Skipped { reason: String },
    Written {
        sheet: String,
        updated_range: Option<String>,
        attempts: usize,
    },
    /// Every candidate sheet name was rejected as a missing tab.
    NoMatchingSheet { tried: Vec<String> },
    Failed { sheet: String, error: SheetsError },
}

/// Connectivity as reported by `/health`.
#[derive(Debug)]
pub enum HealthStatus {
    NotConfigured,
    Degraded(String),
    Connected { title: String },
    Error(String),
}

impl HealthStatus {
    pub fn describe(&self) -> String {
        match self {
            HealthStatus::NotConfigured => "not configured".to_string(),
            HealthStatus::Degraded(reason) => format!("degraded: {reason}"),
            HealthStatus::Connected { title } => format!("connected - {title}"),
            HealthStatus::Error(message) => format!("error: {message}"),
        }
    }
}

impl SheetsIntegration {
    pub fn from_config(config: &RelayConfig) -> Self {
        let (Some(credentials), Some(spreadsheet_id)) = (config.credentials(), config.spreadsheet())
        else {
            tracing::warn!(
                "Google Sheets not configured; set GOOGLE_APPLICATION_CREDENTIALS_JSON and SPREADSHEET_ID"
            );
            return SheetsIntegration::NotConfigured;
        };

        let targets = config.candidate_sheets();
        if targets.is_empty() {
            return Self::degraded("no sheet names configured".to_string());
        }

        let client = ServiceAccountKey::from_json(credentials).and_then(|key| {
            SheetsClient::new(key, spreadsheet_id, config.sheets_api_base.as_str())
        });
        match client {
            Ok(client) => {
                tracing::info!(
                    service_account = client.service_account_email(),
                    sheets = ?targets,
                    "Google Sheets API initialized"
                );
                SheetsIntegration::Ready { client, targets }
            }
            Err(err) => Self::degraded(err.to_string()),
        }
    }

    fn degraded(reason: String) -> Self {
        tracing::error!("Google Sheets setup failed: {reason}");
        SheetsIntegration::Degraded { reason }
    }

    /// Both settings were provided, usable or not.
    pub fn is_configured(&self) -> bool {
        !matches!(self, SheetsIntegration::NotConfigured)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SheetsIntegration::Ready { .. })
    }

    /// Tries each candidate sheet in order. Only a missing tab moves on to
    /// the next name; any other error ends the attempt.
    pub async fn append(&self, row: &SheetRow) -> AppendReport {
        let (client, targets) = match self {
            SheetsIntegration::NotConfigured => {
                return AppendReport::Skipped {
                    reason: "not configured".to_string(),
                };
            }
            SheetsIntegration::Degraded { reason } => {
                return AppendReport::Skipped {
                    reason: reason.clone(),
                };
            }
            SheetsIntegration::Ready { client, targets } => (client, targets),
        };

        let cells = row.cells();
        for (index, sheet) in targets.iter().enumerate() {
            tracing::debug!("Trying sheet: {sheet}");
            match client.append_row(sheet, &cells).await {
                Ok(response) => {
                    return AppendReport::Written {
                        sheet: sheet.clone(),
                        updated_range: response.updates.updated_range,
                        attempts: index + 1,
                    };
                }
                Err(err) if err.is_range_not_found() => {
                    tracing::debug!("Sheet '{sheet}' not found, trying next");
                }
                Err(error) => {
                    return AppendReport::Failed {
                        sheet: sheet.clone(),
                        error,
                    };
                }
            }
        }
        AppendReport::NoMatchingSheet {
            tried: targets.clone(),
        }
    }

    pub async fn health_check(&self) -> HealthStatus {
        match self {
            SheetsIntegration::NotConfigured => HealthStatus::NotConfigured,
            SheetsIntegration::Degraded { reason } => HealthStatus::Degraded(reason.clone()),
            SheetsIntegration::Ready { client, .. } => match client.spreadsheet().await {
                Ok(info) => HealthStatus::Connected { title: info.title },
                Err(err) => HealthStatus::Error(err.to_string()),
            },
        }
    }

    /// Spreadsheet metadata for the debug endpoint.
    pub async fn inspect(&self) -> Result<SpreadsheetInfo, InspectError> {
        match self {
            SheetsIntegration::NotConfigured => Err(InspectError::NotConfigured),
            SheetsIntegration::Degraded { reason } => Err(InspectError::Degraded(reason.clone())),
            SheetsIntegration::Ready { client, .. } => Ok(client.spreadsheet().await?),
        }
    }
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Google Sheets not configured")]
    NotConfigured,
    #[error("Google Sheets degraded: {0}")]
    Degraded(String),
    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

impl AppendReport {
    pub fn log(&self) {
        match self {
            AppendReport::Skipped { reason } => {
                tracing::warn!("Google Sheets unavailable ({reason}); response only logged");
            }
            AppendReport::Written {
                sheet,
                updated_range,
                attempts,
            } => {
                tracing::info!(
                    sheet = %sheet,
                    attempts,
                    range = updated_range.as_deref().unwrap_or("?"),
                    "Response saved to Google Sheets"
                );
            }
            AppendReport::NoMatchingSheet { tried } => {
                tracing::error!(
                    tried = ?tried,
                    "No matching sheet found; create one of these tabs in the spreadsheet"
                );
            }
            AppendReport::Failed { sheet, error } => {
                tracing::error!(sheet = %sheet, "Google Sheets error: {error}");
                match error.code() {
                    Some(403) => tracing::error!(
                        "Permission denied: share the spreadsheet with the service account email"
                    ),
                    Some(404) => tracing::error!("Spreadsheet not found: check SPREADSHEET_ID"),
                    _ => {}
                }
            }
        }
    }
}
