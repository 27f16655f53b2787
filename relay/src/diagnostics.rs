//! Read-only status endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::SecondsFormat;
use chrono::Utc;
use confession_sheets::SheetInfo;
use serde::Serialize;
use serde_json::Value;

use crate::integration::InspectError;
use crate::state::AppState;

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub google_sheets: SheetsHealth,
    pub environment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsHealth {
    pub configured: bool,
    pub spreadsheet_id: &'static str,
    pub status: String,
}

/// `GET /health`: always 200; checks the spreadsheet when ready.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    let configured = state.integration.is_configured();
    let status = state.integration.health_check().await;
    Json(HealthReport {
        status: "OK",
        timestamp: now_iso(),
        google_sheets: SheetsHealth {
            configured,
            spreadsheet_id: if configured {
                "configured"
            } else {
                "not configured"
            },
            status: status.describe(),
        },
        environment: state.config.environment.clone(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: &'static str,
    pub timestamp: String,
    pub google_sheets: bool,
}

/// `GET /api/status`
pub async fn api_status(State(state): State<Arc<AppState>>) -> Json<StatusReport> {
    Json(StatusReport {
        status: "running",
        timestamp: now_iso(),
        google_sheets: state.integration.is_configured(),
    })
}

#[derive(Debug, Serialize)]
pub struct SpreadsheetSummary {
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum SheetsDebug {
    #[serde(rename = "not ready")]
    NotReady { configured: bool, error: String },
    #[serde(rename = "ready")]
    Ready { spreadsheet: SpreadsheetSummary },
    /// `code` is the HTTP status when known, otherwise `"unknown"`.
    #[serde(rename = "error")]
    Failed { error: String, code: Value },
}

/// `GET /debug/sheets`: lists the spreadsheet's tabs.
pub async fn debug_sheets(State(state): State<Arc<AppState>>) -> Json<SheetsDebug> {
    let report = match state.integration.inspect().await {
        Ok(info) => SheetsDebug::Ready {
            spreadsheet: SpreadsheetSummary {
                title: info.title,
                sheets: info.sheets,
            },
        },
        Err(InspectError::NotConfigured) => SheetsDebug::NotReady {
            configured: false,
            error: "Missing environment variables".to_string(),
        },
        Err(InspectError::Degraded(reason)) => {
            tracing::error!("Spreadsheet inspection failed: {reason}");
            SheetsDebug::Failed {
                code: Value::from("unknown"),
                error: reason,
            }
        }
        Err(InspectError::Sheets(err)) => {
            tracing::error!("Spreadsheet inspection failed: {err}");
            SheetsDebug::Failed {
                code: err.code().map_or_else(|| Value::from("unknown"), Value::from),
                error: err.to_string(),
            }
        }
    };
    Json(report)
}
