use reqwest::RequestBuilder;
use reqwest::Response;
use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use crate::auth::ServiceAccountAuth;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// Google Sheets API base URL.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Columns written by one append.
const ROW_COLUMNS: &str = "A:E";

/// Google error response format.
#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
    status: Option<String>,
}

/// Google error wrapper.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedCells {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u32>,
}

/// Body of a successful `values.append`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    #[serde(default)]
    pub table_range: Option<String>,
    #[serde(default)]
    pub updates: UpdatedCells,
}

#[derive(Debug, Deserialize)]
struct RawSpreadsheet {
    properties: RawSpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<RawSheet>,
}

#[derive(Debug, Deserialize)]
struct RawSpreadsheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawSheet {
    properties: RawSheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSheetProperties {
    sheet_id: i64,
    title: String,
}

/// One tab of the spreadsheet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SheetInfo {
    pub name: String,
    pub id: i64,
}

/// Spreadsheet title and tabs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SpreadsheetInfo {
    pub title: String,
    pub sheets: Vec<SheetInfo>,
}

/// Client bound to one spreadsheet.
#[derive(Debug)]
pub struct SheetsClient {
    http: reqwest::Client,
    auth: ServiceAccountAuth,
    api_base: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_id: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let http = reqwest::Client::new();
        let auth = ServiceAccountAuth::new(http.clone(), key)?;
        Ok(Self {
            http,
            auth,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn service_account_email(&self) -> &str {
        self.auth.client_email()
    }

    fn spreadsheet_url(&self) -> String {
        format!(
            "{}/spreadsheets/{}",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_id)
        )
    }

    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response, SheetsError> {
        let token = self.auth.access_token().await?;
        let response = request.bearer_auth(token.access_token).send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(envelope) => Err(SheetsError::Api {
                code: envelope.error.code.unwrap_or(status.as_u16()),
                status: envelope.error.status,
                message: envelope.error.message,
            }),
            Err(_) => Err(SheetsError::Api {
                code: status.as_u16(),
                status: None,
                message: body,
            }),
        }
    }

    /// Appends `row` below the last row of `sheet_name`, columns A:E.
    pub async fn append_row(
        &self,
        sheet_name: &str,
        row: &[String],
    ) -> Result<AppendResponse, SheetsError> {
        let range = format!("{sheet_name}!{ROW_COLUMNS}");
        let url = format!(
            "{}/values/{}:append",
            self.spreadsheet_url(),
            urlencoding::encode(&range)
        );
        let request = self
            .http
            .post(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }));

        let response = self.send_authorized(request).await?;
        response
            .json::<AppendResponse>()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))
    }

    /// Title and tabs, used by the diagnostic endpoints.
    pub async fn spreadsheet(&self) -> Result<SpreadsheetInfo, SheetsError> {
        let request = self
            .http
            .get(self.spreadsheet_url())
            .query(&[("fields", "properties.title,sheets.properties(sheetId,title)")]);

        let raw: RawSpreadsheet = self
            .send_authorized(request)
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))?;

        Ok(SpreadsheetInfo {
            title: raw.properties.title,
            sheets: raw
                .sheets
                .into_iter()
                .map(|sheet| SheetInfo {
                    name: sheet.properties.title,
                    id: sheet.properties.sheet_id,
                })
                .collect(),
        })
    }
}
