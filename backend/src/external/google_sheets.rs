//! Google Sheets client backing the record store
//!
//! Uses the Sheets REST API v4. Values are written with `RAW` input so cells
//! keep exactly the text we send.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use shared::SheetKind;

use super::service_account::{ServiceAccountKey, TokenProvider};
use crate::config::StoreConfig;
use crate::store::{RecordStore, StoreError};

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Column span read and appended for every sheet
const COLUMN_SPAN: &str = "A:Z";

/// Record store on a single Google spreadsheet
pub struct GoogleSheetsStore {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    auth: TokenProvider,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheetsStore {
    /// Create a store from configuration
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::with_base_url(config, SHEETS_BASE_URL.to_string())
    }

    /// Create a store with a custom base URL (for testing)
    pub fn with_base_url(config: &StoreConfig, base_url: String) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Request(format!("failed to build HTTP client: {}", e)))?;

        let key = ServiceAccountKey::from_blob(&config.credentials)?;
        let auth = TokenProvider::new(http.clone(), key)?;
        tracing::info!("Google Sheets store initialized for {}", auth.client_email());

        Ok(Self {
            http,
            base_url,
            spreadsheet_id: config.spreadsheet_id.clone(),
            auth,
        })
    }

    /// `{base}/{spreadsheet_id}/{segments...}` with each segment percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::Request(format!("invalid base URL: {}", e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StoreError::Request("base URL cannot take a path".into()))?;
            path.push(&self.spreadsheet_id);
            path.extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, String> {
        let token = self.auth.access_token().await.map_err(|e| e.to_string())?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| format!("Sheets API request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Sheets API error: {} - {}", status, body));
        }

        response
            .json()
            .await
            .map_err(|e| format!("failed to parse Sheets API response: {}", e))
    }

    async fn sheet_titles(&self) -> Result<Vec<String>, String> {
        let mut url = self.url(&[]).map_err(|e| e.to_string())?;
        url.query_pairs_mut().append_pair("fields", "sheets.properties.title");

        let meta: SpreadsheetMeta = self.send(self.http.get(url)).await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    async fn add_sheet(&self, sheet: SheetKind) -> Result<(), String> {
        let batch_update = format!("{}:batchUpdate", self.spreadsheet_id);
        let mut url = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        url.path_segments_mut()
            .map_err(|_| "base URL cannot take a path".to_string())?
            .push(&batch_update);

        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": sheet.title(),
                        "gridProperties": { "rowCount": 1000, "columnCount": 10 }
                    }
                }
            }]
        });
        let _: Value = self.send(self.http.post(url).json(&body)).await?;

        self.append_values(sheet, sheet.header_row()).await
    }

    async fn append_values(&self, sheet: SheetKind, row: Vec<String>) -> Result<(), String> {
        let range = format!("{}!{}:append", sheet.title(), COLUMN_SPAN);
        let mut url = self.url(&["values", &range]).map_err(|e| e.to_string())?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let _: Value = self
            .send(self.http.post(url).json(&json!({ "values": [row] })))
            .await?;
        Ok(())
    }
}

/// Render a cell as text and pad rows the API shortened.
///
/// The Sheets API drops trailing empty cells, so every row is padded back to
/// the header width. Rows longer than the header are left as they are.
fn normalize_rows(values: Vec<Vec<Value>>) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();

    let width = rows.first().map(Vec::len).unwrap_or(0);
    for row in rows.iter_mut().skip(1) {
        if row.len() < width {
            row.resize(width, String::new());
        }
    }
    rows
}

#[async_trait]
impl RecordStore for GoogleSheetsStore {
    async fn ensure_sheet(&self, sheet: SheetKind) -> Result<(), StoreError> {
        let unavailable = |reason: String| {
            tracing::error!("Error accessing worksheet {}: {}", sheet, reason);
            StoreError::SheetUnavailable { sheet, reason }
        };

        let titles = self.sheet_titles().await.map_err(unavailable)?;
        if titles.iter().any(|t| t == sheet.title()) {
            return Ok(());
        }

        self.add_sheet(sheet).await.map_err(unavailable)?;
        tracing::info!("Created worksheet: {}", sheet);
        Ok(())
    }

    async fn append_row(&self, sheet: SheetKind, row: Vec<String>) -> Result<(), StoreError> {
        self.append_values(sheet, row).await.map_err(|reason| {
            tracing::error!("Error appending row to {}: {}", sheet, reason);
            StoreError::Append { sheet, reason }
        })
    }

    async fn read_rows(&self, sheet: SheetKind) -> Result<Vec<Vec<String>>, StoreError> {
        let range = format!("{}!{}", sheet.title(), COLUMN_SPAN);
        let url = self.url(&["values", &range])?;

        let values: ValueRange = self.send(self.http.get(url)).await.map_err(|reason| {
            tracing::error!("Error getting records from {}: {}", sheet, reason);
            StoreError::SheetUnavailable { sheet, reason }
        })?;

        Ok(normalize_rows(values.values))
    }

    fn name(&self) -> &'static str {
        "google_sheets"
    }
}
