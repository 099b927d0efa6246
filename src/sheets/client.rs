// src/sheets/client.rs
use crate::sheets::models::{SheetTarget, UpdateValuesResponse, ValueRange};
use crate::utils::error::SheetsError;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// Environment variable the CLI reads the OAuth bearer token from.
/// Obtaining and refreshing the token is the caller's problem.
pub const SHEETS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

/// Thin client for the Google Sheets values API. The core never retries
/// sink failures; whatever the API says comes back unmodified.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl SheetsClient {
    pub fn new(token: impl Into<String>) -> Result<Self, SheetsError> {
        Self::with_base_url(token, SHEETS_API_BASE)
    }

    /// Same client against a different API host. Used by tests.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SheetsError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Overwrites `target.range` with the given rows via `values.update`
    /// with RAW input (no sheet-side parsing of cell text). Ragged rows
    /// are fine; the API pads short rows.
    pub async fn update_values(
        &self,
        target: &SheetTarget,
        values: &[Vec<String>],
    ) -> Result<UpdateValuesResponse, SheetsError> {
        // Build the path from segments so ranges with spaces or quotes
        // (e.g. "'Block A'!A1") are percent-encoded correctly.
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| SheetsError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(format!("cannot-be-a-base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                target.spreadsheet_id.as_str(),
                "values",
                target.range.as_str(),
            ]);

        let body = ValueRange {
            range: target.range.clone(),
            major_dimension: "ROWS".to_string(),
            values: values.to_vec(),
        };

        tracing::debug!(
            "Publishing {} rows to spreadsheet {} range {}",
            values.len(),
            target.spreadsheet_id,
            target.range
        );

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "Sheets API error {} for spreadsheet {}: {}",
                status,
                target.spreadsheet_id,
                body
            );
            return Err(SheetsError::Api { status, body });
        }

        let parsed: UpdateValuesResponse = response.json().await?;
        tracing::info!(
            "Updated {} cells in range {}",
            parsed.updated_cells.unwrap_or(0),
            parsed.updated_range.as_deref().unwrap_or(&target.range)
        );
        Ok(parsed)
    }
}
