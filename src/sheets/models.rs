// src/sheets/models.rs
use serde::{Deserialize, Serialize};

/// Where the dataset lands: a spreadsheet plus an A1-notation anchor,
/// e.g. range "R6.09!A3".
#[derive(Debug, Clone)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub range: String,
}

/// Request body for the `values.update` endpoint.
#[derive(Debug, Serialize)]
pub struct ValueRange {
    pub range: String,
    #[serde(rename = "majorDimension")]
    pub major_dimension: String,
    pub values: Vec<Vec<String>>,
}

/// Subset of the `values.update` response we care about.
#[derive(Debug, Deserialize)]
pub struct UpdateValuesResponse {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: String,
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
    #[serde(rename = "updatedRows")]
    pub updated_rows: Option<u32>,
    #[serde(rename = "updatedColumns")]
    pub updated_columns: Option<u32>,
    #[serde(rename = "updatedCells")]
    pub updated_cells: Option<u32>,
}
