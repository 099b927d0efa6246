// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 404 Not Found, 403 Forbidden

    #[error("Browser session failed: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("No table rendered within {0} ms of navigation")]
    RenderTimeout(u64),

    #[error("All {attempts} fetch attempts failed. Last error: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },

    #[error("Fetch attempt budget is zero, nothing was attempted")]
    NoAttempts,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Page structure mismatch: selection requires at least {required} tables, found {found}")]
    NotEnoughTables { required: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid Sheets URL: {0}")]
    InvalidUrl(String),

    #[error("Sheets API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError), // Automatically convert fetch errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Publish failed: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
