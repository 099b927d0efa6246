// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::table::ExtractedDataset;
use crate::utils::error::StorageError;

const RAW_PAGE_FILENAME: &str = "labour_report.html";
const DATASET_FILENAME: &str = "labour_dataset.json";
const SCREENSHOT_FILENAME: &str = "fetch_failure.png";

/// Owns the output directory for diagnostic artifacts and local dataset
/// dumps.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Persists the fetched page HTML for offline debugging.
    pub fn save_raw_page(&self, html: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(RAW_PAGE_FILENAME);
        fs::write(&file_path, html).map_err(StorageError::IoError)?;
        tracing::info!("Saved raw page to {}", file_path.display());
        Ok(file_path)
    }

    /// Where the fetcher should drop a screenshot when a rendered fetch
    /// fails terminally.
    pub fn screenshot_path(&self) -> PathBuf {
        self.base_dir.join(SCREENSHOT_FILENAME)
    }

    /// Writes the assembled dataset with its provenance metadata as
    /// pretty JSON, for runs without a configured spreadsheet.
    pub fn save_dataset(&self, dataset: &ExtractedDataset) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(DATASET_FILENAME);

        let json = serde_json::to_string_pretty(dataset)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;
        tracing::info!("Saved dataset to {}", file_path.display());
        Ok(file_path)
    }
}
