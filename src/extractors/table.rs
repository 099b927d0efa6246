// src/extractors/table.rs

// --- Imports ---
use std::str::FromStr;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::utils::error::ExtractError;

// --- CSS Selectors (Lazy Static) ---
static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("Failed to compile TABLE_SELECTOR"));

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("Failed to compile ROW_SELECTOR"));

static DATA_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile DATA_CELL_SELECTOR"));

static ANY_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("Failed to compile ANY_CELL_SELECTOR"));

// --- Data Structures ---

/// One extracted table row: trimmed cell texts, left to right.
pub type Row = Vec<String>;

/// Which tables to pull out of the page, by zero-based position among all
/// tables in document order. The report page labels nothing, so position
/// is the only handle we have; keeping it here as configuration documents
/// the role-to-position mapping instead of burying magic indices in the
/// extraction walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    Single(usize),
    Many(Vec<usize>),
}

impl TableSelection {
    pub fn indices(&self) -> &[usize] {
        match self {
            TableSelection::Single(index) => std::slice::from_ref(index),
            TableSelection::Many(indices) => indices,
        }
    }

    /// Minimum number of tables the document must contain:
    /// highest requested index + 1.
    pub fn min_required(&self) -> usize {
        self.indices().iter().copied().max().map_or(0, |max| max + 1)
    }
}

impl FromStr for TableSelection {
    type Err = String;

    /// Parses a comma-separated list of zero-based indices, e.g. "1,4".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let indices = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| format!("invalid table index '{}'", part))
            })
            .collect::<Result<Vec<usize>, String>>()?;

        match indices.as_slice() {
            [] => Err("at least one table index is required".to_string()),
            [single] => Ok(TableSelection::Single(*single)),
            _ => Ok(TableSelection::Many(indices)),
        }
    }
}

/// Whether header cells participate in row collection. Under `DataOnly`,
/// header-only rows yield zero cells and drop out without an explicit
/// skip rule; `HeadersAndData` keeps them, matching the published report
/// which carries its header row into the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPolicy {
    DataOnly,
    HeadersAndData,
}

/// The assembled dataset plus enough provenance to explain an artifact
/// found on disk later.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDataset {
    pub rows: Vec<Row>,
    pub table_indices: Vec<usize>,
    pub source_url: String,
    pub extracted_at: String, // RFC 3339
}

// --- Main Extractor Structure ---
pub struct TableExtractor {
    policy: CellPolicy,
}

impl TableExtractor {
    pub fn new(policy: CellPolicy) -> Self {
        Self { policy }
    }

    /// Parses the page, validates the selection against the number of
    /// tables actually present, and concatenates the selected tables'
    /// rows in selection order. Structural mismatch is terminal; a
    /// correctly rendered page will not grow tables on a refetch.
    pub fn extract(
        &self,
        html_content: &str,
        selection: &TableSelection,
        source_url: &str,
    ) -> Result<ExtractedDataset, ExtractError> {
        let document = Html::parse_document(html_content);
        let tables: Vec<ElementRef> = document.select(&TABLE_SELECTOR).collect();
        tracing::debug!("Found {} tables in document order", tables.len());

        let required = selection.min_required();
        if tables.len() < required {
            return Err(ExtractError::NotEnoughTables {
                required,
                found: tables.len(),
            });
        }

        let mut rows: Vec<Row> = Vec::new();
        for &index in selection.indices() {
            let fragment = self.collect_rows(tables[index]);
            tracing::debug!("Table {} contributed {} rows", index, fragment.len());
            rows.extend(fragment);
        }

        tracing::info!(
            "Extracted {} rows from tables {:?}",
            rows.len(),
            selection.indices()
        );

        Ok(ExtractedDataset {
            rows,
            table_indices: selection.indices().to_vec(),
            source_url: source_url.to_string(),
            extracted_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Walks one table's rows in document order. A row is emitted only if
    /// collection yields at least one cell with non-empty trimmed text;
    /// rows matching no cells and rows whose cells all trim to empty are
    /// dropped silently. Trimming touches leading/trailing whitespace
    /// only.
    fn collect_rows(&self, table: ElementRef<'_>) -> Vec<Row> {
        let cell_selector = match self.policy {
            CellPolicy::DataOnly => &*DATA_CELL_SELECTOR,
            CellPolicy::HeadersAndData => &*ANY_CELL_SELECTOR,
        };

        let mut rows = Vec::new();
        for tr in table.select(&ROW_SELECTOR) {
            let cells: Vec<String> = tr
                .select(cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();

            if cells.iter().any(|cell| !cell.is_empty()) {
                rows.push(cells);
            }
        }
        rows
    }
}
