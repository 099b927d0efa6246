// src/main.rs
use std::time::Duration;

use clap::Parser;

use nrega_extractor::extractors::{CellPolicy, TableExtractor, TableSelection};
use nrega_extractor::nrega::{self, FetchConfig, FetchMode};
use nrega_extractor::sheets::{SheetTarget, SheetsClient, SHEETS_TOKEN_ENV};
use nrega_extractor::storage::StorageManager;
use nrega_extractor::utils::{self, AppError};

/// Command Line Interface for the NREGA labour-report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Labour report URL, including region and fiscal-year query parameters
    #[arg(short, long)]
    url: String,

    /// Zero-based table positions to extract, in publish order (e.g. "1,4")
    #[arg(long, default_value = "1,4")]
    tables: TableSelection,

    /// Fetch strategy: plain HTTP GET or a rendered browser session
    #[arg(long, value_enum, default_value = "static")]
    mode: FetchMode,

    /// Maximum fetch attempts before giving up
    #[arg(long, default_value_t = 3)]
    attempts: u32,

    /// Delay between attempts in milliseconds
    #[arg(long, default_value_t = 3000)]
    retry_delay_ms: u64,

    /// Per-attempt timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Page-load timeout for rendered mode in milliseconds (WebDriver default when omitted)
    #[arg(long)]
    nav_timeout_ms: Option<u64>,

    /// WebDriver endpoint for rendered mode
    #[arg(long, default_value = "http://localhost:4444")]
    webdriver_url: String,

    /// Collect only data cells (td), dropping header rows via the zero-cell rule
    #[arg(long)]
    data_cells_only: bool,

    /// Output directory for diagnostic artifacts and local dataset dumps
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Persist the fetched page HTML to the output directory
    #[arg(long)]
    dump_html: bool,

    /// Destination spreadsheet id; when omitted the dataset is written locally instead
    #[arg(long)]
    sheet_id: Option<String>,

    /// A1-notation range to overwrite, e.g. "R6.09!A3"
    #[arg(long, default_value = "R6.09!A3")]
    sheet_range: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting labour-report extraction for args: {:?}", args);

    // 3. Initialize storage for artifacts
    let storage = StorageManager::new(&args.output_dir)?;

    // 4. Fetch the report page
    let fetch_config = FetchConfig {
        url: args.url.clone(),
        mode: args.mode,
        max_attempts: args.attempts,
        retry_delay: Duration::from_millis(args.retry_delay_ms),
        attempt_timeout: Duration::from_millis(args.timeout_ms),
        nav_timeout: args.nav_timeout_ms.map(Duration::from_millis),
        webdriver_url: args.webdriver_url.clone(),
        screenshot_path: storage.screenshot_path(),
    };

    let html = nrega::fetch_page(&fetch_config).await?;
    tracing::info!("Fetched page content ({} bytes)", html.len());

    if args.dump_html {
        match storage.save_raw_page(&html) {
            Ok(path) => tracing::info!("Raw page available at: {}", path.display()),
            Err(e) => tracing::warn!("Failed to save raw page: {}", e),
        }
    }

    // 5. Extract the selected tables
    let policy = if args.data_cells_only {
        CellPolicy::DataOnly
    } else {
        CellPolicy::HeadersAndData
    };
    let extractor = TableExtractor::new(policy);
    let dataset = extractor.extract(&html, &args.tables, &args.url)?;

    if dataset.rows.is_empty() {
        tracing::warn!("Selected tables produced no rows; nothing useful to publish");
    }

    // 6. Publish to the sheet, or dump locally when no sheet is configured
    match args.sheet_id {
        Some(sheet_id) => {
            let token = std::env::var(SHEETS_TOKEN_ENV).map_err(|_| {
                AppError::Config(format!(
                    "{} must be set to publish to a spreadsheet",
                    SHEETS_TOKEN_ENV
                ))
            })?;
            let client = SheetsClient::new(token)?;
            let target = SheetTarget {
                spreadsheet_id: sheet_id,
                range: args.sheet_range.clone(),
            };
            let response = client.update_values(&target, &dataset.rows).await?;
            tracing::info!(
                "Published {} rows to spreadsheet {} ({})",
                dataset.rows.len(),
                target.spreadsheet_id,
                response.updated_range.as_deref().unwrap_or(&target.range)
            );
        }
        None => {
            let path = storage.save_dataset(&dataset)?;
            tracing::info!("No spreadsheet configured; wrote dataset to {}", path.display());
        }
    }

    Ok(())
}
