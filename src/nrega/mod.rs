// src/nrega/mod.rs
mod browser;
mod client;
pub mod models;

pub use models::{identity_for, FetchConfig, FetchMode, USER_AGENTS};

use crate::utils::error::FetchError;

/// Fetches the report page, retrying with a constant delay and a rotating
/// identity until the attempt budget is spent. Attempts are strictly
/// sequential: the next one starts only after the previous failure and
/// the full delay. Terminal failure wraps the last underlying error and
/// names the attempt count.
pub async fn fetch_page(config: &FetchConfig) -> Result<String, FetchError> {
    let mut last_err: Option<FetchError> = None;

    for attempt in 1..=config.max_attempts {
        tracing::info!(
            "Fetching {} (attempt {}/{})",
            config.url,
            attempt,
            config.max_attempts
        );

        let is_last = attempt == config.max_attempts;
        let result = match config.mode {
            FetchMode::Static => client::fetch_once(config, attempt).await,
            FetchMode::Rendered => browser::fetch_once(config, is_last).await,
        };

        match result {
            Ok(html) => {
                tracing::info!("Attempt {} succeeded ({} bytes)", attempt, html.len());
                return Ok(html);
            }
            Err(e) => {
                tracing::warn!("Attempt {} failed: {}", attempt, e);
                last_err = Some(e);
                if !is_last {
                    tracing::info!(
                        "Waiting {} ms before retry",
                        config.retry_delay.as_millis()
                    );
                    tokio::time::sleep(config.retry_delay).await;
                }
            }
        }
    }

    match last_err {
        Some(source) => Err(FetchError::RetriesExhausted {
            attempts: config.max_attempts,
            source: Box::new(source),
        }),
        None => Err(FetchError::NoAttempts),
    }
}
