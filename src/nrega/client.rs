// src/nrega/client.rs
use reqwest::header;

use crate::nrega::models::{identity_for, FetchConfig};
use crate::utils::error::FetchError;

/// Performs one static GET attempt against the report URL.
/// A non-success status counts as an attempt failure, same as a timeout.
pub(crate) async fn fetch_once(config: &FetchConfig, attempt: u32) -> Result<String, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(config.attempt_timeout)
        .build()?;

    let user_agent = identity_for(attempt);
    tracing::debug!("Using User-Agent: {}", user_agent);

    let response = client
        .get(&config.url)
        .header(header::USER_AGENT, user_agent)
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(header::CONNECTION, "keep-alive")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    // Check if the request was successful (status code 2xx)
    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, config.url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - likely throttled, will rotate User-Agent.");
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), config.url);

    Ok(body)
}
