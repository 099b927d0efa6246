// src/nrega/browser.rs
use std::time::Duration;

use thirtyfour::{By, ChromeCapabilities, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tokio::time::Instant;

use crate::nrega::models::FetchConfig;
use crate::utils::error::FetchError;

const TABLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Performs one rendered attempt: a fresh browser session, scoped to this
/// call and released on every exit path. When `capture_on_fail` is set
/// (the final attempt) a failed navigation leaves a screenshot behind
/// before the session is released; a screenshot failure never replaces
/// the navigation error.
pub(crate) async fn fetch_once(
    config: &FetchConfig,
    capture_on_fail: bool,
) -> Result<String, FetchError> {
    let caps = chrome_caps()?;
    let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;
    let guard = SessionGuard::new(driver);

    let result = navigate_and_read(&guard.driver, config).await;

    if result.is_err() && capture_on_fail {
        match guard.driver.screenshot(&config.screenshot_path).await {
            Ok(()) => tracing::info!(
                "Saved failure screenshot to {}",
                config.screenshot_path.display()
            ),
            Err(e) => tracing::warn!("Could not capture failure screenshot: {}", e),
        }
    }

    guard.release().await;

    result
}

fn chrome_caps() -> Result<ChromeCapabilities, FetchError> {
    let mut caps = DesiredCapabilities::chrome();
    caps.set_headless()?;
    Ok(caps)
}

/// Holds the browser session so it gets released on every exit path.
/// Normal flow calls [`SessionGuard::release`], which quits inline; if
/// the surrounding future is cancelled mid-flight, dropping the guard
/// spawns a best-effort quit instead of leaking the session.
struct SessionGuard {
    driver: WebDriver,
    released: bool,
}

impl SessionGuard {
    fn new(driver: WebDriver) -> Self {
        Self {
            driver,
            released: false,
        }
    }

    async fn release(mut self) {
        self.released = true;
        if let Err(e) = self.driver.clone().quit().await {
            tracing::warn!("Browser session did not shut down cleanly: {}", e);
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let driver = self.driver.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Err(e) = driver.quit().await {
                    tracing::warn!("Browser session did not shut down cleanly: {}", e);
                }
            });
        }
    }
}

async fn navigate_and_read(driver: &WebDriver, config: &FetchConfig) -> Result<String, FetchError> {
    match config.nav_timeout {
        Some(timeout) => driver.set_page_load_timeout(timeout).await?,
        None => tracing::warn!(
            "No navigation timeout configured; a hung page load will stall this attempt"
        ),
    }

    tracing::debug!("Navigating to {}", config.url);
    driver.goto(&config.url).await?;

    wait_for_table(driver, config.attempt_timeout).await?;

    let html = driver.source().await?;
    tracing::debug!("Rendered page source is {} bytes", html.len());
    Ok(html)
}

/// Polls until at least one table element exists in the rendered DOM.
/// The report page builds its tables client-side, so a loaded document
/// is not yet an extractable one.
async fn wait_for_table(driver: &WebDriver, timeout: Duration) -> Result<(), FetchError> {
    let deadline = Instant::now() + timeout;
    loop {
        if driver.find(By::Css("table")).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(FetchError::RenderTimeout(timeout.as_millis() as u64));
        }
        tokio::time::sleep(TABLE_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn chrome_capabilities_build_headless() {
        assert!(chrome_caps().is_ok());
    }

    /// Stubs the WebDriver endpoints a session lifecycle touches.
    async fn webdriver_stub() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": {
                    "sessionId": "test-session-1",
                    "capabilities": { "browserName": "chrome" }
                }
            })))
            .mount(&server)
            .await;
        // Session creation also issues a POST to set the default timeouts.
        Mock::given(method("POST"))
            .and(path("/session/test-session-1/timeouts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/session/test-session-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": null })))
            .mount(&server)
            .await;
        server
    }

    async fn quit_count(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.method.to_string() == "DELETE")
            .count()
    }

    #[tokio::test]
    async fn release_quits_the_session() {
        let server = webdriver_stub().await;
        let driver = WebDriver::new(server.uri().as_str(), chrome_caps().unwrap())
            .await
            .unwrap();

        let guard = SessionGuard::new(driver);
        guard.release().await;

        assert_eq!(quit_count(&server).await, 1);
    }

    #[tokio::test]
    async fn dropped_guard_still_quits_the_session() {
        let server = webdriver_stub().await;
        let driver = WebDriver::new(server.uri().as_str(), chrome_caps().unwrap())
            .await
            .unwrap();

        let guard = SessionGuard::new(driver);
        drop(guard);

        // Give the spawned quit a chance to run.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(quit_count(&server).await, 1);
    }
}
