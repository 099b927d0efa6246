// src/nrega/models.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

/// User agents rotated across attempts; the report server throttles
/// clients it recognizes as repeat scrapers.
pub const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
];

/// Returns the user agent for a 1-based attempt number, cycling through
/// [`USER_AGENTS`] in order.
pub fn identity_for(attempt: u32) -> &'static str {
    USER_AGENTS[(attempt.saturating_sub(1) as usize) % USER_AGENTS.len()]
}

/// How the report page is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchMode {
    /// Plain HTTP GET of the server response.
    Static,
    /// Full browser session via WebDriver; waits for client-side
    /// rendering to produce at least one table.
    Rendered,
}

/// Everything one fetch invocation needs, resolved up front by the CLI.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Report URL including region and fiscal-year query parameters.
    pub url: String,
    pub mode: FetchMode,
    /// Maximum number of attempts before failing terminally.
    pub max_attempts: u32,
    /// Constant delay between consecutive attempts.
    pub retry_delay: Duration,
    /// Hard cap on a single attempt (request timeout in static mode,
    /// table-render wait in rendered mode).
    pub attempt_timeout: Duration,
    /// Page-load timeout for rendered mode. `None` leaves the WebDriver
    /// default in place, which can stall an attempt on a hung load.
    pub nav_timeout: Option<Duration>,
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    /// Where to drop a screenshot when the final rendered attempt fails.
    pub screenshot_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_cycles_in_order() {
        assert_eq!(identity_for(1), USER_AGENTS[0]);
        assert_eq!(identity_for(2), USER_AGENTS[1]);
        assert_eq!(identity_for(3), USER_AGENTS[2]);
        assert_eq!(identity_for(4), USER_AGENTS[0]);
    }

    #[test]
    fn identity_for_zero_is_clamped() {
        assert_eq!(identity_for(0), USER_AGENTS[0]);
    }
}
