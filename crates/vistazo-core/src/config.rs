//! Run configuration loaded from the environment
//!
//! Settings are read once at run start and never mutated afterwards.
//! Supported variables:
//!   - `BASE_URL` (default: https://www.saucedemo.com)
//!   - `BROWSER` (only "chrome" is supported; default: chrome)
//!   - `HEADLESS` (true/false; default: true)
//!   - `SCREENSHOTS_EVERY_STEP` (true/false; default: true)

use serde::{Deserialize, Serialize};

/// Default target URL when `BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com";

/// Default browser name when `BROWSER` is unset
pub const DEFAULT_BROWSER: &str = "chrome";

/// Immutable per-run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Target application URL
    pub base_url: String,
    /// Browser name, lowercased (validated at session start, not here)
    pub browser: String,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Capture a screenshot after every step
    pub screenshots_every_step: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: DEFAULT_BROWSER.to_string(),
            headless: true,
            screenshots_every_step: true,
        }
    }
}

impl RunConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Separated from [`RunConfig::from_env`] so tests can supply a fixed
    /// environment without mutating process state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let browser = lookup("BROWSER")
            .unwrap_or_else(|| DEFAULT_BROWSER.to_string())
            .to_lowercase();
        let headless = lookup("HEADLESS").map_or(true, |v| parse_bool_token(&v));
        let screenshots_every_step =
            lookup("SCREENSHOTS_EVERY_STEP").map_or(true, |v| parse_bool_token(&v));

        Self {
            base_url,
            browser,
            headless,
            screenshots_every_step,
        }
    }
}

/// Parse a boolean environment token
///
/// A token is `true` only when it equals "true" case-insensitively.
/// Every other value, including the empty string, is `false`.
pub fn parse_bool_token(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
