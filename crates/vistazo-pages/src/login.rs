//! Login page object
//!
//! Encapsulates the login page's locators and interaction sequences.
//! All waiting is explicit and bounded; assertions return `Result` so the
//! runner decides pass/fail.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vistazo_browser::Driver;
use vistazo_core::{Result, VistazoError};

/// Username input
pub const USERNAME: &str = "#user-name";
/// Password input
pub const PASSWORD: &str = "#password";
/// Submit control
pub const LOGIN_BUTTON: &str = "#login-button";
/// Login error banner
pub const ERROR_MESSAGE: &str = "[data-test='error']";
/// Post-login marker: the inventory list
pub const INVENTORY_LIST: &str = "[data-test='inventory-list']";

/// Default explicit-wait timeout
pub const DEFAULT_WAIT: Duration = Duration::from_secs(10);

/// Login page bound to a live driver session
pub struct LoginPage {
    driver: Arc<dyn Driver>,
    base_url: String,
    wait: Duration,
}

impl LoginPage {
    pub fn new(driver: Arc<dyn Driver>, base_url: impl Into<String>) -> Self {
        Self::with_wait(driver, base_url, DEFAULT_WAIT)
    }

    /// Page object with a custom explicit-wait timeout
    pub fn with_wait(
        driver: Arc<dyn Driver>,
        base_url: impl Into<String>,
        wait: Duration,
    ) -> Self {
        Self {
            driver,
            base_url: base_url.into(),
            wait,
        }
    }

    /// Navigate to the configured target URL
    pub async fn open(&self) -> Result<()> {
        debug!("Opening login page at {}", self.base_url);
        self.driver.navigate(&self.base_url).await
    }

    /// Fill both credential fields and submit
    ///
    /// Asserts nothing; success or failure is checked by the assertion
    /// operations below.
    pub async fn login(&self, user: &str, password: &str) -> Result<()> {
        self.driver.wait_for_element(USERNAME, self.wait).await?;
        self.driver.clear(USERNAME).await?;
        self.driver.type_into(USERNAME, user).await?;
        self.driver.clear(PASSWORD).await?;
        self.driver.type_into(PASSWORD, password).await?;
        self.driver.click(LOGIN_BUTTON).await?;
        Ok(())
    }

    /// Wait for the post-login inventory marker
    pub async fn assert_logged_in(&self) -> Result<()> {
        self.driver.wait_for_element(INVENTORY_LIST, self.wait).await
    }

    /// Wait for the error banner and check its text
    pub async fn assert_error_contains(&self, text: &str) -> Result<()> {
        self.driver.wait_for_element(ERROR_MESSAGE, self.wait).await?;
        let actual = self.driver.element_text(ERROR_MESSAGE).await?;

        if actual.contains(text) {
            Ok(())
        } else {
            Err(VistazoError::AssertionMismatch {
                expected: text.to_string(),
                actual,
            })
        }
    }
}
