//! Chrome driver lifecycle using the Chrome DevTools Protocol

use crate::driver::{Driver, DriverFactory};
use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use vistazo_core::{Result, RunConfig, VistazoError};

/// Fixed browser window width
pub const WINDOW_WIDTH: u32 = 1366;
/// Fixed browser window height
pub const WINDOW_HEIGHT: u32 = 768;
/// Page-load timeout in seconds
pub const PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Active Chrome session
///
/// Launched once per scenario and closed through
/// [`crate::ScenarioSession::close`] on every exit path.
pub struct ChromeDriver {
    /// Underlying browser instance (kept alive for tab lifetime)
    #[allow(dead_code)]
    browser: Browser,
    /// Current active tab
    tab: Arc<Tab>,
}

impl ChromeDriver {
    /// Launch Chrome according to the run configuration
    ///
    /// Fails with `UnsupportedBrowser` before any process is spawned when
    /// the configured browser is not chrome. Applies the container
    /// stability flags (no sandbox, no GPU, no /dev/shm usage) and a fixed
    /// window geometry. Implicit waits stay disabled; explicit waits are
    /// the page object's responsibility.
    pub async fn launch(config: &RunConfig) -> Result<Self> {
        if config.browser != "chrome" {
            return Err(VistazoError::UnsupportedBrowser(config.browser.clone()));
        }

        info!(
            "Launching chrome (headless: {}, size: {}x{})",
            config.headless, WINDOW_WIDTH, WINDOW_HEIGHT
        );

        let mut launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((WINDOW_WIDTH, WINDOW_HEIGHT)))
            .sandbox(false)
            .build()
            .map_err(|e| VistazoError::Browser(format!("Failed to build launch options: {}", e)))?;

        // Stability flags for containerized/headless environments
        launch_options.args.push(OsStr::new("--disable-gpu"));
        launch_options.args.push(OsStr::new("--disable-dev-shm-usage"));

        let browser = Browser::new(launch_options)
            .map_err(|e| VistazoError::Browser(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| VistazoError::Browser(format!("Failed to create tab: {}", e)))?;

        tab.set_default_timeout(Duration::from_secs(PAGE_LOAD_TIMEOUT_SECS));

        info!("Browser launched successfully");

        Ok(Self { browser, tab })
    }
}

#[async_trait]
impl Driver for ChromeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| VistazoError::Browser(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| VistazoError::Browser(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        debug!("Waiting for element: {} (timeout: {:?})", selector, timeout);

        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_e| VistazoError::ElementTimeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            })?;

        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .and_then(|element| element.click().map(|_| ()))
            .map_err(|e| VistazoError::Browser(format!("Failed to click {}: {}", selector, e)))
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        let selector_literal = serde_json::to_string(selector)?;
        let script = format!(
            "(() => {{ const el = document.querySelector({}); if (el) {{ el.value = ''; }} }})()",
            selector_literal
        );

        self.tab
            .evaluate(&script, false)
            .map_err(|e| VistazoError::Browser(format!("Failed to clear {}: {}", selector, e)))?;

        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.tab
            .find_element(selector)
            .and_then(|element| element.type_into(text).map(|_| ()))
            .map_err(|e| VistazoError::Browser(format!("Failed to type into {}: {}", selector, e)))
    }

    async fn element_text(&self, selector: &str) -> Result<String> {
        self.tab
            .find_element(selector)
            .and_then(|element| element.get_inner_text())
            .map_err(|e| {
                VistazoError::Browser(format!("Failed to read text of {}: {}", selector, e))
            })
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| VistazoError::Browser(format!("CDP capture failed: {}", e)))
    }

    async fn close(&self) -> Result<()> {
        info!("Closing browser session");
        // Browser process is cleaned up when the instance drops
        Ok(())
    }
}

/// Factory producing one [`ChromeDriver`] per scenario
pub struct ChromeFactory;

#[async_trait]
impl DriverFactory for ChromeFactory {
    async fn start(&self, config: &RunConfig) -> Result<Arc<dyn Driver>> {
        let driver = ChromeDriver::launch(config).await?;
        Ok(Arc::new(driver))
    }
}
