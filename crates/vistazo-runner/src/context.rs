//! Per-scenario execution context
//!
//! Replaces ambient global test state: each scenario gets its own context,
//! passed by reference into every step handler. The context owns nothing
//! the scenario outlives; the driver handle is the session's.

use std::sync::Arc;
use vistazo_browser::Driver;
use vistazo_core::{Result, RunConfig, VistazoError};
use vistazo_pages::LoginPage;

/// Mutable state shared across one scenario's steps
pub struct ScenarioContext {
    /// Run configuration (immutable)
    pub config: RunConfig,
    /// The scenario's driver session
    pub driver: Arc<dyn Driver>,
    page: Option<LoginPage>,
}

impl ScenarioContext {
    pub fn new(config: RunConfig, driver: Arc<dyn Driver>) -> Self {
        Self {
            config,
            driver,
            page: None,
        }
    }

    /// Install the page object opened by a Given step
    pub fn set_page(&mut self, page: LoginPage) {
        self.page = Some(page);
    }

    /// The currently open page, or an error when no step opened one yet
    pub fn page(&self) -> Result<&LoginPage> {
        self.page.as_ref().ok_or_else(|| {
            VistazoError::Other("no page has been opened in this scenario".to_string())
        })
    }
}
