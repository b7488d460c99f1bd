//! Per-scenario session ownership
//!
//! A session pairs one live driver with the scenario that owns it. Closing
//! consumes the session, so the `NotStarted -> Running -> Stopped` lifecycle
//! cannot re-enter `Running`; a new scenario starts a new session.

use crate::driver::Driver;
use std::sync::Arc;
use tracing::debug;
use vistazo_core::Result;

/// One scenario's exclusive driver session
pub struct ScenarioSession {
    driver: Arc<dyn Driver>,
    scenario_name: String,
}

impl ScenarioSession {
    /// Bind a freshly started driver to a scenario
    pub fn new(driver: Arc<dyn Driver>, scenario_name: impl Into<String>) -> Self {
        Self {
            driver,
            scenario_name: scenario_name.into(),
        }
    }

    /// The live driver handle
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    /// Name of the owning scenario
    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    /// Terminate the driver session
    ///
    /// Takes the session by value: a closed session cannot be reused.
    pub async fn close(self) -> Result<()> {
        debug!("Closing session for scenario '{}'", self.scenario_name);
        self.driver.close().await
    }
}
