//! Driver abstraction over a live browser session
//!
//! Page objects and the screenshot hook talk to this trait instead of a
//! concrete browser so scenarios can run against a test double. Driver
//! primitives never wait on their own; all waiting is explicit through
//! [`Driver::wait_for_element`].

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vistazo_core::{Result, RunConfig};

/// One live browser session
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL and wait for the page load to settle
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Block until an element is present, or fail with `ElementTimeout`
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Click the first element matching the selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Clear the value of the first input matching the selector
    async fn clear(&self, selector: &str) -> Result<()>;

    /// Type text into the first element matching the selector
    async fn type_into(&self, selector: &str, text: &str) -> Result<()>;

    /// Inner text of the first element matching the selector
    async fn element_text(&self, selector: &str) -> Result<String>;

    /// Capture the current viewport as PNG bytes
    async fn screenshot_png(&self) -> Result<Vec<u8>>;

    /// Terminate the underlying browser session
    ///
    /// Callers go through [`crate::ScenarioSession::close`], which consumes
    /// the session so this runs exactly once per start.
    async fn close(&self) -> Result<()>;
}

/// Produces driver sessions for the runner
///
/// The runner asks a factory for one session per scenario; tests inject a
/// factory backed by [`crate::testing::MockDriver`] to count lifecycles.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    /// Start a new driver session for one scenario
    async fn start(&self, config: &RunConfig) -> Result<Arc<dyn Driver>>;
}
