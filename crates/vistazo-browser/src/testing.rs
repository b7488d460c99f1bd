//! Test doubles for driver-facing code
//!
//! [`MockDriver`] records every interaction and can be told which selectors
//! never appear, what text elements hold, and whether screenshots fail.
//! [`MockFactory`] counts session starts and closes so runner tests can
//! verify the one-start-one-stop lifecycle invariant.

use crate::driver::{Driver, DriverFactory};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vistazo_core::{Result, RunConfig, VistazoError};

/// Minimal valid PNG header, enough for sinks that only move bytes around
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// In-memory driver double
#[derive(Default)]
pub struct MockDriver {
    calls: Mutex<Vec<String>>,
    text_by_selector: Mutex<HashMap<String, String>>,
    missing_selectors: Mutex<HashSet<String>>,
    fail_screenshots: AtomicBool,
    close_count: Arc<AtomicUsize>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share the close counter with a [`MockFactory`]
    pub fn with_close_counter(counter: Arc<AtomicUsize>) -> Self {
        Self {
            close_count: counter,
            ..Self::default()
        }
    }

    /// Pretend this selector holds the given inner text
    pub fn set_element_text(&self, selector: &str, text: &str) {
        self.text_by_selector
            .lock()
            .unwrap()
            .insert(selector.to_string(), text.to_string());
    }

    /// Pretend this selector never appears on the page
    pub fn mark_missing(&self, selector: &str) {
        self.missing_selectors
            .lock()
            .unwrap()
            .insert(selector.to_string());
    }

    /// Make every screenshot request fail
    pub fn fail_screenshots(&self) {
        self.fail_screenshots.store(true, Ordering::SeqCst);
    }

    /// Ordered log of interactions, e.g. `click #login-button`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate {}", url));
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.record(format!("wait {}", selector));
        if self.missing_selectors.lock().unwrap().contains(selector) {
            return Err(VistazoError::ElementTimeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click {}", selector));
        Ok(())
    }

    async fn clear(&self, selector: &str) -> Result<()> {
        self.record(format!("clear {}", selector));
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.record(format!("type {} {}", selector, text));
        Ok(())
    }

    async fn element_text(&self, selector: &str) -> Result<String> {
        self.record(format!("text {}", selector));
        Ok(self
            .text_by_selector
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>> {
        self.record("screenshot".to_string());
        if self.fail_screenshots.load(Ordering::SeqCst) {
            return Err(VistazoError::Browser("screenshot unavailable".to_string()));
        }
        Ok(FAKE_PNG.to_vec())
    }

    async fn close(&self) -> Result<()> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Factory double counting session lifecycles
#[derive(Default)]
pub struct MockFactory {
    starts: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    configure: Mutex<Option<Box<dyn Fn(&MockDriver) + Send>>>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a setup closure against every driver this factory hands out
    pub fn on_start<F>(self, configure: F) -> Self
    where
        F: Fn(&MockDriver) + Send + 'static,
    {
        *self.configure.lock().unwrap() = Some(Box::new(configure));
        self
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriverFactory for MockFactory {
    async fn start(&self, _config: &RunConfig) -> Result<Arc<dyn Driver>> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        let driver = MockDriver::with_close_counter(self.closes.clone());
        if let Some(configure) = self.configure.lock().unwrap().as_ref() {
            configure(&driver);
        }
        Ok(Arc::new(driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_driver_records_calls_in_order() {
        let driver = MockDriver::new();
        driver.navigate("http://example.com").await.unwrap();
        driver.click("#go").await.unwrap();

        assert_eq!(driver.calls(), vec!["navigate http://example.com", "click #go"]);
    }

    #[tokio::test]
    async fn test_missing_selector_times_out() {
        let driver = MockDriver::new();
        driver.mark_missing("#absent");

        let err = driver
            .wait_for_element("#absent", Duration::from_secs(10))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, VistazoError::ElementTimeout { .. }));
    }

    #[tokio::test]
    async fn test_factory_counts_lifecycles() {
        let factory = MockFactory::new();
        let config = RunConfig::default();

        let driver = factory.start(&config).await.unwrap();
        assert_eq!(factory.start_count(), 1);
        assert_eq!(factory.close_count(), 0);

        driver.close().await.unwrap();
        assert_eq!(factory.close_count(), 1);
    }
}
