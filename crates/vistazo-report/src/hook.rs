//! Screenshot capture hook
//!
//! Best-effort capture of the current browser viewport to two sinks: the
//! in-memory attachment store and a PNG file under the output directory.
//! Capture is fail-open: any error (driver communication, disk) is
//! swallowed and never fails the scenario.

use crate::store::{AttachmentKind, AttachmentStore};
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::debug;
use vistazo_browser::Driver;
use vistazo_core::Result;

/// Default on-disk destination for screenshot files
pub const DEFAULT_SCREENSHOT_DIR: &str = "reports/screenshots";

/// Characters allowed in filenames besides alphanumerics
const FILENAME_ALLOW_SET: &str = " -_[]()";

/// Replace every character outside the filename allow-set with `_`
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || FILENAME_ALLOW_SET.contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Replace `:` with `-` for filesystem compatibility
pub fn sanitize_timestamp(timestamp: &str) -> String {
    timestamp.replace(':', "-")
}

/// Captures screenshots into an attachment store and onto disk
pub struct ScreenshotHook {
    store: Arc<AttachmentStore>,
    output_dir: PathBuf,
}

impl ScreenshotHook {
    pub fn new(store: Arc<AttachmentStore>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
        }
    }

    /// Hook writing to [`DEFAULT_SCREENSHOT_DIR`]
    pub fn with_default_dir(store: Arc<AttachmentStore>) -> Self {
        Self::new(store, DEFAULT_SCREENSHOT_DIR)
    }

    /// The shared attachment store
    pub fn store(&self) -> &Arc<AttachmentStore> {
        &self.store
    }

    /// On-disk screenshot directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Capture one screenshot under the given label
    ///
    /// Never fails: errors are downgraded to a debug trace, which is
    /// invisible at the default log level.
    pub async fn capture(&self, driver: &dyn Driver, label: &str) {
        if let Err(e) = self.try_capture(driver, label).await {
            debug!("Screenshot capture skipped for '{}': {}", label, e);
        }
    }

    async fn try_capture(&self, driver: &dyn Driver, label: &str) -> Result<()> {
        let png_bytes = driver.screenshot_png().await?;

        let timestamp = Local::now().format("%H:%M:%S%.6f").to_string();
        self.store.attach(
            format!("{} @ {}", label, timestamp),
            AttachmentKind::Png,
            png_bytes.clone(),
        );

        fs::create_dir_all(&self.output_dir).await?;
        let filename = format!(
            "{}_{}.png",
            sanitize_label(label),
            sanitize_timestamp(&timestamp)
        );
        fs::write(self.output_dir.join(filename), &png_bytes).await?;

        Ok(())
    }
}
