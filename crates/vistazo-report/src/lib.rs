//! # vistazo-report
//!
//! Reporting sinks for the Vistazo acceptance-test harness: an in-memory
//! [`AttachmentStore`] consumed by external reporting tools, and the
//! fail-open [`ScreenshotHook`] that feeds it while also persisting PNG
//! files under `reports/screenshots/`.

mod hook;
mod store;

pub use hook::{sanitize_label, sanitize_timestamp, ScreenshotHook, DEFAULT_SCREENSHOT_DIR};
pub use store::{Attachment, AttachmentKind, AttachmentStore};
