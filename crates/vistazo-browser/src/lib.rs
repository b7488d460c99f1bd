//! # vistazo-browser
//!
//! Browser driver lifecycle for the Vistazo acceptance-test harness.
//!
//! The [`Driver`] trait is the seam between scenario code and the browser:
//! page objects and the screenshot hook only see the trait. The production
//! implementation is [`ChromeDriver`] over the Chrome DevTools Protocol;
//! [`testing`] holds an in-memory double for lifecycle and page-object tests.
//!
//! One [`ScenarioSession`] exists per scenario. It is created by a
//! [`DriverFactory`] at scenario start and consumed by
//! [`ScenarioSession::close`] at scenario end on every exit path.

mod chrome;
mod driver;
mod session;
pub mod testing;

pub use chrome::{ChromeDriver, ChromeFactory, PAGE_LOAD_TIMEOUT_SECS, WINDOW_HEIGHT, WINDOW_WIDTH};
pub use driver::{Driver, DriverFactory};
pub use session::ScenarioSession;
