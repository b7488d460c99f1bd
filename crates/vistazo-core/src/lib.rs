//! # vistazo-core
//!
//! Core types for the Vistazo browser acceptance-test harness:
//! the unified error type, the environment-derived run configuration,
//! and the scenario/step result model shared by the runner and the
//! reporting sinks.

mod config;
mod error;
mod types;

pub use config::{parse_bool_token, RunConfig, DEFAULT_BASE_URL, DEFAULT_BROWSER};
pub use error::{Result, VistazoError};
pub use types::{ScenarioReport, ScenarioStatus, StepResult, StepStatus};
