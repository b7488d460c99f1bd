//! # vistazo-runner
//!
//! Scenario execution engine for the Vistazo acceptance-test harness.
//!
//! Feature text is parsed into scenarios, each step is resolved against an
//! explicit [`StepRegistry`] at scenario-compile time, and the
//! [`ScenarioRunner`] executes scenarios strictly sequentially: one driver
//! session per scenario, screenshots at start, after every step, and at
//! the end, and unconditional session teardown.

mod context;
mod feature;
mod registry;
mod runner;
mod steps;

pub use context::ScenarioContext;
pub use feature::{parse_feature, Feature, Scenario, Step};
pub use registry::{CompiledScenario, CompiledStep, StepHandler, StepPattern, StepRegistry};
pub use runner::ScenarioRunner;
pub use steps::{default_registry, DO_LOGIN, OPEN_LOGIN, SEE_ERROR, SEE_INVENTORY};
