//! Scenario and step result types
//!
//! Produced by the scenario runner and consumed by the screenshot hook and
//! any external reporting tool, so everything here derives serde.

use serde::{Deserialize, Serialize};

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    /// Not executed because an earlier step failed
    Skipped,
    Unknown,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Passed => write!(f, "passed"),
            StepStatus::Failed => write!(f, "failed"),
            StepStatus::Skipped => write!(f, "skipped"),
            StepStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of one executed (or skipped) step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Step keyword as written in the feature (Given/Dado/...)
    pub keyword: String,
    /// Step text without the keyword
    pub name: String,
    /// Outcome
    pub status: StepStatus,
}

/// Outcome of a whole scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    Failed,
}

impl std::fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioStatus::Passed => write!(f, "passed"),
            ScenarioStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Per-scenario report returned by the runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub status: ScenarioStatus,
    pub steps: Vec<StepResult>,
}

impl ScenarioReport {
    /// Whether the scenario passed
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }
}
