//! Feature text parsing
//!
//! A Gherkin subset sufficient for the scenario surface: one optional
//! feature header, scenario blocks, and Given/When/Then style steps with
//! Spanish and English keywords. `#` comments and blank lines are ignored;
//! free text between the feature header and the first scenario is treated
//! as description.

use vistazo_core::{Result, VistazoError};

/// One Given/When/Then line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Keyword as written (Given/Dado/Y/...)
    pub keyword: String,
    /// Step text without the keyword
    pub text: String,
}

/// One behavior-driven test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

/// A parsed feature file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub scenarios: Vec<Scenario>,
}

const FEATURE_PREFIXES: &[&str] = &["Feature:", "Característica:"];
const SCENARIO_PREFIXES: &[&str] = &["Scenario:", "Escenario:"];
const STEP_KEYWORDS: &[&str] = &[
    "Given", "When", "Then", "And", "But", "Dado", "Cuando", "Entonces", "Y", "Pero",
];

/// Parse a feature file
pub fn parse_feature(input: &str) -> Result<Feature> {
    let mut name = String::new();
    let mut scenarios: Vec<Scenario> = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = strip_any_prefix(line, FEATURE_PREFIXES) {
            name = rest.trim().to_string();
            continue;
        }

        if let Some(rest) = strip_any_prefix(line, SCENARIO_PREFIXES) {
            scenarios.push(Scenario {
                name: rest.trim().to_string(),
                steps: Vec::new(),
            });
            continue;
        }

        if let Some(step) = parse_step_line(line) {
            match scenarios.last_mut() {
                Some(scenario) => scenario.steps.push(step),
                None => {
                    return Err(VistazoError::FeatureParse(format!(
                        "line {}: step before any scenario: {}",
                        idx + 1,
                        line
                    )))
                }
            }
            continue;
        }

        if scenarios.is_empty() {
            // Feature description
            continue;
        }

        return Err(VistazoError::FeatureParse(format!(
            "line {}: unrecognized line: {}",
            idx + 1,
            line
        )));
    }

    Ok(Feature { name, scenarios })
}

fn strip_any_prefix<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|p| line.strip_prefix(p))
}

fn parse_step_line(line: &str) -> Option<Step> {
    STEP_KEYWORDS.iter().find_map(|keyword| {
        let rest = line.strip_prefix(keyword)?;
        let text = rest.strip_prefix(' ')?;
        Some(Step {
            keyword: (*keyword).to_string(),
            text: text.trim().to_string(),
        })
    })
}
