//! Step registry
//!
//! An explicit, ordered set of (pattern, handler) pairs. Patterns are
//! literal phrases with `{name}` placeholders; a placeholder captures the
//! text up to the next literal fragment, so quoted arguments come back
//! without their quotes when the quotes sit in the literal part. Matching
//! is deterministic: the first registered pattern that matches wins, and
//! every step of a scenario is resolved before execution starts.

use crate::context::ScenarioContext;
use crate::feature::Scenario;
use async_trait::async_trait;
use std::sync::Arc;
use vistazo_core::{Result, VistazoError};

/// A step implementation bound to a pattern
#[async_trait]
pub trait StepHandler: Send + Sync {
    /// Execute the step with the arguments captured from its text
    async fn run(&self, ctx: &mut ScenarioContext, args: &[String]) -> Result<()>;
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed step pattern
#[derive(Debug, Clone)]
pub struct StepPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl StepPattern {
    /// Parse a pattern such as `inicio sesión con usuario "{user}" y clave "{pwd}"`
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| {
                VistazoError::Other(format!("unclosed placeholder in pattern: {}", pattern))
            })?;
            segments.push(Segment::Placeholder(after[..close].to_string()));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as registered
    pub fn pattern(&self) -> &str {
        &self.raw
    }

    /// Match step text, capturing one argument per placeholder
    pub fn matches(&self, text: &str) -> Option<Vec<String>> {
        let mut args = Vec::new();
        let mut cursor = text;
        let mut segments = self.segments.iter().peekable();

        while let Some(segment) = segments.next() {
            match segment {
                Segment::Literal(literal) => {
                    cursor = cursor.strip_prefix(literal.as_str())?;
                }
                Segment::Placeholder(_) => match segments.peek() {
                    Some(Segment::Literal(next)) => {
                        // Non-greedy: stop at the first occurrence of the next literal
                        let end = cursor.find(next.as_str())?;
                        args.push(cursor[..end].to_string());
                        cursor = &cursor[end..];
                    }
                    _ => {
                        args.push(cursor.to_string());
                        cursor = "";
                    }
                },
            }
        }

        cursor.is_empty().then_some(args)
    }
}

/// A scenario step resolved to its handler
pub struct CompiledStep {
    pub keyword: String,
    pub text: String,
    handler: Arc<dyn StepHandler>,
    args: Vec<String>,
}

impl CompiledStep {
    pub async fn execute(&self, ctx: &mut ScenarioContext) -> Result<()> {
        self.handler.run(ctx, &self.args).await
    }
}

/// A scenario with every step resolved
pub struct CompiledScenario {
    pub name: String,
    pub steps: Vec<CompiledStep>,
}

/// Ordered collection of step definitions
#[derive(Default)]
pub struct StepRegistry {
    entries: Vec<(StepPattern, Arc<dyn StepHandler>)>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern with its handler; registration order is match order
    pub fn register(&mut self, pattern: &str, handler: Arc<dyn StepHandler>) -> Result<()> {
        let pattern = StepPattern::parse(pattern)?;
        self.entries.push((pattern, handler));
        Ok(())
    }

    /// Resolve step text to the first matching handler and its arguments
    pub fn resolve(&self, text: &str) -> Option<(Arc<dyn StepHandler>, Vec<String>)> {
        self.entries
            .iter()
            .find_map(|(pattern, handler)| pattern.matches(text).map(|args| (handler.clone(), args)))
    }

    /// Registered patterns in match order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(pattern, _)| pattern.pattern())
    }

    /// Resolve all of a scenario's steps before execution
    ///
    /// Fails with `UndefinedStep` if any step has no matching pattern;
    /// no driver is started for a scenario that does not compile.
    pub fn compile(&self, scenario: &Scenario) -> Result<CompiledScenario> {
        let mut steps = Vec::with_capacity(scenario.steps.len());
        for step in &scenario.steps {
            let (handler, args) = self
                .resolve(&step.text)
                .ok_or_else(|| VistazoError::UndefinedStep(step.text.clone()))?;
            steps.push(CompiledStep {
                keyword: step.keyword.clone(),
                text: step.text.clone(),
                handler,
                args,
            });
        }

        Ok(CompiledScenario {
            name: scenario.name.clone(),
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Step;

    struct NoopStep;

    #[async_trait]
    impl StepHandler for NoopStep {
        async fn run(&self, _ctx: &mut ScenarioContext, _args: &[String]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pattern_without_placeholders() {
        let pattern = StepPattern::parse("debería ver el inventario").unwrap();
        assert_eq!(
            pattern.matches("debería ver el inventario"),
            Some(Vec::new())
        );
        assert_eq!(pattern.matches("debería ver el carrito"), None);
        assert_eq!(pattern.matches("debería ver el inventario ya"), None);
    }

    #[test]
    fn test_pattern_captures_quoted_arguments() {
        let pattern =
            StepPattern::parse("inicio sesión con usuario \"{user}\" y clave \"{pwd}\"").unwrap();
        let args = pattern
            .matches("inicio sesión con usuario \"standard_user\" y clave \"secret_sauce\"")
            .unwrap();
        assert_eq!(args, vec!["standard_user", "secret_sauce"]);
    }

    #[test]
    fn test_trailing_placeholder_captures_rest() {
        let pattern = StepPattern::parse("veo el texto {rest}").unwrap();
        let args = pattern.matches("veo el texto hola mundo").unwrap();
        assert_eq!(args, vec!["hola mundo"]);
    }

    #[test]
    fn test_unclosed_placeholder_is_rejected() {
        assert!(StepPattern::parse("usuario \"{user\"").is_err());
    }

    #[test]
    fn test_first_registered_pattern_wins() {
        let mut registry = StepRegistry::new();
        registry.register("veo {a}", Arc::new(NoopStep)).unwrap();
        registry.register("veo {a} y {b}", Arc::new(NoopStep)).unwrap();

        // The earlier, broader pattern shadows the later one
        let (_, args) = registry.resolve("veo uno y dos").unwrap();
        assert_eq!(args, vec!["uno y dos"]);
    }

    #[test]
    fn test_compile_rejects_undefined_steps() {
        let registry = StepRegistry::new();
        let scenario = Scenario {
            name: "s".to_string(),
            steps: vec![Step {
                keyword: "Dado".to_string(),
                text: "un paso sin definición".to_string(),
            }],
        };

        let err = registry.compile(&scenario).err().unwrap();
        match err {
            VistazoError::UndefinedStep(text) => assert_eq!(text, "un paso sin definición"),
            other => panic!("expected UndefinedStep, got {:?}", other),
        }
    }
}
