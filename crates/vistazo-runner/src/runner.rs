//! Scenario runner
//!
//! Drives one scenario at a time: start a driver session, capture the
//! start screenshot, execute compiled steps with per-step captures, take
//! the end (and failure) screenshots, and close the session. The session
//! is closed on every path that reaches it; steps cannot escape the loop
//! with an error because failures become step statuses.

use crate::feature::{Feature, Scenario};
use crate::registry::StepRegistry;
use crate::ScenarioContext;
use std::sync::Arc;
use tracing::{info, warn};
use vistazo_browser::{DriverFactory, ScenarioSession};
use vistazo_core::{Result, RunConfig, ScenarioReport, ScenarioStatus, StepResult, StepStatus};
use vistazo_report::ScreenshotHook;

/// Sequential scenario execution engine
pub struct ScenarioRunner {
    config: RunConfig,
    factory: Arc<dyn DriverFactory>,
    registry: StepRegistry,
    hook: ScreenshotHook,
}

impl ScenarioRunner {
    pub fn new(
        config: RunConfig,
        factory: Arc<dyn DriverFactory>,
        registry: StepRegistry,
        hook: ScreenshotHook,
    ) -> Self {
        Self {
            config,
            factory,
            registry,
            hook,
        }
    }

    /// Run every scenario of a feature in order
    pub async fn run_feature(&self, feature: &Feature) -> Result<Vec<ScenarioReport>> {
        info!("Running feature '{}'", feature.name);

        let mut reports = Vec::with_capacity(feature.scenarios.len());
        for scenario in &feature.scenarios {
            reports.push(self.run_scenario(scenario).await?);
        }
        Ok(reports)
    }

    /// Run one scenario to completion
    ///
    /// Steps are resolved before any driver is started, so an undefined
    /// step never costs a browser launch. After a step fails, the
    /// remaining steps are skipped but still captured.
    pub async fn run_scenario(&self, scenario: &Scenario) -> Result<ScenarioReport> {
        let compiled = self.registry.compile(scenario)?;

        info!("Scenario '{}' ({} steps)", scenario.name, compiled.steps.len());
        let driver = self.factory.start(&self.config).await?;
        let session = ScenarioSession::new(driver, &scenario.name);

        self.hook
            .capture(
                session.driver().as_ref(),
                &format!("START - {}", scenario.name),
            )
            .await;

        let mut ctx = ScenarioContext::new(self.config.clone(), session.driver().clone());
        let mut steps = Vec::with_capacity(compiled.steps.len());
        let mut failed = false;

        for step in &compiled.steps {
            let status = if failed {
                StepStatus::Skipped
            } else {
                match step.execute(&mut ctx).await {
                    Ok(()) => StepStatus::Passed,
                    Err(e) => {
                        warn!("Step failed: {} {} ({})", step.keyword, step.text, e);
                        failed = true;
                        StepStatus::Failed
                    }
                }
            };

            if self.config.screenshots_every_step {
                self.hook
                    .capture(
                        session.driver().as_ref(),
                        &format!("{} {} [{}]", step.keyword, step.text, status),
                    )
                    .await;
            }

            steps.push(StepResult {
                keyword: step.keyword.clone(),
                name: step.text.clone(),
                status,
            });
        }

        let status = if failed {
            ScenarioStatus::Failed
        } else {
            ScenarioStatus::Passed
        };

        self.hook
            .capture(
                session.driver().as_ref(),
                &format!("END - {} [{}]", scenario.name, status),
            )
            .await;

        if failed {
            self.hook
                .capture(
                    session.driver().as_ref(),
                    &format!("FAILED - {}", scenario.name),
                )
                .await;
        }

        session.close().await?;

        info!("Scenario '{}' finished: {}", scenario.name, status);
        Ok(ScenarioReport {
            name: scenario.name.clone(),
            status,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{parse_feature, Step};
    use crate::registry::StepHandler;
    use crate::steps::default_registry;
    use async_trait::async_trait;
    use tempfile::TempDir;
    use vistazo_browser::testing::MockFactory;
    use vistazo_core::VistazoError;
    use vistazo_pages::{ERROR_MESSAGE, INVENTORY_LIST};
    use vistazo_report::AttachmentStore;

    struct PassStep;

    #[async_trait]
    impl StepHandler for PassStep {
        async fn run(&self, _ctx: &mut ScenarioContext, _args: &[String]) -> Result<()> {
            Ok(())
        }
    }

    struct FailStep;

    #[async_trait]
    impl StepHandler for FailStep {
        async fn run(&self, _ctx: &mut ScenarioContext, _args: &[String]) -> Result<()> {
            Err(VistazoError::Other("paso roto".to_string()))
        }
    }

    fn test_registry() -> StepRegistry {
        let mut registry = StepRegistry::new();
        registry.register("un paso que pasa", Arc::new(PassStep)).unwrap();
        registry.register("un paso que falla", Arc::new(FailStep)).unwrap();
        registry
    }

    fn scenario_of(name: &str, steps: &[&str]) -> Scenario {
        Scenario {
            name: name.to_string(),
            steps: steps
                .iter()
                .map(|text| Step {
                    keyword: "Dado".to_string(),
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    fn runner_with(
        config: RunConfig,
        factory: Arc<MockFactory>,
        registry: StepRegistry,
    ) -> (ScenarioRunner, Arc<AttachmentStore>, TempDir) {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(AttachmentStore::new());
        let hook = ScreenshotHook::new(store.clone(), tmp.path());
        (
            ScenarioRunner::new(config, factory, registry, hook),
            store,
            tmp,
        )
    }

    #[tokio::test]
    async fn test_passing_scenario_captures_start_steps_and_end() {
        let factory = Arc::new(MockFactory::new());
        let (runner, store, _tmp) =
            runner_with(RunConfig::default(), factory.clone(), test_registry());
        let scenario = scenario_of(
            "todo bien",
            &["un paso que pasa", "un paso que pasa", "un paso que pasa"],
        );

        let report = runner.run_scenario(&scenario).await.unwrap();

        assert!(report.passed());
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));
        // 1 start + 3 steps + 1 end
        assert_eq!(store.len(), 5);
        assert_eq!(factory.start_count(), 1);
        assert_eq!(factory.close_count(), 1);

        let names: Vec<_> = store.attachments().iter().map(|a| a.name.clone()).collect();
        assert!(names[0].starts_with("START - todo bien @ "));
        assert!(names[1].starts_with("Dado un paso que pasa [passed] @ "));
        assert!(names[4].starts_with("END - todo bien [passed] @ "));
    }

    #[tokio::test]
    async fn test_failing_scenario_adds_failed_capture_and_skips_rest() {
        let factory = Arc::new(MockFactory::new());
        let (runner, store, _tmp) =
            runner_with(RunConfig::default(), factory.clone(), test_registry());
        let scenario = scenario_of(
            "algo falla",
            &["un paso que pasa", "un paso que falla", "un paso que pasa"],
        );

        let report = runner.run_scenario(&scenario).await.unwrap();

        assert!(!report.passed());
        assert_eq!(report.steps[0].status, StepStatus::Passed);
        assert_eq!(report.steps[1].status, StepStatus::Failed);
        assert_eq!(report.steps[2].status, StepStatus::Skipped);
        // 1 start + 3 steps + 1 end + 1 failed
        assert_eq!(store.len(), 6);
        // The session is still torn down exactly once
        assert_eq!(factory.start_count(), 1);
        assert_eq!(factory.close_count(), 1);

        let names: Vec<_> = store.attachments().iter().map(|a| a.name.clone()).collect();
        assert!(names[2].starts_with("Dado un paso que falla [failed] @ "));
        assert!(names[3].starts_with("Dado un paso que pasa [skipped] @ "));
        assert!(names[4].starts_with("END - algo falla [failed] @ "));
        assert!(names[5].starts_with("FAILED - algo falla @ "));
    }

    #[tokio::test]
    async fn test_per_step_capture_can_be_disabled() {
        let config = RunConfig {
            screenshots_every_step: false,
            ..RunConfig::default()
        };
        let factory = Arc::new(MockFactory::new());
        let (runner, store, _tmp) = runner_with(config, factory, test_registry());
        let scenario = scenario_of("sin capturas", &["un paso que pasa", "un paso que pasa"]);

        let report = runner.run_scenario(&scenario).await.unwrap();

        assert!(report.passed());
        // Start and end captures are unconditional
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_undefined_step_aborts_before_driver_start() {
        let factory = Arc::new(MockFactory::new());
        let (runner, store, _tmp) =
            runner_with(RunConfig::default(), factory.clone(), test_registry());
        let scenario = scenario_of("sin definición", &["un paso desconocido"]);

        let err = runner.run_scenario(&scenario).await.err().unwrap();

        assert!(matches!(err, VistazoError::UndefinedStep(_)));
        assert_eq!(factory.start_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_login_feature_end_to_end_with_mock_driver() {
        let error_text =
            "Epic sadface: Username and password do not match any user in this service";
        let factory = Arc::new(MockFactory::new().on_start(move |driver| {
            driver.set_element_text(ERROR_MESSAGE, error_text);
        }));
        let (runner, store, _tmp) = runner_with(
            RunConfig::default(),
            factory.clone(),
            default_registry().unwrap(),
        );

        let feature = parse_feature(
            r#"Característica: Inicio de sesión
  Escenario: Credenciales válidas
    Dado que estoy en la página de login
    Cuando inicio sesión con usuario "standard_user" y clave "secret_sauce"
    Entonces debería ver el inventario

  Escenario: Credenciales inválidas
    Dado que estoy en la página de login
    Cuando inicio sesión con usuario "standard_user" y clave "wrong_password"
    Entonces debería ver un mensaje de error que contiene "Username and password do not match"
"#,
        )
        .unwrap();

        let reports = runner.run_feature(&feature).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.passed()));
        // One driver per scenario, each closed exactly once
        assert_eq!(factory.start_count(), 2);
        assert_eq!(factory.close_count(), 2);
        // Two scenarios, each 1 start + 3 steps + 1 end
        assert_eq!(store.len(), 10);
    }

    #[tokio::test]
    async fn test_login_without_inventory_marker_fails_the_then_step() {
        let factory = Arc::new(MockFactory::new().on_start(|driver| {
            driver.mark_missing(INVENTORY_LIST);
        }));
        let (runner, _store, _tmp) = runner_with(
            RunConfig::default(),
            factory.clone(),
            default_registry().unwrap(),
        );

        let scenario = Scenario {
            name: "inventario ausente".to_string(),
            steps: vec![
                Step {
                    keyword: "Dado".to_string(),
                    text: "que estoy en la página de login".to_string(),
                },
                Step {
                    keyword: "Entonces".to_string(),
                    text: "debería ver el inventario".to_string(),
                },
            ],
        };

        let report = runner.run_scenario(&scenario).await.unwrap();

        assert!(!report.passed());
        assert_eq!(report.steps[1].status, StepStatus::Failed);
        assert_eq!(factory.close_count(), 1);
    }
}
