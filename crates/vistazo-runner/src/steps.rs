//! Default step definitions
//!
//! Binds the login scenario phrases to page-object calls. Handlers are
//! pure dispatch; all behavior lives in the page objects.

use crate::context::ScenarioContext;
use crate::registry::{StepHandler, StepRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use vistazo_core::{Result, VistazoError};
use vistazo_pages::LoginPage;

/// `Dado que estoy en la página de login`
pub const OPEN_LOGIN: &str = "que estoy en la página de login";
/// `Cuando inicio sesión con usuario "..." y clave "..."`
pub const DO_LOGIN: &str = "inicio sesión con usuario \"{user}\" y clave \"{pwd}\"";
/// `Entonces debería ver el inventario`
pub const SEE_INVENTORY: &str = "debería ver el inventario";
/// `Entonces debería ver un mensaje de error que contiene "..."`
pub const SEE_ERROR: &str = "debería ver un mensaje de error que contiene \"{text}\"";

fn arg<'a>(args: &'a [String], index: usize) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| VistazoError::Other(format!("missing step argument {}", index)))
}

struct OpenLoginPage;

#[async_trait]
impl StepHandler for OpenLoginPage {
    async fn run(&self, ctx: &mut ScenarioContext, _args: &[String]) -> Result<()> {
        let page = LoginPage::new(ctx.driver.clone(), ctx.config.base_url.clone());
        page.open().await?;
        ctx.set_page(page);
        Ok(())
    }
}

struct SubmitLogin;

#[async_trait]
impl StepHandler for SubmitLogin {
    async fn run(&self, ctx: &mut ScenarioContext, args: &[String]) -> Result<()> {
        let user = arg(args, 0)?;
        let password = arg(args, 1)?;
        ctx.page()?.login(user, password).await
    }
}

struct AssertInventoryVisible;

#[async_trait]
impl StepHandler for AssertInventoryVisible {
    async fn run(&self, ctx: &mut ScenarioContext, _args: &[String]) -> Result<()> {
        ctx.page()?.assert_logged_in().await
    }
}

struct AssertErrorContains;

#[async_trait]
impl StepHandler for AssertErrorContains {
    async fn run(&self, ctx: &mut ScenarioContext, args: &[String]) -> Result<()> {
        let text = arg(args, 0)?;
        ctx.page()?.assert_error_contains(text).await
    }
}

/// Registry with the login step definitions bound
pub fn default_registry() -> Result<StepRegistry> {
    let mut registry = StepRegistry::new();
    registry.register(OPEN_LOGIN, Arc::new(OpenLoginPage))?;
    registry.register(DO_LOGIN, Arc::new(SubmitLogin))?;
    registry.register(SEE_INVENTORY, Arc::new(AssertInventoryVisible))?;
    registry.register(SEE_ERROR, Arc::new(AssertErrorContains))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vistazo_browser::testing::MockDriver;
    use vistazo_core::RunConfig;

    #[test]
    fn test_default_registry_covers_the_scenario_surface() {
        let registry = default_registry().unwrap();

        assert!(registry.resolve("que estoy en la página de login").is_some());
        let (_, args) = registry
            .resolve("inicio sesión con usuario \"standard_user\" y clave \"secret_sauce\"")
            .unwrap();
        assert_eq!(args, vec!["standard_user", "secret_sauce"]);
        assert!(registry.resolve("debería ver el inventario").is_some());
        let (_, args) = registry
            .resolve("debería ver un mensaje de error que contiene \"no coinciden\"")
            .unwrap();
        assert_eq!(args, vec!["no coinciden"]);

        assert!(registry.resolve("un paso inventado").is_none());
    }

    #[tokio::test]
    async fn test_open_step_installs_the_page() {
        let driver = Arc::new(MockDriver::new());
        let mut ctx = ScenarioContext::new(RunConfig::default(), driver.clone());

        OpenLoginPage.run(&mut ctx, &[]).await.unwrap();

        assert!(ctx.page().is_ok());
        assert_eq!(driver.calls(), vec!["navigate https://www.saucedemo.com"]);
    }

    #[tokio::test]
    async fn test_login_step_requires_an_open_page() {
        let driver = Arc::new(MockDriver::new());
        let mut ctx = ScenarioContext::new(RunConfig::default(), driver);

        let err = SubmitLogin
            .run(&mut ctx, &["user".to_string(), "pwd".to_string()])
            .await
            .err()
            .unwrap();
        assert!(matches!(err, VistazoError::Other(_)));
    }
}
