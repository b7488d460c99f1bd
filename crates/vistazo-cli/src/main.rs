//! Vistazo CLI - browser acceptance tests with per-step screenshots
//!
//! Usage:
//!   vistazo run [FEATURES]...    Run feature files against the target URL
//!   vistazo steps                List registered step patterns
//!
//! Configuration comes from the environment (optionally via .env):
//! BASE_URL, BROWSER, HEADLESS, SCREENSHOTS_EVERY_STEP.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vistazo_browser::ChromeFactory;
use vistazo_core::RunConfig;
use vistazo_report::{AttachmentStore, ScreenshotHook, DEFAULT_SCREENSHOT_DIR};
use vistazo_runner::{default_registry, parse_feature, ScenarioRunner};

#[derive(Parser)]
#[command(name = "vistazo")]
#[command(version, about = "Browser acceptance tests with per-step screenshots")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run feature files
    Run {
        /// Feature files to execute
        #[arg(default_value = "features/login.feature")]
        features: Vec<PathBuf>,

        /// Directory for screenshot files
        #[arg(long, default_value = DEFAULT_SCREENSHOT_DIR)]
        screenshot_dir: PathBuf,
    },

    /// List registered step patterns
    Steps,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Run {
            features,
            screenshot_dir,
        } => run(features, screenshot_dir).await,
        Commands::Steps => {
            let registry = default_registry()?;
            for pattern in registry.patterns() {
                println!("{}", pattern);
            }
            Ok(())
        }
    }
}

async fn run(features: Vec<PathBuf>, screenshot_dir: PathBuf) -> Result<()> {
    let config = RunConfig::from_env();
    info!(
        "Target: {} (browser: {}, headless: {}, per-step screenshots: {})",
        config.base_url, config.browser, config.headless, config.screenshots_every_step
    );

    let store = Arc::new(AttachmentStore::new());
    let hook = ScreenshotHook::new(store.clone(), screenshot_dir);
    let runner = ScenarioRunner::new(config, Arc::new(ChromeFactory), default_registry()?, hook);

    let mut total = 0usize;
    let mut failed = 0usize;

    for path in &features {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read feature file {}", path.display()))?;
        let feature = parse_feature(&text)?;

        for report in runner.run_feature(&feature).await? {
            total += 1;
            if report.passed() {
                println!("  ok   {}", report.name);
            } else {
                failed += 1;
                println!("  FAIL {}", report.name);
                for step in &report.steps {
                    println!("         {} {} [{}]", step.keyword, step.name, step.status);
                }
            }
        }
    }

    println!(
        "{} scenarios, {} failed, {} report attachments",
        total,
        failed,
        store.len()
    );

    if failed > 0 {
        bail!("{} of {} scenarios failed", failed, total);
    }
    Ok(())
}
