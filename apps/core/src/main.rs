// Melli V2 Entry Point
// Wires config, classifier and state into the supervisor, then feeds it
// platform events from stdin.

use anyhow::{bail, Context};
use melli_core::actors::SupervisorHandle;
use melli_core::brain::ClassifierArtifacts;
use melli_core::config::BotConfig;
use melli_core::console::{self, ConsolePlatform, CONSOLE_BOT_USER_ID};
use melli_core::preflight::run_preflight_checks;
use melli_core::telemetry::init_tracing;
use melli_core::workflow::ChannelWorkflow;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_format)?;

    info!("╔════════════════════════════════════════════════╗");
    info!("║                  MELLI V2                      ║");
    info!("╚════════════════════════════════════════════════╝");
    info!("Bot name: {}", config.bot_name);
    info!("Data directory: {:?}", config.data_dir);
    info!("Models directory: {:?}", config.models_dir);

    let report = run_preflight_checks(&config);
    if !report.ready_to_start {
        bail!("Preflight failed: {}", report.summary);
    }

    let artifacts = ClassifierArtifacts::load(&config.vectorizer_path(), &config.model_path())
        .context("Failed to load classifier artifacts")?;

    let platform = Arc::new(ConsolePlatform::new(CONSOLE_BOT_USER_ID));
    let workflow = ChannelWorkflow::new(platform.clone(), artifacts, &config)
        .context("Failed to open bot state")?;
    let (supervisor, task) = SupervisorHandle::spawn(workflow);
    info!("Supervisor initialized, reading events from stdin");

    let reader = BufReader::new(tokio::io::stdin());
    tokio::select! {
        result = console::run(reader, &supervisor, &platform) => {
            match result {
                Ok(count) => info!("Input closed after {} events", count),
                Err(e) => error!("Console loop failed: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down");
        }
    }

    supervisor.shutdown().await?;
    task.await.context("Supervisor task panicked")?;
    info!("Goodbye");
    Ok(())
}
