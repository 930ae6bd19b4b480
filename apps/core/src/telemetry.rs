//! Tracing subscriber setup.

use crate::config::LogFormat;
use crate::error::{AppError, Result};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const APP_NAME: &str = "melli";

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format {
        LogFormat::Pretty => {
            let subscriber = Registry::default()
                .with(env_filter)
                .with(fmt::layer().with_target(false));
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(APP_NAME.to_string(), std::io::stdout));
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    installed.map_err(|e| AppError::Internal(format!("Tracing already initialized: {}", e)))
}
