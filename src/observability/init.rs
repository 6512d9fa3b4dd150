//! Subscriber setup.

use super::file_writer::RotatingFile;
use crate::domain::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LEVEL: &str = "info";

/// Tracing settings.
///
/// Deserializable so it can sit in an application's TOML file:
///
/// ```toml
/// [tracing]
/// level = "reaccoon=debug"
/// file = "/tmp/reaccoon.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `EnvFilter` directive, e.g. `"debug"` or `"reaccoon=trace"`.
    pub level: Option<String>,
    /// Log file. Events go to stderr when unset.
    pub file: Option<PathBuf>,
}

impl TracingConfig {
    /// Filter directive after applying the fallback chain.
    ///
    /// `RUST_LOG` is handled separately by [`init_tracing`].
    #[must_use]
    pub fn level_or_default(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LEVEL)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level_or_default()))
    }
}

/// Installs the global `tracing` subscriber.
///
/// Level resolution:
/// 1. `RUST_LOG` environment variable
/// 2. `config.level`
/// 3. `"info"`
///
/// Events are formatted to stderr, or to `config.file` through a
/// [`RotatingFile`] (parent directories are created). Calling this again once
/// a subscriber is installed is a no-op.
///
/// # Errors
///
/// Returns [`HookError::Io`](crate::HookError::Io) if the log directory
/// cannot be created.
///
/// # Example
///
/// ```rust
/// use reaccoon::observability::{init_tracing, TracingConfig};
///
/// init_tracing(&TracingConfig {
///     level: Some("debug".to_string()),
///     ..Default::default()
/// })?;
///
/// tracing::debug!("tracing is now active");
/// # Ok::<(), reaccoon::HookError>(())
/// ```
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(config.filter());

    let installed = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let writer = RotatingFile::new(path);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(move || writer.clone()))
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(filter = config.level_or_default(), file = ?config.file, "tracing initialized");
    }
    Ok(())
}
