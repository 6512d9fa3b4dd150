//! Partial configuration updates.
//!
//! A [`ConfigPatch`] mirrors the shape of [`Config`](super::Config) with every
//! field optional. Patches are built in code or parsed from TOML or JSON; the
//! error callback can only be set from code.
//!
//! # TOML Format
//!
//! ```toml
//! [hooks.use_filter.fuzzy_config]
//! case_sensitive = false
//! min_score = 20
//! limit = 50
//! ```

use super::ErrorCallback;
use crate::domain::{HookError, OperationError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Deep-partial configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    /// Per-hook settings.
    pub hooks: Option<HooksPatch>,
}

/// Partial [`HooksConfig`](super::HooksConfig).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HooksPatch {
    /// Async hook settings.
    pub use_async: Option<AsyncHookPatch>,
    /// Filter hook settings.
    pub use_filter: Option<FilterHookPatch>,
}

/// Partial [`AsyncHookConfig`](super::AsyncHookConfig).
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AsyncHookPatch {
    /// Replacement error callback.
    #[serde(skip)]
    pub on_error: Option<ErrorCallback>,
}

impl fmt::Debug for AsyncHookPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHookPatch")
            .field("on_error", &self.on_error.as_ref().map(|_| "Fn(&OperationError)"))
            .finish()
    }
}

/// Partial [`FilterHookConfig`](super::FilterHookConfig).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterHookPatch {
    /// Fuzzy engine options, deep-merged into the current ones.
    pub fuzzy_config: Option<Value>,
}

impl ConfigPatch {
    /// Sets the error callback.
    ///
    /// # Example
    ///
    /// ```
    /// use reaccoon::{ConfigPatch, ConfigStore};
    ///
    /// let store = ConfigStore::new();
    /// store.set(ConfigPatch::default().with_on_error(|err| eprintln!("{err}")));
    /// ```
    #[must_use]
    pub fn with_on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&OperationError) + Send + Sync + 'static,
    {
        let hooks = self.hooks.get_or_insert_with(HooksPatch::default);
        hooks.use_async = Some(AsyncHookPatch {
            on_error: Some(Arc::new(callback)),
        });
        self
    }

    /// Sets fuzzy engine options to be merged into the current ones.
    #[must_use]
    pub fn with_fuzzy_config(mut self, options: Value) -> Self {
        let hooks = self.hooks.get_or_insert_with(HooksPatch::default);
        hooks.use_filter = Some(FilterHookPatch {
            fuzzy_config: Some(options),
        });
        self
    }

    /// Parses a patch from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Config`] if the document is not valid TOML or does
    /// not have the patch shape.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| HookError::Config(format!("failed to parse TOML: {e}")))
    }

    /// Parses a patch from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Config`] if the document is not valid JSON or does
    /// not have the patch shape.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map_err(|e| HookError::Config(format!("failed to parse JSON: {e}")))
    }
}
