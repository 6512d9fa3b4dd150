//! Hook configuration and the store it lives in.
//!
//! The configuration has two known subtrees:
//!
//! ```text
//! hooks
//! ├── use_async
//! │   └── on_error      callback invoked with every normalized operation error
//! └── use_filter
//!     └── fuzzy_config  options bag handed to the fuzzy engine
//! ```
//!
//! A [`ConfigStore`] holds one configuration behind a shared lock. Hooks keep a
//! handle to their store and read it at the moment they need a value: the error
//! callback when an operation fails, the fuzzy options when an index is built.
//! Updates go through [`ConfigStore::set`], which deep-merges a
//! [`ConfigPatch`] and is visible to every handle immediately.
//!
//! [`ConfigStore::global`] is the process-wide store used by
//! [`use_async`](crate::use_async), [`use_filter`](crate::use_filter) and
//! [`configure`](crate::configure). Explicit stores are independent of it.
//!
//! # Example
//!
//! ```
//! use reaccoon::{ConfigPatch, ConfigStore};
//! use serde_json::json;
//!
//! let store = ConfigStore::new();
//! store.set(ConfigPatch::default().with_fuzzy_config(json!({ "limit": 10 })));
//! store.set(ConfigPatch::default().with_fuzzy_config(json!({ "case_sensitive": true })));
//!
//! assert_eq!(
//!     store.get().hooks.use_filter.fuzzy_config,
//!     json!({ "limit": 10, "case_sensitive": true })
//! );
//! ```

mod merge;
mod patch;

pub use merge::{merge_values, overlay};
pub use patch::{AsyncHookPatch, ConfigPatch, FilterHookPatch, HooksPatch};

use crate::domain::{OperationError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Callback receiving every error produced by a failed async operation.
pub type ErrorCallback = Arc<dyn Fn(&OperationError) + Send + Sync>;

/// Full configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Per-hook settings.
    pub hooks: HooksConfig,
}

/// Settings for each hook.
#[derive(Debug, Clone, Default)]
pub struct HooksConfig {
    /// Settings of [`UseAsync`](crate::hooks::UseAsync).
    pub use_async: AsyncHookConfig,
    /// Settings of [`UseFilter`](crate::hooks::UseFilter).
    pub use_filter: FilterHookConfig,
}

/// Settings of the async operation hook.
#[derive(Clone)]
pub struct AsyncHookConfig {
    /// Invoked with the normalized error whenever a unit of work fails.
    ///
    /// Defaults to a no-op.
    pub on_error: ErrorCallback,
}

impl Default for AsyncHookConfig {
    fn default() -> Self {
        Self {
            on_error: Arc::new(|_| {}),
        }
    }
}

impl fmt::Debug for AsyncHookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHookConfig")
            .field("on_error", &"Fn(&OperationError)")
            .finish()
    }
}

/// Settings of the filter hook.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterHookConfig {
    /// Default fuzzy engine options.
    ///
    /// Kept as an opaque value: it is only interpreted when a search index is
    /// built, and call-site options are laid over it first.
    pub fuzzy_config: Value,
}

impl Default for FilterHookConfig {
    fn default() -> Self {
        Self {
            fuzzy_config: Value::Object(Map::new()),
        }
    }
}

impl Config {
    /// Deep-merges a patch into this configuration.
    ///
    /// Absent fields keep their value. The callback is replaced, never
    /// composed. The fuzzy options merge with [`merge_values`].
    pub fn merge(&mut self, patch: ConfigPatch) {
        let Some(hooks) = patch.hooks else {
            return;
        };

        if let Some(on_error) = hooks.use_async.and_then(|a| a.on_error) {
            self.hooks.use_async.on_error = on_error;
        }

        if let Some(fuzzy_config) = hooks.use_filter.and_then(|f| f.fuzzy_config) {
            merge_values(&mut self.hooks.use_filter.fuzzy_config, fuzzy_config);
        }
    }
}

/// Shared, mutable configuration.
///
/// Cloning a store yields another handle to the same configuration.
#[derive(Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
}

impl ConfigStore {
    /// Creates a store holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `config`.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns the process-wide store.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<ConfigStore> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns a snapshot of the current configuration.
    ///
    /// This is an owned copy, not a live reference to the shared state: it
    /// does not follow later [`set`](Self::set) calls. Read the store again
    /// when a fresh value is needed; hooks do so every time they use a default.
    #[must_use]
    pub fn get(&self) -> Config {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Deep-merges `patch` into the configuration and returns the result.
    pub fn set(&self, patch: ConfigPatch) -> Config {
        let mut config = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        config.merge(patch);

        tracing::debug!(
            fuzzy_config = %config.hooks.use_filter.fuzzy_config,
            "configuration updated"
        );

        config.clone()
    }

    /// Returns the current error callback.
    #[must_use]
    pub fn on_error(&self) -> ErrorCallback {
        Arc::clone(
            &self
                .inner
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .hooks
                .use_async
                .on_error,
        )
    }

    /// Returns the current default fuzzy engine options.
    #[must_use]
    pub fn fuzzy_config(&self) -> Value {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .hooks
            .use_filter
            .fuzzy_config
            .clone()
    }

    /// Reads a TOML patch from `path` and merges it.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Io`](crate::HookError::Io) if the file cannot be
    /// read, or [`HookError::Config`](crate::HookError::Config) if it does not
    /// parse.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading configuration file");

        let contents = std::fs::read_to_string(path)?;
        let patch = ConfigPatch::from_toml_str(&contents)?;
        Ok(self.set(patch))
    }

    /// Returns `true` if both handles point at the same configuration.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigStore").field(&self.get()).finish()
    }
}
