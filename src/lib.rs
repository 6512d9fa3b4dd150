//! Reaccoon: state hooks and layout helpers for reactive UIs.
//!
//! The crate provides:
//! - A configuration store with deep-merge updates and a process-wide default
//! - An async operation tracker with IDLE/PENDING/FULFILLED/REJECTED status
//! - A fuzzy filter over record collections
//! - A flex layout shorthand resolving to `taffy` styles

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  UI component (caller)                              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Async hook    │   │ Filter hook   │   │ Layout        │
//! │ (hooks/)      │   │ (hooks/)      │   │ (layout/)     │
//! │ - Status      │   │ - Query       │   │ - Direction   │
//! │ - Last writer │   │ - Recompute   │   │ - Alignment   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                 stateless
//!         │            ┌───────────────┐
//!         │            │ Search (search/)│  ← fuzzy engine adapter
//!         │            └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Config store (config/)                             │
//! │  - on_error callback                                │
//! │  - fuzzy_config options bag                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): errors, failure normalization    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: configuration, patches and the store
//! - [`domain`]: error types and failure normalization
//! - [`hooks`]: [`UseAsync`] and [`UseFilter`]
//! - [`search`]: fuzzy index over serializable records
//! - [`layout`]: [`Flex`] shorthand for container styles
//! - [`observability`]: optional `tracing` subscriber setup
//!
//! # Configuration
//!
//! Hooks read their defaults from a [`ConfigStore`] when they need them. The
//! global store is updated with [`configure`]:
//!
//! ```rust
//! use reaccoon::{configure, ConfigPatch};
//! use serde_json::json;
//!
//! configure(
//!     ConfigPatch::default()
//!         .with_on_error(|err| tracing::warn!(error = %err, "operation failed"))
//!         .with_fuzzy_config(json!({ "case_sensitive": false })),
//! );
//! ```
//!
//! Patches also load from TOML (the callback is code-only):
//!
//! ```toml
//! [hooks.use_filter.fuzzy_config]
//! smart_case = true
//! limit = 50
//! ```
//!
//! # Examples
//!
//! ```rust
//! use reaccoon::{use_async, AsyncOptions, AsyncStatus, Failure};
//!
//! let hook = use_async(
//!     None::<String>,
//!     |name: &'static str| async move {
//!         if name.is_empty() {
//!             Err(Failure::from("empty name"))
//!         } else {
//!             Ok(format!("hello {name}"))
//!         }
//!     },
//!     AsyncOptions::default(),
//! );
//!
//! let greeting = futures_executor::block_on(hook.trigger("ada"))?;
//! assert_eq!(greeting, "hello ada");
//! assert_eq!(hook.status(), AsyncStatus::Fulfilled);
//!
//! assert!(futures_executor::block_on(hook.trigger("")).is_err());
//! assert_eq!(hook.status(), AsyncStatus::Rejected);
//! assert_eq!(hook.error().map(|e| e.text()).as_deref(), Some("empty name"));
//! # Ok::<(), reaccoon::HookError>(())
//! ```

pub mod config;
pub mod domain;
pub mod hooks;
pub mod layout;
pub mod observability;
pub mod search;

pub use config::{Config, ConfigPatch, ConfigStore, ErrorCallback};
pub use domain::{Failure, HookError, MessageError, OperationError, Result, GENERIC_REJECTION};
pub use hooks::{
    use_async, use_filter, AsyncOptions, AsyncSnapshot, AsyncStatus, AsyncValue, FilterOptions,
    UseAsync, UseFilter,
};
pub use layout::{CrossAxis, Flex, Layout, MainAxis};
pub use search::{FuzzyIndex, SearchHit, SearchOptions};

/// Merges `patch` into the global configuration and returns the result.
pub fn configure(patch: ConfigPatch) -> Config {
    ConfigStore::global().set(patch)
}

/// Snapshot of the global configuration.
#[must_use]
pub fn config() -> Config {
    ConfigStore::global().get()
}
