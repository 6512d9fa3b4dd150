//! Hooks: async operation tracking and fuzzy list filtering.
//!
//! Both hooks are plain values owned by the UI component that uses them. They
//! keep a handle to a [`ConfigStore`] and read it when they need a default.
//! The `use_*` functions bind them to [`ConfigStore::global`]; the
//! `with_config` constructors take an explicit store.
//!
//! # Modules
//!
//! - [`async_op`]: [`UseAsync`], the IDLE/PENDING/FULFILLED/REJECTED tracker
//! - [`filter`]: [`UseFilter`], query-driven fuzzy filtering
//! - [`status`]: status, value and snapshot types of [`UseAsync`]

pub mod async_op;
pub mod filter;
pub mod status;

pub use async_op::{AsyncOptions, UseAsync};
pub use filter::{FilterOptions, UseFilter};
pub use status::{AsyncSnapshot, AsyncStatus, AsyncValue};

use crate::config::ConfigStore;
use crate::domain::{Failure, Result};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Creates an async hook bound to the global configuration.
///
/// # Example
///
/// ```
/// use reaccoon::{use_async, AsyncOptions, AsyncStatus, Failure};
///
/// let hook = use_async(0_u32, |(a, b): (u32, u32)| async move { Ok::<_, Failure>(a + b) }, AsyncOptions::default());
/// assert_eq!(hook.status(), AsyncStatus::Idle);
///
/// let sum = futures_executor::block_on(hook.trigger((2, 3)))?;
/// assert_eq!(sum, 5);
/// # Ok::<(), reaccoon::HookError>(())
/// ```
pub fn use_async<T, I, A, F, Fut, E>(initial: I, work: F, options: AsyncOptions) -> UseAsync<T, I, A>
where
    T: Clone + Send + 'static,
    I: Clone + Send + 'static,
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
    E: Into<Failure> + 'static,
{
    UseAsync::with_config(ConfigStore::global(), initial, work, options)
}

/// Creates a filter hook bound to the global configuration.
///
/// # Errors
///
/// Returns [`HookError::Search`](crate::HookError::Search) if the engine
/// rejects the merged options or cannot index a record.
pub fn use_filter<T: Serialize>(
    items: impl Into<Arc<[T]>>,
    options: FilterOptions,
) -> Result<UseFilter<T>> {
    UseFilter::with_config(ConfigStore::global(), items, options)
}
