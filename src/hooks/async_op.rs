//! Async operation hook.
//!
//! [`UseAsync`] binds a unit of work (any function returning a future of
//! `Result<T, E>`) to a status, a carried value and an error. Calling
//! [`UseAsync::trigger`] moves the hook to PENDING before the returned future
//! is ever polled; the future then settles the hook to FULFILLED or REJECTED.
//!
//! # Overlapping calls
//!
//! Calls are not queued. If a second trigger starts while the first is still
//! in flight, both run and whichever settles last decides the final state
//! (last writer wins). Set [`AsyncOptions::reject_while_pending`] to refuse the
//! second call instead; the refusal is returned to the caller and never
//! recorded in the hook.
//!
//! A call whose future is dropped before it settles never runs to completion.
//! If it is still the latest call, the hook returns to the status and error it
//! had before that call.
//!
//! # Errors
//!
//! Failures are normalized into an [`OperationError`], stored, passed to the
//! `on_error` callback of the hook's [`ConfigStore`] (looked up when the
//! failure happens, not when the hook was created), and returned from the
//! trigger future as [`HookError::Operation`].
//!
//! # Example
//!
//! ```
//! use reaccoon::{AsyncOptions, AsyncStatus, ConfigStore, Failure, UseAsync};
//!
//! let store = ConfigStore::new();
//! let hook: UseAsync<String, Option<String>, &str> = UseAsync::with_config(
//!     &store,
//!     None,
//!     |name: &'static str| async move { Ok::<_, Failure>(format!("hello {name}")) },
//!     AsyncOptions::default(),
//! );
//!
//! let call = hook.trigger("world");
//! assert_eq!(hook.status(), AsyncStatus::Pending);
//!
//! let value = futures_executor::block_on(call)?;
//! assert_eq!(value, "hello world");
//! assert_eq!(hook.status(), AsyncStatus::Fulfilled);
//! assert_eq!(hook.result().ready().map(String::as_str), Some("hello world"));
//! # Ok::<(), reaccoon::HookError>(())
//! ```

use super::status::{AsyncSnapshot, AsyncStatus, AsyncValue};
use crate::config::ConfigStore;
use crate::domain::{Failure, HookError, OperationError, Result};
use futures_util::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Instrument;

/// Behaviour switches of an async hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncOptions {
    /// Trigger once, with default arguments, when the hook is activated.
    pub init: bool,

    /// Refuse triggers while a call is in flight.
    pub reject_while_pending: bool,
}

type Work<A, T> =
    Arc<dyn Fn(A) -> BoxFuture<'static, std::result::Result<T, Failure>> + Send + Sync>;

struct State<I, T> {
    status: AsyncStatus,
    result: AsyncValue<I, T>,
    error: Option<OperationError>,
    version: u64,
    calls: u64,
}

impl<I, T> State<I, T> {
    fn settle_ok(&mut self, value: T) {
        self.status = AsyncStatus::Fulfilled;
        self.result = AsyncValue::Ready(value);
        self.error = None;
        self.version += 1;
    }

    fn settle_err(&mut self, error: OperationError) {
        self.status = AsyncStatus::Rejected;
        self.error = Some(error);
        self.version += 1;
    }
}

fn lock<I, T>(state: &Mutex<State<I, T>>) -> MutexGuard<'_, State<I, T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores the state a call replaced if its future is dropped unsettled.
///
/// Only the latest call is undone, and only while the hook is still PENDING.
struct PendingGuard<I, T> {
    state: Arc<Mutex<State<I, T>>>,
    call: u64,
    previous: Option<(AsyncStatus, Option<OperationError>)>,
}

impl<I, T> PendingGuard<I, T> {
    fn disarm(&mut self) {
        self.previous = None;
    }
}

impl<I, T> Drop for PendingGuard<I, T> {
    fn drop(&mut self) {
        let Some((status, error)) = self.previous.take() else {
            return;
        };
        let mut state = lock(&self.state);
        if state.calls == self.call && state.status.is_pending() {
            state.status = status;
            state.error = error;
            state.version += 1;
            tracing::debug!(call = self.call, restored = %status, "unsettled call dropped");
        }
    }
}

/// Async operation hook.
///
/// `T` is the produced value, `I` the placeholder shown until the first
/// success, `A` the trigger arguments (use a tuple for several).
///
/// Clones share the same state, so a clone can be moved into an event handler
/// while the original keeps rendering.
pub struct UseAsync<T, I = T, A = ()> {
    state: Arc<Mutex<State<I, T>>>,
    work: Work<A, T>,
    options: AsyncOptions,
    config: ConfigStore,
    activated: Arc<AtomicBool>,
}

impl<T, I, A> Clone for UseAsync<T, I, A> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            work: Arc::clone(&self.work),
            options: self.options,
            config: self.config.clone(),
            activated: Arc::clone(&self.activated),
        }
    }
}

impl<T, I, A> UseAsync<T, I, A>
where
    T: Clone + Send + 'static,
    I: Clone + Send + 'static,
{
    /// Creates a hook reading its error callback from `config`.
    ///
    /// The hook starts IDLE, carrying `initial`. Nothing runs until
    /// [`trigger`](Self::trigger) or [`activate`](Self::activate) is called.
    pub fn with_config<F, Fut, E>(
        config: &ConfigStore,
        initial: I,
        work: F,
        options: AsyncOptions,
    ) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        E: Into<Failure> + 'static,
    {
        tracing::debug!(
            init = options.init,
            reject_while_pending = options.reject_while_pending,
            "creating async hook"
        );

        let work: Work<A, T> = Arc::new(move |args: A| {
            work(args)
                .map(|res| res.map_err(Into::<Failure>::into))
                .boxed()
        });

        Self {
            state: Arc::new(Mutex::new(State {
                status: AsyncStatus::Idle,
                result: AsyncValue::Initial(initial),
                error: None,
                version: 0,
                calls: 0,
            })),
            work,
            options,
            config: config.clone(),
            activated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the unit of work with `args`.
    ///
    /// The hook is PENDING when this returns, with any previous error cleared
    /// and the previous value still carried. The returned future must be
    /// driven to settle the hook. Dropping it unsettled puts back the status
    /// and error it replaced, unless a later call has started since.
    ///
    /// # Errors
    ///
    /// The future resolves to:
    /// - [`HookError::RejectedWhilePending`] right away if a call is in flight
    ///   and `reject_while_pending` is set (hook untouched)
    /// - [`HookError::Operation`] if the unit of work failed
    #[must_use = "the unit of work only runs while the returned future is polled"]
    pub fn trigger(&self, args: A) -> BoxFuture<'static, Result<T>> {
        let span = tracing::debug_span!("async_trigger",
            reject_while_pending = self.options.reject_while_pending
        );

        let mut guard = {
            let _entered = span.enter();
            let mut state = lock(&self.state);

            if state.status.is_pending() && self.options.reject_while_pending {
                tracing::debug!("trigger refused, call already in flight");
                return future::ready(Err(HookError::RejectedWhilePending)).boxed();
            }

            let previous = (state.status, state.error.take());
            state.status = AsyncStatus::Pending;
            state.version += 1;
            state.calls += 1;
            tracing::debug!(version = state.version, call = state.calls, "operation pending");

            PendingGuard {
                state: Arc::clone(&self.state),
                call: state.calls,
                previous: Some(previous),
            }
        };

        let pending = (self.work)(args);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();

        async move {
            let outcome = pending.await;
            guard.disarm();

            match outcome {
                Ok(value) => {
                    lock(&state).settle_ok(value.clone());
                    tracing::debug!("operation fulfilled");
                    Ok(value)
                }
                Err(failure) => {
                    let error = OperationError::from(failure);
                    lock(&state).settle_err(error.clone());
                    tracing::warn!(error = %error, "operation rejected");

                    let on_error = config.on_error();
                    on_error(&error);

                    Err(HookError::Operation(error))
                }
            }
        }
        .instrument(span)
        .boxed()
    }

    /// Runs the automatic first call.
    ///
    /// With [`AsyncOptions::init`] set, the first call of this method (across
    /// all clones) triggers the unit of work with `A::default()` and returns
    /// its future. Every other call returns `None`.
    #[must_use = "the unit of work only runs while the returned future is polled"]
    pub fn activate(&self) -> Option<BoxFuture<'static, Result<T>>>
    where
        A: Default,
    {
        if !self.options.init || self.activated.swap(true, Ordering::SeqCst) {
            return None;
        }

        tracing::debug!("activating async hook");
        Some(self.trigger(A::default()))
    }

    /// Overwrites the carried value without touching status or error.
    pub fn set_result(&self, value: AsyncValue<I, T>) {
        let mut state = lock(&self.state);
        state.result = value;
        state.version += 1;
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AsyncStatus {
        lock(&self.state).status
    }

    /// Current carried value.
    #[must_use]
    pub fn result(&self) -> AsyncValue<I, T> {
        lock(&self.state).result.clone()
    }

    /// Error of the last call, present only while REJECTED.
    #[must_use]
    pub fn error(&self) -> Option<OperationError> {
        lock(&self.state).error.clone()
    }

    /// Status, value and error read together.
    #[must_use]
    pub fn snapshot(&self) -> AsyncSnapshot<I, T> {
        let state = lock(&self.state);
        AsyncSnapshot {
            status: state.status,
            result: state.result.clone(),
            error: state.error.clone(),
        }
    }

    /// Counter bumped on every change of status, value or error.
    ///
    /// Compare with a previously read version to decide whether to re-render.
    #[must_use]
    pub fn version(&self) -> u64 {
        lock(&self.state).version
    }

    /// Options the hook was created with.
    #[must_use]
    pub const fn options(&self) -> AsyncOptions {
        self.options
    }
}

impl<T, I, A> fmt::Debug for UseAsync<T, I, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("UseAsync")
            .field("status", &state.status)
            .field("version", &state.version)
            .field("has_error", &state.error.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
