//! Status and value types of the async operation hook.

use crate::domain::OperationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an async operation.
///
/// ```text
///            trigger                 settles Ok
///   IDLE ─────────────▶ PENDING ─────────────────▶ FULFILLED
///                         ▲  │                        │
///                         │  │ settles Err            │ trigger
///                         │  ▼                        │
///                         REJECTED ◀──────────────────┘ (via PENDING)
/// ```
///
/// IDLE is only ever the initial state. FULFILLED and REJECTED both go back to
/// PENDING on the next trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AsyncStatus {
    /// Never triggered.
    Idle,
    /// A call is in flight.
    Pending,
    /// The last settled call succeeded.
    Fulfilled,
    /// The last settled call failed.
    Rejected,
}

impl AsyncStatus {
    /// Returns `true` while a call is in flight.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns `true` once a call has settled, either way.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Fulfilled | Self::Rejected)
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "IDLE",
            Self::Pending => "PENDING",
            Self::Fulfilled => "FULFILLED",
            Self::Rejected => "REJECTED",
        })
    }
}

/// Value carried by the hook.
///
/// Starts as the caller's initial value and becomes the produced value once a
/// call succeeds. Later calls keep showing the last value until they settle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncValue<I, T> {
    /// The placeholder supplied at creation (or through `set_result`).
    Initial(I),
    /// A value produced by the unit of work (or set through `set_result`).
    Ready(T),
}

impl<I, T> AsyncValue<I, T> {
    /// Returns the produced value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Initial(_) => None,
        }
    }

    /// Returns the placeholder, if no value was produced yet.
    #[must_use]
    pub const fn initial(&self) -> Option<&I> {
        match self {
            Self::Initial(value) => Some(value),
            Self::Ready(_) => None,
        }
    }

    /// Returns `true` if this holds a produced value.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl<T> AsyncValue<T, T> {
    /// Unwraps the value when placeholder and result share a type.
    pub fn into_inner(self) -> T {
        match self {
            Self::Initial(value) | Self::Ready(value) => value,
        }
    }

    /// Borrows the value when placeholder and result share a type.
    #[must_use]
    pub const fn get(&self) -> &T {
        match self {
            Self::Initial(value) | Self::Ready(value) => value,
        }
    }
}

/// Consistent view of an async hook at one instant.
#[derive(Debug, Clone)]
pub struct AsyncSnapshot<I, T> {
    /// Current status.
    pub status: AsyncStatus,
    /// Carried value.
    pub result: AsyncValue<I, T>,
    /// Normalized error; present exactly when `status` is REJECTED.
    pub error: Option<OperationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_displays_in_uppercase() {
        assert_eq!(AsyncStatus::Pending.to_string(), "PENDING");
        assert_eq!(serde_json::to_string(&AsyncStatus::Fulfilled).unwrap(), "\"FULFILLED\"");
    }

    #[test]
    fn status_predicates() {
        assert!(AsyncStatus::Pending.is_pending());
        assert!(!AsyncStatus::Idle.is_settled());
        assert!(AsyncStatus::Rejected.is_settled());
    }

    #[test]
    fn value_accessors() {
        let value: AsyncValue<Option<u8>, String> = AsyncValue::Initial(None);
        assert_eq!(value.initial(), Some(&None));
        assert_eq!(value.ready(), None);

        let value: AsyncValue<u8, u8> = AsyncValue::Ready(5);
        assert!(value.is_ready());
        assert_eq!(*value.get(), 5);
        assert_eq!(value.into_inner(), 5);
    }
}
