//! Failure values produced by units of work and their normalized form.
//!
//! A unit of work may fail with a plain message, with a real error value, or
//! with something else entirely. [`Failure`] captures all three, and
//! [`OperationError`] is the single shape the async hook stores and reports:
//!
//! | Failure | Normalized to |
//! |---|---|
//! | message | a [`MessageError`] carrying the message |
//! | error | the error itself, unchanged |
//! | opaque `String` / `&'static str` | a [`MessageError`] carrying the text |
//! | any other opaque value | [`MessageError`] with [`GENERIC_REJECTION`] |

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Message used when a unit of work fails with a value that is neither text
/// nor an error.
pub const GENERIC_REJECTION: &str = "async operation rejected";

/// Error wrapping a bare failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct MessageError(pub String);

/// What a unit of work fails with before normalization.
///
/// Units of work usually return `Result<T, E>` with an `E` that converts into
/// `Failure` (`String`, `&str`, `std::io::Error`, boxed errors). Other error
/// types go through [`Failure::error`]; arbitrary values through
/// [`Failure::opaque`].
pub enum Failure {
    /// A textual failure.
    Message(String),
    /// A value implementing `std::error::Error`.
    Error(Box<dyn StdError + Send + Sync + 'static>),
    /// Anything else.
    Opaque(Box<dyn Any + Send + 'static>),
}

impl Failure {
    /// Wraps any error type.
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Error(Box::new(err))
    }

    /// Wraps an arbitrary value.
    pub fn opaque<V>(value: V) -> Self
    where
        V: Any + Send + 'static,
    {
        Self::Opaque(Box::new(value))
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.debug_tuple("Message").field(msg).finish(),
            Self::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Self::Opaque(_) => f.debug_tuple("Opaque").finish_non_exhaustive(),
        }
    }
}

impl From<String> for Failure {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<&str> for Failure {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for Failure {
    fn from(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self::Error(err)
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Self::error(err)
    }
}

impl From<OperationError> for Failure {
    fn from(err: OperationError) -> Self {
        Self::error(err)
    }
}

/// Normalized, cheaply cloneable error of a failed unit of work.
///
/// Error-shaped failures keep their original type and can be recovered with
/// [`OperationError::downcast_ref`].
#[derive(Clone)]
pub struct OperationError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl OperationError {
    /// Builds an error from a bare message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(MessageError(msg.into())),
        }
    }

    /// Returns the error's display text.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.to_string()
    }

    /// Returns the wrapped error if it is of type `E`.
    #[must_use]
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Returns `true` if both values share the same underlying error.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Failure> for OperationError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Message(msg) => Self::message(msg),
            Failure::Error(err) => {
                // Already normalized: keep as is.
                match err.downcast::<Self>() {
                    Ok(op) => *op,
                    Err(err) => Self { inner: Arc::from(err) },
                }
            }
            Failure::Opaque(value) => match value.downcast::<String>() {
                Ok(msg) => Self::message(*msg),
                Err(value) => match value.downcast::<&'static str>() {
                    Ok(msg) => Self::message(*msg),
                    Err(_) => Self::message(GENERIC_REJECTION),
                },
            },
        }
    }
}

impl fmt::Debug for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl StdError for OperationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}
