//! Error types for the reaccoon hooks.
//!
//! This module defines the centralized error type [`HookError`] and a type alias
//! [`Result`] used throughout the crate. Errors are derived with `thiserror`.
//!
//! Only two errors originate in the hooks themselves: a trigger refused while an
//! operation is in flight, and a failed unit of work. Everything else is raised
//! by an external collaborator (the fuzzy engine, the TOML parser, the
//! filesystem) and passed through.

use super::failure::OperationError;
use thiserror::Error;

/// The main error type for reaccoon operations.
///
/// # Examples
///
/// ```
/// use reaccoon::HookError;
///
/// let err = HookError::RejectedWhilePending;
/// assert_eq!(err.to_string(), "cannot invoke the operation while its status is PENDING");
/// ```
#[derive(Debug, Error)]
pub enum HookError {
    /// The trigger was called while a previous call was still in flight and the
    /// hook was created with `reject_while_pending`.
    ///
    /// Returned straight to the caller. The hook's status, result and error are
    /// left untouched.
    #[error("cannot invoke the operation while its status is PENDING")]
    RejectedWhilePending,

    /// The unit of work failed.
    ///
    /// The same error is stored in the hook and handed to the configured
    /// `on_error` callback.
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// The fuzzy engine rejected its options or a record could not be indexed.
    #[error("Search error: {0}")]
    Search(String),

    /// A configuration patch could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Returns the normalized operation error, if this is a failed unit of work.
    #[must_use]
    pub const fn as_operation(&self) -> Option<&OperationError> {
        match self {
            Self::Operation(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized `Result` type for reaccoon operations.
pub type Result<T> = std::result::Result<T, HookError>;
