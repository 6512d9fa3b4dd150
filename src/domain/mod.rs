//! Domain layer: error types shared by every hook.
//!
//! # Organization
//!
//! - [`error`]: the crate error enum and result alias
//! - [`failure`]: failures produced by units of work and their normalized form
//!
//! # Examples
//!
//! ```
//! use reaccoon::domain::{Failure, OperationError};
//!
//! let err = OperationError::from(Failure::from("network unreachable"));
//! assert_eq!(err.text(), "network unreachable");
//! ```

pub mod error;
pub mod failure;

pub use error::{HookError, Result};
pub use failure::{Failure, MessageError, OperationError, GENERIC_REJECTION};
