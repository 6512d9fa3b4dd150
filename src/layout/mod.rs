//! Layout shorthand for flex containers.
//!
//! Translates a small declarative vocabulary (axis, reversal, two alignment
//! keywords) into a `taffy` container [`Style`](taffy::Style). The adapter is
//! pure: same input, same style, nothing retained between calls.
//!
//! # Modules
//!
//! - [`flex`]: the [`Flex`] shorthand and the [`ContainerProps`] it produces
//! - [`keywords`]: main- and cross-axis alignment keywords

pub mod flex;
pub mod keywords;

pub use flex::{ContainerProps, Flex, Layout};
pub use keywords::{CrossAxis, MainAxis, UnknownKeyword};
