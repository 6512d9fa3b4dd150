//! `tracing` subscriber setup.
//!
//! The library only emits events and spans; installing a subscriber is left
//! to the application. [`init_tracing`] is a ready-made one:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | RotatingFile
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. [`TracingConfig::level`]
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber installation
//! - [`file_writer`]: log file with size-based rotation (10 MB, 3 backups)

pub mod file_writer;
pub mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, TracingConfig};
