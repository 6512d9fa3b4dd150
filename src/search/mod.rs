//! Fuzzy search engine adapter.
//!
//! Wraps `fuzzy-matcher`'s Skim matcher behind a record index keyed by field
//! paths. The filter hook builds one [`FuzzyIndex`] per collection and option
//! set, and asks it for ranked [`SearchHit`]s.
//!
//! # Modules
//!
//! - [`index`]: the record index and its query method
//! - [`options`]: engine options parsed from the configuration bag

pub mod index;
pub mod options;

pub use index::{FuzzyIndex, SearchHit};
pub use options::SearchOptions;
