//! Fuzzy engine options.

use crate::domain::{HookError, Result};
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options understood by [`FuzzyIndex`](super::FuzzyIndex).
///
/// Parsed from the merged options bag; keys the engine does not know are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Match letter case exactly.
    pub case_sensitive: bool,

    /// Match case only when the query contains an uppercase letter.
    ///
    /// Ignored when `case_sensitive` is set.
    pub smart_case: bool,

    /// Rank hits by score, best first. When off, hits keep source order.
    pub should_sort: bool,

    /// Drop hits scoring below this value.
    pub min_score: Option<i64>,

    /// Queries shorter than this many characters match nothing.
    pub min_match_char_length: usize,

    /// Keep at most this many hits.
    pub limit: Option<usize>,

    /// Split the query on whitespace and require every token to match.
    pub match_all_tokens: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            smart_case: false,
            should_sort: true,
            min_score: None,
            min_match_char_length: 1,
            limit: None,
            match_all_tokens: false,
        }
    }
}

impl SearchOptions {
    /// Interprets an options bag.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Search`] if `value` is not an object or a known
    /// option has the wrong type.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| HookError::Search(format!("invalid fuzzy options: {e}")))
    }

    /// Builds a matcher honouring the case options.
    pub(crate) fn matcher(&self) -> SkimMatcherV2 {
        let matcher = SkimMatcherV2::default();
        if self.case_sensitive {
            matcher.respect_case()
        } else if self.smart_case {
            matcher.smart_case()
        } else {
            matcher.ignore_case()
        }
    }
}
