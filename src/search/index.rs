//! Fuzzy index over serializable records.
//!
//! Records are serialized once with `serde_json` when the index is built, and
//! the text under each key is kept for matching. The index is never updated in
//! place; a new collection or new options means a new index.

use super::options::SearchOptions;
use crate::domain::{HookError, Result};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A record matching a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// Position of the record in the indexed collection.
    pub index: usize,
    /// Match quality, higher is better.
    pub score: i64,
}

/// Searchable snapshot of a record collection.
///
/// # Keys
///
/// Keys are dotted paths into the serialized record (`"author.name"`). Arrays
/// met along the path are searched element by element. Strings match as they
/// are, numbers and booleans through their text form. With no keys the record
/// itself is searched, which suits collections of plain strings.
///
/// # Example
///
/// ```
/// use reaccoon::search::{FuzzyIndex, SearchOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Person { first: &'static str, last: &'static str }
///
/// let people = [
///     Person { first: "John", last: "Doe" },
///     Person { first: "Alice", last: "Johnson" },
///     Person { first: "Bob", last: "Brown" },
/// ];
/// let keys = vec!["first".to_string(), "last".to_string()];
/// let index = FuzzyIndex::build(&people, &keys, SearchOptions::default())?;
///
/// let hits: Vec<usize> = index.search("john").into_iter().map(|h| h.index).collect();
/// assert!(hits.contains(&0) && hits.contains(&1));
/// assert!(!hits.contains(&2));
/// # Ok::<(), reaccoon::HookError>(())
/// ```
pub struct FuzzyIndex {
    /// Text per record, per key.
    fields: Vec<Vec<Vec<String>>>,
    keys: Vec<String>,
    options: SearchOptions,
    matcher: SkimMatcherV2,
}

impl FuzzyIndex {
    /// Indexes `records` under `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Search`] if a record cannot be serialized.
    pub fn build<T: Serialize>(records: &[T], keys: &[String], options: SearchOptions) -> Result<Self> {
        let _span = tracing::debug_span!("fuzzy_index_build",
            records = records.len(),
            keys = keys.len()
        ).entered();

        let paths: Vec<Vec<&str>> = keys.iter().map(|key| key.split('.').collect()).collect();

        let fields = records
            .iter()
            .map(|record| {
                let value = serde_json::to_value(record)
                    .map_err(|e| HookError::Search(format!("failed to index record: {e}")))?;

                if paths.is_empty() {
                    let mut texts = Vec::new();
                    collect_texts(&value, &[], &mut texts);
                    return Ok(vec![texts]);
                }

                Ok(paths
                    .iter()
                    .map(|path| {
                        let mut texts = Vec::new();
                        collect_texts(&value, path, &mut texts);
                        texts
                    })
                    .collect())
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(indexed = fields.len(), "fuzzy index built");

        Ok(Self {
            fields,
            keys: keys.to_vec(),
            matcher: options.matcher(),
            options,
        })
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no records are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys the index was built with.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Options the index was built with.
    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns the records matching `query`.
    ///
    /// A record's score is its best score over all keys (summed over tokens
    /// when `match_all_tokens` is set). Sorted hits break ties by source order.
    /// A query with no tokens matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let _span = tracing::debug_span!("fuzzy_search",
            records = self.fields.len(),
            query_len = query.len()
        ).entered();

        if query.chars().count() < self.options.min_match_char_length {
            tracing::debug!("query shorter than minimum match length");
            return Vec::new();
        }

        let tokens: Vec<&str> = if self.options.match_all_tokens {
            query.split_whitespace().collect()
        } else {
            vec![query]
        };
        if tokens.is_empty() {
            tracing::debug!("query has no tokens");
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, keys)| {
                self.score_record(keys, &tokens)
                    .map(|score| SearchHit { index, score })
            })
            .filter(|hit| self.options.min_score.map_or(true, |min| hit.score >= min))
            .collect();

        if self.options.should_sort {
            hits.sort_by(|a, b| b.score.cmp(&a.score));
        }

        if let Some(limit) = self.options.limit {
            hits.truncate(limit);
        }

        tracing::debug!(hits = hits.len(), "fuzzy search complete");
        hits
    }

    fn score_record(&self, keys: &[Vec<String>], tokens: &[&str]) -> Option<i64> {
        tokens.iter().try_fold(0_i64, |total, token| {
            keys.iter()
                .flatten()
                .filter_map(|text| self.matcher.fuzzy_match(text, token))
                .max()
                .map(|best| total.saturating_add(best))
        })
    }
}

impl fmt::Debug for FuzzyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyIndex")
            .field("records", &self.fields.len())
            .field("keys", &self.keys)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Gathers the searchable text found under `path`.
fn collect_texts(value: &Value, path: &[&str], out: &mut Vec<String>) {
    if let Value::Array(items) = value {
        for item in items {
            collect_texts(item, path, out);
        }
        return;
    }

    match path.split_first() {
        Some((head, rest)) => {
            if let Some(child) = value.get(*head) {
                collect_texts(child, rest, out);
            }
        }
        None => match value {
            Value::String(text) => out.push(text.clone()),
            Value::Number(number) => out.push(number.to_string()),
            Value::Bool(flag) => out.push(flag.to_string()),
            Value::Null | Value::Object(_) | Value::Array(_) => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Book {
        title: &'static str,
        author: Author,
        tags: Vec<&'static str>,
        year: u32,
    }

    #[derive(Serialize)]
    struct Author {
        name: &'static str,
    }

    fn books() -> Vec<Book> {
        vec![
            Book { title: "The Rust Book", author: Author { name: "Steve Klabnik" }, tags: vec!["programming"], year: 2018 },
            Book { title: "Dune", author: Author { name: "Frank Herbert" }, tags: vec!["scifi", "classic"], year: 1965 },
            Book { title: "Hyperion", author: Author { name: "Dan Simmons" }, tags: vec!["scifi"], year: 1989 },
        ]
    }

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(ToString::to_string).collect()
    }

    fn indices(hits: &[SearchHit]) -> Vec<usize> {
        hits.iter().map(|h| h.index).collect()
    }

    #[test]
    fn collects_nested_and_array_fields() {
        let value = json!({ "a": { "b": "deep" }, "list": [{ "n": 1 }, { "n": true }] });
        let mut out = Vec::new();
        collect_texts(&value, &["a", "b"], &mut out);
        collect_texts(&value, &["list", "n"], &mut out);
        collect_texts(&value, &["missing"], &mut out);
        assert_eq!(out, vec!["deep", "1", "true"]);
    }

    #[test]
    fn searches_dotted_keys() {
        let index = FuzzyIndex::build(&books(), &keys(&["author.name"]), SearchOptions::default()).unwrap();
        assert_eq!(indices(&index.search("herbert")), vec![1]);
        assert!(index.search("dune").is_empty());
    }

    #[test]
    fn searches_array_elements() {
        let index = FuzzyIndex::build(&books(), &keys(&["tags"]), SearchOptions::default()).unwrap();
        assert_eq!(indices(&index.search("classic")), vec![1]);

        let mut scifi = indices(&index.search("scifi"));
        scifi.sort_unstable();
        assert_eq!(scifi, vec![1, 2]);
    }

    #[test]
    fn numbers_match_by_text() {
        let index = FuzzyIndex::build(&books(), &keys(&["year"]), SearchOptions::default()).unwrap();
        assert_eq!(indices(&index.search("1965")), vec![1]);
    }

    #[test]
    fn plain_strings_need_no_keys() {
        let words = ["apple", "banana", "cherry"];
        let index = FuzzyIndex::build(&words, &[], SearchOptions::default()).unwrap();
        assert_eq!(indices(&index.search("nan")), vec![1]);
    }

    #[test]
    fn case_sensitivity_is_configurable() {
        let insensitive = FuzzyIndex::build(&books(), &keys(&["title"]), SearchOptions::default()).unwrap();
        assert_eq!(indices(&insensitive.search("DUNE")), vec![1]);

        let options = SearchOptions { case_sensitive: true, ..SearchOptions::default() };
        let sensitive = FuzzyIndex::build(&books(), &keys(&["title"]), options).unwrap();
        assert!(sensitive.search("DUNE").is_empty());
    }

    #[test]
    fn limit_and_min_length_apply() {
        let options = SearchOptions { limit: Some(1), ..SearchOptions::default() };
        let index = FuzzyIndex::build(&books(), &keys(&["tags"]), options).unwrap();
        assert_eq!(index.search("scifi").len(), 1);

        let options = SearchOptions { min_match_char_length: 3, ..SearchOptions::default() };
        let index = FuzzyIndex::build(&books(), &keys(&["title"]), options).unwrap();
        assert!(index.search("du").is_empty());
        assert_eq!(indices(&index.search("dun")), vec![1]);
    }

    #[test]
    fn unsorted_hits_keep_source_order() {
        let options = SearchOptions { should_sort: false, ..SearchOptions::default() };
        let index = FuzzyIndex::build(&books(), &keys(&["tags"]), options).unwrap();
        assert_eq!(indices(&index.search("scifi")), vec![1, 2]);
    }

    #[test]
    fn all_tokens_must_match() {
        let options = SearchOptions { match_all_tokens: true, ..SearchOptions::default() };
        let index =
            FuzzyIndex::build(&books(), &keys(&["title", "author.name"]), options).unwrap();
        assert_eq!(indices(&index.search("dune frank")), vec![1]);
        assert!(index.search("dune simmons").is_empty());
    }

    #[test]
    fn blank_query_matches_nothing_when_splitting_tokens() {
        let options = SearchOptions { match_all_tokens: true, ..SearchOptions::default() };
        let index = FuzzyIndex::build(&books(), &keys(&["title"]), options).unwrap();
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn min_score_filters_hits() {
        let options = SearchOptions { min_score: Some(i64::MAX), ..SearchOptions::default() };
        let index = FuzzyIndex::build(&books(), &keys(&["title"]), options).unwrap();
        assert!(index.search("dune").is_empty());
    }
}
