//! Fuzzy filter hook.
//!
//! [`UseFilter`] keeps a query string and the subset of a record collection
//! matching it. The query and the collection are its inputs; whenever either
//! changes the subset is recomputed. An empty query passes the whole
//! collection through.
//!
//! Matching is delegated to a [`FuzzyIndex`]. The index is rebuilt from
//! scratch whenever the collection or the options change, using the options of
//! the hook's [`ConfigStore`] with the call-site options laid on top.
//!
//! # Example
//!
//! ```
//! use reaccoon::{ConfigStore, FilterOptions, UseFilter};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Person { first: &'static str, last: &'static str }
//!
//! let people = vec![
//!     Person { first: "John", last: "Doe" },
//!     Person { first: "Jane", last: "Smith" },
//! ];
//!
//! let mut filter = UseFilter::with_config(
//!     &ConfigStore::new(),
//!     people,
//!     FilterOptions::new(["first", "last"]),
//! )?;
//! assert_eq!(filter.items().len(), 2);
//!
//! filter.set_filter("smith");
//! let names: Vec<&str> = filter.items().iter().map(|p| p.first).collect();
//! assert_eq!(names, ["Jane"]);
//! # Ok::<(), reaccoon::HookError>(())
//! ```

use crate::config::{overlay, ConfigStore};
use crate::domain::Result;
use crate::search::{FuzzyIndex, SearchOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Call-site options of a filter hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Record fields to search, as dotted paths.
    pub keys: Vec<String>,

    /// Fuzzy engine options overriding the configured defaults.
    #[serde(flatten)]
    pub search: Map<String, Value>,
}

impl FilterOptions {
    /// Searches the given keys with default engine options.
    pub fn new<K>(keys: impl IntoIterator<Item = K>) -> Self
    where
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            search: Map::new(),
        }
    }

    /// Sets one engine option.
    #[must_use]
    pub fn with(mut self, option: impl Into<String>, value: impl Into<Value>) -> Self {
        self.search.insert(option.into(), value.into());
        self
    }
}

/// Fuzzy filter over a shared record collection.
pub struct UseFilter<T> {
    config: ConfigStore,
    items: Arc<[T]>,
    options: FilterOptions,
    index: FuzzyIndex,
    query: String,
    matches: Vec<usize>,
}

impl<T: Serialize> UseFilter<T> {
    /// Creates a filter over `items` with an empty query.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Search`](crate::HookError::Search) if the engine
    /// rejects the merged options or cannot index a record.
    pub fn with_config(
        config: &ConfigStore,
        items: impl Into<Arc<[T]>>,
        options: FilterOptions,
    ) -> Result<Self> {
        let items = items.into();
        let index = Self::build_index(config, &items, &options)?;

        let mut filter = Self {
            config: config.clone(),
            items,
            options,
            index,
            query: String::new(),
            matches: Vec::new(),
        };
        filter.recompute();
        Ok(filter)
    }

    fn build_index(config: &ConfigStore, items: &[T], options: &FilterOptions) -> Result<FuzzyIndex> {
        let merged = overlay(&config.fuzzy_config(), &Value::Object(options.search.clone()));
        let search = SearchOptions::from_value(merged)?;
        FuzzyIndex::build(items, &options.keys, search)
    }

    fn recompute(&mut self) {
        let _span = tracing::debug_span!("filter_recompute",
            total_items = self.items.len(),
            query_len = self.query.len()
        ).entered();

        self.matches = if self.query.is_empty() {
            (0..self.items.len()).collect()
        } else {
            self.index
                .search(&self.query)
                .into_iter()
                .map(|hit| hit.index)
                .collect()
        };

        tracing::debug!(filtered_count = self.matches.len(), "filter applied");
    }

    /// Current query.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.query
    }

    /// Replaces the query, recomputing the result if it changed.
    pub fn set_filter(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.recompute();
    }

    /// Replaces the collection.
    ///
    /// Passing the collection already held (same `Arc`) is a no-op. Otherwise
    /// the index is rebuilt and the current query re-applied.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Search`](crate::HookError::Search) if a record
    /// cannot be indexed; the hook keeps its previous collection.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) -> Result<()> {
        let items = items.into();
        if Arc::ptr_eq(&items, &self.items) {
            return Ok(());
        }

        self.index = Self::build_index(&self.config, &items, &self.options)?;
        self.items = items;
        self.recompute();
        Ok(())
    }

    /// Replaces the call-site options, rebuilding the index.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Search`](crate::HookError::Search) if the engine
    /// rejects the merged options; the hook keeps its previous options.
    pub fn set_options(&mut self, options: FilterOptions) -> Result<()> {
        self.index = Self::build_index(&self.config, &self.items, &options)?;
        self.options = options;
        self.recompute();
        Ok(())
    }

    /// Rebuilds the index with the store's current defaults.
    ///
    /// # Errors
    ///
    /// Same as [`set_options`](Self::set_options).
    pub fn refresh(&mut self) -> Result<()> {
        self.index = Self::build_index(&self.config, &self.items, &self.options)?;
        self.recompute();
        Ok(())
    }

    /// Records matching the current query, best match first.
    ///
    /// References point into [`source`](Self::source).
    #[must_use]
    pub fn items(&self) -> Vec<&T> {
        self.matches.iter().map(|&i| &self.items[i]).collect()
    }

    /// Positions in the source collection of the matching records.
    #[must_use]
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// The unfiltered collection.
    #[must_use]
    pub const fn source(&self) -> &Arc<[T]> {
        &self.items
    }

    /// Call-site options in effect.
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }
}

impl<T> fmt::Debug for UseFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseFilter")
            .field("query", &self.query)
            .field("items", &self.items.len())
            .field("matches", &self.matches.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPatch;
    use crate::HookError;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Person {
        first: &'static str,
        last: &'static str,
        age: u8,
    }

    fn people() -> Vec<Person> {
        vec![
            Person { first: "John", last: "Doe", age: 20 },
            Person { first: "Jane", last: "Smith", age: 21 },
            Person { first: "Alice", last: "Johnson", age: 22 },
            Person { first: "Bob", last: "Brown", age: 23 },
            Person { first: "Charlie", last: "Davis", age: 24 },
        ]
    }

    fn name_filter(store: &ConfigStore) -> UseFilter<Person> {
        UseFilter::with_config(store, people(), FilterOptions::new(["first", "last"])).unwrap()
    }

    #[test]
    fn empty_query_passes_everything_through() {
        let filter = name_filter(&ConfigStore::new());
        assert_eq!(filter.filter(), "");
        assert_eq!(filter.matches(), &[0, 1, 2, 3, 4]);
        let all: Vec<Person> = filter.items().into_iter().cloned().collect();
        assert_eq!(all, people());
    }

    #[test]
    fn matches_reference_original_records() {
        let mut filter = name_filter(&ConfigStore::new());
        filter.set_filter("john");

        let mut found = filter.matches().to_vec();
        found.sort_unstable();
        assert_eq!(found, vec![0, 2]);

        for (record, &index) in filter.items().into_iter().zip(filter.matches()) {
            assert!(std::ptr::eq(record, &filter.source()[index]));
        }
    }

    #[test]
    fn clearing_the_query_restores_the_collection() {
        let mut filter = name_filter(&ConfigStore::new());
        filter.set_filter("brown");
        assert_eq!(filter.matches(), &[3]);
        filter.set_filter("");
        assert_eq!(filter.items().len(), 5);
    }

    #[test]
    fn new_collection_reapplies_query() {
        let mut filter = name_filter(&ConfigStore::new());
        filter.set_filter("davis");
        assert_eq!(filter.matches(), &[4]);

        let mut shuffled = people();
        shuffled.reverse();
        filter.set_items(shuffled).unwrap();
        assert_eq!(filter.matches(), &[0]);
        assert_eq!(filter.items()[0].first, "Charlie");
    }

    #[test]
    fn same_collection_is_not_reindexed() {
        let items: Arc<[Person]> = people().into();
        let mut filter =
            UseFilter::with_config(&ConfigStore::new(), Arc::clone(&items), FilterOptions::new(["first"]))
                .unwrap();
        filter.set_items(Arc::clone(&items)).unwrap();
        assert!(Arc::ptr_eq(filter.source(), &items));
    }

    #[test]
    fn call_site_options_override_configured_defaults() {
        let store = ConfigStore::new();
        store.set(ConfigPatch::default().with_fuzzy_config(json!({ "case_sensitive": true })));

        let mut strict = name_filter(&store);
        strict.set_filter("ALICE");
        assert!(strict.matches().is_empty());

        let mut relaxed = UseFilter::with_config(
            &store,
            people(),
            FilterOptions::new(["first"]).with("case_sensitive", false),
        )
        .unwrap();
        relaxed.set_filter("ALICE");
        assert_eq!(relaxed.matches(), &[2]);
    }

    #[test]
    fn refresh_picks_up_new_defaults() {
        let store = ConfigStore::new();
        let mut filter = name_filter(&store);
        filter.set_filter("o");
        assert!(filter.matches().len() > 1);

        store.set(ConfigPatch::default().with_fuzzy_config(json!({ "limit": 1 })));
        filter.refresh().unwrap();
        assert_eq!(filter.matches().len(), 1);
    }

    #[test]
    fn engine_rejections_propagate() {
        let result = UseFilter::with_config(
            &ConfigStore::new(),
            people(),
            FilterOptions::new(["first"]).with("limit", "many"),
        );
        assert!(matches!(result, Err(HookError::Search(_))));

        let mut filter = name_filter(&ConfigStore::new());
        let err = filter
            .set_options(FilterOptions::new(["first"]).with("should_sort", 3))
            .unwrap_err();
        assert!(matches!(err, HookError::Search(_)));
        assert_eq!(filter.options().keys, vec!["first", "last"]);
    }

    #[test]
    fn options_deserialize_with_flattened_engine_settings() {
        let options: FilterOptions =
            serde_json::from_value(json!({ "keys": ["first"], "limit": 2 })).unwrap();
        assert_eq!(options.keys, vec!["first"]);
        assert_eq!(options.search.get("limit"), Some(&json!(2)));
    }
}
