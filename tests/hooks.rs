//! End-to-end checks of the hooks through the public API.
//!
//! Only `global_store_drives_the_use_functions` touches the process-wide
//! store; every other test builds its own `ConfigStore` so tests can run in
//! parallel.
//!
//! Run with: cargo test --test hooks

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::thread;

use futures_executor::block_on;
use futures_util::future::poll_fn;
use futures_util::task::noop_waker_ref;
use futures_util::FutureExt;
use serde::Serialize;
use serde_json::json;

use reaccoon::{
    config, configure, use_async, use_filter, AsyncOptions, AsyncStatus, AsyncValue, ConfigPatch,
    ConfigStore, Failure, FilterOptions, HookError, UseAsync, UseFilter, GENERIC_REJECTION,
};

// =============================================================================
// SAMPLE DATA
// =============================================================================

#[derive(Debug, Clone, Serialize)]
struct Author {
    name: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct Book {
    title: &'static str,
    author: Author,
    tags: Vec<&'static str>,
}

fn library() -> Vec<Book> {
    vec![
        Book {
            title: "Old Man's War",
            author: Author { name: "John Scalzi" },
            tags: vec!["fiction"],
        },
        Book {
            title: "The Lock Artist",
            author: Author { name: "Steve Hamilton" },
            tags: vec!["thriller"],
        },
        Book {
            title: "HTML5",
            author: Author { name: "Remy Sharp" },
            tags: vec!["web development", "nonfiction"],
        },
    ]
}

// =============================================================================
// GLOBAL STORE
// =============================================================================

#[test]
fn global_store_drives_the_use_functions() {
    let failures = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&failures);

    configure(ConfigPatch::default().with_fuzzy_config(json!({ "limit": 1 })));
    let merged = configure(ConfigPatch::default().with_on_error(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(merged.hooks.use_filter.fuzzy_config, json!({ "limit": 1 }));
    assert_eq!(config().hooks.use_filter.fuzzy_config, json!({ "limit": 1 }));

    let hook = use_async(
        0_u32,
        |n: u32| async move {
            if n == 0 {
                Err("zero is not allowed")
            } else {
                Ok(n * 2)
            }
        },
        AsyncOptions::default(),
    );
    assert_eq!(block_on(hook.trigger(4)).unwrap(), 8);
    assert!(block_on(hook.trigger(0)).is_err());
    assert_eq!(failures.load(Ordering::SeqCst), 1);
    assert_eq!(hook.result(), AsyncValue::Ready(8));

    let mut books = use_filter(library(), FilterOptions::new(["title", "author.name"])).unwrap();
    books.set_filter("a");
    assert_eq!(books.matches().len(), 1);
}

// =============================================================================
// ASYNC HOOK
// =============================================================================

#[test]
fn callback_replaced_between_calls_is_the_one_invoked() {
    let store = ConfigStore::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let first = Arc::clone(&seen);
    store.set(ConfigPatch::default().with_on_error(move |e| first.lock().unwrap().push(format!("fn1: {e}"))));

    let hook: UseAsync<u32> = UseAsync::with_config(
        &store,
        0,
        |()| async { Err::<u32, _>("boom") },
        AsyncOptions::default(),
    );
    let _ = block_on(hook.trigger(()));

    let second = Arc::clone(&seen);
    store.set(ConfigPatch::default().with_on_error(move |e| second.lock().unwrap().push(format!("fn2: {e}"))));
    let _ = block_on(hook.trigger(()));

    assert_eq!(*seen.lock().unwrap(), vec!["fn1: boom", "fn2: boom"]);
}

#[test]
fn failures_are_normalized() {
    let store = ConfigStore::new();

    let io_hook: UseAsync<()> = UseAsync::with_config(
        &store,
        (),
        |()| async { Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "missing file")) },
        AsyncOptions::default(),
    );
    let err = block_on(io_hook.trigger(())).unwrap_err();
    let op = err.as_operation().unwrap();
    assert_eq!(op.downcast_ref::<io::Error>().unwrap().kind(), io::ErrorKind::NotFound);
    assert!(op.ptr_eq(&io_hook.error().unwrap()));

    let opaque_hook: UseAsync<()> = UseAsync::with_config(
        &store,
        (),
        |()| async { Err::<(), _>(Failure::opaque(42_i64)) },
        AsyncOptions::default(),
    );
    let _ = block_on(opaque_hook.trigger(()));
    assert_eq!(opaque_hook.error().unwrap().text(), GENERIC_REJECTION);

    let text_hook: UseAsync<()> = UseAsync::with_config(
        &store,
        (),
        |()| async { Err::<(), _>(Failure::opaque(String::from("plain text"))) },
        AsyncOptions::default(),
    );
    let _ = block_on(text_hook.trigger(()));
    assert_eq!(text_hook.error().unwrap().text(), "plain text");
}

#[test]
fn clones_on_other_threads_share_pending_state() {
    let release: Arc<Mutex<Option<u32>>> = Arc::new(Mutex::new(None));
    let waiting = Arc::clone(&release);

    let hook: UseAsync<u32> = UseAsync::with_config(
        &ConfigStore::new(),
        0,
        move |()| {
            let slot = Arc::clone(&waiting);
            poll_fn(move |_| match slot.lock().unwrap().take() {
                Some(value) => Poll::Ready(Ok::<_, Failure>(value)),
                None => Poll::Pending,
            })
        },
        AsyncOptions { init: false, reject_while_pending: true },
    );

    let (tx, rx) = mpsc::channel();
    let worker = hook.clone();
    let handle = thread::spawn(move || {
        let call = worker.trigger(());
        tx.send(worker.status()).unwrap();
        call
    });
    assert_eq!(rx.recv().unwrap(), AsyncStatus::Pending);
    let mut call = handle.join().unwrap();

    let version = hook.version();
    let refused = block_on(hook.trigger(()));
    assert!(matches!(refused, Err(HookError::RejectedWhilePending)));
    assert_eq!(hook.version(), version);

    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(call.poll_unpin(&mut cx).is_pending());
    *release.lock().unwrap() = Some(7);
    assert!(matches!(call.poll_unpin(&mut cx), Poll::Ready(Ok(7))));
    assert_eq!(hook.status(), AsyncStatus::Fulfilled);
}

#[test]
fn activation_runs_the_first_call_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);

    let hook: UseAsync<String, Option<String>, String> = UseAsync::with_config(
        &ConfigStore::new(),
        None,
        move |query: String| {
            counted.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, Failure>(format!("results for {query:?}")) }
        },
        AsyncOptions { init: true, reject_while_pending: false },
    );
    assert_eq!(hook.result(), AsyncValue::Initial(None));

    let first = hook.activate().unwrap();
    assert!(hook.clone().activate().is_none());
    assert_eq!(block_on(first).unwrap(), "results for \"\"");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// FILTER HOOK
// =============================================================================

#[test]
fn configuration_file_feeds_filter_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reaccoon.toml");
    std::fs::write(
        &path,
        "[hooks.use_filter.fuzzy_config]\ncase_sensitive = true\n",
    )
    .unwrap();

    let store = ConfigStore::new();
    store.load_file(&path).unwrap();

    let mut books = UseFilter::with_config(&store, library(), FilterOptions::new(["title"])).unwrap();
    books.set_filter("html");
    assert!(books.matches().is_empty());
    books.set_filter("HTML");
    assert_eq!(books.matches(), &[2]);
}

#[test]
fn nested_and_array_fields_are_searchable() {
    let mut books = UseFilter::with_config(
        &ConfigStore::new(),
        library(),
        FilterOptions::new(["author.name", "tags"]),
    )
    .unwrap();

    books.set_filter("scalzi");
    assert_eq!(books.items()[0].title, "Old Man's War");

    books.set_filter("web dev");
    let titles: Vec<&str> = books.items().iter().map(|b| b.title).collect();
    assert_eq!(titles, ["HTML5"]);
}

#[test]
fn malformed_configuration_file_leaves_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[hooks.use_filter]\nfuzzy_config = ").unwrap();

    let store = ConfigStore::new();
    store.set(ConfigPatch::default().with_fuzzy_config(json!({ "limit": 3 })));

    let err = store.load_file(&path).unwrap_err();
    assert!(matches!(err, HookError::Config(_)));
    assert_eq!(store.fuzzy_config(), json!({ "limit": 3 }));

    let missing = store.load_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(missing, HookError::Io(_)));
}
