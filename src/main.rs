//! Command-line demo of the reaccoon components.
//!
//! Runs each component once against sample data and prints what a UI would
//! render:
//!
//! 1. **Async hook**: an activated lookup, then a call that fails and goes
//!    through the configured `on_error` callback
//! 2. **Filter hook**: the sample people list filtered by `QUERY`
//! 3. **Layout**: the resolved container style and the child positions taffy
//!    computes for it
//!
//! # Usage
//!
//! ```text
//! reaccoon-demo [QUERY] [-x space-between] [-y center] [--col] [--reverse]
//!               [-c patch.toml] [--log demo.log] [-v...]
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::{ArgAction, Parser};
use reaccoon::observability::{init_tracing, TracingConfig};
use reaccoon::{
    configure, use_async, use_filter, AsyncOptions, ConfigPatch, ConfigStore, CrossAxis, Failure,
    FilterOptions, Flex, Layout, MainAxis,
};
use serde::Serialize;
use std::path::PathBuf;
use taffy::{AvailableSpace, Dimension, Size, Style, TaffyTree};

#[derive(Parser, Debug)]
#[command(name = "reaccoon-demo", about, long_about = None)]
struct Cli {
    /// Filter query applied to the sample people list
    #[arg(value_name = "QUERY", default_value = "")]
    query: String,

    /// Main-axis keyword of the layout demo
    #[arg(short = 'x', long = "x", value_name = "KEYWORD", default_value = "space-between")]
    main_axis: MainAxis,

    /// Cross-axis keyword of the layout demo
    #[arg(short = 'y', long = "y", value_name = "KEYWORD", default_value = "center")]
    cross_axis: CrossAxis,

    /// Lay the demo container out as a column
    #[arg(long)]
    col: bool,

    /// Reverse the demo container direction
    #[arg(long)]
    reverse: bool,

    /// Merge a TOML configuration patch into the global configuration
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Save logs to a file instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,
}

#[derive(Debug, Clone, Serialize)]
struct Person {
    first: &'static str,
    last: &'static str,
    age: u8,
}

const PEOPLE: [Person; 5] = [
    Person { first: "John", last: "Doe", age: 20 },
    Person { first: "Jane", last: "Smith", age: 21 },
    Person { first: "Alice", last: "Johnson", age: 22 },
    Person { first: "Bob", last: "Brown", age: 23 },
    Person { first: "Charlie", last: "Davis", age: 24 },
];

fn main() -> reaccoon::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbosity {
        0 => None,
        1 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    init_tracing(&TracingConfig { level, file: cli.log_file.clone() })?;

    let _span = tracing::info_span!("demo").entered();

    if let Some(path) = &cli.config_file {
        ConfigStore::global().load_file(path)?;
    }
    configure(ConfigPatch::default().with_on_error(|err| {
        tracing::error!(error = %err, "async operation failed");
        eprintln!("on_error: {err}");
    }));

    run_async_demo();
    run_filter_demo(&cli.query)?;
    run_layout_demo(&cli);

    Ok(())
}

fn run_async_demo() {
    println!("== async hook ==");

    let lookup = use_async(
        Vec::<&'static str>::new(),
        |prefix: String| async move {
            let names: Vec<&'static str> = PEOPLE
                .iter()
                .map(|p| p.first)
                .filter(|name| name.starts_with(prefix.as_str()))
                .collect();
            if names.is_empty() {
                Err(Failure::from(format!("no name starts with {prefix:?}")))
            } else {
                Ok(names)
            }
        },
        AsyncOptions { init: true, reject_while_pending: true },
    );
    println!("created:   {}", lookup.status());

    if let Some(first_call) = lookup.activate() {
        if let Ok(names) = futures_executor::block_on(first_call) {
            println!("activated: {} {names:?}", lookup.status());
        }
    }

    if let Err(e) = futures_executor::block_on(lookup.trigger("Z".to_string())) {
        tracing::debug!(error = %e, "second lookup returned an error");
    }
    let snapshot = lookup.snapshot();
    println!(
        "retrigger: {} (error: {})",
        snapshot.status,
        snapshot.error.map_or_else(String::new, |e| e.text())
    );
    println!("kept value: {:?}", snapshot.result.into_inner());
}

fn run_filter_demo(query: &str) -> reaccoon::Result<()> {
    println!("== filter hook ==");

    let mut people = use_filter(PEOPLE.to_vec(), FilterOptions::new(["first", "last"]))?;
    people.set_filter(query);

    println!("query {:?}: {} of {}", people.filter(), people.matches().len(), people.source().len());
    for person in people.items() {
        println!("  {} {} ({})", person.first, person.last, person.age);
    }
    Ok(())
}

fn run_layout_demo(cli: &Cli) {
    println!("== layout ==");

    let (width, height) = if cli.col { (20.0, 100.0) } else { (100.0, 20.0) };
    let flex = Flex {
        col: cli.col,
        row: !cli.col,
        reverse: cli.reverse,
        layout: Some(Layout { x: Some(cli.main_axis), y: Some(cli.cross_axis) }),
        style: Style {
            size: Size { width: Dimension::Length(width), height: Dimension::Length(height) },
            ..Style::default()
        },
    };
    let style = flex.resolve();
    println!(
        "direction {:?}, justify {:?}, align {:?}",
        style.flex_direction, style.justify_content, style.align_items
    );

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let leaf = Style {
        size: Size { width: Dimension::Length(10.0), height: Dimension::Length(10.0) },
        ..Style::default()
    };
    let positions = (0..3)
        .map(|_| tree.new_leaf(leaf.clone()))
        .collect::<Result<Vec<_>, _>>()
        .and_then(|children| {
            let root = tree.new_with_children(style, &children)?;
            tree.compute_layout(
                root,
                Size { width: AvailableSpace::Definite(width), height: AvailableSpace::Definite(height) },
            )?;
            children
                .iter()
                .map(|&child| tree.layout(child).map(|l| (l.location.x, l.location.y)))
                .collect::<Result<Vec<_>, _>>()
        });

    match positions {
        Ok(positions) => {
            for (i, (x, y)) in positions.into_iter().enumerate() {
                println!("  child {i}: ({x}, {y})");
            }
        }
        Err(e) => tracing::warn!(error = %e, "layout computation failed"),
    }
}
