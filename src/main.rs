//! `twin-inventory`: print the resource inventory of a digital-twin Turtle file.
//!
//! Usage:
//!   twin-inventory dt.ttl
//!   twin-inventory dt.ttl --format json
//!   twin-inventory dt.ttl --persist ./twin_db      # replace the sled db contents, report from there
//!   twin-inventory more.ttl --persist ./twin_db --append
//!   RUST_LOG=twin_inventory=debug twin-inventory dt.ttl --strict-root

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use twin_inventory::{
    extract_report, load_turtle_file, render_json, render_text, ChildOrder, ExtractConfig,
    RootSelection, SledStore,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Extract sensors, actuators, geolocations and meshes for every resource under the root
#[derive(Parser, Debug)]
#[command(name = "twin-inventory", version)]
struct Args {
    /// Turtle file describing the digital twin
    input: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Text, env = "TWIN_INVENTORY_FORMAT")]
    format: Format,

    /// Substring identifying the domain namespace (default: example.org)
    #[arg(long, env = "TWIN_INVENTORY_MARKER")]
    marker: Option<String>,

    /// Fail instead of picking one when several top-level resources exist
    #[arg(long)]
    strict_root: bool,

    /// Visit children in store order rather than sorted by identity
    #[arg(long)]
    store_order: bool,

    /// JSON config file; flags override its values
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Import the facts into a sled database at this path and extract from it
    #[arg(long)]
    persist: Option<PathBuf>,

    /// With --persist, keep facts already in the database instead of replacing them
    #[arg(long, requires = "persist")]
    append: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExtractConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(marker) = args.marker {
        config.domain_marker = marker;
    }
    if args.strict_root {
        config.root_selection = RootSelection::RequireUnique;
    }
    if args.store_order {
        config.child_order = ChildOrder::Store;
    }

    let facts = load_turtle_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let report = match &args.persist {
        Some(dir) => {
            let store = SledStore::open(dir)
                .with_context(|| format!("opening fact store {}", dir.display()))?;
            let added = if args.append {
                store.import(&facts)
            } else {
                store.replace(&facts)
            }
            .context("importing facts")?;
            info!(added, append = args.append, path = %dir.display(), "facts persisted");
            extract_report(&store, &config)?
        }
        None => extract_report(&facts, &config)?,
    };

    match args.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", render_json(&report, true)?),
    }
    Ok(())
}
