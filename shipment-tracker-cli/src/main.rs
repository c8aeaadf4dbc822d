//! Shipment Tracker CLI Application
//!
//! This is the command-line host for the shipment-tracker library.
//! It plays the part of the tracking page:
//! - Loads a dataset (bundled demo data or a JSON file)
//! - Looks up a query and prints the tracking report
//! - Lists and dumps the normalized dataset

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shipment_tracker::{not_found_message, project_with, ShipmentStore};
use std::path::PathBuf;

mod config;
mod report;

use config::AppConfig;

/// Shipment Tracker - Look up shipments by tracking number
#[derive(Parser, Debug)]
#[command(name = "shipment-tracker-cli")]
#[command(about = "Look up shipments by tracking number", long_about = None)]
#[command(version)]
struct Args {
    /// JSON dataset to load (default: bundled demo shipments)
    #[arg(short, long, value_name = "FILE", global = true)]
    dataset: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a tracking number (or a fragment of one)
    Track {
        /// Tracking number; spaces and case are ignored
        query: String,

        /// Print the display fields as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
    /// List every shipment in the dataset
    List,
    /// Print the normalized dataset as JSON
    Normalize,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Shipment Tracker CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using tracker library v{}", shipment_tracker::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let store = load_store(&args, &config)?;

    match &args.command {
        Command::Track { query, json } => track(&store, &config, query, *json),
        Command::List => {
            print!("{}", report::render_summaries(&store.summaries()));
            Ok(())
        }
        Command::Normalize => {
            println!("{}", serde_json::to_string_pretty(store.shipments())?);
            Ok(())
        }
    }
}

/// Build the store from --dataset, then the config file, then the bundled data
fn load_store(args: &Args, config: &AppConfig) -> Result<ShipmentStore> {
    match args.dataset.as_ref().or(config.dataset.path.as_ref()) {
        Some(path) => ShipmentStore::from_file(path)
            .with_context(|| format!("Failed to load dataset: {:?}", path)),
        None => {
            log::debug!("No dataset given, using bundled demo shipments");
            Ok(ShipmentStore::demo())
        }
    }
}

fn track(store: &ShipmentStore, config: &AppConfig, query: &str, json: bool) -> Result<()> {
    if !config.display.accepts_query(query) {
        anyhow::bail!(
            "Tracking query must be at least {} characters",
            config.display.min_query_len
        );
    }

    let shipment = match store.search(query) {
        Some(shipment) => shipment,
        None => anyhow::bail!(not_found_message(query)),
    };

    let fields = project_with(shipment, &config.display);
    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else {
        print!("{}", report::render_tracking(&fields));
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_track_with_global_flags() {
        let args = Args::try_parse_from(["shipment-tracker-cli", "track", "9a 101", "--json", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Command::Track { query, json } => {
                assert_eq!(query, "9a 101");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_short_query_rejected() {
        let store = ShipmentStore::demo();
        let err = track(&store, &AppConfig::default(), "9A", false).unwrap_err();
        assert!(err.to_string().contains("at least 3 characters"));
    }

    #[test]
    fn test_miss_reports_not_found() {
        let store = ShipmentStore::demo();
        let err = track(&store, &AppConfig::default(), "NOPE-000", false).unwrap_err();
        assert!(err.to_string().starts_with("No shipment found for tracking number NOPE-000"));
    }

    #[test]
    fn test_dataset_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("one.json");
        std::fs::write(&dataset, r#"[{"trackingNumber": "ONLY-1"}]"#).unwrap();

        let args = Args::try_parse_from([
            "shipment-tracker-cli",
            "--dataset",
            dataset.to_str().unwrap(),
            "list",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        config.dataset.path = Some(PathBuf::from("/nonexistent.json"));

        let store = load_store(&args, &config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.find("only-1").is_some());
    }
}
