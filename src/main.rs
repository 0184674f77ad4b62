//! bmstable command-line interface
//!
//! Fetches a difficulty table and prints a summary (or the full normalized
//! table as JSON).

use bmstable::{Loader, LoaderOptions};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Load and normalize a bmstable difficulty table
///
/// The URL may point at the table's JSON header directly, or at an HTML
/// page carrying a name="bmstable" marker.
#[derive(Parser, Debug)]
#[command(name = "bmstable")]
#[command(version)]
#[command(about = "Lenient loader for bmstable difficulty tables", long_about = None)]
struct Cli {
    /// Table URL (header document or wrapper page)
    #[arg(value_name = "URL")]
    url: String,

    /// Total fetch attempts per URL, including the first
    #[arg(long, default_value_t = 3)]
    attempts: u32,

    /// Per-attempt request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Print the full normalized table as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let options = LoaderOptions {
        attempts: cli.attempts,
        request_timeout: Duration::from_secs(cli.timeout),
        ..LoaderOptions::default()
    };

    let loader = Loader::new(options)?;

    tracing::info!("Loading table from: {}", cli.url);
    let table = match loader.load(&cli.url).await {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Load failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print_summary(&table);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bmstable=info,warn"),
            1 => EnvFilter::new("bmstable=debug,info"),
            2 => EnvFilter::new("bmstable=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn print_summary(table: &bmstable::Table) {
    let head = table.head();

    println!("{} [{}]", head.name, head.symbol);
    println!("  entries: {}", table.body().len());
    if table.dropped_entries() > 0 {
        println!("  dropped: {}", table.dropped_entries());
    }

    let order = table.level_order();
    let rendered: Vec<String> = order.iter().map(|level| level.to_string()).collect();
    println!("  levels:  {}", rendered.join(", "));
}
