//! pewpew-tracker - Ammunition and reloading-component price scanner
//!
//! Fetches listing pages through a browser-automation solver, so the
//! JavaScript-heavy sources render server-side before parsing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pewpew_tracker::commands::ScanCommand;
use pewpew_tracker::config::{Config, OutputFormat};
use pewpew_tracker::criteria::{BrassCondition, Component, SearchCriteria};
use pewpew_tracker::listing::Source;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pewpew-tracker",
    version,
    about = "Ammunition and reloading-component price scanner",
    long_about = "Scans AmmoSeek and Gun.Deals via a browser-automation solver, \
                  filters out irrelevant listings, and ranks results by unit price."
)]
struct Cli {
    /// Solver service endpoint
    #[arg(long, global = true, env = "PEW_SOLVER_URL")]
    solver_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan all sources for a component
    #[command(alias = "s")]
    Scan {
        /// Component category (ammo, bullets, brass, primers, powder)
        component: Component,

        /// Search value: caliber, primer type, or powder name
        search: String,

        /// Minimum bullet grain (bullets only)
        #[arg(long)]
        min_grain: Option<u32>,

        /// Brass condition filter (brass only)
        #[arg(long)]
        condition: Option<BrassCondition>,
    },

    /// List the sources that get scanned
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(solver_url) = cli.solver_url {
        config.solver_url = solver_url;
    }

    match cli.command {
        Commands::Scan { component, search, min_grain, condition } => {
            let mut criteria = SearchCriteria::new(component, search);
            criteria.min_grain = min_grain;
            criteria.condition = condition;

            let cmd = ScanCommand::new(config);
            let output = cmd.execute(&criteria).await?;
            println!("{}", output);
        }

        Commands::Sources => {
            println!("Scanned sources:\n");
            println!("{:<12} {:<30}", "Name", "Site");
            println!("{:-<12} {:-<30}", "", "");

            for source in Source::all() {
                println!("{:<12} {:<30}", source.label(), source.base_url());
            }
        }
    }

    Ok(())
}
