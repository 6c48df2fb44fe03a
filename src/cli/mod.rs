//! Command-line interface for recon-desk.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **reconcile**: Reconcile an IT extract against a master extract
//! - **template**: Write the blank IT or master CSV template
//! - **history**: List, show, or clear stored reconciliation runs
//! - **serve**: Start the web dashboard
//!
//! ## Usage
//!
//! ```text
//! # Summary of a reconciliation run
//! recon-desk reconcile data_it.csv master.csv
//!
//! # Export only the rows needing attention
//! recon-desk reconcile data_it.csv master.csv --filter mismatched --output mismatch.csv
//!
//! # JSON output for scripting
//! recon-desk reconcile data_it.csv master.csv --format json
//!
//! # Keep a history of runs
//! recon-desk reconcile data_it.csv master.csv --history runs.json --category biaya
//! recon-desk history list --file runs.json
//!
//! # Start web UI
//! recon-desk serve --port 8080 --open
//! ```

use clap::{Parser, Subcommand};

pub mod history;
pub mod reconcile;
pub mod template;

#[derive(Parser)]
#[command(name = "recon-desk")]
#[command(version)]
#[command(about = "Reconcile IT tariff extracts against master data")]
#[command(
    long_about = "recon-desk joins an IT extract to a master extract on SYS_CODE and checks Service, Tarif, SLA_FORM and SLA_THRU for every row.\n\nIt reports:\n- Rows that agree with master data (Sesuai)\n- Rows whose fields differ, naming each differing field\n- Rows with no master entry at all"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile an IT extract against master data
    Reconcile(reconcile::ReconcileArgs),

    /// Write a blank input template
    Template(template::TemplateArgs),

    /// Inspect stored reconciliation runs
    History(history::HistoryArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}
