use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::core::types::ReportFilter;
use crate::history::{History, JsonFileHistoryStore};
use crate::report::format::format_report;

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List stored runs, newest first
    List {
        /// History file written by `reconcile --history`
        #[arg(long, required = true)]
        file: PathBuf,
    },

    /// Show one stored run
    Show {
        /// Run id
        #[arg(required = true)]
        id: u64,

        /// History file written by `reconcile --history`
        #[arg(long, required = true)]
        file: PathBuf,

        /// Which rows to include in CSV output
        #[arg(long, value_enum, default_value = "all")]
        filter: ReportFilter,
    },

    /// Remove every stored run
    Clear {
        /// History file written by `reconcile --history`
        #[arg(long, required = true)]
        file: PathBuf,
    },
}

/// Execute history subcommand
///
/// # Errors
///
/// Returns an error if the history file cannot be read or written, or the
/// requested run does not exist.
pub fn run(args: HistoryArgs, format: OutputFormat) -> anyhow::Result<()> {
    match args.command {
        HistoryCommands::List { file } => run_list(&open(file)?, format),
        HistoryCommands::Show { id, file, filter } => run_show(&open(file)?, id, filter, format),
        HistoryCommands::Clear { file } => {
            let mut history = open(file)?;
            let removed = history.len();
            history.clear()?;
            println!("Removed {removed} runs from history");
            Ok(())
        }
    }
}

fn open(file: PathBuf) -> anyhow::Result<History> {
    Ok(History::open(Box::new(JsonFileHistoryStore::new(file)))?)
}

fn run_list(history: &History, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if history.is_empty() {
                println!("No runs recorded.");
                return Ok(());
            }
            println!(
                "{:<6} {:<20} {:<8} {:>7} {:>7} {:>8}  Files",
                "ID", "Date", "Category", "Rows", "Sesuai", "Mismatch"
            );
            println!("{}", "-".repeat(80));
            for entry in history.list() {
                println!(
                    "{:<6} {:<20} {:<8} {:>7} {:>7} {:>8}  {} vs {}",
                    entry.id,
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                    entry.category.to_string(),
                    entry.result.total_rows,
                    entry.result.matches,
                    entry.result.mismatches.len(),
                    entry.it_file_name,
                    entry.master_file_name
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&history.summaries())?);
        }
        OutputFormat::Csv => {
            println!("id,timestamp,category,it_file,master_file,total_rows,matches,mismatches");
            for entry in history.list() {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    entry.id,
                    entry.timestamp.to_rfc3339(),
                    entry.category,
                    entry.it_file_name,
                    entry.master_file_name,
                    entry.result.total_rows,
                    entry.result.matches,
                    entry.result.mismatches.len()
                );
            }
        }
    }
    Ok(())
}

fn run_show(
    history: &History,
    id: u64,
    filter: ReportFilter,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entry = history
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Run {id} not found in history"))?;

    match format {
        OutputFormat::Text => {
            println!("Run #{}", entry.id);
            println!("{}", "=".repeat(60));
            println!("Date:        {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("Category:    {}", entry.category);
            println!("IT data:     {}", entry.it_file_name);
            println!("Master data: {}", entry.master_file_name);
            println!("\nTotal rows:   {}", entry.result.total_rows);
            println!("Sesuai:       {}", entry.result.matches);
            println!("Tidak sesuai: {}", entry.result.mismatches.len());
            for mismatch in &entry.result.mismatches {
                println!("  Row {}: {}", mismatch.row_id, mismatch.reasons.join(", "));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
        OutputFormat::Csv => print!("{}", format_report(&entry.result, filter)),
    }
    Ok(())
}
