use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::result::{MismatchEntry, ReconciliationResult};
use crate::core::types::{Category, ReportFilter, VerdictKind};
use crate::history::{History, JsonFileHistoryStore};
use crate::matching::engine::{reconcile_records, ReconcileConfig};
use crate::parsing::table::parse_table_file;
use crate::report::format::format_report;

/// Mismatches listed in text output before the rest are elided
const TEXT_MISMATCH_LIMIT: usize = 20;

#[derive(Args)]
pub struct ReconcileArgs {
    /// IT extract (ORIGIN,DEST,SYS_CODE,SERVICE,TARIF,SLA_FORM,SLA_THRU)
    #[arg(required = true)]
    pub it_file: PathBuf,

    /// Master extract (ORIGIN,DEST,SYS_CODE,Service REG,Tarif REG,sla form REG,sla thru REG)
    #[arg(required = true)]
    pub master_file: PathBuf,

    /// Which rows to include in CSV output
    #[arg(long, value_enum, default_value = "all")]
    pub filter: ReportFilter,

    /// Write the CSV report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter of both inputs (',' ';' or 'tab')
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Record this run in a JSON history file
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Category the run is filed under in the history
    #[arg(long, value_enum, default_value = "tarif", requires = "history")]
    pub category: Category,
}

fn parse_delimiter(s: &str) -> Result<char, String> {
    match s {
        "," => Ok(','),
        ";" => Ok(';'),
        "tab" | "\\t" | "\t" => Ok('\t'),
        other => Err(format!(
            "unsupported delimiter '{other}' (expected ',', ';' or 'tab')"
        )),
    }
}

/// Execute reconcile subcommand
///
/// # Errors
///
/// Returns an error if either input cannot be read, or the report or history
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReconcileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = ReconcileConfig {
        delimiter: args.delimiter,
    };

    let it_records = parse_table_file(&args.it_file, config.delimiter)?;
    let master_records = parse_table_file(&args.master_file, config.delimiter)?;

    if verbose {
        eprintln!(
            "Parsed {} IT rows and {} master rows",
            it_records.len(),
            master_records.len()
        );
    }

    let result = reconcile_records(&it_records, &master_records);

    let history_id = match &args.history {
        Some(path) => Some(record_history(path, &args, &result)?),
        None => None,
    };

    if let Some(output) = &args.output {
        std::fs::write(output, format_report(&result, args.filter))?;
        if verbose || format == OutputFormat::Text {
            eprintln!("Report written to {}", output.display());
        }
    }

    match format {
        OutputFormat::Text => print_text_summary(&args, &result, history_id, verbose),
        OutputFormat::Json => print_json_summary(&result, history_id)?,
        OutputFormat::Csv => {
            if args.output.is_none() {
                print!("{}", format_report(&result, args.filter));
            }
        }
    }

    Ok(())
}

fn record_history(
    path: &Path,
    args: &ReconcileArgs,
    result: &ReconciliationResult,
) -> anyhow::Result<u64> {
    let mut history = History::open(Box::new(JsonFileHistoryStore::new(path)))?;
    let id = history.record(
        &file_name(&args.it_file),
        &file_name(&args.master_file),
        args.category,
        result.clone(),
    )?;
    tracing::info!("recorded run {} in {}", id, path.display());
    Ok(id)
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn print_text_summary(
    args: &ReconcileArgs,
    result: &ReconciliationResult,
    history_id: Option<u64>,
    verbose: bool,
) {
    println!("Reconciliation Results");
    println!("{}", "=".repeat(60));

    println!("\nIT data:     {}", args.it_file.display());
    println!("Master data: {}", args.master_file.display());

    println!("\nTotal rows:         {}", result.total_rows);
    println!("Sesuai:             {}", result.matches);
    println!("Tidak sesuai:       {}", result.mismatch_count());
    println!("Master not found:   {}", result.unmatched_count());
    println!("Match rate:         {:.1}%", result.match_rate() * 100.0);

    if result.mismatches.is_empty() {
        println!("\nAll rows agree with master data.");
    } else {
        println!("\nRows needing attention:");
        let limit = if verbose {
            result.mismatches.len()
        } else {
            TEXT_MISMATCH_LIMIT
        };
        for entry in result.mismatches.iter().take(limit) {
            print_mismatch(entry);
        }
        if result.mismatches.len() > limit {
            println!(
                "  ... and {} more (use --verbose or --format csv)",
                result.mismatches.len() - limit
            );
        }
    }

    if let Some(id) = history_id {
        println!("\nSaved to history as run #{id} ({})", args.category);
    }
}

fn print_mismatch(entry: &MismatchEntry) {
    println!("  Row {}: {}", entry.row_id, entry.reasons.join(", "));
    if entry.kind == VerdictKind::Mismatched {
        for detail in entry.details.iter().filter(|d| !d.is_match) {
            println!(
                "    {}: IT={} Master={}",
                detail.field, detail.it_value, detail.master_value
            );
        }
    }
}

fn print_json_summary(result: &ReconciliationResult, history_id: Option<u64>) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "summary": result.summary(),
        "history_id": history_id,
        "result": result,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(','));
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert!(parse_delimiter("|").is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("/tmp/data/it.csv")), "it.csv");
        assert_eq!(file_name(Path::new("master.csv")), "master.csv");
    }
}
