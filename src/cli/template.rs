use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::report::template::TemplateKind;

#[derive(Args)]
pub struct TemplateArgs {
    /// Which template to write
    #[arg(value_enum, required = true)]
    pub kind: TemplateKind,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute template subcommand
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TemplateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let Some(output) = &args.output else {
        if format == OutputFormat::Json {
            let output = serde_json::json!({
                "file_name": args.kind.file_name(),
                "content": args.kind.content(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print!("{}", args.kind.content());
        }
        return Ok(());
    };

    std::fs::write(output, args.kind.content())?;
    println!(
        "Wrote {} template to {} (suggested name: {})",
        args.kind,
        output.display(),
        args.kind.file_name()
    );

    Ok(())
}
