use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod history;
mod master;
mod matching;
mod parsing;
mod report;
mod utils;
mod web;
mod workflow;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("recon_desk=debug,info")
    } else {
        EnvFilter::new("recon_desk=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Reconcile(args) => {
            cli::reconcile::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Template(args) => {
            cli::template::run(args, cli.format)?;
        }
        cli::Commands::History(args) => {
            cli::history::run(args, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
