// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, run one pass of the UI.
// - Every reported outcome exits 0; generation or transport failures
//   propagate out of `main` and exit non-zero.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wp_draft::{cli::Cli, ui};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries prompts and the outcome.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    ui::run(&cli)?;
    Ok(())
}
