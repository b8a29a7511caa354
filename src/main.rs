use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io;
use tracing_subscriber::EnvFilter;
use vendsim::application::session::Session;
use vendsim::interfaces::csv::catalog_reader::seed_catalog;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let catalog = seed_catalog().into_diagnostic()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(catalog, stdin.lock(), stdout.lock());
    session.run().into_diagnostic()?;

    Ok(())
}

/// Diagnostics go to stderr so stdout only carries the customer dialogue.
/// Quiet by default; set `RUST_LOG=debug` to trace every prompt outcome.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Fails only if a subscriber is already installed, which then stays in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
