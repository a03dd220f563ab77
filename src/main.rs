//! bashcomp - bash-native Tab completion for Rust line editors
//!
//! Runs the completion bridge either as a one-shot command (`complete`)
//! or as an interactive demo shell where Tab is served by bash's own
//! completion scripts and Enter hands the line to bash for execution.

use tracing::Level;

use bashcomp::cli::{CliInterface, build_predictor, resolve_bash_path};
use bashcomp::error::Result;
use bashcomp::repl::ReplEngine;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive shell
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli).await
}

/// Run the interactive demo shell
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let bash_path = resolve_bash_path(cli.config())?;
    let predictor = build_predictor(cli.config())?;

    let mut repl = ReplEngine::new(predictor, bash_path, &cli.config().history)?;
    repl.run().await?;

    println!("Goodbye!");
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
