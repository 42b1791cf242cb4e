//! RangeWarden - validated catalog of crawler IP ranges
//!
//! Turns upstream range documents into a canonical, versioned JSON artifact.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rangewarden::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Update {
            output,
            allow_large_delta,
        } => rangewarden::commands::update::run(&cli.config, output, allow_large_delta).await,
        Commands::Check {
            output,
            allow_large_delta,
        } => rangewarden::commands::check::run(&cli.config, output, allow_large_delta).await,
        Commands::Sources => rangewarden::commands::sources::run(),
        Commands::Version => {
            println!("rangewarden {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
