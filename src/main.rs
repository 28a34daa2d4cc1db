//! Pagesmith - grid page builder engine and persistence API
//!
//! Runs the page persistence server and offers headless commands for
//! validating, inspecting, and exporting saved page layouts.

use clap::{Parser, Subcommand};

#[cfg(feature = "web")]
use pagesmith::cli::ServeArgs;
use pagesmith::cli::{ExportArgs, InspectArgs, ValidateArgs};
use pagesmith::constants::APP_BINARY_NAME;
#[cfg(feature = "web")]
use pagesmith::constants::APP_NAME;

/// Pagesmith - grid page builder engine
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the persistence API server
    #[cfg(feature = "web")]
    Serve(ServeArgs),
    /// Validate a layout file or page record
    Validate(ValidateArgs),
    /// Summarize a layout file or page record
    Inspect(InspectArgs),
    /// Export the layout of a saved page record
    Export(ExportArgs),
}

#[cfg(feature = "web")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(not(feature = "web"))]
fn init_tracing(_verbose: bool) {}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        #[cfg(feature = "web")]
        Command::Serve(args) => {
            eprintln!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
            args.execute()
        }
        Command::Validate(args) => args.execute(),
        Command::Inspect(args) => args.execute(),
        Command::Export(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
