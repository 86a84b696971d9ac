mod commands;
mod source;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{SourceArgs, WindowArgs};

#[derive(Parser)]
#[command(name = "libcal-hours")]
#[command(about = "Render a rolling calendar of library opening hours from LibCal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the embeddable HTML table (empty on failure, errors go to stderr)
    Render {
        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the hours window in the terminal
    Show {
        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Print the window as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the locations the institution publishes hours for
    Locations {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the config file path, creating a default one if missing
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { window, source } => commands::render::run(window, source).await,
        Commands::Show { window, source, json } => commands::show::run(window, source, json).await,
        Commands::Locations { source } => commands::locations::run(source).await,
        Commands::Config => commands::config::run(),
    }
}
