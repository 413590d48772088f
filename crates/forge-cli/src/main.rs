mod cmd;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pageforge",
    about = "Brief-to-website deployment service — generate, publish, and notify",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the deployment API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080", env = "PAGEFORGE_PORT")]
        port: u16,
    },

    /// Run a single deployment request from a JSON file and print the receipt
    Deploy {
        /// Path to a JSON deployment request
        file: PathBuf,
    },

    /// Validate the environment configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve { port } => cmd::serve::run(port),
        Commands::Deploy { file } => cmd::deploy::run(&file),
        Commands::Config { subcommand } => cmd::config::run(subcommand),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
