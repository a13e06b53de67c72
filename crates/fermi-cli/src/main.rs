//! fermi CLI: order-of-magnitude estimation practice in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "fermi", version, about = "Fermi estimation quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive quiz session
    Play {
        /// Question bank URL, file, or directory (overrides the config)
        #[arg(long)]
        source: Option<String>,

        /// Bank format: auto, json, script, toml
        #[arg(long, default_value = "auto")]
        format: String,

        /// Keep the bank's order instead of shuffling
        #[arg(long)]
        no_shuffle: bool,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Max questions in this session
        #[arg(long)]
        limit: Option<usize>,

        /// Directory to save the session report in
        #[arg(long)]
        save: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that a question bank loads and report problems
    Validate {
        /// Question bank URL, file, or directory
        #[arg(long)]
        source: Option<String>,

        /// Bank format: auto, json, script, toml
        #[arg(long, default_value = "auto")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print every question in a bank with its answer
    List {
        /// Question bank URL, file, or directory
        #[arg(long)]
        source: Option<String>,

        /// Bank format: auto, json, script, toml
        #[arg(long, default_value = "auto")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show a saved session report
    Review {
        /// Session report JSON
        #[arg(long)]
        report: PathBuf,
    },

    /// Create a starter config and sample question bank
    Init,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fermi_core=warn,fermi_sources=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            source,
            format,
            no_shuffle,
            seed,
            limit,
            save,
            config,
        } => commands::play::execute(source, format, no_shuffle, seed, limit, save, config).await,
        Commands::Validate {
            source,
            format,
            config,
        } => commands::validate::execute(source, format, config).await,
        Commands::List {
            source,
            format,
            config,
        } => commands::list::execute(source, format, config).await,
        Commands::Review { report } => commands::review::execute(report),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
