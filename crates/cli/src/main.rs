//! Aftercare CLI — the main entry point.
//!
//! Commands:
//! - `run`      — Run the monitoring simulation over a patient roster
//! - `log`      — Inspect the escalation log
//! - `patients` — Generate a sample patient roster

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "aftercare",
    about = "Aftercare — post-discharge patient monitoring simulator",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "aftercare.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitoring simulation
    Run {
        /// Patient roster file (JSON)
        #[arg(short, long, default_value = "data/roster.json")]
        roster: PathBuf,

        /// Override the number of days to simulate
        #[arg(short, long)]
        days: Option<u32>,

        /// Override the engagement RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the full run result as JSON to this path
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Show the escalation log and its summary
    Log {
        /// Show only the aggregate summary
        #[arg(short, long)]
        summary: bool,
    },

    /// Generate a sample patient roster
    Patients {
        /// Where to write the roster
        #[arg(short, long, default_value = "data/roster.json")]
        output: PathBuf,

        /// How many patients to generate
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            roster,
            days,
            seed,
            export,
        } => commands::run::run(&cli.config, &roster, days, seed, export.as_deref()).await?,
        Commands::Log { summary } => commands::log::run(&cli.config, summary).await?,
        Commands::Patients { output, count } => commands::patients::run(&output, count)?,
    }

    Ok(())
}
