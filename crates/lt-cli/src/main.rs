//! CLI frontend for the Lostrommel classroom name picker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lostrommel",
    about = "Lostrommel — classroom name picker with a point ledger",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive picking and scoring session
    Play {
        /// Directory holding persisted scores
        #[arg(short, long, default_value = ".lostrommel")]
        dir: PathBuf,

        /// RNG seed for reproducible draws (default: OS entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Keep scores in memory only, touching no files
        #[arg(long)]
        ephemeral: bool,
    },

    /// Print the ranked score board
    Board {
        /// Directory holding persisted scores
        #[arg(short, long, default_value = ".lostrommel")]
        dir: PathBuf,
    },

    /// Export the ranked scores as plain text
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding persisted scores
        #[arg(short, long, default_value = ".lostrommel")]
        dir: PathBuf,
    },

    /// Clear all persisted scores
    Reset {
        /// Confirm the destructive clear
        #[arg(long)]
        yes: bool,

        /// Directory holding persisted scores
        #[arg(short, long, default_value = ".lostrommel")]
        dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            dir,
            seed,
            ephemeral,
        } => commands::play::run(&dir, seed, ephemeral),
        Commands::Board { dir } => commands::board::run(&dir),
        Commands::Export { output, dir } => commands::export::run(&dir, output.as_deref()),
        Commands::Reset { yes, dir } => commands::reset::run(&dir, yes),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
