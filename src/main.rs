use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ipe_art::{game::Game, pack::pack, unpack::unpack};

/// Pack and unpack the ART picture archives of the Imagination Pilots games
#[derive(Parser)]
#[command(name = "ipe-art", version)]
struct Cli {
    /// Log more, repeat for even more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an archive from a folder holding index.txt and its bitmaps
    Pack {
        /// Game the archive is for
        #[arg(short = 't', long = "type", value_enum)]
        game: Game,

        /// Folder holding index.txt
        #[arg(short, long)]
        input: PathBuf,

        /// Archive to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract the pictures of an archive
    Unpack {
        /// Archive to read
        #[arg(short, long)]
        input: PathBuf,

        /// Folder to extract to. Without it the archive is only checked
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Whether every picture made it.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Pack {
            game,
            input,
            output,
        } => {
            let report = pack(game, &input, &output)
                .with_context(|| format!("Failed to pack {}", input.display()))?;
            Ok(report.is_success())
        }
        Commands::Unpack { input, output } => {
            let report = unpack(&input, output.as_deref())
                .with_context(|| format!("Failed to unpack {}", input.display()))?;
            Ok(report.is_success())
        }
    }
}
