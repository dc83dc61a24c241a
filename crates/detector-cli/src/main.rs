//! Detector description command-line interface.
//!
//! Assemble definition documents against the in-memory kernel:
//! ```sh
//! detector-cli build detector.json
//! detector-cli validate detector.json --config assembly.json
//! detector-cli materials
//! ```

mod commands;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "detector-cli")]
#[command(about = "Assemble detector geometry from definition documents")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a definition document and print the placement tree.
    Build {
        /// Path to the definition document (JSON).
        document: PathBuf,
        /// Assembly configuration overriding the built-in defaults (JSON).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop printing the tree below this depth.
        #[arg(long, default_value = "8")]
        max_depth: usize,
    },
    /// Check that a document loads and assembles without printing the tree.
    Validate {
        /// Path to the definition document (JSON).
        document: PathBuf,
        /// Assembly configuration overriding the built-in defaults (JSON).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the materials known to the kernel.
    Materials,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build {
            document,
            config,
            max_depth,
        } => commands::build::run(&document, config.as_deref(), max_depth),
        Commands::Validate { document, config } => {
            commands::validate::run(&document, config.as_deref())
        }
        Commands::Materials => {
            commands::materials::run();
            Ok(())
        }
    }
}
