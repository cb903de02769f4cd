//! symcheck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "symcheck", version, about = "Symptom self-assessment quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive assessment session
    Run {
        /// Path to the quiz definition JSON
        #[arg(long)]
        definition: PathBuf,

        /// Write the result JSON here on completion
        #[arg(long)]
        output: Option<PathBuf>,

        /// Require Enter to advance even when the definition enables
        /// auto-advance
        #[arg(long)]
        no_auto_advance: bool,
    },

    /// Validate a quiz definition file
    Validate {
        /// Path to the quiz definition JSON
        #[arg(long)]
        definition: PathBuf,
    },

    /// Create a starter quiz definition
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symcheck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            definition,
            output,
            no_auto_advance,
        } => commands::run::execute(definition, output, no_auto_advance).await,
        Commands::Validate { definition } => commands::validate::execute(definition).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
