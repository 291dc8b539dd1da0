//! drill CLI: interactive problem generation and solution grading.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;
mod display;

#[derive(Parser)]
#[command(
    name = "drill",
    version,
    about = "Generate iOS/Swift interview problems and grade solutions with an LLM"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding history-progress/ and problems/ (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Omit to start the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter drill.toml and the data directory
    Init,

    /// Print every generated problem
    Review,

    /// Grade a solution file
    Evaluate {
        /// Path to the solution source
        #[arg(long)]
        solution: PathBuf,

        /// Problem statement file (defaults to the latest generated problem)
        #[arg(long)]
        problem: Option<PathBuf>,
    },

    /// Clear multi-part progress
    Reset,

    /// Show problem counts per difficulty tier
    Stats,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("drill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let data_dir = cli.data_dir.as_deref();

    let result = match cli.command {
        None => commands::menu::execute(config, data_dir).await,
        Some(Commands::Init) => commands::init::execute(data_dir),
        Some(Commands::Review) => commands::review::execute(config, data_dir),
        Some(Commands::Evaluate { solution, problem }) => {
            commands::evaluate::execute(config, data_dir, solution, problem).await
        }
        Some(Commands::Reset) => commands::reset::execute(config, data_dir),
        Some(Commands::Stats) => commands::stats::execute(config, data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
