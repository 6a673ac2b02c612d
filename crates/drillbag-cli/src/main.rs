//! drillbag CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "drillbag", version, about = "No-repeat math practice sampler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a practice session
    Practice {
        /// Pool to draw from, as skill@difficulty
        #[arg(long)]
        pool: String,

        /// Number of items to fetch
        #[arg(long, default_value = "5")]
        count: u32,

        /// Prompt for answers and score the session
        #[arg(long)]
        quiz: bool,

        /// Print the solution and explanation under each item
        #[arg(long)]
        show_answers: bool,

        /// Use the built-in mock item bank regardless of config
        #[arg(long)]
        mock: bool,

        /// Write a JSON session report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show configured pools and sampler settings
    Pools {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate configuration and optionally probe the item service
    Check {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Issue one test request for this pool (skill@difficulty)
        #[arg(long)]
        probe: Option<String>,
    },

    /// Create a starter drillbag.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drillbag=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            pool,
            count,
            quiz,
            show_answers,
            mock,
            report,
            config,
        } => {
            commands::practice::execute(pool, count, quiz, show_answers, mock, report, config)
                .await
        }
        Commands::Pools { config } => commands::pools::execute(config),
        Commands::Check { config, probe } => commands::check::execute(config, probe).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
