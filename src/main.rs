use anyhow::Result;
use clap::{Parser, Subcommand};
use fxform::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the conversion form (default)
    Serve,
    /// Convert a single amount and print the result
    Convert {
        /// Amount to convert; a comma or a point may separate decimals
        amount: String,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. BRL
        to: String,
    },
}

impl From<Commands> for fxform::AppCommand {
    fn from(cmd: Commands) -> fxform::AppCommand {
        match cmd {
            Commands::Serve => fxform::AppCommand::Serve,
            Commands::Convert { amount, from, to } => {
                fxform::AppCommand::Convert { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxform::cli::setup::setup(),
        Some(cmd) => fxform::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => fxform::run_command(fxform::AppCommand::Serve, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
