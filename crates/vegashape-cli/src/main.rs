//! Vegashape CLI
//!
//! Command-line interface for checking Vega transaction JSON against its
//! schema-codec round trip.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "vegashape")]
#[command(about = "Check Vega transaction JSON against its codec round trip")]
#[command(version = vegashape_core::VERSION)]
#[command(
    long_about = "Vegashape normalizes the output of a schema-codec round trip\n\
(envelope unwrapping plus empty-value pruning) and compares it against the\n\
input document, highlighting keys the codec would drop or default.\n\
\n\
Examples:\n  \
vegashape check tx.json              # Round-trip check a transaction\n  \
vegashape normalize tx.json          # Print the normalized shape\n  \
vegashape emit tx.json -w main -k A  # Emit a wallet send command"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Round-trip a transaction and report the structural delta
    Check {
        /// Transaction JSON file
        file: PathBuf,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },
    /// Apply the envelope-unwrap rules and pruning, print the result
    Normalize {
        /// Transaction JSON file
        file: PathBuf,

        /// Compact JSON output
        #[arg(long)]
        compact: bool,
    },
    /// Format a transaction for a wallet front end
    Emit {
        /// Transaction JSON file
        file: PathBuf,

        /// Wallet name to embed in the command
        #[arg(short, long)]
        wallet: String,

        /// Public key to embed in the command
        #[arg(short = 'k', long)]
        pubkey: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: EmitFormat,
    },
}

/// Output format selector for `emit`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EmitFormat {
    Json,
    JsonPretty,
    Unix,
    Windows,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    if verbose == 0 {
        return vegashape_core::init_tracing();
    }
    let default = match verbose {
        1 => "vegashape=debug",
        _ => "vegashape=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Check { file, compact } => commands::check_command(&file, compact).await,
        Commands::Normalize { file, compact } => commands::normalize_command(&file, compact),
        Commands::Emit {
            file,
            wallet,
            pubkey,
            format,
        } => commands::emit_command(&file, &wallet, &pubkey, format),
    };

    match outcome {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
