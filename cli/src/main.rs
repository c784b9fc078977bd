// voterroll - household trees and demographics for an extracted voter roll
//
// Every command prints JSON on stdout; logs go to stderr.

mod commands;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use household::FilterMode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use state::AppState;

#[derive(Parser)]
#[command(name = "voterroll")]
#[command(about = "Infer household family trees and demographics from a voter roll")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Analysis config (JSON); defaults apply to every missing field
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log resolution details per household
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Nested family forest of every household
    Households {
        /// Voter roll: a JSON array of rows or { "voters": [...] }
        roll: PathBuf,
    },

    /// Flattened voter list in presentation order
    #[command(after_help = "\
Filters: all, senior, youth, women, large_family, influencer

Examples:
  voterroll voters roll.json
  voterroll voters roll.json --filter influencer")]
    Voters {
        roll: PathBuf,

        #[arg(long, short = 'f', default_value = "all")]
        filter: FilterMode,
    },

    /// Households containing at least one voter matching the filter
    Families {
        roll: PathBuf,

        #[arg(long, short = 'f', default_value = "all")]
        filter: FilterMode,
    },

    /// Age, gender and surname breakdown
    Demographics {
        roll: PathBuf,

        /// Restrict to one household (raw house number)
        #[arg(long, value_name = "HOUSE")]
        household: Option<String>,
    },

    /// Headline counts, filter sizes and the resolution report
    Report { roll: PathBuf },

    /// Print the effective analysis config
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = state::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Config => commands::config::show_config(&config)?,
        Commands::Households { roll } => {
            commands::households::households(&AppState::load(&roll, config)?)?
        }
        Commands::Voters { roll, filter } => {
            commands::voters::voters(&AppState::load(&roll, config)?, filter)?
        }
        Commands::Families { roll, filter } => {
            commands::households::families(&AppState::load(&roll, config)?, filter)?
        }
        Commands::Demographics { roll, household } => commands::demographics::demographics(
            &AppState::load(&roll, config)?,
            household.as_deref(),
        )?,
        Commands::Report { roll } => commands::report::report(&AppState::load(&roll, config)?)?,
    };

    println!("{output}");
    Ok(())
}
