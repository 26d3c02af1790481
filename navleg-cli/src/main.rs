//! navleg CLI - inspect and fly flight plan legs.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use navleg::config::{parse_log_level, ConfigFile};
use tracing::warn;

use commands::config::ConfigCommands;
use commands::fly::FlyArgs;
use commands::show::ShowArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "navleg", author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides logging.level
    #[arg(long, global = true, value_name = "LEVEL", value_parser = log_level_arg)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build every leg of a route and print its waypoints
    Show {
        /// Route string, e.g. "DVC.GRNPA1.KLAS25L..BTY"
        route: String,

        /// Navigation data file (defaults to navdata.path)
        #[arg(long, value_name = "FILE")]
        navdata: Option<PathBuf>,
    },

    /// Build a single leg and fly it
    Fly {
        /// Route segment, e.g. "KLAS07R.BOACH6.HEC"
        segment: String,

        /// Navigation data file (defaults to navdata.path)
        #[arg(long, value_name = "FILE")]
        navdata: Option<PathBuf>,

        /// Re-derive a SID for this departure runway
        #[arg(long, value_name = "RWY")]
        departure_runway: Option<String>,

        /// Re-derive a STAR for this arrival runway
        #[arg(long, value_name = "RWY")]
        arrival_runway: Option<String>,

        /// Go direct to this fix
        #[arg(long, value_name = "FIX")]
        skip_to: Option<String>,

        /// Sequence this many waypoints
        #[arg(long, value_name = "N", default_value_t = 0)]
        advance: usize,

        /// Mark every remaining waypoint as passed
        #[arg(long)]
        skip_all: bool,
    },

    /// List the procedures in the navigation data file
    Procedures {
        /// Navigation data file (defaults to navdata.path)
        #[arg(long, value_name = "FILE")]
        navdata: Option<PathBuf>,
    },

    /// View and modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// `--log-level` follows the same rule as `logging.level` in the config file.
fn log_level_arg(value: &str) -> Result<String, String> {
    parse_log_level(value).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let (config, config_problem) = match ConfigFile::load() {
        Ok(config) => (config, None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    logging::init(&level);

    if let Some(e) = config_problem {
        warn!(error = %e, "Falling back to default configuration");
    }

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        Commands::Show { route, navdata } => commands::show::run(ShowArgs { route, navdata }, config),
        Commands::Fly {
            segment,
            navdata,
            departure_runway,
            arrival_runway,
            skip_to,
            advance,
            skip_all,
        } => commands::fly::run(
            FlyArgs {
                segment,
                navdata,
                departure_runway,
                arrival_runway,
                skip_to,
                advance,
                skip_all,
            },
            config,
        ),
        Commands::Procedures { navdata } => commands::procedures::run(navdata, config),
        Commands::Config(command) => commands::config::run(command),
    }
}
