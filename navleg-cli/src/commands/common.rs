//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use navleg::config::ConfigFile;
use navleg::{Leg, NavData, NavWaypoint};

use crate::error::CliError;

/// Resolve the navigation data file from CLI args and config.
pub fn resolve_navdata_path(
    cli_path: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<PathBuf, CliError> {
    // CLI takes precedence, then config
    cli_path
        .or_else(|| config.navdata.path.clone())
        .ok_or_else(|| {
            CliError::Config(
                "No navigation data file. \
                 Set navdata.path with 'navleg config set' or use --navdata"
                    .to_string(),
            )
        })
}

/// Load navigation data from the resolved file.
pub fn load_navdata(cli_path: Option<PathBuf>, config: &ConfigFile) -> Result<NavData, CliError> {
    let path = resolve_navdata_path(cli_path, config)?;
    Ok(NavData::load(&path)?)
}

/// Human-readable altitude band, e.g. `8000ft - 21000ft`.
pub fn format_altitude_band(minimum: Option<u32>, maximum: Option<u32>) -> String {
    match (minimum, maximum) {
        (Some(min), Some(max)) => format!("{}ft - {}ft", min, max),
        (Some(min), None) => format!("at or above {}ft", min),
        (None, Some(max)) => format!("at or below {}ft", max),
        (None, None) => "unrestricted".to_string(),
    }
}

/// One-line summary of a leg's classification.
pub fn describe_leg(leg: &Leg) -> String {
    match leg.procedure_kind() {
        Some(kind) => format!("{} ({})", leg.route_string(), kind),
        None => match leg.leg_type() {
            Some(leg_type) => format!("{} ({})", leg.route_string(), leg_type),
            None => "(blank)".to_string(),
        },
    }
}

/// Print a numbered waypoint list under a heading.
pub fn print_waypoints(heading: &str, waypoints: &[NavWaypoint]) {
    println!("  {}:", heading);
    if waypoints.is_empty() {
        println!("    (none)");
    }
    for (index, waypoint) in waypoints.iter().enumerate() {
        println!("    {:>2}. {}", index + 1, waypoint);
    }
}
