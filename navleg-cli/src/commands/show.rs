//! Show command - build every leg of a route and print its waypoints.

use std::path::PathBuf;

use navleg::config::ConfigFile;
use navleg::{split_route, Leg};

use super::common::{describe_leg, format_altitude_band, load_navdata, print_waypoints};
use crate::error::CliError;

/// Arguments for the show command.
pub struct ShowArgs {
    pub route: String,
    pub navdata: Option<PathBuf>,
}

/// Run the show command.
pub fn run(args: ShowArgs, config: &ConfigFile) -> Result<(), CliError> {
    let navdata = load_navdata(args.navdata, config)?;
    let segments = split_route(&args.route)?;

    let legs = segments
        .iter()
        .map(|segment| Leg::new(&navdata, segment))
        .collect::<Result<Vec<Leg>, _>>()?;

    println!("Route: {} ({} legs)", args.route.trim().to_uppercase(), legs.len());

    for (index, leg) in legs.iter().enumerate() {
        println!();
        println!("Leg {}: {}", index + 1, describe_leg(leg));
        print_waypoints("Waypoints", leg.waypoints());

        if leg.is_procedure_leg() {
            println!(
                "  Altitudes: {}",
                format_altitude_band(
                    leg.minimum_procedure_altitude(),
                    leg.maximum_procedure_altitude()
                )
            );
        }
    }

    Ok(())
}
