//! Fly command - build one leg and apply progression and runway changes.

use std::path::PathBuf;

use navleg::config::ConfigFile;
use navleg::{Leg, RunwayUpdate, Waypoint};

use super::common::{describe_leg, format_altitude_band, load_navdata, print_waypoints};
use crate::error::CliError;

/// Arguments for the fly command.
pub struct FlyArgs {
    pub segment: String,
    pub navdata: Option<PathBuf>,
    pub departure_runway: Option<String>,
    pub arrival_runway: Option<String>,
    pub skip_to: Option<String>,
    pub advance: usize,
    pub skip_all: bool,
}

/// Run the fly command.
///
/// Changes are applied in a fixed order: runway assignments, skip-to,
/// advances, skip-all.
pub fn run(args: FlyArgs, config: &ConfigFile) -> Result<(), CliError> {
    let navdata = load_navdata(args.navdata, config)?;
    let mut leg = Leg::new(&navdata, &args.segment)?;

    println!("Leg: {}", describe_leg(&leg));

    if let Some(runway) = &args.departure_runway {
        let outcome = leg.update_for_departure_runway(runway)?;
        println!("Departure runway {}: {}", runway, describe_outcome(outcome));
    }

    if let Some(runway) = &args.arrival_runway {
        let outcome = leg.update_for_arrival_runway(runway)?;
        println!("Arrival runway {}: {}", runway, describe_outcome(outcome));
    }

    if let Some(fix) = &args.skip_to {
        if leg.skip_to_waypoint_named(fix)? {
            println!("Skipped to {}", fix.to_uppercase());
        } else {
            println!("{} is not an upcoming waypoint on this leg", fix.to_uppercase());
        }
    }

    for _ in 0..args.advance {
        if leg.is_complete() {
            println!("Leg complete, remaining advances ignored");
            break;
        }
        leg.advance()?;
    }

    if args.skip_all {
        leg.skip_all_remaining();
    }

    println!();
    println!("Leg: {}", describe_leg(&leg));
    print_waypoints("Passed", leg.passed_waypoints());
    print_waypoints("Upcoming", leg.waypoints());

    match leg.current_waypoint() {
        Ok(current) => println!(
            "  Current: {}{}",
            current.name(),
            if leg.has_next_waypoint() { "" } else { " (last)" }
        ),
        Err(_) => println!("  Current: (leg complete)"),
    }

    if leg.is_procedure_leg() {
        println!(
            "  Altitudes: {}",
            format_altitude_band(
                leg.minimum_procedure_altitude(),
                leg.maximum_procedure_altitude()
            )
        );
    }

    Ok(())
}

fn describe_outcome(outcome: RunwayUpdate) -> &'static str {
    match outcome {
        RunwayUpdate::Applied => "applied",
        RunwayUpdate::NotApplicable => "not applicable to this leg",
        RunwayUpdate::AlreadyAssigned => "already assigned",
        RunwayUpdate::NoAirportPrefix => "procedure token has no airport prefix",
        RunwayUpdate::InvalidRunway => "not a runway designator",
        RunwayUpdate::UnknownVariant => "procedure has no variant for this runway",
        RunwayUpdate::LegInProgress => "leg already in progress",
    }
}
