//! navleg - Flight plan legs for air traffic simulation
//!
//! A leg is one contiguous segment of an aircraft's route: a direct fix or a
//! published procedure (SID/STAR) flown from an entry to an exit. This crate
//! parses route-string segments, expands them into waypoint sequences through a
//! navigation resolver, and tracks which waypoints have been flown as the
//! simulation advances.
//!
//! # Modules
//!
//! - [`route_string`] - route-string grammar and leg classification
//! - [`leg`] - the [`Leg`] entity and its progression state machine
//! - [`navigation`] - resolver and procedure interfaces consumed by legs
//! - [`waypoint`] - waypoint interface and the concrete [`NavWaypoint`]
//! - [`navdata`] - in-memory navigation data set loadable from INI files
//! - [`config`] - user configuration file
//!
//! # Example
//!
//! ```
//! use navleg::{Leg, NavData, Waypoint};
//!
//! let navdata = NavData::from_ini_str(
//!     "[procedure.GRNPA1]\n\
//!      kind = star\n\
//!      body = BETHL, HOLDM, KSINO@A120-\n\
//!      entry.DVC = DVC@A170+, BETHL\n\
//!      exit.KLAS25L = LARRE@A80\n",
//! )
//! .unwrap();
//!
//! let mut leg = Leg::new(&navdata, "dvc.grnpa1.klas25l").unwrap();
//! assert!(leg.is_star_leg());
//! assert_eq!(leg.current_waypoint().unwrap().name(), "DVC");
//!
//! leg.skip_to_waypoint_named("ksino").unwrap();
//! assert_eq!(leg.passed_waypoints().len(), 3);
//! assert_eq!(leg.minimum_procedure_altitude(), Some(8_000));
//! ```

pub mod config;
pub mod leg;
pub mod navdata;
pub mod navigation;
pub mod route_string;
pub mod waypoint;

pub use leg::{Leg, LegError, RunwayUpdate};
pub use navdata::{NavData, NavDataError, StandardProcedure};
pub use navigation::{
    AirwayDefinition, ExpansionError, NavigationResolver, ProcedureDefinition, ProcedureKind,
};
pub use route_string::{split_route, LegType, RouteSegment, ROUTE_DIVIDER};
pub use waypoint::{NavWaypoint, Waypoint};
