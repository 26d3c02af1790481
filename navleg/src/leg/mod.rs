//! Flight plan legs.
//!
//! A [`Leg`] is built from one route-string segment. It classifies itself,
//! resolves the named procedure, expands the segment into waypoints and then
//! tracks progression as the aircraft flies them.
//!
//! # Progression Model
//!
//! Waypoints live in two ordered lists:
//!
//! - **upcoming** - not yet reached, in fly order; the first one is current
//! - **passed** - flown or skipped, oldest first
//!
//! Waypoints only ever move from upcoming to passed. Passed followed by
//! upcoming always equals the leg's expansion at its last derivation.
//!
//! # Lifecycle
//!
//! ```text
//! Leg::default() ──init()──► in use ──reset()──► blank ──init()──► ...
//! ```
//!
//! Blank legs can be pooled and re-initialized by the owning route.

mod error;
mod progression;
mod runway;

pub use error::LegError;
pub use runway::{
    apply_runway_suffix, extract_airport_prefix, is_runway_designator, RunwayUpdate,
    AIRPORT_ICAO_LENGTH,
};

use std::sync::Arc;

use tracing::debug;

use crate::navdata::StandardProcedure;
use crate::navigation::{AirwayDefinition, NavigationResolver, ProcedureDefinition, ProcedureKind};
use crate::route_string::{LegType, RouteSegment};
use crate::waypoint::Waypoint;

/// One segment of an aircraft's route and its progression state.
///
/// Procedure and airway definitions are shared handles into the resolver's data
/// set; the leg never mutates them.
#[derive(Debug)]
pub struct Leg<P: ProcedureDefinition = StandardProcedure> {
    /// Parsed route segment; `None` while the leg is blank.
    segment: Option<RouteSegment>,
    /// Set only for procedure legs.
    procedure: Option<Arc<P>>,
    /// Resolved alongside the procedure but not used until airway legs exist.
    airway: Option<Arc<AirwayDefinition>>,
    /// Waypoints not yet reached, in fly order.
    upcoming: Vec<P::Waypoint>,
    /// Waypoints flown or skipped, oldest first.
    passed: Vec<P::Waypoint>,
}

impl<P: ProcedureDefinition> Default for Leg<P> {
    fn default() -> Self {
        Self {
            segment: None,
            procedure: None,
            airway: None,
            upcoming: Vec::new(),
            passed: Vec::new(),
        }
    }
}

impl<P: ProcedureDefinition> Leg<P> {
    /// Build a leg from one route-string segment.
    pub fn new<R>(resolver: &R, route: &str) -> Result<Self, LegError>
    where
        R: NavigationResolver<Procedure = P> + ?Sized,
    {
        let mut leg = Self::default();
        leg.init(resolver, route)?;
        Ok(leg)
    }

    /// Parse, classify and expand `route`, replacing this leg's state.
    ///
    /// On error the leg is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - structural errors from [`RouteSegment::parse`]
    /// - [`LegError::ProcedureNotFound`] if the resolver doesn't know the procedure
    /// - [`LegError::Expansion`] if the procedure rejects the entry/exit pair
    pub fn init<R>(&mut self, resolver: &R, route: &str) -> Result<(), LegError>
    where
        R: NavigationResolver<Procedure = P> + ?Sized,
    {
        let segment = RouteSegment::parse(route)?;

        let (procedure, airway) = match segment.procedure_name() {
            Some(name) => (resolver.resolve_procedure(name), resolver.resolve_airway(name)),
            None => (None, None),
        };

        let upcoming = derive_waypoints(&segment, procedure.as_deref())?;

        debug!(
            route = %segment,
            leg_type = %segment.leg_type(),
            waypoints = upcoming.len(),
            "Leg initialized"
        );

        *self = Self {
            segment: Some(segment),
            procedure,
            airway,
            upcoming,
            passed: Vec::new(),
        };

        Ok(())
    }

    /// Retire every waypoint and return the leg to a blank state.
    ///
    /// Remaining upcoming waypoints are skipped first, then each waypoint's
    /// [`Waypoint::reset`] hook runs exactly once.
    pub fn reset(&mut self) {
        self.skip_all_remaining();

        for waypoint in &mut self.passed {
            waypoint.reset();
        }

        debug!(
            route = %self.route_string(),
            retired = self.passed.len(),
            "Leg reset"
        );

        self.passed.clear();
        self.segment = None;
        self.procedure = None;
        self.airway = None;
    }

    /// Leg classification; `None` while blank.
    pub fn leg_type(&self) -> Option<LegType> {
        self.segment.as_ref().map(RouteSegment::leg_type)
    }

    pub fn is_direct_leg(&self) -> bool {
        self.leg_type() == Some(LegType::Direct)
    }

    pub fn is_procedure_leg(&self) -> bool {
        self.leg_type() == Some(LegType::Procedure)
    }

    pub fn is_airway_leg(&self) -> bool {
        self.leg_type() == Some(LegType::Airway)
    }

    /// Procedure leg flying a standard instrument departure.
    pub fn is_sid_leg(&self) -> bool {
        self.procedure_kind() == Some(ProcedureKind::Sid)
    }

    /// Procedure leg flying a standard terminal arrival.
    pub fn is_star_leg(&self) -> bool {
        self.procedure_kind() == Some(ProcedureKind::Star)
    }

    /// Canonical upper-case segment, e.g. `DVC.GRNPA1.KLAS25L`; empty while blank.
    pub fn route_string(&self) -> String {
        self.segment
            .as_ref()
            .map(RouteSegment::to_string)
            .unwrap_or_default()
    }

    /// Parsed segment; `None` while blank.
    pub fn segment(&self) -> Option<&RouteSegment> {
        self.segment.as_ref()
    }

    /// Resolved procedure for procedure legs.
    pub fn procedure(&self) -> Option<&P> {
        self.procedure.as_deref()
    }

    /// SID or STAR, for procedure legs.
    pub fn procedure_kind(&self) -> Option<ProcedureKind> {
        self.procedure.as_ref().map(|procedure| procedure.kind())
    }

    /// Airway sharing the procedure's name, if the resolver knows one.
    pub fn airway(&self) -> Option<&AirwayDefinition> {
        self.airway.as_deref()
    }

    /// Upcoming waypoints, current first.
    pub fn waypoints(&self) -> &[P::Waypoint] {
        &self.upcoming
    }

    /// Passed waypoints, oldest first.
    pub fn passed_waypoints(&self) -> &[P::Waypoint] {
        &self.passed
    }

    /// Lowest at-or-above restriction among upcoming waypoints of a procedure leg.
    ///
    /// Unrestricted waypoints are ignored; `None` for non-procedure legs or when
    /// no upcoming waypoint carries a minimum.
    pub fn minimum_procedure_altitude(&self) -> Option<u32> {
        if !self.is_procedure_leg() {
            return None;
        }

        self.upcoming
            .iter()
            .filter_map(|waypoint| waypoint.altitude_minimum())
            .min()
    }

    /// Highest at-or-below restriction among upcoming waypoints of a procedure leg.
    ///
    /// Unrestricted waypoints are ignored; `None` for non-procedure legs or when
    /// no upcoming waypoint carries a maximum.
    pub fn maximum_procedure_altitude(&self) -> Option<u32> {
        if !self.is_procedure_leg() {
            return None;
        }

        self.upcoming
            .iter()
            .filter_map(|waypoint| waypoint.altitude_maximum())
            .max()
    }
}

/// Expand a segment into its waypoints.
///
/// Pure: reads the segment and the resolved procedure, touches no leg state.
fn derive_waypoints<P: ProcedureDefinition>(
    segment: &RouteSegment,
    procedure: Option<&P>,
) -> Result<Vec<P::Waypoint>, LegError> {
    match segment.leg_type() {
        LegType::Direct => Ok(vec![P::Waypoint::from_fix_name(segment.entry_or_fix())]),
        LegType::Procedure => {
            let name = segment.procedure_name().unwrap_or_default();
            let procedure =
                procedure.ok_or_else(|| LegError::ProcedureNotFound(name.to_string()))?;
            let exit = segment.exit().unwrap_or_default();
            Ok(procedure.expand(segment.entry_or_fix(), exit)?)
        }
        LegType::Airway => Err(LegError::AirwayNotImplemented(
            segment.procedure_name().unwrap_or_default().to_string(),
        )),
    }
}
