//! Re-deriving procedure legs when the assigned runway changes.
//!
//! SID entries and STAR exits name a runway by convention: the airport's
//! four-letter ICAO code followed by the runway designator (`KLAS25L`).
//! Changing runway means swapping the designator and re-expanding the
//! procedure for the new entry or exit.

use tracing::{debug, warn};

use super::{derive_waypoints, Leg, LegError};
use crate::navigation::{ProcedureDefinition, ProcedureKind};

/// Length of the airport ICAO prefix on runway tokens.
pub const AIRPORT_ICAO_LENGTH: usize = 4;

/// Outcome of a runway update.
///
/// Only [`RunwayUpdate::Applied`] changes the leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunwayUpdate {
    /// Upcoming waypoints were re-derived for the new runway.
    Applied,
    /// The leg isn't a procedure leg of the matching kind.
    NotApplicable,
    /// The procedure already uses this runway.
    AlreadyAssigned,
    /// The runway token is too short to carry an airport prefix.
    NoAirportPrefix,
    /// The runway name isn't a designator such as `25L`.
    InvalidRunway,
    /// The procedure has no variant for this runway.
    UnknownVariant,
    /// Waypoints of the leg have already been passed.
    LegInProgress,
}

impl RunwayUpdate {
    /// Whether the leg was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, RunwayUpdate::Applied)
    }
}

/// Airport ICAO code at the start of a runway token: `KLAS25L` → `KLAS`.
///
/// `None` if the token is shorter than an ICAO code.
pub fn extract_airport_prefix(token: &str) -> Option<&str> {
    token.get(..AIRPORT_ICAO_LENGTH)
}

/// Whether `runway` is a bare designator (`16R`, `09`) that can be appended to
/// an airport code without changing the shape of the route string.
pub fn is_runway_designator(runway: &str) -> bool {
    let runway = runway.trim();
    !runway.is_empty() && runway.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Runway token for `runway` at the airport of `token`: (`KLAS25L`, `19R`) → `KLAS19R`.
pub fn apply_runway_suffix(token: &str, runway: &str) -> Option<String> {
    extract_airport_prefix(token)
        .map(|airport| format!("{}{}", airport, runway.trim().to_uppercase()))
}

impl<P: ProcedureDefinition> Leg<P> {
    /// Re-derive a SID leg for a new departure runway.
    ///
    /// Has no effect on anything but a SID leg that hasn't been started and
    /// whose procedure publishes an entry for `runway`.
    pub fn update_for_departure_runway(&mut self, runway: &str) -> Result<RunwayUpdate, LegError> {
        self.update_for_runway(ProcedureKind::Sid, runway)
    }

    /// Re-derive a STAR leg for a new arrival runway.
    ///
    /// Has no effect on anything but a STAR leg that hasn't been started and
    /// whose procedure publishes an exit for `runway`.
    pub fn update_for_arrival_runway(&mut self, runway: &str) -> Result<RunwayUpdate, LegError> {
        self.update_for_runway(ProcedureKind::Star, runway)
    }

    /// The leg is only replaced once the new expansion has succeeded.
    fn update_for_runway(
        &mut self,
        kind: ProcedureKind,
        runway: &str,
    ) -> Result<RunwayUpdate, LegError> {
        let (Some(segment), Some(procedure)) = (&self.segment, &self.procedure) else {
            return Ok(RunwayUpdate::NotApplicable);
        };
        if procedure.kind() != kind {
            return Ok(RunwayUpdate::NotApplicable);
        }
        if !is_runway_designator(runway) {
            warn!(procedure = procedure.name(), runway, "Invalid runway designator, leg unchanged");
            return Ok(RunwayUpdate::InvalidRunway);
        }

        // SIDs depart from their entry, STARs arrive at their exit
        let current = match kind {
            ProcedureKind::Sid => segment.entry_or_fix(),
            ProcedureKind::Star => segment.exit().unwrap_or_default(),
        };

        let Some(candidate) = apply_runway_suffix(current, runway) else {
            return Ok(RunwayUpdate::NoAirportPrefix);
        };
        if candidate == current {
            return Ok(RunwayUpdate::AlreadyAssigned);
        }

        let available = match kind {
            ProcedureKind::Sid => procedure.has_entry(&candidate),
            ProcedureKind::Star => procedure.has_exit(&candidate),
        };
        if !available {
            warn!(
                procedure = procedure.name(),
                runway = %candidate,
                "Procedure has no variant for runway, leg unchanged"
            );
            return Ok(RunwayUpdate::UnknownVariant);
        }

        if !self.passed.is_empty() {
            warn!(
                procedure = procedure.name(),
                runway = %candidate,
                passed = self.passed.len(),
                "Runway changed after leg was started, leg unchanged"
            );
            return Ok(RunwayUpdate::LegInProgress);
        }

        let updated = match kind {
            ProcedureKind::Sid => segment.with_entry(&candidate),
            ProcedureKind::Star => segment.with_exit(&candidate),
        };
        let waypoints = derive_waypoints(&updated, self.procedure.as_deref())?;

        debug!(
            from = %segment,
            to = %updated,
            waypoints = waypoints.len(),
            "Leg re-derived for runway"
        );

        self.upcoming = waypoints;
        self.segment = Some(updated);
        Ok(RunwayUpdate::Applied)
    }
}
