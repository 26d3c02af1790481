//! Waypoint progression: advancing and skipping along a leg.
//!
//! Called once per simulation tick per aircraft, so lookups scan the upcoming
//! list in place; ASCII names are compared without allocating.

use tracing::{debug, trace};

use super::{Leg, LegError};
use crate::navigation::ProcedureDefinition;
use crate::waypoint::Waypoint;

impl<P: ProcedureDefinition> Leg<P> {
    /// The waypoint being flown to.
    ///
    /// # Errors
    ///
    /// [`LegError::Exhausted`] if every waypoint has been passed; the owning
    /// route should have moved on to the next leg.
    pub fn current_waypoint(&self) -> Result<&P::Waypoint, LegError> {
        self.upcoming.first().ok_or(LegError::Exhausted)
    }

    /// Whether another waypoint follows the current one on this leg.
    pub fn has_next_waypoint(&self) -> bool {
        self.upcoming.len() > 1
    }

    /// Whether every waypoint has been passed.
    pub fn is_complete(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Whether an upcoming waypoint is named `name` (ignoring case).
    ///
    /// Passed waypoints don't count.
    pub fn contains_waypoint_named(&self, name: &str) -> bool {
        let name = name.trim();
        self.upcoming
            .iter()
            .any(|waypoint| same_fix(waypoint.name(), name))
    }

    /// Move the current waypoint to the passed list.
    ///
    /// # Errors
    ///
    /// [`LegError::Exhausted`] if there is no current waypoint.
    pub fn advance(&mut self) -> Result<(), LegError> {
        if self.upcoming.is_empty() {
            return Err(LegError::Exhausted);
        }

        let waypoint = self.upcoming.remove(0);
        trace!(waypoint = waypoint.name(), "Passed waypoint");
        self.passed.push(waypoint);
        Ok(())
    }

    /// Move every upcoming waypoint, in order, to the passed list.
    pub fn skip_all_remaining(&mut self) {
        self.passed.append(&mut self.upcoming);
    }

    /// Skip ahead so the first upcoming waypoint named `name` becomes current.
    ///
    /// Returns `Ok(false)`, leaving the leg untouched, if no upcoming waypoint
    /// has that name; a direct-to may target a fix on a later leg.
    ///
    /// # Errors
    ///
    /// [`LegError::MissingWaypointName`] if `name` is blank.
    pub fn skip_to_waypoint_named(&mut self, name: &str) -> Result<bool, LegError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LegError::MissingWaypointName);
        }

        let Some(index) = self
            .upcoming
            .iter()
            .position(|waypoint| same_fix(waypoint.name(), name))
        else {
            return Ok(false);
        };

        self.passed.extend(self.upcoming.drain(..index));
        debug!(waypoint = name, skipped = index, "Skipped to waypoint");
        Ok(true)
    }
}

/// Case-insensitive fix name comparison, upper-casing both sides.
///
/// Only names outside ASCII allocate.
fn same_fix(candidate: &str, query: &str) -> bool {
    if candidate.is_ascii() && query.is_ascii() {
        candidate.eq_ignore_ascii_case(query)
    } else {
        candidate.to_uppercase() == query.to_uppercase()
    }
}
