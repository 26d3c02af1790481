//! Leg error types.

use thiserror::Error;

use crate::navigation::ExpansionError;

/// Errors raised while building or flying a leg.
///
/// Expected negative outcomes (skipping to a fix that isn't on the leg, a
/// runway change the procedure can't serve) are reported through return
/// values, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LegError {
    /// The route segment is blank.
    #[error("Route segment is empty")]
    EmptyRoute,

    /// The segment contains a double divider and must be split into legs first.
    #[error("Route segment '{route}' contains more than one leg")]
    DoubleDivider { route: String },

    /// The segment has a token count other than 1 or 3.
    #[error("Route segment '{route}' has {count} tokens (expected 1 or 3)")]
    InvalidTokenCount { route: String, count: usize },

    /// A divider is not surrounded by tokens.
    #[error("Route segment '{route}' contains an empty token")]
    EmptyToken { route: String },

    /// A waypoint lookup was given a blank name.
    #[error("Waypoint name is empty")]
    MissingWaypointName,

    /// The navigation resolver has no procedure with this name.
    #[error("Procedure not found: {0}")]
    ProcedureNotFound(String),

    /// The procedure rejected the entry/exit pair.
    #[error("Procedure expansion failed: {0}")]
    Expansion(#[from] ExpansionError),

    /// Airway legs are reserved and cannot be expanded yet.
    #[error("Airway legs are not implemented (airway {0})")]
    AirwayNotImplemented(String),

    /// The leg has no upcoming waypoints left.
    #[error("Leg has no upcoming waypoints")]
    Exhausted,
}

impl LegError {
    /// Malformed input: the route string or a lookup argument is invalid.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LegError::EmptyRoute
                | LegError::DoubleDivider { .. }
                | LegError::InvalidTokenCount { .. }
                | LegError::EmptyToken { .. }
                | LegError::MissingWaypointName
        )
    }

    /// The caller acted on a leg without checking that it was still in progress.
    pub fn is_precondition(&self) -> bool {
        matches!(self, LegError::Exhausted)
    }
}
