//! Navigation resolver interfaces.
//!
//! Legs never own navigation data. They ask a [`NavigationResolver`] for the
//! procedure or airway named in their route string and hold the returned shared
//! handle for as long as the leg lives. The definitions themselves belong to
//! the resolver's long-lived data set and are never mutated by a leg.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::waypoint::Waypoint;

/// Whether a procedure is a departure or an arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcedureKind {
    /// Standard instrument departure. Entries are runway tokens.
    Sid,
    /// Standard terminal arrival. Exits are runway tokens.
    Star,
}

impl ProcedureKind {
    /// Parse a data-file kind string (`sid` or `star`, case-insensitive).
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sid" => Some(ProcedureKind::Sid),
            "star" => Some(ProcedureKind::Star),
            _ => None,
        }
    }
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcedureKind::Sid => write!(f, "SID"),
            ProcedureKind::Star => write!(f, "STAR"),
        }
    }
}

/// Errors a procedure reports when asked to expand an entry/exit pair.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The procedure has no entry transition with this name.
    #[error("Procedure {procedure} has no entry '{entry}'")]
    UnknownEntry { procedure: String, entry: String },

    /// The procedure has no exit transition with this name.
    #[error("Procedure {procedure} has no exit '{exit}'")]
    UnknownExit { procedure: String, exit: String },
}

/// A published SID or STAR as seen by a leg.
///
/// Fix sequencing and transitions are entirely the procedure's business; the
/// leg treats [`expand`](ProcedureDefinition::expand) as opaque.
pub trait ProcedureDefinition: fmt::Debug {
    /// Waypoint type produced by expansion.
    type Waypoint: Waypoint;

    /// Procedure identifier, e.g. `GRNPA1`.
    fn name(&self) -> &str;

    /// Departure or arrival.
    fn kind(&self) -> ProcedureKind;

    /// Whether `name` is a valid entry point.
    fn has_entry(&self, name: &str) -> bool;

    /// Whether `name` is a valid exit point.
    fn has_exit(&self, name: &str) -> bool;

    /// Ordered waypoints for flying the procedure from `entry` to `exit`.
    fn expand(&self, entry: &str, exit: &str) -> Result<Vec<Self::Waypoint>, ExpansionError>;
}

/// An airway: a named, ordered chain of fixes.
///
/// Airway legs are reserved. Definitions are resolved and held by procedure
/// legs but no leg expands them yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirwayDefinition {
    /// Airway identifier, e.g. `J5`.
    pub name: String,
    /// Fix names in published order.
    pub fixes: Vec<String>,
}

impl AirwayDefinition {
    /// Create an airway definition. Names are normalized to upper-case.
    pub fn new<I, S>(name: &str, fixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.trim().to_uppercase(),
            fixes: fixes
                .into_iter()
                .map(|fix| fix.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    /// Whether the airway passes through `fix`.
    pub fn has_fix(&self, fix: &str) -> bool {
        self.fixes.iter().any(|f| f.eq_ignore_ascii_case(fix))
    }
}

/// Looks up procedure and airway definitions by name.
pub trait NavigationResolver {
    /// Procedure definition type served by this resolver.
    type Procedure: ProcedureDefinition;

    /// Find a SID or STAR by name.
    fn resolve_procedure(&self, name: &str) -> Option<Arc<Self::Procedure>>;

    /// Find an airway by name.
    fn resolve_airway(&self, name: &str) -> Option<Arc<AirwayDefinition>>;
}
