//! Route-string grammar for a single leg.
//!
//! A leg is written as one segment of a route string:
//! `{token}[.{token}.{token}]`
//!
//! - `DVC` - direct to the fix DVC
//! - `DVC.GRNPA1.KLAS25L` - the GRNPA1 arrival from DVC to runway 25L at KLAS
//! - `KLAS07R.BOACH6.HEC` - the BOACH6 departure from runway 07R at KLAS to HEC
//!
//! Full routes join segments with a double divider (`DVC..J92..BTY`). Splitting
//! a full route is the caller's job ([`split_route`]); a segment that still
//! contains a double divider is rejected.

use std::fmt;

use crate::leg::LegError;

/// Separates the tokens of one leg segment.
pub const ROUTE_DIVIDER: char = '.';

/// Separates the legs of a full route.
pub const SEGMENT_DIVIDER: &str = "..";

/// Classification of a leg, fixed when the leg is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegType {
    /// Direct to a single fix.
    Direct,
    /// A SID or STAR flown from an entry to an exit.
    Procedure,
    /// An airway segment. Reserved: no leg is classified as an airway yet.
    Airway,
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegType::Direct => write!(f, "direct"),
            LegType::Procedure => write!(f, "procedure"),
            LegType::Airway => write!(f, "airway"),
        }
    }
}

/// A parsed, upper-cased leg segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSegment {
    /// `FIX`
    Direct { fix: String },
    /// `ENTRY.NAME.EXIT`, where NAME is a procedure (or, eventually, an airway).
    Procedure {
        entry: String,
        name: String,
        exit: String,
    },
}

impl RouteSegment {
    /// Parse one leg segment.
    ///
    /// # Errors
    ///
    /// - [`LegError::EmptyRoute`] if the segment is blank
    /// - [`LegError::DoubleDivider`] if the segment holds more than one leg
    /// - [`LegError::InvalidTokenCount`] unless there are exactly 1 or 3 tokens
    /// - [`LegError::EmptyToken`] if any token is blank
    ///
    /// # Examples
    ///
    /// ```
    /// use navleg::{LegType, RouteSegment};
    ///
    /// let segment = RouteSegment::parse("dvc.grnpa1.klas25l").unwrap();
    /// assert_eq!(segment.leg_type(), LegType::Procedure);
    /// assert_eq!(segment.to_string(), "DVC.GRNPA1.KLAS25L");
    ///
    /// assert!(RouteSegment::parse("DVC..J92").is_err());
    /// ```
    pub fn parse(segment: &str) -> Result<Self, LegError> {
        let route = segment.trim().to_uppercase();

        if route.is_empty() {
            return Err(LegError::EmptyRoute);
        }

        if route.contains(SEGMENT_DIVIDER) {
            return Err(LegError::DoubleDivider { route });
        }

        let tokens: Vec<&str> = route.split(ROUTE_DIVIDER).map(str::trim).collect();

        if tokens.iter().any(|token| token.is_empty()) {
            return Err(LegError::EmptyToken { route: route.clone() });
        }

        match tokens.as_slice() {
            [fix] => Ok(RouteSegment::Direct {
                fix: fix.to_string(),
            }),
            [entry, name, exit] => Ok(RouteSegment::Procedure {
                entry: entry.to_string(),
                name: name.to_string(),
                exit: exit.to_string(),
            }),
            _ => Err(LegError::InvalidTokenCount {
                count: tokens.len(),
                route: route.clone(),
            }),
        }
    }

    /// Classify the segment.
    ///
    /// Segments without a divider are direct legs. Every divided segment is a
    /// procedure leg: airway names are not told apart from procedure names
    /// until airway legs can be expanded.
    pub fn leg_type(&self) -> LegType {
        match self {
            RouteSegment::Direct { .. } => LegType::Direct,
            RouteSegment::Procedure { .. } => LegType::Procedure,
        }
    }

    /// The direct fix, or the entry point of a procedure.
    pub fn entry_or_fix(&self) -> &str {
        match self {
            RouteSegment::Direct { fix } => fix,
            RouteSegment::Procedure { entry, .. } => entry,
        }
    }

    /// Procedure (or airway) name, if any.
    pub fn procedure_name(&self) -> Option<&str> {
        match self {
            RouteSegment::Direct { .. } => None,
            RouteSegment::Procedure { name, .. } => Some(name),
        }
    }

    /// Exit point, if any.
    pub fn exit(&self) -> Option<&str> {
        match self {
            RouteSegment::Direct { .. } => None,
            RouteSegment::Procedure { exit, .. } => Some(exit),
        }
    }

    /// Copy of this segment with a new procedure entry. Direct segments are returned unchanged.
    pub fn with_entry(&self, new_entry: &str) -> Self {
        match self {
            RouteSegment::Direct { .. } => self.clone(),
            RouteSegment::Procedure { name, exit, .. } => RouteSegment::Procedure {
                entry: new_entry.to_uppercase(),
                name: name.clone(),
                exit: exit.clone(),
            },
        }
    }

    /// Copy of this segment with a new procedure exit. Direct segments are returned unchanged.
    pub fn with_exit(&self, new_exit: &str) -> Self {
        match self {
            RouteSegment::Direct { .. } => self.clone(),
            RouteSegment::Procedure { entry, name, .. } => RouteSegment::Procedure {
                entry: entry.clone(),
                name: name.clone(),
                exit: new_exit.to_uppercase(),
            },
        }
    }
}

impl fmt::Display for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteSegment::Direct { fix } => write!(f, "{}", fix),
            RouteSegment::Procedure { entry, name, exit } => write!(
                f,
                "{}{}{}{}{}",
                entry, ROUTE_DIVIDER, name, ROUTE_DIVIDER, exit
            ),
        }
    }
}

impl std::str::FromStr for RouteSegment {
    type Err = LegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a full route into its leg segments.
///
/// Segments are trimmed but otherwise returned as written; each one is
/// validated when a leg is built from it.
///
/// # Examples
///
/// ```
/// use navleg::split_route;
///
/// let segments = split_route("KLAS07R.BOACH6.HEC..BTY..DVC.GRNPA1.KLAS25L").unwrap();
/// assert_eq!(segments, vec!["KLAS07R.BOACH6.HEC", "BTY", "DVC.GRNPA1.KLAS25L"]);
/// ```
pub fn split_route(route: &str) -> Result<Vec<&str>, LegError> {
    let trimmed = route.trim();
    if trimmed.is_empty() {
        return Err(LegError::EmptyRoute);
    }

    let segments: Vec<&str> = trimmed.split(SEGMENT_DIVIDER).map(str::trim).collect();

    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(LegError::EmptyToken {
            route: trimmed.to_uppercase(),
        });
    }

    Ok(segments)
}
