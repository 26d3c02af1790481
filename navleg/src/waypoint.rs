//! Waypoints flown along a leg.
//!
//! The leg only needs a narrow view of a waypoint: its identity, its altitude
//! restrictions and a lifecycle hook called when the waypoint is retired. That
//! view is the [`Waypoint`] trait. [`NavWaypoint`] is the concrete waypoint used
//! by the bundled navigation data set.
//!
//! # Fix Spec Format
//!
//! Navigation data files describe waypoints as compact fix specs:
//! `{name}[@{restriction}[|{restriction}]]`
//!
//! - `BETHL` - no restrictions
//! - `KSINO@A120-` - at or below 12,000 ft
//! - `DVC@A170+` - at or above 17,000 ft
//! - `LARRE@A80` - at exactly 8,000 ft
//! - `CLARR@A80+|A110-` - between 8,000 and 11,000 ft
//!
//! Altitudes are written in hundreds of feet and stored in feet.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Interface the leg requires from a waypoint.
///
/// Altitude restrictions are in feet; `None` means the waypoint carries no
/// restriction of that kind.
pub trait Waypoint: fmt::Debug {
    /// Build an unrestricted waypoint for a bare fix name.
    fn from_fix_name(name: &str) -> Self
    where
        Self: Sized;

    /// Upper-case fix identifier.
    fn name(&self) -> &str;

    /// Lowest altitude the waypoint may be crossed at.
    fn altitude_minimum(&self) -> Option<u32>;

    /// Highest altitude the waypoint may be crossed at.
    fn altitude_maximum(&self) -> Option<u32>;

    /// Lifecycle hook called once when the owning leg retires the waypoint.
    fn reset(&mut self);
}

/// Errors that can occur while parsing a fix spec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixSpecError {
    /// The fix name is empty or contains characters other than letters and digits.
    #[error("Invalid fix name: '{0}'")]
    InvalidName(String),

    /// A restriction doesn't match `A{hundreds}[+|-]`.
    #[error("Invalid altitude restriction '{restriction}' on fix {fix}")]
    InvalidRestriction { fix: String, restriction: String },
}

/// A navigational fix with optional altitude restrictions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavWaypoint {
    name: String,
    altitude_minimum: Option<u32>,
    altitude_maximum: Option<u32>,
}

impl NavWaypoint {
    /// Create an unrestricted waypoint. The name is normalized to upper-case.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            altitude_minimum: None,
            altitude_maximum: None,
        }
    }

    /// Set the at-or-above restriction, in feet.
    pub fn with_minimum(mut self, feet: u32) -> Self {
        self.altitude_minimum = Some(feet);
        self
    }

    /// Set the at-or-below restriction, in feet.
    pub fn with_maximum(mut self, feet: u32) -> Self {
        self.altitude_maximum = Some(feet);
        self
    }

    /// Fill restrictions this waypoint lacks from another occurrence of the same fix.
    pub(crate) fn absorb_restrictions(&mut self, other: &NavWaypoint) {
        self.altitude_minimum = self.altitude_minimum.or(other.altitude_minimum);
        self.altitude_maximum = self.altitude_maximum.or(other.altitude_maximum);
    }

    /// Parse a fix spec such as `KSINO@A120-`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navleg::{NavWaypoint, Waypoint};
    ///
    /// let waypoint = NavWaypoint::from_fix_spec("clarr@A80+|A110-").unwrap();
    /// assert_eq!(waypoint.name(), "CLARR");
    /// assert_eq!(waypoint.altitude_minimum(), Some(8_000));
    /// assert_eq!(waypoint.altitude_maximum(), Some(11_000));
    /// ```
    pub fn from_fix_spec(spec: &str) -> Result<Self, FixSpecError> {
        let (name, restrictions) = match spec.trim().split_once('@') {
            Some((name, restrictions)) => (name, Some(restrictions)),
            None => (spec.trim(), None),
        };

        if !fix_name_pattern().is_match(name) {
            return Err(FixSpecError::InvalidName(name.to_string()));
        }

        let mut waypoint = Self::new(name);

        for restriction in restrictions.into_iter().flat_map(|r| r.split('|')) {
            let invalid = || FixSpecError::InvalidRestriction {
                fix: waypoint.name.clone(),
                restriction: restriction.to_string(),
            };

            let captures = restriction_pattern()
                .captures(restriction.trim())
                .ok_or_else(invalid)?;
            let hundreds: u32 = captures[1].parse().map_err(|_| invalid())?;
            let feet = hundreds * 100;

            match &captures[2] {
                "+" => waypoint.altitude_minimum = Some(feet),
                "-" => waypoint.altitude_maximum = Some(feet),
                _ => {
                    waypoint.altitude_minimum = Some(feet);
                    waypoint.altitude_maximum = Some(feet);
                }
            }
        }

        Ok(waypoint)
    }
}

impl Waypoint for NavWaypoint {
    fn from_fix_name(name: &str) -> Self {
        Self::new(name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn altitude_minimum(&self) -> Option<u32> {
        self.altitude_minimum
    }

    fn altitude_maximum(&self) -> Option<u32> {
        self.altitude_maximum
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for NavWaypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (self.altitude_minimum, self.altitude_maximum) {
            (Some(min), Some(max)) if min == max => write!(f, " @{}ft", min),
            (Some(min), Some(max)) => write!(f, " @{}ft..{}ft", min, max),
            (Some(min), None) => write!(f, " @{}ft+", min),
            (None, Some(max)) => write!(f, " @{}ft-", max),
            (None, None) => Ok(()),
        }
    }
}

fn fix_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{1,12}$").expect("valid fix name regex"))
}

/// `A{hundreds of feet}` followed by an optional `+` (at or above) or `-` (at or below).
fn restriction_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[Aa](\d{1,3})([+-]?)$").expect("valid restriction regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_name() {
        let waypoint = NavWaypoint::new(" bethl ");
        assert_eq!(waypoint.name(), "BETHL");
        assert_eq!(waypoint.altitude_minimum(), None);
        assert_eq!(waypoint.altitude_maximum(), None);
    }

    #[test]
    fn test_from_fix_name_matches_new() {
        assert_eq!(NavWaypoint::from_fix_name("dvc"), NavWaypoint::new("DVC"));
    }

    // ========================================================================
    // Fix spec parsing
    // ========================================================================

    #[test]
    fn test_parse_bare_fix() {
        let waypoint = NavWaypoint::from_fix_spec("HOLDM").unwrap();
        assert_eq!(waypoint, NavWaypoint::new("HOLDM"));
    }

    #[test]
    fn test_parse_at_or_above() {
        let waypoint = NavWaypoint::from_fix_spec("DVC@A170+").unwrap();
        assert_eq!(waypoint.altitude_minimum(), Some(17_000));
        assert_eq!(waypoint.altitude_maximum(), None);
    }

    #[test]
    fn test_parse_at_or_below() {
        let waypoint = NavWaypoint::from_fix_spec("KSINO@A120-").unwrap();
        assert_eq!(waypoint.altitude_minimum(), None);
        assert_eq!(waypoint.altitude_maximum(), Some(12_000));
    }

    #[test]
    fn test_parse_hard_altitude_sets_both_bounds() {
        let waypoint = NavWaypoint::from_fix_spec("LARRE@A80").unwrap();
        assert_eq!(waypoint.altitude_minimum(), Some(8_000));
        assert_eq!(waypoint.altitude_maximum(), Some(8_000));
    }

    #[test]
    fn test_parse_window() {
        let waypoint = NavWaypoint::from_fix_spec("CLARR@A80+|A110-").unwrap();
        assert_eq!(waypoint.altitude_minimum(), Some(8_000));
        assert_eq!(waypoint.altitude_maximum(), Some(11_000));
    }

    #[test]
    fn test_parse_rejects_bad_name() {
        assert!(matches!(
            NavWaypoint::from_fix_spec("BAD-FIX"),
            Err(FixSpecError::InvalidName(_))
        ));
        assert!(matches!(
            NavWaypoint::from_fix_spec(""),
            Err(FixSpecError::InvalidName(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_restriction() {
        let result = NavWaypoint::from_fix_spec("DVC@S250");
        assert_eq!(
            result,
            Err(FixSpecError::InvalidRestriction {
                fix: "DVC".to_string(),
                restriction: "S250".to_string(),
            })
        );
    }

    // ========================================================================
    // Lifecycle and display
    // ========================================================================

    #[test]
    fn test_reset_clears_everything() {
        let mut waypoint = NavWaypoint::new("DVC").with_minimum(17_000);
        waypoint.reset();
        assert_eq!(waypoint, NavWaypoint::default());
    }

    #[test]
    fn test_display() {
        assert_eq!(NavWaypoint::new("BETHL").to_string(), "BETHL");
        assert_eq!(
            NavWaypoint::new("LARRE").with_minimum(8_000).with_maximum(8_000).to_string(),
            "LARRE @8000ft"
        );
        assert_eq!(
            NavWaypoint::new("DVC").with_minimum(17_000).to_string(),
            "DVC @17000ft+"
        );
        assert_eq!(
            NavWaypoint::new("KSINO").with_maximum(12_000).to_string(),
            "KSINO @12000ft-"
        );
    }
}
