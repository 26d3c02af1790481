//! Published SID/STAR definitions.

use std::collections::BTreeMap;

use crate::navigation::{ExpansionError, ProcedureDefinition, ProcedureKind};
use crate::waypoint::{NavWaypoint, Waypoint};

/// A SID or STAR made of entry transitions, a common body and exit transitions.
///
/// Flying the procedure from entry `E` to exit `X` means flying transition
/// `E`, then the body, then transition `X`. SID entries and STAR exits are
/// runway tokens such as `KLAS25L`.
///
/// # Example
///
/// ```
/// use navleg::{NavWaypoint, ProcedureDefinition, ProcedureKind, StandardProcedure, Waypoint};
///
/// let star = StandardProcedure::new("GRNPA1", ProcedureKind::Star)
///     .with_entry("DVC", vec![NavWaypoint::new("DVC"), NavWaypoint::new("BETHL")])
///     .with_body(vec![NavWaypoint::new("BETHL"), NavWaypoint::new("HOLDM")])
///     .with_exit("KLAS25L", vec![NavWaypoint::new("LARRE")]);
///
/// let names: Vec<String> = star
///     .expand("DVC", "KLAS25L")
///     .unwrap()
///     .iter()
///     .map(|w| w.name().to_string())
///     .collect();
/// assert_eq!(names, vec!["DVC", "BETHL", "HOLDM", "LARRE"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardProcedure {
    name: String,
    kind: ProcedureKind,
    entries: BTreeMap<String, Vec<NavWaypoint>>,
    body: Vec<NavWaypoint>,
    exits: BTreeMap<String, Vec<NavWaypoint>>,
}

impl StandardProcedure {
    /// Create a procedure with no transitions. The name is normalized to upper-case.
    pub fn new(name: &str, kind: ProcedureKind) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            kind,
            entries: BTreeMap::new(),
            body: Vec::new(),
            exits: BTreeMap::new(),
        }
    }

    /// Set the fixes common to every entry/exit pair.
    pub fn with_body(mut self, body: Vec<NavWaypoint>) -> Self {
        self.body = body;
        self
    }

    /// Add (or replace) an entry transition.
    pub fn with_entry(mut self, name: &str, fixes: Vec<NavWaypoint>) -> Self {
        self.entries.insert(name.trim().to_uppercase(), fixes);
        self
    }

    /// Add (or replace) an exit transition.
    pub fn with_exit(mut self, name: &str, fixes: Vec<NavWaypoint>) -> Self {
        self.exits.insert(name.trim().to_uppercase(), fixes);
        self
    }

    /// Fixes common to every entry/exit pair.
    pub fn body(&self) -> &[NavWaypoint] {
        &self.body
    }

    /// Entry names in sorted order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exit names in sorted order.
    pub fn exit_names(&self) -> impl Iterator<Item = &str> {
        self.exits.keys().map(String::as_str)
    }
}

fn transition<'a>(
    transitions: &'a BTreeMap<String, Vec<NavWaypoint>>,
    name: &str,
) -> Option<&'a [NavWaypoint]> {
    transitions
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|(_, fixes)| fixes.as_slice())
}

impl ProcedureDefinition for StandardProcedure {
    type Waypoint = NavWaypoint;

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ProcedureKind {
        self.kind
    }

    fn has_entry(&self, name: &str) -> bool {
        transition(&self.entries, name).is_some()
    }

    fn has_exit(&self, name: &str) -> bool {
        transition(&self.exits, name).is_some()
    }

    /// Concatenate entry transition, body and exit transition.
    ///
    /// A fix that ends one part and starts the next is flown once; restrictions
    /// missing on the first occurrence are taken from the second.
    fn expand(&self, entry: &str, exit: &str) -> Result<Vec<NavWaypoint>, ExpansionError> {
        let entry_fixes =
            transition(&self.entries, entry).ok_or_else(|| ExpansionError::UnknownEntry {
                procedure: self.name.clone(),
                entry: entry.to_uppercase(),
            })?;
        let exit_fixes =
            transition(&self.exits, exit).ok_or_else(|| ExpansionError::UnknownExit {
                procedure: self.name.clone(),
                exit: exit.to_uppercase(),
            })?;

        let mut waypoints: Vec<NavWaypoint> =
            Vec::with_capacity(entry_fixes.len() + self.body.len() + exit_fixes.len());

        for fix in entry_fixes.iter().chain(&self.body).chain(exit_fixes) {
            match waypoints.last_mut() {
                Some(last) if last.name() == fix.name() => last.absorb_restrictions(fix),
                _ => waypoints.push(fix.clone()),
            }
        }

        Ok(waypoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(waypoints: &[NavWaypoint]) -> Vec<&str> {
        waypoints.iter().map(|w| w.name()).collect()
    }

    fn boach6() -> StandardProcedure {
        StandardProcedure::new("boach6", ProcedureKind::Sid)
            .with_entry("KLAS07R", vec![NavWaypoint::new("JAKER")])
            .with_entry("KLAS25L", vec![NavWaypoint::new("PRINO")])
            .with_body(vec![
                NavWaypoint::new("BOACH").with_minimum(7_000),
                NavWaypoint::new("ZELMA"),
            ])
            .with_exit("HEC", vec![NavWaypoint::new("HEC")])
            .with_exit("TNP", vec![NavWaypoint::new("JOTNU"), NavWaypoint::new("TNP")])
    }

    #[test]
    fn test_accessors() {
        let sid = boach6();
        assert_eq!(sid.name(), "BOACH6");
        assert_eq!(sid.kind(), ProcedureKind::Sid);
        assert_eq!(sid.entry_names().collect::<Vec<_>>(), vec!["KLAS07R", "KLAS25L"]);
        assert_eq!(sid.exit_names().collect::<Vec<_>>(), vec!["HEC", "TNP"]);
        assert_eq!(sid.body().len(), 2);
    }

    #[test]
    fn test_has_entry_and_exit_ignore_case() {
        let sid = boach6();
        assert!(sid.has_entry("klas07r"));
        assert!(!sid.has_entry("KLAS19L"));
        assert!(sid.has_exit("tnp"));
        assert!(!sid.has_exit("BTY"));
    }

    #[test]
    fn test_expand_concatenates_parts() {
        let waypoints = boach6().expand("KLAS25L", "TNP").unwrap();
        assert_eq!(names(&waypoints), vec!["PRINO", "BOACH", "ZELMA", "JOTNU", "TNP"]);
        assert_eq!(waypoints[1].altitude_minimum(), Some(7_000));
    }

    #[test]
    fn test_expand_collapses_junction_fix() {
        let star = StandardProcedure::new("GRNPA1", ProcedureKind::Star)
            .with_entry(
                "DVC",
                vec![NavWaypoint::new("DVC"), NavWaypoint::new("BETHL")],
            )
            .with_body(vec![
                NavWaypoint::new("BETHL").with_maximum(21_000),
                NavWaypoint::new("HOLDM"),
            ])
            .with_exit("KLAS25L", vec![]);

        let waypoints = star.expand("DVC", "KLAS25L").unwrap();
        assert_eq!(names(&waypoints), vec!["DVC", "BETHL", "HOLDM"]);
        assert_eq!(waypoints[1].altitude_maximum(), Some(21_000));
    }

    #[test]
    fn test_expand_unknown_entry() {
        let result = boach6().expand("KLAS19L", "HEC");
        assert_eq!(
            result,
            Err(ExpansionError::UnknownEntry {
                procedure: "BOACH6".to_string(),
                entry: "KLAS19L".to_string(),
            })
        );
    }

    #[test]
    fn test_expand_unknown_exit() {
        let result = boach6().expand("KLAS07R", "bty");
        assert_eq!(
            result,
            Err(ExpansionError::UnknownExit {
                procedure: "BOACH6".to_string(),
                exit: "BTY".to_string(),
            })
        );
    }
}
