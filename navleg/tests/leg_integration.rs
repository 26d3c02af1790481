//! Integration tests for legs.
//!
//! These tests verify complete leg lifecycles including:
//! - Loading navigation data from disk and building legs from a full route
//! - Flying a route leg by leg with advance/skip
//! - Runway reassignment before and after departure
//! - Waypoint reset hooks when legs are pooled and reused
//!
//! Run with: `cargo test --test leg_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use navleg::{
    split_route, AirwayDefinition, ExpansionError, Leg, LegError, LegType, NavData,
    NavigationResolver, ProcedureDefinition, ProcedureKind, RunwayUpdate, Waypoint,
};

// ============================================================================
// Helper Functions
// ============================================================================

const LAS_NAVDATA: &str = "\
[procedure.BOACH6]
kind = sid
body = BOACH@A70+, ZELMA
entry.KLAS07R = JAKER@A50+
entry.KLAS25L = PRINO@A60+
exit.HEC = HEC@A190-
exit.TNP = JOTNU, TNP

[procedure.GRNPA1]
kind = star
body = BETHL@A210-, HOLDM@A190+, KSINO@A120-
entry.DVC = DVC@A170+, BETHL
entry.MLF = MLF, BETHL
exit.KLAS25L = LARRE@A80
exit.KLAS19R = SUNST@A90+

[airway.J92]
fixes = HEC, BTY, DVC
";

fn load_las_navdata() -> NavData {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("klas.ini");
    std::fs::write(&path, LAS_NAVDATA).unwrap();
    NavData::load(&path).unwrap()
}

fn names<W: Waypoint>(waypoints: &[W]) -> Vec<String> {
    waypoints.iter().map(|w| w.name().to_string()).collect()
}

/// Waypoint that counts how often its reset hook runs.
#[derive(Debug)]
struct CountingWaypoint {
    name: String,
    resets: Arc<AtomicUsize>,
}

impl Waypoint for CountingWaypoint {
    fn from_fix_name(name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            resets: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn altitude_minimum(&self) -> Option<u32> {
        None
    }

    fn altitude_maximum(&self) -> Option<u32> {
        None
    }

    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Procedure whose waypoints all report resets to one shared counter.
#[derive(Debug)]
struct CountingProcedure {
    fixes: Vec<&'static str>,
    resets: Arc<AtomicUsize>,
}

impl ProcedureDefinition for CountingProcedure {
    type Waypoint = CountingWaypoint;

    fn name(&self) -> &str {
        "COUNT1"
    }

    fn kind(&self) -> ProcedureKind {
        ProcedureKind::Star
    }

    fn has_entry(&self, name: &str) -> bool {
        name == "START"
    }

    fn has_exit(&self, name: &str) -> bool {
        name == "KTST01"
    }

    fn expand(&self, entry: &str, exit: &str) -> Result<Vec<CountingWaypoint>, ExpansionError> {
        if !self.has_entry(entry) {
            return Err(ExpansionError::UnknownEntry {
                procedure: self.name().to_string(),
                entry: entry.to_string(),
            });
        }
        if !self.has_exit(exit) {
            return Err(ExpansionError::UnknownExit {
                procedure: self.name().to_string(),
                exit: exit.to_string(),
            });
        }
        Ok(self
            .fixes
            .iter()
            .map(|fix| CountingWaypoint {
                name: fix.to_string(),
                resets: Arc::clone(&self.resets),
            })
            .collect())
    }
}

struct CountingResolver {
    procedure: Arc<CountingProcedure>,
}

impl NavigationResolver for CountingResolver {
    type Procedure = CountingProcedure;

    fn resolve_procedure(&self, name: &str) -> Option<Arc<CountingProcedure>> {
        (name == "COUNT1").then(|| Arc::clone(&self.procedure))
    }

    fn resolve_airway(&self, _name: &str) -> Option<Arc<AirwayDefinition>> {
        None
    }
}

fn counting_resolver(fixes: Vec<&'static str>) -> (CountingResolver, Arc<AtomicUsize>) {
    let resets = Arc::new(AtomicUsize::new(0));
    let resolver = CountingResolver {
        procedure: Arc::new(CountingProcedure {
            fixes,
            resets: Arc::clone(&resets),
        }),
    };
    (resolver, resets)
}

// ============================================================================
// Integration Tests
// ============================================================================

/// Build every leg of a full route and fly it start to finish, moving to the
/// next leg whenever the current one completes.
#[test]
fn test_fly_full_route() {
    let navdata = load_las_navdata();
    let route = "KLAS07R.BOACH6.HEC..BTY..DVC.GRNPA1.KLAS25L";

    let mut legs: Vec<Leg> = split_route(route)
        .unwrap()
        .into_iter()
        .map(|segment| Leg::new(&navdata, segment).unwrap())
        .collect();

    assert!(legs[0].is_sid_leg());
    assert!(legs[1].is_direct_leg());
    assert!(legs[2].is_star_leg());

    let mut flown = Vec::new();
    for leg in &mut legs {
        while let Ok(current) = leg.current_waypoint() {
            flown.push(current.name().to_string());
            leg.advance().unwrap();
        }
        assert!(leg.is_complete());
    }

    assert_eq!(
        flown,
        vec![
            "JAKER", "BOACH", "ZELMA", "HEC", "BTY", "DVC", "BETHL", "HOLDM", "KSINO", "LARRE"
        ]
    );
}

/// A direct-to a fix on a later leg: earlier legs report "not found" and are
/// skipped entirely, the target leg skips up to the fix.
#[test]
fn test_direct_to_fix_on_later_leg() {
    let navdata = load_las_navdata();
    let mut legs: Vec<Leg> = split_route("KLAS07R.BOACH6.HEC..DVC.GRNPA1.KLAS25L")
        .unwrap()
        .into_iter()
        .map(|segment| Leg::new(&navdata, segment).unwrap())
        .collect();

    let target = "ksino";
    for leg in &mut legs {
        if leg.contains_waypoint_named(target) {
            assert_eq!(leg.skip_to_waypoint_named(target), Ok(true));
            break;
        }
        assert_eq!(leg.skip_to_waypoint_named(target), Ok(false));
        leg.skip_all_remaining();
    }

    assert!(legs[0].is_complete());
    assert_eq!(names(legs[0].passed_waypoints()), vec!["JAKER", "BOACH", "ZELMA", "HEC"]);
    assert_eq!(legs[1].current_waypoint().unwrap().name(), "KSINO");
    assert_eq!(names(legs[1].passed_waypoints()), vec!["DVC", "BETHL", "HOLDM"]);
}

/// Runway changes are picked up before departure and refused once the
/// aircraft is flying the procedure.
#[test]
fn test_runway_change_lifecycle() {
    let navdata = load_las_navdata();
    let mut sid = Leg::new(&navdata, "KLAS07R.BOACH6.TNP").unwrap();

    assert_eq!(sid.update_for_departure_runway("25L"), Ok(RunwayUpdate::Applied));
    assert_eq!(sid.current_waypoint().unwrap().name(), "PRINO");
    assert_eq!(sid.minimum_procedure_altitude(), Some(6_000));
    assert_eq!(sid.maximum_procedure_altitude(), None);

    sid.advance().unwrap();
    assert_eq!(
        sid.update_for_departure_runway("07R"),
        Ok(RunwayUpdate::LegInProgress)
    );
    assert_eq!(sid.route_string(), "KLAS25L.BOACH6.TNP");
    assert_eq!(names(sid.passed_waypoints()), vec!["PRINO"]);

    let mut star = Leg::new(&navdata, "MLF.GRNPA1.KLAS25L").unwrap();
    assert_eq!(star.update_for_arrival_runway("01R"), Ok(RunwayUpdate::UnknownVariant));
    assert_eq!(star.update_for_arrival_runway("19R"), Ok(RunwayUpdate::Applied));
    assert_eq!(
        names(star.waypoints()),
        vec!["MLF", "BETHL", "HOLDM", "KSINO", "SUNST"]
    );
}

/// Legs built from bad segments fail with the right error class.
#[test]
fn test_construction_errors() {
    let navdata = load_las_navdata();

    let err = Leg::new(&navdata, "KLAS07R.BOACH6.HEC..BTY").unwrap_err();
    assert!(matches!(err, LegError::DoubleDivider { .. }));

    let err = Leg::new(&navdata, "BTY.J92.DVC").unwrap_err();
    assert_eq!(err, LegError::ProcedureNotFound("J92".to_string()));
    assert!(!err.is_structural());

    let err = Leg::new(&navdata, "KLAS19L.BOACH6.HEC").unwrap_err();
    assert!(matches!(err, LegError::Expansion(ExpansionError::UnknownEntry { .. })));
}

/// Reset retires every waypoint exactly once, and a pooled leg re-initializes
/// like a fresh one.
#[test]
fn test_reset_runs_each_waypoint_hook_once() {
    let (resolver, resets) = counting_resolver(vec!["ALPHA", "BRAVO", "CHARLIE", "DELTA"]);
    let mut leg = Leg::new(&resolver, "START.COUNT1.KTST01").unwrap();

    leg.advance().unwrap();
    leg.skip_to_waypoint_named("charlie").unwrap();
    assert_eq!(resets.load(Ordering::SeqCst), 0);

    leg.reset();
    assert_eq!(resets.load(Ordering::SeqCst), 4);
    assert_eq!(leg.leg_type(), None);
    assert!(leg.route_string().is_empty());
    assert!(leg.procedure().is_none());
    assert!(leg.waypoints().is_empty());
    assert!(leg.passed_waypoints().is_empty());

    leg.init(&resolver, "start.count1.ktst01").unwrap();
    let fresh = Leg::new(&resolver, "START.COUNT1.KTST01").unwrap();
    assert_eq!(leg.leg_type(), Some(LegType::Procedure));
    assert_eq!(leg.route_string(), fresh.route_string());
    assert_eq!(names(leg.waypoints()), names(fresh.waypoints()));
    assert!(leg.passed_waypoints().is_empty());
}

/// Direct legs built through a custom resolver use the waypoint's own
/// constructor.
#[test]
fn test_direct_leg_with_custom_waypoint() {
    let (resolver, resets) = counting_resolver(vec![]);
    let mut leg = Leg::new(&resolver, "echo").unwrap();

    assert_eq!(names(leg.waypoints()), vec!["ECHO"]);
    assert_eq!(leg.minimum_procedure_altitude(), None);

    leg.reset();
    // Direct waypoints own their counter; the procedure counter is untouched
    assert_eq!(resets.load(Ordering::SeqCst), 0);
}
