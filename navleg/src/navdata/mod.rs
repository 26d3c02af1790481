//! In-memory navigation data set.
//!
//! [`NavData`] is the bundled [`NavigationResolver`]: a name-indexed collection
//! of [`StandardProcedure`]s and [`AirwayDefinition`]s, built in code or loaded
//! from an INI file.
//!
//! # File Format
//!
//! ```ini
//! [procedure.GRNPA1]
//! kind = star
//! body = BETHL@A210-, HOLDM, KSINO@A120-
//! entry.DVC = DVC@A170+, BETHL
//! entry.MLF = MLF, BETHL
//! exit.KLAS25L = LARRE@A80
//! exit.KLAS19R =
//!
//! [airway.J92]
//! fixes = BTY, OAL, BAM
//! ```
//!
//! Fix lists are comma separated fix specs (see [`crate::waypoint`]). An empty
//! transition is allowed: the body is flown straight to or from the runway.

mod procedure;

pub use procedure::StandardProcedure;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ini::{Ini, Properties};
use thiserror::Error;
use tracing::debug;

use crate::navigation::{AirwayDefinition, NavigationResolver, ProcedureDefinition, ProcedureKind};
use crate::waypoint::{FixSpecError, NavWaypoint, Waypoint};

const PROCEDURE_SECTION_PREFIX: &str = "procedure.";
const AIRWAY_SECTION_PREFIX: &str = "airway.";
const ENTRY_KEY_PREFIX: &str = "entry.";
const EXIT_KEY_PREFIX: &str = "exit.";

/// Errors that can occur while building or loading navigation data.
#[derive(Debug, Error)]
pub enum NavDataError {
    /// I/O error reading a navigation data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI.
    #[error("Failed to parse navigation data: {0}")]
    Parse(#[from] ini::ParseError),

    /// A section is neither `[procedure.NAME]` nor `[airway.NAME]`.
    #[error("Unknown section [{0}]")]
    UnknownSection(String),

    /// A key is not recognized in its section.
    #[error("Unknown key '{key}' in [{section}]")]
    UnknownKey { section: String, key: String },

    /// A procedure section has no `kind`.
    #[error("Procedure {0} is missing 'kind'")]
    MissingKind(String),

    /// A procedure `kind` is not `sid` or `star`.
    #[error("Procedure {procedure} has unknown kind '{kind}'")]
    UnknownKind { procedure: String, kind: String },

    /// A procedure has no entry or no exit and could never be expanded.
    #[error("Procedure {0} needs at least one entry and one exit")]
    MissingTransitions(String),

    /// A fix spec is malformed.
    #[error("Invalid fix in [{section}]: {source}")]
    InvalidFix {
        section: String,
        #[source]
        source: FixSpecError,
    },

    /// Two definitions share a name.
    #[error("Duplicate definition: {0}")]
    Duplicate(String),
}

/// Name-indexed procedures and airways.
///
/// Lookups ignore case. Definitions are shared with legs through [`Arc`]
/// handles and never change once added.
#[derive(Debug, Clone, Default)]
pub struct NavData {
    procedures: HashMap<String, Arc<StandardProcedure>>,
    airways: HashMap<String, Arc<AirwayDefinition>>,
}

impl NavData {
    /// Create an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a procedure, replacing any procedure with the same name.
    pub fn with_procedure(mut self, procedure: StandardProcedure) -> Self {
        self.procedures
            .insert(procedure_key(&procedure), Arc::new(procedure));
        self
    }

    /// Add an airway, replacing any airway with the same name.
    pub fn with_airway(mut self, airway: AirwayDefinition) -> Self {
        self.airways.insert(airway.name.clone(), Arc::new(airway));
        self
    }

    /// Add a procedure, failing if the name is taken.
    pub fn add_procedure(&mut self, procedure: StandardProcedure) -> Result<(), NavDataError> {
        let key = procedure_key(&procedure);
        if self.procedures.contains_key(&key) {
            return Err(NavDataError::Duplicate(key));
        }
        self.procedures.insert(key, Arc::new(procedure));
        Ok(())
    }

    /// Add an airway, failing if the name is taken.
    pub fn add_airway(&mut self, airway: AirwayDefinition) -> Result<(), NavDataError> {
        if self.airways.contains_key(&airway.name) {
            return Err(NavDataError::Duplicate(airway.name));
        }
        self.airways.insert(airway.name.clone(), Arc::new(airway));
        Ok(())
    }

    /// Number of procedures.
    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }

    /// Number of airways.
    pub fn airway_count(&self) -> usize {
        self.airways.len()
    }

    /// All procedures, sorted by name.
    pub fn procedures(&self) -> Vec<&StandardProcedure> {
        let mut procedures: Vec<&StandardProcedure> =
            self.procedures.values().map(Arc::as_ref).collect();
        procedures.sort_by(|a, b| a.name().cmp(b.name()));
        procedures
    }

    /// Load navigation data from an INI file.
    pub fn load(path: &Path) -> Result<Self, NavDataError> {
        let content = std::fs::read_to_string(path)?;
        let navdata = Self::from_ini_str(&content)?;
        debug!(
            path = %path.display(),
            procedures = navdata.procedure_count(),
            airways = navdata.airway_count(),
            "Loaded navigation data"
        );
        Ok(navdata)
    }

    /// Parse navigation data from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, NavDataError> {
        let ini = Ini::load_from_str(content)?;
        let mut navdata = Self::new();

        for (section, properties) in ini.iter() {
            // Keys outside any section carry no definitions
            let Some(section) = section else {
                continue;
            };

            if let Some(name) = section.strip_prefix(PROCEDURE_SECTION_PREFIX) {
                navdata.add_procedure(parse_procedure(section, name, properties)?)?;
            } else if let Some(name) = section.strip_prefix(AIRWAY_SECTION_PREFIX) {
                navdata.add_airway(parse_airway(section, name, properties)?)?;
            } else {
                return Err(NavDataError::UnknownSection(section.to_string()));
            }
        }

        Ok(navdata)
    }
}

impl NavigationResolver for NavData {
    type Procedure = StandardProcedure;

    fn resolve_procedure(&self, name: &str) -> Option<Arc<StandardProcedure>> {
        self.procedures.get(&name.trim().to_uppercase()).cloned()
    }

    fn resolve_airway(&self, name: &str) -> Option<Arc<AirwayDefinition>> {
        self.airways.get(&name.trim().to_uppercase()).cloned()
    }
}

fn procedure_key(procedure: &StandardProcedure) -> String {
    procedure.name().to_string()
}

fn parse_fix_list(section: &str, value: &str) -> Result<Vec<NavWaypoint>, NavDataError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .map(|spec| {
            NavWaypoint::from_fix_spec(spec).map_err(|source| NavDataError::InvalidFix {
                section: section.to_string(),
                source,
            })
        })
        .collect()
}

fn parse_procedure(
    section: &str,
    name: &str,
    properties: &Properties,
) -> Result<StandardProcedure, NavDataError> {
    let name = name.trim().to_uppercase();

    let kind_str = properties
        .get("kind")
        .ok_or_else(|| NavDataError::MissingKind(name.clone()))?;
    let kind =
        ProcedureKind::from_config_str(kind_str).ok_or_else(|| NavDataError::UnknownKind {
            procedure: name.clone(),
            kind: kind_str.to_string(),
        })?;

    let mut procedure = StandardProcedure::new(&name, kind);
    let mut has_entry = false;
    let mut has_exit = false;

    for (key, value) in properties.iter() {
        if key == "kind" {
            continue;
        } else if key == "body" {
            procedure = procedure.with_body(parse_fix_list(section, value)?);
        } else if let Some(entry) = key.strip_prefix(ENTRY_KEY_PREFIX) {
            procedure = procedure.with_entry(entry, parse_fix_list(section, value)?);
            has_entry = true;
        } else if let Some(exit) = key.strip_prefix(EXIT_KEY_PREFIX) {
            procedure = procedure.with_exit(exit, parse_fix_list(section, value)?);
            has_exit = true;
        } else {
            return Err(NavDataError::UnknownKey {
                section: section.to_string(),
                key: key.to_string(),
            });
        }
    }

    if !has_entry || !has_exit {
        return Err(NavDataError::MissingTransitions(name));
    }

    Ok(procedure)
}

fn parse_airway(
    section: &str,
    name: &str,
    properties: &Properties,
) -> Result<AirwayDefinition, NavDataError> {
    let mut fixes = Vec::new();

    for (key, value) in properties.iter() {
        if key != "fixes" {
            return Err(NavDataError::UnknownKey {
                section: section.to_string(),
                key: key.to_string(),
            });
        }
        fixes = parse_fix_list(section, value)?;
    }

    Ok(AirwayDefinition::new(name, fixes.iter().map(|fix| fix.name())))
}
