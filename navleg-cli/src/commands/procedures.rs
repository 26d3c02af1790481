//! Procedures command - list the procedures in a navigation data file.

use std::path::PathBuf;

use navleg::config::ConfigFile;
use navleg::ProcedureDefinition;

use super::common::load_navdata;
use crate::error::CliError;

/// Run the procedures command.
pub fn run(navdata: Option<PathBuf>, config: &ConfigFile) -> Result<(), CliError> {
    let navdata = load_navdata(navdata, config)?;

    println!(
        "{} procedures, {} airways",
        navdata.procedure_count(),
        navdata.airway_count()
    );

    for procedure in navdata.procedures() {
        println!();
        println!("{} ({})", procedure.name(), procedure.kind());
        println!(
            "  Entries: {}",
            procedure.entry_names().collect::<Vec<_>>().join(", ")
        );
        println!(
            "  Exits:   {}",
            procedure.exit_names().collect::<Vec<_>>().join(", ")
        );
    }

    Ok(())
}
