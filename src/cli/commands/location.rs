//! `itrack location` command - Locations

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_database;
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List locations
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only count
    #[arg(long)]
    pub count: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 28),
    ColumnDef::new("type", "TYPE", 16),
];

pub fn run(cmd: LocationCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LocationCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let locations = db.locations().list()?;

    if args.count {
        println!("{}", locations.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&locations).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&locations).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let rows = locations.iter().map(|location| {
                TableRow::new(location.location_id.to_string())
                    .cell("id", CellValue::Number(location.location_id))
                    .cell("name", CellValue::Text(location.name.clone()))
                    .cell("type", CellValue::Text(location.location_type.clone()))
            });
            TableFormatter::new(COLUMNS, "location").output(rows, format)?;
        }
    }
    Ok(())
}
