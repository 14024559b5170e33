//! `itrack type` command - Asset types within categories

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_database, resolve_category};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum TypeCommands {
    /// List asset types, optionally for one category
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Category id or prefix (e.g. LAP)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("category", "CATEGORY", 10),
    ColumnDef::new("name", "NAME", 30),
];

pub fn run(cmd: TypeCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TypeCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let categories = match args.category {
        Some(ref key) => vec![resolve_category(&db, key)?],
        None => db.categories().list()?,
    };

    let mut listed = Vec::new();
    for category in categories {
        let types = db.assets().get_asset_types(category.category_id)?;
        listed.extend(types.into_iter().map(|t| (category.code_prefix.clone(), t)));
    }

    if args.count {
        println!("{}", listed.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let types: Vec<_> = listed.iter().map(|(_, t)| t).collect();
            let json = serde_json::to_string_pretty(&types).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let types: Vec<_> = listed.iter().map(|(_, t)| t).collect();
            let yaml = serde_yml::to_string(&types).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let rows = listed.iter().map(|(prefix, asset_type)| {
                TableRow::new(asset_type.type_id.to_string())
                    .cell("id", CellValue::Number(asset_type.type_id))
                    .cell("category", CellValue::Tag(prefix.clone()))
                    .cell("name", CellValue::Text(asset_type.type_name.clone()))
            });
            TableFormatter::new(COLUMNS, "type").output(rows, format)?;
        }
    }
    Ok(())
}
