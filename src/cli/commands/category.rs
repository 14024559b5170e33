//! `itrack category` command - Asset categories

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_database;
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories with their tag prefixes
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
    ColumnDef::new("prefix", "PREFIX", 10),
    ColumnDef::new("description", "DESCRIPTION", 30),
    ColumnDef::new("types", "TYPES", 7),
];

pub fn run(cmd: CategoryCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CategoryCommands::List(args) => run_list(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let categories = db.categories().list()?;

    if args.count {
        println!("{}", categories.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&categories).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&categories).into_diagnostic()?;
            print!("{}", yaml);
        }
        format => {
            let mut rows = Vec::with_capacity(categories.len());
            for category in &categories {
                let types = db.types().list_by_category(category.category_id)?.len();
                rows.push(
                    TableRow::new(category.category_id.to_string())
                        .cell("id", CellValue::Number(category.category_id))
                        .cell("prefix", CellValue::Tag(category.tag_prefix()))
                        .cell("description", CellValue::Text(category.description.clone()))
                        .cell("types", CellValue::Number(types as i64)),
                );
            }
            TableFormatter::new(COLUMNS, "category").output(rows, format)?;
        }
    }
    Ok(())
}
