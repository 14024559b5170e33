//! `itrack init` command - Create the inventory database

use console::style;
use miette::Result;

use crate::cli::helpers::open_database;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let path = global.database_path();
    let existed = path.exists();

    let db = open_database(global)?;
    if global.quiet {
        return Ok(());
    }

    if existed {
        println!(
            "{} Database already exists at {}",
            style("!").yellow(),
            style(path.display()).cyan()
        );
    } else {
        println!(
            "{} Initialized inventory at {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let categories = db.categories().list()?;
    let mut types = 0;
    for category in &categories {
        types += db.types().list_by_category(category.category_id)?.len();
    }
    let locations = db.locations().list()?.len();
    let assets = db.assets().list()?.len();

    println!();
    println!("  Schema version  {}", db.schema_version()?);
    println!("  Categories      {}", categories.len());
    println!("  Asset types     {}", types);
    println!("  Locations       {}", locations);
    println!("  Assets          {}", assets);
    println!();
    println!("Next steps:");
    println!(
        "  {} Register an asset interactively",
        style("itrack asset new -i").yellow()
    );
    println!("  {} List assets", style("itrack asset list").yellow());
    Ok(())
}
