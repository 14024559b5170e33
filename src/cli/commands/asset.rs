//! `itrack asset` command - Asset management

use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::{Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;

use crate::cli::helpers::{
    display_date, open_database, resolve_category, resolve_location, style_tone,
};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::date::parse_date;
use crate::core::{AssetFilter, AssetForm, Database, InventoryError};
use crate::entities::{Asset, AssetStatus, HardwareSpecs, StorageType};

#[derive(Subcommand, Debug)]
pub enum AssetCommands {
    /// List assets with filtering
    List(ListArgs),

    /// Show an asset's details
    Show(ShowArgs),

    /// Register a new asset
    New(NewArgs),

    /// Change fields of an existing asset
    Edit(EditArgs),

    /// Move an asset to another status
    Status(StatusArgs),

    /// Retire an asset (terminal)
    Retire(RetireArgs),

    /// Delete an asset record
    Delete(DeleteArgs),

    /// Print the next free tag for a category
    NextTag(NextTagArgs),
}

/// Status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Assigned,
    Available,
    Maintenance,
    Retired,
    /// All statuses
    All,
}

impl StatusFilter {
    fn status(self) -> Option<AssetStatus> {
        match self {
            StatusFilter::Assigned => Some(AssetStatus::Assigned),
            StatusFilter::Available => Some(AssetStatus::Available),
            StatusFilter::Maintenance => Some(AssetStatus::UnderMaintenance),
            StatusFilter::Retired => Some(AssetStatus::Retired),
            StatusFilter::All => None,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by category id or prefix
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by location id or name
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Search in tag, serial number, maker and model
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Asset ID or tag
    pub id: String,
}

/// Field values shared by `new` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct AssetFields {
    /// Category id or prefix (e.g. LAP); resets the tag to the category prefix
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Asset type id or name within the category
    #[arg(long = "type", short = 't')]
    pub asset_type: Option<String>,

    /// Asset tag; a bare prefix like LAP- takes the next number
    #[arg(long)]
    pub tag: Option<String>,

    /// Serial number
    #[arg(long)]
    pub serial: Option<String>,

    /// Manufacturer
    #[arg(long)]
    pub maker: Option<String>,

    /// Model name
    #[arg(long)]
    pub model: Option<String>,

    /// Purchase date (YYYY-MM-DD); also sets warranty to one year later
    #[arg(long)]
    pub purchased: Option<String>,

    /// Warranty end date (YYYY-MM-DD); empty to clear
    #[arg(long)]
    pub warranty: Option<String>,

    /// Location id or name
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Processor model
    #[arg(long)]
    pub processor: Option<String>,

    /// Memory in GB
    #[arg(long)]
    pub ram: Option<i64>,

    /// Storage capacity in TB
    #[arg(long)]
    pub storage: Option<f64>,

    /// Storage technology (hdd, ssd, hybrid)
    #[arg(long)]
    pub storage_type: Option<StorageType>,

    /// Operating system
    #[arg(long)]
    pub os: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: AssetFields,

    /// Initial status
    #[arg(long, short = 's')]
    pub status: Option<AssetStatus>,

    /// Use interactive prompts
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Asset ID or tag
    pub id: String,

    #[command(flatten)]
    pub fields: AssetFields,

    /// Use interactive prompts, pre-filled with the current values
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Asset ID or tag
    pub id: String,

    /// New status (assigned, available, under-maintenance, retired)
    pub status: AssetStatus,
}

#[derive(clap::Args, Debug)]
pub struct RetireArgs {
    /// Asset ID or tag
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Asset ID or tag
    pub id: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct NextTagArgs {
    /// Category id or prefix
    #[arg(long, short = 'c')]
    pub category: String,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 17),
    ColumnDef::new("tag", "TAG", 12),
    ColumnDef::new("type", "TYPE", 20),
    ColumnDef::new("status", "STATUS", 19),
    ColumnDef::new("maker", "MAKER", 14),
    ColumnDef::new("model", "MODEL", 20),
    ColumnDef::new("serial", "SERIAL", 16),
    ColumnDef::new("location", "LOCATION", 18),
    ColumnDef::new("purchased", "PURCHASED", 12),
    ColumnDef::new("warranty", "WARRANTY", 12),
];

pub fn run(cmd: AssetCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        AssetCommands::List(args) => run_list(args, global),
        AssetCommands::Show(args) => run_show(args, global),
        AssetCommands::New(args) => run_new(args, global),
        AssetCommands::Edit(args) => run_edit(args, global),
        AssetCommands::Status(args) => run_status(args.id, args.status, global),
        AssetCommands::Retire(args) => run_status(args.id, AssetStatus::Retired, global),
        AssetCommands::Delete(args) => run_delete(args, global),
        AssetCommands::NextTag(args) => run_next_tag(args, global),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn find_asset(db: &Database, key: &str) -> Result<Asset> {
    match db.assets().find(key)? {
        Some(asset) => Ok(asset),
        None => Err(InventoryError::NotFound(key.to_string()).into()),
    }
}

/// Type and location names keyed by id, for listings
fn name_lookups(db: &Database) -> Result<(HashMap<i64, String>, HashMap<i64, String>)> {
    let mut types = HashMap::new();
    for category in db.categories().list()? {
        for asset_type in db.types().list_by_category(category.category_id)? {
            types.insert(asset_type.type_id, asset_type.type_name);
        }
    }
    let locations = db
        .locations()
        .list()?
        .into_iter()
        .map(|l| (l.location_id, l.name))
        .collect();
    Ok((types, locations))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;

    let filter = AssetFilter {
        status: args.status.status(),
        category_id: match args.category {
            Some(ref key) => Some(resolve_category(&db, key)?.category_id),
            None => None,
        },
        location_id: match args.location {
            Some(ref key) => Some(resolve_location(&db, key)?.location_id),
            None => None,
        },
        search: args.search.clone(),
    };
    let mut assets = db.assets().list_filtered(&filter)?;

    if let Some(limit) = args.limit {
        assets.truncate(limit);
    }

    if args.count {
        println!("{}", assets.len());
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&assets).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&assets).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Auto if assets.is_empty() => {
            println!("No assets found.");
        }
        format => {
            let (types, locations) = name_lookups(&db)?;
            let text_or_empty = |name: Option<&String>| match name {
                Some(name) => CellValue::Text(name.clone()),
                None => CellValue::Empty,
            };
            let rows = assets.iter().map(|asset| {
                TableRow::new(asset.asset_id.clone())
                    .cell("id", CellValue::Id(asset.asset_id.clone()))
                    .cell("tag", CellValue::Tag(asset.asset_tag.clone()))
                    .cell("type", text_or_empty(types.get(&asset.type_id)))
                    .cell("status", CellValue::Status(asset.status_id))
                    .cell("maker", CellValue::Text(asset.maker.clone()))
                    .cell("model", CellValue::Text(asset.model.clone()))
                    .cell("serial", CellValue::Text(asset.serial_number.clone()))
                    .cell("location", text_or_empty(locations.get(&asset.location_id)))
                    .cell("purchased", CellValue::Date(asset.purchase_date))
                    .cell("warranty", CellValue::Date(asset.warranty_end_date))
            });
            TableFormatter::new(COLUMNS, "asset").output(rows, format)?;
        }
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let asset = find_asset(&db, &args.id)?;

    match global.format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&asset).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&asset).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Id => {
            println!("{}", asset.asset_id);
        }
        _ => print_details(&db, &asset)?,
    }
    Ok(())
}

fn print_details(db: &Database, asset: &Asset) -> Result<()> {
    let asset_type = db.types().get(asset.type_id)?;
    let category = match asset_type {
        Some(ref t) => db.categories().get(t.category_id)?,
        None => None,
    };
    let location = db.locations().get(asset.location_id)?;
    let (label, tone) = asset.status_label();

    println!("{}", style("─".repeat(60)).dim());
    println!("{}: {}", style("ID").bold(), style(&asset.asset_id).cyan());
    println!("{}: {}", style("Tag").bold(), style(&asset.asset_tag).yellow());
    println!("{}: {}", style("Status").bold(), style_tone(label, tone));
    println!("{}", style("─".repeat(60)).dim());

    println!();
    if let Some(category) = category {
        println!(
            "{}: {} ({})",
            style("Category").bold(),
            category.description,
            category.code_prefix
        );
    }
    if let Some(asset_type) = asset_type {
        println!("{}: {}", style("Type").bold(), asset_type.type_name);
    }
    println!("{}: {}", style("Maker").bold(), asset.maker);
    println!("{}: {}", style("Model").bold(), asset.model);
    println!("{}: {}", style("Serial").bold(), asset.serial_number);
    if let Some(location) = location {
        println!(
            "{}: {} ({})",
            style("Location").bold(),
            location.name,
            location.location_type
        );
    }

    println!();
    println!(
        "{}: {}",
        style("Purchased").bold(),
        display_date(asset.purchase_date)
    );
    let warranty = display_date(asset.warranty_end_date);
    match asset.warranty_end_date {
        Some(end) if end < today() => println!(
            "{}: {} {}",
            style("Warranty end").bold(),
            warranty,
            style("(expired)").red()
        ),
        _ => println!("{}: {}", style("Warranty end").bold(), warranty),
    }

    let specs = &asset.specs;
    if *specs != HardwareSpecs::default() {
        println!();
        println!("{}:", style("Hardware").bold());
        if let Some(ref processor) = specs.processor {
            println!("  Processor: {}", processor);
        }
        if let Some(ram) = specs.ram_gb {
            println!("  Memory: {} GB", ram);
        }
        match (specs.storage_tb, specs.storage_type) {
            (Some(size), Some(kind)) => println!("  Storage: {} TB {}", size, kind),
            (Some(size), None) => println!("  Storage: {} TB", size),
            (None, Some(kind)) => println!("  Storage: {}", kind),
            (None, None) => {}
        }
        if let Some(ref os) = specs.operating_system {
            println!("  OS: {}", os);
        }
    }

    if let Some(ref notes) = asset.notes {
        println!();
        println!("{}:", style("Notes").bold());
        println!("  {}", notes);
    }
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let mut form = AssetForm::new(&db, today())?;

    if !args.interactive {
        for (value, flag) in [
            (&args.fields.serial, "--serial"),
            (&args.fields.maker, "--maker"),
            (&args.fields.model, "--model"),
        ] {
            if value.is_none() {
                return Err(miette::miette!(
                    "{} is required (or use --interactive)",
                    flag
                ));
            }
        }
    }

    apply_fields(&mut form, &args.fields)?;
    if let Some(status) = args.status {
        form.set_status(status);
    }
    if args.interactive {
        run_wizard(&mut form)?;
    }

    let draft = form.submit()?;
    let asset = db.assets().create(&draft)?;
    print_saved(global, "Created", &asset)
}

fn run_edit(args: EditArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let asset = find_asset(&db, &args.id)?;

    let mut form = AssetForm::from_asset(&db, &asset, today())?;
    apply_fields(&mut form, &args.fields)?;
    if args.interactive {
        run_wizard(&mut form)?;
    }

    let draft = form.submit()?;
    let updated = db.assets().update(&asset.asset_id, &draft)?;
    print_saved(global, "Updated", &updated)
}

fn run_status(key: String, status: AssetStatus, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let asset = find_asset(&db, &key)?;
    let updated = db.assets().change_status(&asset.asset_id, status)?;

    if global.format == OutputFormat::Id {
        println!("{}", updated.asset_id);
    } else if !global.quiet {
        let (from, from_tone) = asset.status_label();
        let (to, to_tone) = updated.status_label();
        println!(
            "{} {}: {} → {}",
            style("✓").green(),
            style(&updated.asset_tag).cyan(),
            style_tone(from, from_tone),
            style_tone(to, to_tone)
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let asset = find_asset(&db, &args.id)?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} ({})?",
                asset.asset_tag,
                asset.display_name()
            ))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.assets().delete(&asset.asset_id)?;
    if !global.quiet {
        println!(
            "{} Deleted asset {}",
            style("✓").green(),
            style(&asset.asset_tag).cyan()
        );
    }
    Ok(())
}

fn run_next_tag(args: NextTagArgs, global: &GlobalOpts) -> Result<()> {
    let db = open_database(global)?;
    let category = resolve_category(&db, &args.category)?;
    println!("{}", db.assets().next_tag(category.category_id)?);
    Ok(())
}

fn print_saved(global: &GlobalOpts, verb: &str, asset: &Asset) -> Result<()> {
    match global.format {
        OutputFormat::Id => println!("{}", asset.asset_id),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(asset).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(asset).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ if global.quiet => {}
        _ => println!(
            "{} {} asset {} {}",
            style("✓").green(),
            verb,
            style(&asset.asset_tag).cyan(),
            style(format!("({})", asset.asset_id)).dim()
        ),
    }
    Ok(())
}

/// Push command-line values through the form, in the order a user would fill it
fn apply_fields(form: &mut AssetForm<'_, Database>, fields: &AssetFields) -> Result<()> {
    if let Some(ref key) = fields.category {
        let wanted = key.trim().trim_end_matches('-');
        let index = form
            .categories()
            .iter()
            .position(|c| {
                c.category_id.to_string() == wanted || c.code_prefix.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| miette::miette!("No category matching '{}'", key))?;
        form.on_category_changed(index)?;
    }
    if let Some(ref key) = fields.asset_type {
        let index = form
            .type_options()
            .iter()
            .position(|t| t.type_id.to_string() == *key || t.type_name.eq_ignore_ascii_case(key))
            .ok_or_else(|| {
                miette::miette!(
                    help = "Use `itrack type list --category <PREFIX>` to see types",
                    "No type matching '{}' in category {}",
                    key,
                    form.tag_prefix().trim_end_matches('-')
                )
            })?;
        form.on_type_selected(index)?;
    }
    if let Some(ref tag) = fields.tag {
        form.set_asset_tag(tag.as_str());
    }
    if let Some(ref serial) = fields.serial {
        form.set_serial_number(serial.as_str());
    }
    if let Some(ref maker) = fields.maker {
        form.set_maker(maker.as_str());
    }
    if let Some(ref model) = fields.model {
        form.set_model(model.as_str());
    }
    if let Some(ref text) = fields.purchased {
        form.on_purchase_date_committed(text.trim());
    }
    if let Some(ref text) = fields.warranty {
        form.set_warranty_text(text.trim());
    }
    if let Some(ref key) = fields.location {
        let index = form
            .locations()
            .iter()
            .position(|l| l.location_id.to_string() == *key || l.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| miette::miette!("No location matching '{}'", key))?;
        form.on_location_selected(index)?;
    }
    if let Some(ref notes) = fields.notes {
        form.set_notes(notes.as_str());
    }

    let mut specs = form.specs().clone();
    specs.processor = fields.processor.clone().or(specs.processor);
    specs.ram_gb = fields.ram.or(specs.ram_gb);
    specs.storage_tb = fields.storage.or(specs.storage_tb);
    specs.storage_type = fields.storage_type.or(specs.storage_type);
    specs.operating_system = fields.os.clone().or(specs.operating_system);
    form.set_specs(specs);
    Ok(())
}

/// Why a typed date would not be admitted, replaying it one keystroke at a time
fn typed_date_error(form: &AssetForm<'_, Database>, text: &str) -> Option<String> {
    let mut typed = String::new();
    for ch in text.chars() {
        typed.push(ch);
        if !form.on_date_keystroke(&typed, ch) {
            return Some(format!("'{}' is not a valid date (YYYY-MM-DD)", text));
        }
    }
    parse_date(text).err().map(|e| e.to_string())
}

fn prompt_text(prompt: &str, initial: &str, allow_empty: bool) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(allow_empty)
        .interact_text()
        .into_diagnostic()?;
    Ok(value.trim().to_string())
}

fn prompt_date(
    form: &AssetForm<'_, Database>,
    prompt: &str,
    initial: &str,
    optional: bool,
) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(optional)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            let input = input.trim();
            if optional && input.is_empty() {
                return Ok(());
            }
            match typed_date_error(form, input) {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
        .interact_text()
        .into_diagnostic()?;
    Ok(value.trim().to_string())
}

/// Interactive prompts over the form. Choosing a different category rewrites the
/// tag with the new prefix and restarts the type choice.
fn run_wizard(form: &mut AssetForm<'_, Database>) -> Result<()> {
    if form.categories().is_empty() {
        return Err(miette::miette!("No categories defined; run `itrack init` first"));
    }

    let category_items: Vec<String> = form
        .categories()
        .iter()
        .map(|c| format!("{} - {}", c.code_prefix, c.description))
        .collect();
    let category_index = Select::new()
        .with_prompt("Category")
        .items(&category_items)
        .default(form.selected_category_index().unwrap_or(0))
        .interact()
        .into_diagnostic()?;
    if form.selected_category_index() != Some(category_index) {
        form.on_category_changed(category_index)?;
    }

    let type_items: Vec<String> = form
        .type_options()
        .iter()
        .map(|t| t.type_name.clone())
        .collect();
    if type_items.is_empty() {
        return Err(miette::miette!(
            "Category {} has no asset types",
            form.tag_prefix().trim_end_matches('-')
        ));
    }
    let type_index = Select::new()
        .with_prompt("Type")
        .items(&type_items)
        .default(form.selected_type_index().unwrap_or(0))
        .interact()
        .into_diagnostic()?;
    form.on_type_selected(type_index)?;

    let tag_prompt = format!("Asset tag (keep {} for the next number)", form.tag_prefix());
    let tag = prompt_text(&tag_prompt, form.asset_tag(), true)?;
    form.set_asset_tag(tag);

    let serial = prompt_text("Serial number", form.serial_number(), false)?;
    form.set_serial_number(serial);
    let maker = prompt_text("Maker", form.maker(), false)?;
    form.set_maker(maker);
    let model = prompt_text("Model", form.model(), false)?;
    form.set_model(model);

    let purchase = prompt_date(form, "Purchase date", form.purchase_text(), false)?;
    if purchase != form.purchase_text() {
        form.on_purchase_date_committed(&purchase);
    }
    let warranty = prompt_date(form, "Warranty end (empty for none)", form.warranty_text(), true)?;
    form.set_warranty_text(warranty);

    let location_items: Vec<String> = form
        .locations()
        .iter()
        .map(|l| format!("{} ({})", l.name, l.location_type))
        .collect();
    if location_items.is_empty() {
        return Err(miette::miette!("No locations defined"));
    }
    let location_index = Select::new()
        .with_prompt("Location")
        .items(&location_items)
        .default(form.selected_location_index().unwrap_or(0))
        .interact()
        .into_diagnostic()?;
    form.on_location_selected(location_index)?;

    let statuses = AssetStatus::all();
    let status_index = Select::new()
        .with_prompt("Status")
        .items(statuses)
        .default(statuses.iter().position(|s| *s == form.status()).unwrap_or(0))
        .interact()
        .into_diagnostic()?;
    form.set_status(statuses[status_index]);

    let add_specs = Confirm::new()
        .with_prompt("Record hardware details?")
        .default(*form.specs() != HardwareSpecs::default())
        .interact()
        .into_diagnostic()?;
    if add_specs {
        let mut specs = form.specs().clone();
        let current = specs.processor.clone().unwrap_or_default();
        specs.processor = Some(prompt_text("Processor", &current, true)?).filter(|s| !s.is_empty());

        let ram: String = Input::new()
            .with_prompt("Memory (GB)")
            .with_initial_text(specs.ram_gb.map(|r| r.to_string()).unwrap_or_default())
            .allow_empty(true)
            .validate_with(|s: &String| -> std::result::Result<(), String> {
                if s.trim().is_empty() || s.trim().parse::<i64>().is_ok() {
                    Ok(())
                } else {
                    Err("Enter a whole number of GB".to_string())
                }
            })
            .interact_text()
            .into_diagnostic()?;
        specs.ram_gb = ram.trim().parse().ok();

        let storage: String = Input::new()
            .with_prompt("Storage (TB)")
            .with_initial_text(specs.storage_tb.map(|s| s.to_string()).unwrap_or_default())
            .allow_empty(true)
            .validate_with(|s: &String| -> std::result::Result<(), String> {
                if s.trim().is_empty() || s.trim().parse::<f64>().is_ok() {
                    Ok(())
                } else {
                    Err("Enter a number of TB, e.g. 0.5".to_string())
                }
            })
            .interact_text()
            .into_diagnostic()?;
        specs.storage_tb = storage.trim().parse().ok();

        let kinds = ["None", "HDD", "SSD", "Hybrid"];
        let default_kind = match specs.storage_type {
            None => 0,
            Some(StorageType::Hdd) => 1,
            Some(StorageType::Ssd) => 2,
            Some(StorageType::Hybrid) => 3,
        };
        let kind_index = Select::new()
            .with_prompt("Storage type")
            .items(&kinds)
            .default(default_kind)
            .interact()
            .into_diagnostic()?;
        specs.storage_type = kinds[kind_index].parse().ok();

        let current = specs.operating_system.clone().unwrap_or_default();
        specs.operating_system =
            Some(prompt_text("Operating system", &current, true)?).filter(|s| !s.is_empty());
        form.set_specs(specs);
    }

    let notes = prompt_text("Notes", form.notes(), true)?;
    form.set_notes(notes);
    Ok(())
}
