//! Cascading selection controller behind the asset form
//!
//! Holds the full form state explicitly. Choosing a category replaces the type
//! options wholesale, resets the type selection and rewrites the tag field with
//! the new category prefix. Committing a purchase date derives a one-year
//! warranty default.

use chrono::NaiveDate;

use crate::core::date::{accept_date_keystroke, add_one_year, format_date, parse_date};
use crate::core::error::{InventoryError, Result};
use crate::core::repo::CatalogSource;
use crate::entities::{
    Asset, AssetCategory, AssetDraft, AssetStatus, AssetType, HardwareSpecs, Location,
};

pub struct AssetForm<'a, S: CatalogSource + ?Sized> {
    source: &'a S,

    categories: Vec<AssetCategory>,
    selected_category: Option<usize>,
    tag_prefix: String,
    type_options: Vec<AssetType>,
    selected_type: Option<usize>,
    locations: Vec<Location>,
    selected_location: Option<usize>,

    asset_id: Option<String>,
    asset_tag: String,
    serial_number: String,
    maker: String,
    model: String,
    purchase_text: String,
    warranty_text: String,
    status: AssetStatus,
    specs: HardwareSpecs,
    notes: String,
}

impl<'a, S: CatalogSource + ?Sized> AssetForm<'a, S> {
    /// Load reference data and seed defaults: first category and location,
    /// purchase date `today`, warranty one year later, status Available.
    pub fn new(source: &'a S, today: NaiveDate) -> Result<Self> {
        let categories = source.list_categories()?;
        let locations = source.list_locations()?;

        let mut form = Self {
            source,
            selected_category: None,
            tag_prefix: String::new(),
            type_options: Vec::new(),
            selected_type: None,
            selected_location: if locations.is_empty() { None } else { Some(0) },
            categories,
            locations,
            asset_id: None,
            asset_tag: String::new(),
            serial_number: String::new(),
            maker: String::new(),
            model: String::new(),
            purchase_text: String::new(),
            warranty_text: String::new(),
            status: AssetStatus::default(),
            specs: HardwareSpecs::default(),
            notes: String::new(),
        };

        if !form.categories.is_empty() {
            form.on_category_changed(0)?;
        }
        form.on_purchase_date_committed(&format_date(today));

        tracing::debug!(
            categories = form.categories.len(),
            locations = form.locations.len(),
            "initialised asset form"
        );
        Ok(form)
    }

    /// Form pre-filled from a stored asset. Unreadable stored dates leave the
    /// corresponding field empty.
    pub fn from_asset(source: &'a S, asset: &Asset, today: NaiveDate) -> Result<Self> {
        let mut form = Self::new(source, today)?;

        for index in 0..form.categories.len() {
            let category_id = form.categories[index].category_id;
            let types = source.list_types_by_category(category_id)?;
            if let Some(type_index) = types.iter().position(|t| t.type_id == asset.type_id) {
                form.on_category_changed(index)?;
                form.on_type_selected(type_index)?;
                break;
            }
        }
        form.selected_location = form
            .locations
            .iter()
            .position(|l| l.location_id == asset.location_id)
            .or(form.selected_location);

        form.asset_id = Some(asset.asset_id.clone());
        form.asset_tag = asset.asset_tag.clone();
        form.serial_number = asset.serial_number.clone();
        form.maker = asset.maker.clone();
        form.model = asset.model.clone();
        form.purchase_text = asset.purchase_date.map(format_date).unwrap_or_default();
        form.warranty_text = asset.warranty_end_date.map(format_date).unwrap_or_default();
        form.status = asset.status().unwrap_or_default();
        form.specs = asset.specs.clone();
        form.notes = asset.notes.clone().unwrap_or_default();
        Ok(form)
    }

    /// Select the category at `index`.
    ///
    /// Out-of-range indices are a selection error and leave the state untouched.
    pub fn on_category_changed(&mut self, index: usize) -> Result<()> {
        let category = self.categories.get(index).ok_or_else(|| {
            InventoryError::Selection(format!(
                "category index {} out of range ({} categories)",
                index,
                self.categories.len()
            ))
        })?;
        let types = self.source.list_types_by_category(category.category_id)?;

        self.tag_prefix = category.tag_prefix();
        self.asset_tag = self.tag_prefix.clone();
        self.selected_type = if types.is_empty() { None } else { Some(0) };
        self.type_options = types;
        self.selected_category = Some(index);
        Ok(())
    }

    pub fn on_type_selected(&mut self, index: usize) -> Result<()> {
        if index >= self.type_options.len() {
            return Err(InventoryError::Selection(format!(
                "type index {} out of range ({} types)",
                index,
                self.type_options.len()
            )));
        }
        self.selected_type = Some(index);
        Ok(())
    }

    pub fn on_location_selected(&mut self, index: usize) -> Result<()> {
        if index >= self.locations.len() {
            return Err(InventoryError::Selection(format!(
                "location index {} out of range ({} locations)",
                index,
                self.locations.len()
            )));
        }
        self.selected_location = Some(index);
        Ok(())
    }

    /// Store the purchase text; when it parses, overwrite the warranty field with
    /// purchase + 1 year and return that date.
    pub fn on_purchase_date_committed(&mut self, text: &str) -> Option<NaiveDate> {
        self.purchase_text = text.to_string();
        let warranty = parse_date(text).ok().and_then(add_one_year)?;
        self.warranty_text = format_date(warranty);
        Some(warranty)
    }

    /// Whether a date field may take the keystroke that produced `text`
    pub fn on_date_keystroke(&self, text: &str, last: char) -> bool {
        accept_date_keystroke(text, last)
    }

    pub fn categories(&self) -> &[AssetCategory] {
        &self.categories
    }

    pub fn type_options(&self) -> &[AssetType] {
        &self.type_options
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn selected_category_index(&self) -> Option<usize> {
        self.selected_category
    }

    pub fn selected_type_index(&self) -> Option<usize> {
        self.selected_type
    }

    pub fn selected_location_index(&self) -> Option<usize> {
        self.selected_location
    }

    pub fn selected_category(&self) -> Option<&AssetCategory> {
        self.selected_category.and_then(|i| self.categories.get(i))
    }

    pub fn selected_type(&self) -> Option<&AssetType> {
        self.selected_type.and_then(|i| self.type_options.get(i))
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.selected_location.and_then(|i| self.locations.get(i))
    }

    /// `PREFIX-` of the selected category, empty when there is none
    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    pub fn asset_tag(&self) -> &str {
        &self.asset_tag
    }

    pub fn purchase_text(&self) -> &str {
        &self.purchase_text
    }

    pub fn warranty_text(&self) -> &str {
        &self.warranty_text
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn maker(&self) -> &str {
        &self.maker
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn specs(&self) -> &HardwareSpecs {
        &self.specs
    }

    pub fn status(&self) -> AssetStatus {
        self.status
    }

    pub fn set_asset_tag(&mut self, tag: impl Into<String>) {
        self.asset_tag = tag.into();
    }

    pub fn set_serial_number(&mut self, serial: impl Into<String>) {
        self.serial_number = serial.into();
    }

    pub fn set_maker(&mut self, maker: impl Into<String>) {
        self.maker = maker.into();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Manual override of the derived warranty; empty clears it
    pub fn set_warranty_text(&mut self, text: impl Into<String>) {
        self.warranty_text = text.into();
    }

    pub fn set_status(&mut self, status: AssetStatus) {
        self.status = status;
    }

    pub fn set_specs(&mut self, specs: HardwareSpecs) {
        self.specs = specs;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Validate the form into a draft. Dates must parse here, unlike on read.
    pub fn submit(&self) -> Result<AssetDraft> {
        let asset_type = self
            .selected_type()
            .ok_or_else(|| InventoryError::Selection("no asset type selected".to_string()))?;
        let location = self
            .selected_location()
            .ok_or_else(|| InventoryError::Selection("no location selected".to_string()))?;

        let purchase_date = parse_date(self.purchase_text.trim())?;
        let warranty_end_date = match self.warranty_text.trim() {
            "" => None,
            text => Some(parse_date(text)?),
        };
        let notes = match self.notes.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(AssetDraft {
            asset_id: self.asset_id.clone(),
            asset_tag: self.asset_tag.trim().to_string(),
            type_id: asset_type.type_id,
            status: self.status,
            serial_number: self.serial_number.trim().to_string(),
            maker: self.maker.trim().to_string(),
            model: self.model.trim().to_string(),
            specs: self.specs.clone(),
            purchase_date,
            warranty_end_date,
            location_id: location.location_id,
            notes,
        })
    }
}
