//! Data-field catalog.
//!
//! The catalog lists the dotted keys a host can supply, with a human label
//! and an example value. It populates field pickers, builds sample preview
//! contexts, and flags bindings that point nowhere. It is advisory: a
//! document may reference keys the catalog does not know.

use serde::{Deserialize, Serialize};

use super::{DataContext, referenced_fields};
use crate::document::LabelDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Location,
    Product,
    Pallet,
    Inventory,
    System,
}

/// One bindable data field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    /// Dotted path, e.g. `product.sku`.
    pub key: String,
    pub label: String,
    pub category: FieldCategory,
    pub example: String,
}

impl DataField {
    pub fn new(key: &str, label: &str, category: FieldCategory, example: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            category,
            example: example.to_string(),
        }
    }
}

/// The fields the warehouse host populates.
pub fn default_catalog() -> Vec<DataField> {
    use FieldCategory::*;
    vec![
        DataField::new("location.full", "Full Location Code", Location, "WH01-A01-S01-01"),
        DataField::new("location.warehouse", "Warehouse", Location, "WH01"),
        DataField::new("location.aisle", "Aisle", Location, "A01"),
        DataField::new("location.shelf", "Shelf", Location, "S01"),
        DataField::new("location.bin", "Bin", Location, "01"),
        DataField::new("product.sku", "SKU", Product, "SKU-10042"),
        DataField::new("product.name", "Product Name", Product, "Steel Bracket 4in"),
        DataField::new("product.description", "Description", Product, "Zinc plated, 4 inch"),
        DataField::new("product.upc", "UPC", Product, "012345678905"),
        DataField::new("product.price", "Price", Product, "4.99"),
        DataField::new("pallet.number", "Pallet Number", Pallet, "PLT-000123"),
        DataField::new("pallet.weight", "Pallet Weight", Pallet, "412 lb"),
        DataField::new("pallet.destination", "Destination", Pallet, "DOCK 4"),
        DataField::new("inventory.quantity", "Quantity", Inventory, "48"),
        DataField::new("inventory.lot", "Lot Number", Inventory, "LOT-2026-017"),
        DataField::new("inventory.expiration", "Expiration", Inventory, "12/31/2027"),
        DataField::new("system.date", "Current Date", System, "01/27/2026"),
        DataField::new("system.time", "Current Time", System, "09:30"),
        DataField::new("system.user", "Current User", System, "jdoe"),
    ]
}

/// A context filled with every catalog example, for previews.
pub fn sample_context(catalog: &[DataField]) -> DataContext {
    let mut context = DataContext::new();
    for field in catalog {
        context.insert(&field.key, field.example.clone());
    }
    context
}

/// Fields referenced by `document` that the catalog does not list, sorted.
pub fn unknown_bindings(document: &LabelDocument, catalog: &[DataField]) -> Vec<String> {
    referenced_fields(document)
        .into_iter()
        .filter(|key| !catalog.iter().any(|f| &f.key == key))
        .collect()
}
