//! # Template Library
//!
//! Named, reusable element sets. Templates store element *drafts* (no ids);
//! every instantiation issues fresh ids, so two instances of the same
//! template never share an element id.
//!
//! ```
//! use labelforge::templates::{TemplateLibrary, instantiate_template};
//!
//! let library = TemplateLibrary::built_in();
//! let template = library.by_id("location-2x1").unwrap();
//! let (first, size) = instantiate_template(template);
//! let (second, _) = instantiate_template(template);
//! assert_eq!(size.width, 2.0);
//! assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));
//! ```

use serde::{Deserialize, Serialize};

use crate::document::{
    BarcodeElement, Element, ElementDraft, ElementKind, Frame, LabelDocument, LabelSize,
    LineElement, QrCodeElement, ShapeElement, ShapeType, SizeCategory, Symbology, TextAlign,
    TextElement,
};
use crate::error::LabelError;

/// A reusable label design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: SizeCategory,
    pub size: LabelSize,
    pub elements: Vec<ElementDraft>,
}

impl Template {
    /// Capture a document's current design as a template.
    pub fn from_document(
        document: &LabelDocument,
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category: document.size.category,
            size: document.size.clone(),
            elements: document.elements.iter().map(Element::draft).collect(),
        }
    }

    /// Fresh elements plus the template's label size.
    pub fn instantiate(&self) -> (Vec<Element>, LabelSize) {
        let elements = self.elements.iter().cloned().map(Element::create).collect();
        (elements, self.size.clone())
    }
}

/// Clone every element of `template` under fresh ids.
pub fn instantiate_template(template: &Template) -> (Vec<Element>, LabelSize) {
    template.instantiate()
}

impl LabelDocument {
    /// Start a new design from a template.
    pub fn from_template(template: &Template) -> Self {
        let (elements, size) = template.instantiate();
        Self {
            elements,
            ..Self::new(size)
        }
    }

    /// Add a template's elements on top of this design, keeping its size.
    pub fn merge_template(&self, template: &Template) -> Self {
        let (elements, _) = template.instantiate();
        let mut next = self.clone();
        next.elements.extend(elements);
        next
    }
}

/// A searchable set of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The stock warehouse templates.
    pub fn built_in() -> Self {
        Self::new(vec![
            location_template(),
            product_template(),
            shipping_template(),
            pallet_template(),
        ])
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn by_id(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn by_category(&self, category: SizeCategory) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Look up a template or fail with [`LabelError::UnknownTemplate`].
    pub fn get(&self, id: &str) -> Result<&Template, LabelError> {
        self.by_id(id)
            .ok_or_else(|| LabelError::UnknownTemplate(id.to_string()))
    }

    /// Add or replace (by id) a template.
    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.retain(|t| t.id != template.id);
        self.templates.push(template);
        self
    }
}

// ============================================================================
// BUILT-IN TEMPLATES
// ============================================================================

fn draft(x: f64, y: f64, width: f64, height: f64, kind: ElementKind) -> ElementDraft {
    ElementDraft::new(Frame::new(x, y, width, height), kind)
}

fn rule(y: f64) -> ElementDraft {
    draft(0.0, y, 0.0, 0.0, ElementKind::Line(LineElement::to(100.0, y)))
}

fn location_template() -> Template {
    Template {
        id: "location-2x1".into(),
        name: "Location Label".into(),
        description: "Bin location code with a scannable barcode".into(),
        category: SizeCategory::Location,
        size: LabelSize::new("2\" x 1\" Location", 2.0, 1.0, SizeCategory::Location),
        elements: vec![
            draft(
                5.0,
                5.0,
                90.0,
                35.0,
                ElementKind::Text(
                    TextElement::bound("location.full")
                        .font_size(14.0)
                        .bold()
                        .align(TextAlign::Center),
                ),
            ),
            draft(
                10.0,
                45.0,
                80.0,
                50.0,
                ElementKind::Barcode(BarcodeElement {
                    show_text: false,
                    ..BarcodeElement::bound("location.full", Symbology::Code128)
                }),
            ),
        ],
    }
}

fn product_template() -> Template {
    Template {
        id: "product-4x2".into(),
        name: "Product Label".into(),
        description: "Product name, SKU and UPC barcode".into(),
        category: SizeCategory::Product,
        size: LabelSize::new("4\" x 2\" Product", 4.0, 2.0, SizeCategory::Product),
        elements: vec![
            draft(
                4.0,
                5.0,
                92.0,
                20.0,
                ElementKind::Text(TextElement::bound("product.name").font_size(18.0).bold()),
            ),
            draft(
                4.0,
                27.0,
                60.0,
                12.0,
                ElementKind::Text(TextElement::new("SKU: {{product.sku}}").font_size(10.0)),
            ),
            draft(
                66.0,
                27.0,
                30.0,
                12.0,
                ElementKind::Text(
                    TextElement::new("${{product.price}}")
                        .font_size(12.0)
                        .bold()
                        .align(TextAlign::Right),
                ),
            ),
            draft(
                10.0,
                45.0,
                80.0,
                50.0,
                ElementKind::Barcode(BarcodeElement::bound("product.upc", Symbology::Upc)),
            ),
        ],
    }
}

fn shipping_template() -> Template {
    Template {
        id: "shipping-4x6".into(),
        name: "Shipping Label".into(),
        description: "Outbound pallet destination with tracking barcode".into(),
        category: SizeCategory::Shipping,
        size: LabelSize::new("4\" x 6\" Shipping", 4.0, 6.0, SizeCategory::Shipping),
        elements: vec![
            draft(
                0.0,
                0.0,
                100.0,
                100.0,
                ElementKind::Shape(ShapeElement {
                    stroke_width: 2.0,
                    ..ShapeElement::new(ShapeType::Rectangle)
                }),
            ),
            draft(
                5.0,
                3.0,
                90.0,
                6.0,
                ElementKind::Text(TextElement::new("SHIP TO").font_size(12.0).bold()),
            ),
            draft(
                5.0,
                10.0,
                90.0,
                12.0,
                ElementKind::Text(TextElement::bound("pallet.destination").font_size(28.0).bold()),
            ),
            rule(25.0),
            draft(
                5.0,
                28.0,
                90.0,
                6.0,
                ElementKind::Text(TextElement::new("WEIGHT: {{pallet.weight}}").font_size(12.0)),
            ),
            draft(
                5.0,
                35.0,
                90.0,
                6.0,
                ElementKind::Text(TextElement::new("SHIPPED: {{system.date}}").font_size(12.0)),
            ),
            rule(45.0),
            draft(
                10.0,
                50.0,
                80.0,
                35.0,
                ElementKind::Barcode(BarcodeElement::bound("pallet.number", Symbology::Code128)),
            ),
        ],
    }
}

fn pallet_template() -> Template {
    Template {
        id: "pallet-4x6".into(),
        name: "Pallet Tag".into(),
        description: "Pallet number, contents and a QR code for receiving".into(),
        category: SizeCategory::Pallet,
        size: LabelSize::new("4\" x 6\" Pallet", 4.0, 6.0, SizeCategory::Pallet),
        elements: vec![
            draft(
                5.0,
                3.0,
                90.0,
                12.0,
                ElementKind::Text(
                    TextElement::bound("pallet.number")
                        .font_size(36.0)
                        .bold()
                        .align(TextAlign::Center),
                ),
            ),
            rule(17.0),
            draft(
                5.0,
                20.0,
                90.0,
                8.0,
                ElementKind::Text(TextElement::bound("product.name").font_size(16.0)),
            ),
            draft(
                5.0,
                30.0,
                45.0,
                6.0,
                ElementKind::Text(TextElement::new("QTY: {{inventory.quantity}}").font_size(14.0)),
            ),
            draft(
                50.0,
                30.0,
                45.0,
                6.0,
                ElementKind::Text(
                    TextElement::new("LOT: {{inventory.lot}}")
                        .font_size(14.0)
                        .align(TextAlign::Right),
                ),
            ),
            draft(
                20.0,
                45.0,
                60.0,
                40.0,
                ElementKind::QrCode(QrCodeElement::bound("pallet.number")),
            ),
        ],
    }
}
