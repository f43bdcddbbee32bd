//! # Label Document Model
//!
//! A single type hierarchy that is both the Rust API and the design file
//! format. `LabelDocument` is constructible in Rust and deserializable from
//! JSON.
//!
//! ```
//! use labelforge::document::*;
//!
//! // Rust construction
//! let doc = LabelDocument::new(LabelSize::default());
//! let (doc, id) = doc.add_draft(ElementDraft::new(
//!     Frame::new(5.0, 10.0, 90.0, 30.0),
//!     ElementKind::Text(TextElement::bound("location.full")),
//! ));
//! assert_eq!(doc.elements.len(), 1);
//!
//! // JSON round trip
//! let json = export_label_design(&doc);
//! let back = import_label_design(&json).unwrap();
//! assert_eq!(back.element(&id), doc.element(&id));
//! ```
//!
//! Documents are values: every transition takes `&self` and returns a new
//! document, so the host can keep old snapshots for undo/redo.

pub mod id;
mod io;
pub mod types;

pub use id::ElementId;
pub use io::{export_label_design, import_label_design};
pub use types::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::LabelError;
use crate::geometry::{self, AlignMode, Direction, Point};

// ============================================================================
// ELEMENT KINDS
// ============================================================================

/// Define the ElementKind enum and all dispatch methods from a single list.
///
/// Adding a new element kind: add one line here, then define the struct in
/// `types.rs` with `impl ElementMeta`. The exhaustive matches in geometry,
/// binding and the print compiler will point at everything else.
macro_rules! define_elements {
    ($($variant:ident($inner:ty) => $tag:literal),+ $(,)?) => {
        /// Kind-specific payload of an element.
        ///
        /// The `#[serde(tag = "type")]` attribute enables JSON like
        /// `{"type": "text", "content": "Hello"}`.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "type", rename_all = "lowercase")]
        pub enum ElementKind {
            $($variant($inner),)+
        }

        impl ElementKind {
            /// The `"type"` tag used in design files.
            pub fn type_name(&self) -> &'static str {
                match self { $(ElementKind::$variant(_) => $tag,)+ }
            }

            /// Human-readable display label (from [`ElementMeta::label`]).
            pub fn label(&self) -> &'static str {
                match self { $(ElementKind::$variant(_) => <$inner>::label(),)+ }
            }

            /// Starter extent for a new element of this kind.
            pub fn default_extent(&self) -> (f64, f64) {
                match self { $(ElementKind::$variant(_) => <$inner>::default_extent(),)+ }
            }

            /// Editor defaults for every element kind (from [`ElementMeta::editor_default`]).
            pub fn all_editor_defaults() -> Vec<Self> {
                vec![$(ElementKind::$variant(<$inner>::editor_default()),)+]
            }
        }
    };
}

define_elements! {
    Text(TextElement) => "text",
    Barcode(BarcodeElement) => "barcode",
    QrCode(QrCodeElement) => "qrcode",
    Image(ImageElement) => "image",
    Shape(ShapeElement) => "shape",
    Line(LineElement) => "line",
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// An element without identity: template payloads and creation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDraft {
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementDraft {
    pub fn new(frame: Frame, kind: ElementKind) -> Self {
        Self { frame, kind }
    }

    /// A toolbar starter for `type_name`, placed near the top-left corner.
    ///
    /// Returns `None` for unknown type names.
    pub fn editor_default(type_name: &str) -> Option<Self> {
        let kind = ElementKind::all_editor_defaults()
            .into_iter()
            .find(|k| k.type_name() == type_name)?;
        let (width, height) = kind.default_extent();
        let frame = Frame::new(10.0, 10.0, width, height);
        let kind = match kind {
            ElementKind::Line(line) => ElementKind::Line(LineElement {
                x2: frame.x + width,
                y2: frame.y + height,
                ..line
            }),
            other => other,
        };
        Some(Self { frame, kind })
    }
}

/// One positioned visual primitive of a label.
///
/// Elements are never mutated in place; the `with_*` methods and
/// [`Element::translated`] return updated copies that keep the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub frame: Frame,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element from a draft, issuing a fresh id.
    pub fn create(draft: ElementDraft) -> Self {
        Self {
            id: ElementId::fresh(),
            frame: draft.frame,
            kind: draft.kind,
        }
    }

    /// Deep copy under a fresh id, shifted by `(dx, dy)`.
    pub fn duplicate(&self, dx: f64, dy: f64) -> Self {
        Self::create(self.draft()).translated(dx, dy)
    }

    /// This element without its id.
    pub fn draft(&self) -> ElementDraft {
        ElementDraft {
            frame: self.frame.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Shift the element; a line moves both of its endpoints.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut next = self.clone();
        next.frame.x += dx;
        next.frame.y += dy;
        if let ElementKind::Line(line) = &mut next.kind {
            line.x2 += dx;
            line.y2 += dy;
        }
        next
    }

    /// Move the origin to `(x, y)`, keeping the shape.
    pub fn with_position(&self, x: f64, y: f64) -> Self {
        self.translated(x - self.frame.x, y - self.frame.y)
    }

    /// Replace width and height. Lines carry their extent in `x2, y2` instead.
    pub fn with_size(&self, width: f64, height: f64) -> Self {
        let mut next = self.clone();
        next.frame.width = width;
        next.frame.height = height;
        next
    }

    pub fn with_frame(&self, frame: Frame) -> Self {
        Self {
            frame,
            ..self.clone()
        }
    }

    pub fn with_kind(&self, kind: ElementKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Fail unless every coordinate, extent and rotation is finite.
    pub fn check_finite(&self) -> Result<(), LabelError> {
        let frame = &self.frame;
        let mut values = vec![frame.x, frame.y, frame.width, frame.height];
        values.extend(frame.rotation);
        if let ElementKind::Line(line) = &self.kind {
            values.extend([line.x2, line.y2]);
        }
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(LabelError::NonFiniteGeometry(self.id.to_string()))
        }
    }

    pub fn with_locked(&self, locked: bool) -> Self {
        let mut next = self.clone();
        next.frame.locked = locked;
        next
    }

    pub fn with_visible(&self, visible: bool) -> Self {
        let mut next = self.clone();
        next.frame.visible = visible;
        next
    }

    pub fn with_rotation(&self, rotation: Option<f64>) -> Self {
        let mut next = self.clone();
        next.frame.rotation = rotation;
        next
    }
}

/// Create a complete element with a fresh id.
pub fn create_element(draft: ElementDraft) -> Element {
    Element::create(draft)
}

/// Copy `element` under a fresh id, optionally shifted by `offset`.
pub fn clone_element(element: &Element, offset: Option<(f64, f64)>) -> Element {
    let (dx, dy) = offset.unwrap_or((0.0, 0.0));
    element.duplicate(dx, dy)
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// A label design: physical size, elements in paint order, editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDocument {
    pub size: LabelSize,
    /// Paint order: later elements draw on top.
    pub elements: Vec<Element>,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for LabelDocument {
    fn default() -> Self {
        Self::new(LabelSize::default())
    }
}

impl LabelDocument {
    /// Create an empty document for `size` with default settings.
    pub fn new(size: LabelSize) -> Self {
        Self {
            size,
            elements: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Look up an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    fn position(&self, id: &ElementId) -> Result<usize, LabelError> {
        self.elements
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| LabelError::UnknownElement(id.to_string()))
    }

    /// Topmost visible element containing `point`.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.frame.visible && geometry::is_point_in_element(point, e))
    }

    /// Check the document invariants: positive size and grid, unique ids,
    /// finite element geometry.
    pub fn validate(&self) -> Result<(), LabelError> {
        if !self.size.is_valid() {
            return Err(LabelError::InvalidSize {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if !(self.settings.grid_size > 0.0) {
            return Err(LabelError::InvalidGrid(self.settings.grid_size));
        }
        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(&element.id) {
                return Err(LabelError::DuplicateId(element.id.to_string()));
            }
            element.check_finite()?;
        }
        Ok(())
    }

    /// Append an element on top of the paint order.
    pub fn add_element(&self, element: Element) -> Result<Self, LabelError> {
        if self.element(&element.id).is_some() {
            return Err(LabelError::DuplicateId(element.id.to_string()));
        }
        element.check_finite()?;
        let mut next = self.clone();
        next.elements.push(element);
        Ok(next)
    }

    /// Create an element from `draft` and append it. Returns the new id.
    pub fn add_draft(&self, draft: ElementDraft) -> (Self, ElementId) {
        let element = Element::create(draft);
        let id = element.id.clone();
        let mut next = self.clone();
        next.elements.push(element);
        (next, id)
    }

    /// Replace the element that has the same id as `element`.
    pub fn update_element(&self, element: Element) -> Result<Self, LabelError> {
        let index = self.position(&element.id)?;
        element.check_finite()?;
        let mut next = self.clone();
        next.elements[index] = element;
        Ok(next)
    }

    pub fn delete_element(&self, id: &ElementId) -> Result<Self, LabelError> {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.elements.remove(index);
        Ok(next)
    }

    /// Copy an element under a fresh id, placed directly above the source.
    pub fn duplicate_element(
        &self,
        id: &ElementId,
        dx: f64,
        dy: f64,
    ) -> Result<(Self, ElementId), LabelError> {
        let index = self.position(id)?;
        let copy = self.elements[index].duplicate(dx, dy);
        let copy_id = copy.id.clone();
        let mut next = self.clone();
        next.elements.insert(index + 1, copy);
        Ok((next, copy_id))
    }

    /// Change the physical size. Element geometry is relative, so it scales along.
    pub fn set_size(&self, size: LabelSize) -> Result<Self, LabelError> {
        if !size.is_valid() {
            return Err(LabelError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            ..self.clone()
        })
    }

    pub fn toggle_grid(&self) -> Self {
        let mut next = self.clone();
        next.settings.show_grid = !next.settings.show_grid;
        next
    }

    pub fn toggle_rulers(&self) -> Self {
        let mut next = self.clone();
        next.settings.show_rulers = !next.settings.show_rulers;
        next
    }

    pub fn set_grid_size(&self, grid_size: f64) -> Result<Self, LabelError> {
        if !(grid_size > 0.0) || !grid_size.is_finite() {
            return Err(LabelError::InvalidGrid(grid_size));
        }
        let mut next = self.clone();
        next.settings.grid_size = grid_size;
        Ok(next)
    }

    pub fn set_units(&self, units: Units) -> Self {
        let mut next = self.clone();
        next.settings.units = units;
        next
    }

    /// Apply one completed drag gesture. Locked elements stay put; a delta
    /// that leaves the geometry non-finite is rejected.
    pub fn apply_move(&self, id: &ElementId, dx: f64, dy: f64) -> Result<Self, LabelError> {
        let index = self.position(id)?;
        let element = &self.elements[index];
        if element.frame.locked {
            return Ok(self.clone());
        }
        let moved = element.translated(dx, dy);
        moved.check_finite()?;
        let mut next = self.clone();
        next.elements[index] = moved;
        Ok(next)
    }

    /// Snap one element onto the document grid.
    pub fn snap_element(&self, id: &ElementId) -> Result<Self, LabelError> {
        let index = self.position(id)?;
        let element = &self.elements[index];
        if element.frame.locked {
            return Ok(self.clone());
        }
        let snapped = geometry::snap_element(element, self.settings.grid_size);
        let mut next = self.clone();
        next.elements[index] = snapped;
        Ok(next)
    }

    /// Align the unlocked elements among `ids`. Unknown ids are ignored.
    pub fn align_selection(&self, ids: &[ElementId], mode: AlignMode) -> Self {
        let selected = self.unlocked_selection(ids);
        self.replace_all(geometry::align_elements(&selected, mode))
    }

    /// Distribute the unlocked elements among `ids`. Unknown ids are ignored.
    pub fn distribute_selection(&self, ids: &[ElementId], direction: Direction) -> Self {
        let selected = self.unlocked_selection(ids);
        self.replace_all(geometry::distribute_elements(&selected, direction))
    }

    pub fn bring_to_front(&self, id: &ElementId) -> Result<Self, LabelError> {
        let index = self.position(id)?;
        let mut next = self.clone();
        let element = next.elements.remove(index);
        next.elements.push(element);
        Ok(next)
    }

    pub fn send_to_back(&self, id: &ElementId) -> Result<Self, LabelError> {
        let index = self.position(id)?;
        let mut next = self.clone();
        let element = next.elements.remove(index);
        next.elements.insert(0, element);
        Ok(next)
    }

    fn unlocked_selection(&self, ids: &[ElementId]) -> Vec<Element> {
        self.elements
            .iter()
            .filter(|e| ids.contains(&e.id) && !e.frame.locked)
            .cloned()
            .collect()
    }

    fn replace_all(&self, updated: Vec<Element>) -> Self {
        let mut next = self.clone();
        for element in updated {
            if let Some(slot) = next.elements.iter_mut().find(|e| e.id == element.id) {
                *slot = element;
            }
        }
        next
    }
}

/// Element type metadata for the host toolbar.
#[derive(Debug, Clone, Serialize)]
pub struct ElementTypeMeta {
    #[serde(rename = "type")]
    pub type_name: String,
    pub label: String,
}

/// Element type metadata for the host toolbar.
///
/// Derived from [`ElementKind::all_editor_defaults`], so the list is
/// exhaustive by construction.
pub fn element_types() -> Vec<ElementTypeMeta> {
    ElementKind::all_editor_defaults()
        .iter()
        .map(|k| ElementTypeMeta {
            type_name: k.type_name().to_string(),
            label: k.label().to_string(),
        })
        .collect()
}
