//! # Print Format Compiler
//!
//! Projects a design-space document into device pixels for one printer
//! resolution. The result is what the external renderer consumes: every
//! coordinate in whole pixels, every point size in (fractional) pixels,
//! every binding already resolved when compiled through [`render_for_print`].
//!
//! Compilation is pure. Preview and print call it twice on the same source
//! with different DPIs:
//!
//! ```
//! use labelforge::compile::compile_for_print;
//! use labelforge::document::LabelDocument;
//!
//! let design = LabelDocument::default(); // 2in x 1in
//! let preview = compile_for_print(&design, 96);
//! let print = compile_for_print(&design, 203);
//! assert_eq!((preview.width, preview.height), (192, 96));
//! assert_eq!((print.width, print.height), (406, 203));
//! ```
//!
//! ## Transform
//!
//! ```text
//! left_px  = round(x% / 100 * label_width_in * dpi)
//! right_px = round((x% + width%) / 100 * label_width_in * dpi)
//! width_px = right_px - left_px
//! font_px  = font_pt * dpi / 72
//! ```
//!
//! Edges are rounded, not extents, so elements that touch in design space
//! still touch in print space.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::binding::{DataContext, resolve_document};
use crate::document::{Element, ElementKind, LabelDocument, LabelSize};
use crate::error::LabelError;
use crate::printer::units::{inches_to_pixels, percent_to_pixels, points_to_pixels};

/// A label compiled to device pixels, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDocument {
    /// Resolution this document was compiled for.
    pub dpi: u32,
    /// Canvas width in pixels.
    pub width: i64,
    /// Canvas height in pixels.
    pub height: i64,
    /// Physical size of the source design.
    pub size: LabelSize,
    /// Elements in paint order, geometry in pixels.
    pub elements: Vec<Element>,
}

impl PrintDocument {
    /// Serialize for the rendering collaborator.
    pub fn to_json(&self) -> Result<String, LabelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compile `document` to pixel space at `dpi`.
pub fn compile_for_print(document: &LabelDocument, dpi: u32) -> PrintDocument {
    let size = &document.size;
    debug!(
        "compiling {} element(s) for {}x{}in at {} DPI",
        document.elements.len(),
        size.width,
        size.height,
        dpi
    );
    PrintDocument {
        dpi,
        width: inches_to_pixels(size.width, dpi),
        height: inches_to_pixels(size.height, dpi),
        size: size.clone(),
        elements: document
            .elements
            .iter()
            .map(|e| compile_element(e, size, dpi))
            .collect(),
    }
}

/// Resolve bindings against `context`, then compile at `dpi`.
pub fn render_for_print(document: &LabelDocument, context: &DataContext, dpi: u32) -> PrintDocument {
    compile_for_print(&resolve_document(document, context), dpi)
}

fn compile_element(element: &Element, size: &LabelSize, dpi: u32) -> Element {
    let frame = &element.frame;
    let px_x = |percent: f64| percent_to_pixels(percent, size.width, dpi);
    let px_y = |percent: f64| percent_to_pixels(percent, size.height, dpi);
    let pt = |points: f64| points_to_pixels(points, dpi);

    let left = px_x(frame.x);
    let top = px_y(frame.y);
    let mut next = element.clone();
    next.frame.x = left as f64;
    next.frame.y = top as f64;
    next.frame.width = (px_x(frame.x + frame.width) - left) as f64;
    next.frame.height = (px_y(frame.y + frame.height) - top) as f64;

    next.kind = match &element.kind {
        ElementKind::Text(text) => {
            let mut text = text.clone();
            text.font_size = pt(text.font_size);
            text.letter_spacing = text.letter_spacing.map(pt);
            ElementKind::Text(text)
        }
        ElementKind::Shape(shape) => {
            let mut shape = shape.clone();
            shape.stroke_width = pt(shape.stroke_width);
            shape.corner_radius = pt(shape.corner_radius);
            ElementKind::Shape(shape)
        }
        ElementKind::Line(line) => {
            let mut line = line.clone();
            line.x2 = px_x(line.x2) as f64;
            line.y2 = px_y(line.y2) as f64;
            line.stroke_width = pt(line.stroke_width);
            ElementKind::Line(line)
        }
        ElementKind::Barcode(_) | ElementKind::QrCode(_) | ElementKind::Image(_) => {
            element.kind.clone()
        }
    };
    next
}

impl LabelDocument {
    /// Compile this design to pixel space. See [`compile_for_print`].
    pub fn compile(&self, dpi: u32) -> PrintDocument {
        compile_for_print(self, dpi)
    }

    /// Resolve bindings and compile. See [`render_for_print`].
    pub fn render(&self, context: &DataContext, dpi: u32) -> PrintDocument {
        render_for_print(self, context, dpi)
    }
}
