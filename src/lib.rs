//! # Labelforge - Label Layout and Print Compiler
//!
//! Labelforge is the engine behind a warehouse label designer. It provides:
//!
//! - **Element model**: text, barcode, QR code, image, shape and line
//!   elements in an immutable label document
//! - **Geometry**: bounds, hit testing, grid snapping, alignment, distribution
//! - **Data binding**: `{{location.full}}`-style fields resolved from a data context
//! - **Print compiler**: design space to device pixels at any printer DPI
//! - **Templates**: reusable designs instantiated with fresh element ids
//!
//! ## Quick Start
//!
//! ```
//! use labelforge::{
//!     binding::DataContext,
//!     document::{ElementDraft, ElementKind, Frame, LabelDocument, LabelSize, TextElement},
//!     printer::PrinterConfig,
//! };
//! use serde_json::json;
//!
//! // A 2in x 1in location label with one bound text element
//! let (design, _id) = LabelDocument::new(LabelSize::default()).add_draft(ElementDraft::new(
//!     Frame::new(0.0, 0.0, 100.0, 100.0),
//!     ElementKind::Text(TextElement::bound("location.full")),
//! ));
//!
//! // Resolve data and compile for a 203 DPI thermal printer
//! let context = DataContext::from(json!({"location": {"full": "WH01-A01-S01-01"}}));
//! let print = design.render(&context, PrinterConfig::THERMAL_203.dpi);
//!
//! assert_eq!((print.width, print.height), (406, 203));
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`document`] | Element model, document transitions, design files |
//! | [`geometry`] | Bounds, snapping, alignment, distribution |
//! | [`binding`] | Data-field resolution and catalog |
//! | [`compile`] | Print format compiler |
//! | [`printer`] | DPI presets and unit conversion |
//! | [`templates`] | Template library |
//! | [`preflight`] | Pre-print checks |
//! | [`error`] | Error types |
//!
//! ## Design Space
//!
//! Element geometry is stored in percent of the label on each axis, so a
//! design survives zoom changes, screen DPI differences and label resizes.
//! Font sizes and stroke widths are in points.

pub mod binding;
pub mod compile;
pub mod document;
pub mod error;
pub mod geometry;
pub mod preflight;
pub mod printer;
pub mod templates;

// Re-exports for convenience
pub use compile::{PrintDocument, compile_for_print, render_for_print};
pub use document::{Element, LabelDocument, export_label_design, import_label_design};
pub use error::LabelError;
pub use printer::PrinterConfig;
