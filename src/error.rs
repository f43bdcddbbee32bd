//! # Error Types
//!
//! This module defines error types used throughout the labelforge library.

use thiserror::Error;

/// Main error type for labelforge operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// Label dimensions must be strictly positive
    #[error("Invalid label size: {width}x{height} in (both sides must be > 0)")]
    InvalidSize { width: f64, height: f64 },

    /// Grid size must be strictly positive
    #[error("Invalid grid size: {0} (must be > 0)")]
    InvalidGrid(f64),

    /// An element coordinate, extent or rotation is NaN or infinite
    #[error("Non-finite geometry on element {0}")]
    NonFiniteGeometry(String),

    /// Two elements share an id
    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    /// No element with the given id exists in the document
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// No template with the given id exists in the library
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Printer profile string could not be parsed
    #[error("Unknown printer: {0}")]
    UnknownPrinter(String),

    /// Design file is malformed or structurally incomplete
    #[error("Invalid design file: {0}")]
    InvalidDesign(String),

    /// JSON encoding/decoding error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
