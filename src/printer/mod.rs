//! # Printer Module
//!
//! Output resolutions and unit conversion for the print compiler.
//!
//! ## Modules
//!
//! - [`config`]: Printer DPI presets
//! - [`units`]: Inch, point, percent and pixel conversion

pub mod config;
pub mod units;

pub use config::{PrinterConfig, Technology};
pub use units::{
    ScreenMapping, inches_to_pixels, percent_to_pixels, pixels_to_inches, points_to_pixels,
};
