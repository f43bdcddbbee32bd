//! # Printer Configuration
//!
//! Output resolutions for supported label printers. The print compiler takes
//! a bare DPI; these presets are what hosts and the CLI pick it from.
//!
//! | Preset | Technology | Resolution |
//! |--------|------------|------------|
//! | `thermal-203` | Direct/transfer thermal | 203 DPI |
//! | `thermal-300` | Direct/transfer thermal | 300 DPI |
//! | `laser-600` | Laser sheet labels | 600 DPI |
//!
//! ## Usage
//!
//! ```
//! use labelforge::printer::PrinterConfig;
//!
//! let config = PrinterConfig::parse("300").unwrap();
//! assert_eq!(config.dpi, 300);
//! assert_eq!(config.inches_to_dots(2.0), 600);
//! ```

use serde::Serialize;

use super::units;
use crate::error::LabelError;

/// Print head technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Thermal,
    Laser,
}

/// # Printer Configuration
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
///
/// For a 203 DPI thermal head:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   2in label   = 406 dots
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrinterConfig {
    /// Preset key (`thermal-203`)
    pub name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// Resolution in dots per inch
    pub dpi: u32,

    pub technology: Technology,
}

impl PrinterConfig {
    /// Standard 8 dots/mm thermal label printer.
    pub const THERMAL_203: Self = Self {
        name: "thermal-203",
        description: "Thermal 203 DPI",
        dpi: 203,
        technology: Technology::Thermal,
    };

    /// High resolution 12 dots/mm thermal label printer.
    pub const THERMAL_300: Self = Self {
        name: "thermal-300",
        description: "Thermal 300 DPI",
        dpi: 300,
        technology: Technology::Thermal,
    };

    /// Office laser printer on label sheets.
    pub const LASER_600: Self = Self {
        name: "laser-600",
        description: "Laser 600 DPI",
        dpi: 600,
        technology: Technology::Laser,
    };

    /// List all built-in presets.
    pub fn presets() -> &'static [PrinterConfig] {
        &[Self::THERMAL_203, Self::THERMAL_300, Self::LASER_600]
    }

    /// Parse a preset name or bare DPI (`"thermal-300"`, `"300"`, `"Laser 600 DPI"`).
    pub fn parse(s: &str) -> Result<Self, LabelError> {
        let key = s.trim().to_lowercase();
        Self::presets()
            .iter()
            .find(|p| {
                p.name == key || p.description.to_lowercase() == key || p.dpi.to_string() == key
            })
            .copied()
            .ok_or_else(|| {
                LabelError::UnknownPrinter(format!(
                    "'{}' (expected one of: {})",
                    s,
                    Self::presets()
                        .iter()
                        .map(|p| p.name)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f64 {
        self.dpi as f64 / 25.4
    }

    /// Convert millimeters to dots
    #[inline]
    pub fn mm_to_dots(&self, mm: f64) -> i64 {
        (mm * self.dots_per_mm()).round() as i64
    }

    /// Convert inches to dots
    #[inline]
    pub fn inches_to_dots(&self, inches: f64) -> i64 {
        units::inches_to_pixels(inches, self.dpi)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::THERMAL_203
    }
}

// ============================================================================
// TESTS
// ============================================================================
