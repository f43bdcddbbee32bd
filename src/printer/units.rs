//! Physical and device unit conversion.
//!
//! Three spaces meet here:
//!
//! - **design space**: percent of the label on each axis (element geometry)
//! - **physical space**: inches (label size), points (fonts and strokes)
//! - **device space**: pixels at a DPI, either the screen's (times zoom) or
//!   the printer's
//!
//! ```text
//! px      = round(inches * dpi)
//! inches  = px / dpi
//! font_px = pt * dpi / 72
//! ```

use crate::document::LabelSize;
use crate::geometry::Point;

/// Points per inch (PostScript point).
pub const POINTS_PER_INCH: f64 = 72.0;

/// Reference DPI of the on-screen editing canvas at 100% zoom.
pub const SCREEN_DPI: u32 = 96;

/// Convert inches to whole device pixels.
#[inline]
pub fn inches_to_pixels(inches: f64, dpi: u32) -> i64 {
    (inches * dpi as f64).round() as i64
}

/// Convert device pixels to inches.
#[inline]
pub fn pixels_to_inches(pixels: f64, dpi: u32) -> f64 {
    pixels / dpi as f64
}

/// Convert a point size (fonts, strokes) to device pixels. Not rounded.
#[inline]
pub fn points_to_pixels(points: f64, dpi: u32) -> f64 {
    points * dpi as f64 / POINTS_PER_INCH
}

/// Convert a design-space percentage of a physical extent to device pixels.
#[inline]
pub fn percent_to_pixels(percent: f64, extent_inches: f64, dpi: u32) -> i64 {
    inches_to_pixels(percent / 100.0 * extent_inches, dpi)
}

/// Mapping between the editing canvas on screen and design space.
///
/// Hosts report drag deltas in screen pixels; this turns them into
/// design-space percent deltas for `apply_move`, independent of zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    pub screen_dpi: u32,
    /// 1.0 = 100%.
    pub zoom: f64,
}

impl Default for ScreenMapping {
    fn default() -> Self {
        Self {
            screen_dpi: SCREEN_DPI,
            zoom: 1.0,
        }
    }
}

impl ScreenMapping {
    pub fn new(screen_dpi: u32, zoom: f64) -> Self {
        Self { screen_dpi, zoom }
    }

    fn pixels_per_inch(&self) -> f64 {
        self.screen_dpi as f64 * self.zoom
    }

    /// On-screen canvas size in (unrounded) screen pixels.
    pub fn canvas_size(&self, size: &LabelSize) -> (f64, f64) {
        (
            size.width * self.pixels_per_inch(),
            size.height * self.pixels_per_inch(),
        )
    }

    /// Convert a screen-pixel delta to a design-space delta.
    pub fn to_design_delta(&self, dx: f64, dy: f64, size: &LabelSize) -> (f64, f64) {
        let (w, h) = self.canvas_size(size);
        (dx / w * 100.0, dy / h * 100.0)
    }

    /// Convert a screen-pixel point (canvas-relative) to design space.
    pub fn to_design(&self, point: Point, size: &LabelSize) -> Point {
        let (x, y) = self.to_design_delta(point.x, point.y, size);
        Point::new(x, y)
    }

    /// Convert a design-space point to canvas-relative screen pixels.
    pub fn to_screen(&self, point: Point, size: &LabelSize) -> Point {
        let (w, h) = self.canvas_size(size);
        Point::new(point.x / 100.0 * w, point.y / 100.0 * h)
    }
}
