//! Element and document struct types for the label model.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and the JSON design file format. Field names
//! are camelCase on the wire.
//!
//! Each element kind implements [`ElementMeta`] to declare its display label
//! and editor default. This metadata feeds the host's toolbar.
//!
//! ## Design space
//!
//! Element geometry (`x`, `y`, `width`, `height`, and a line's `x2`, `y2`) is
//! expressed in **percent of the label** on each axis: `x = 50` is the
//! horizontal middle of the label whatever its physical size, zoom level or
//! screen DPI. Font sizes, stroke widths and corner radii are in points.

use serde::{Deserialize, Serialize};

/// Metadata that every element kind struct must provide.
///
/// The label and editor default live next to each struct definition,
/// so adding a new element kind is self-contained: implement this trait
/// and the compiler will guide you to the remaining exhaustive matches
/// in `ElementKind`.
pub trait ElementMeta: Sized {
    /// Human-readable display label (e.g. "QR Code").
    fn label() -> &'static str;

    /// Sensible starter value for a freshly placed toolbar element.
    ///
    /// Distinct from `Default`: editor defaults carry example content
    /// so new elements are immediately visible, not empty.
    fn editor_default() -> Self;

    /// Starter `(width, height)` in percent of the label.
    fn default_extent() -> (f64, f64) {
        (30.0, 20.0)
    }
}

/// Element kinds whose content can be bound to a data field.
pub trait Bindable {
    /// The dotted data-field path, if this element is a variable.
    fn bound_field(&self) -> Option<&str>;
}

fn default_true() -> bool {
    true
}

// ============================================================================
// FRAME (common geometry)
// ============================================================================

/// Geometry and state shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Ignored for lines.
    #[serde(default)]
    pub width: f64,
    /// Ignored for lines.
    #[serde(default)]
    pub height: f64,
    /// Clockwise rotation in degrees. Applied by the renderer only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: None,
            locked: false,
            visible: true,
        }
    }
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

fn default_font_size() -> f64 {
    12.0
}

fn default_font_family() -> String {
    "Arial".into()
}

fn default_color() -> String {
    "#000000".into()
}

/// Text element: static content or a value bound to a data field.
///
/// Static `content` may itself contain `{{dotted.path}}` tokens, which are
/// substituted at print time. When `isVariable` is set, the whole content is
/// taken from `dataField` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    /// Font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub align: TextAlign,
    /// Line height as a multiple of the font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Extra spacing between glyphs, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl Default for TextElement {
    fn default() -> Self {
        Self {
            content: String::new(),
            is_variable: false,
            data_field: None,
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: FontWeight::Normal,
            color: default_color(),
            align: TextAlign::Left,
            line_height: None,
            letter_spacing: None,
        }
    }
}

impl ElementMeta for TextElement {
    fn label() -> &'static str {
        "Text"
    }
    fn editor_default() -> Self {
        Self {
            content: "Sample Text".into(),
            ..Default::default()
        }
    }
    fn default_extent() -> (f64, f64) {
        (40.0, 15.0)
    }
}

impl Bindable for TextElement {
    fn bound_field(&self) -> Option<&str> {
        if self.is_variable { self.data_field.as_deref() } else { None }
    }
}

impl TextElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// A text element whose content comes from `field`.
    pub fn bound(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            content: format!("{{{{{}}}}}", field),
            is_variable: true,
            data_field: Some(field),
            ..Default::default()
        }
    }

    pub fn font_size(mut self, points: f64) -> Self {
        self.font_size = points;
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

// ============================================================================
// BARCODE
// ============================================================================

/// Linear barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbology {
    #[default]
    Code128,
    Code39,
    Ean13,
    Upc,
}

/// Placement of the human-readable text of a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    #[default]
    Bottom,
}

/// Linear barcode element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeElement {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    #[serde(default)]
    pub symbology: Symbology,
    #[serde(default = "default_true")]
    pub show_text: bool,
    #[serde(default)]
    pub text_position: TextPosition,
}

impl ElementMeta for BarcodeElement {
    fn label() -> &'static str {
        "Barcode"
    }
    fn editor_default() -> Self {
        Self {
            value: "123456789".into(),
            show_text: true,
            ..Default::default()
        }
    }
    fn default_extent() -> (f64, f64) {
        (60.0, 25.0)
    }
}

impl Bindable for BarcodeElement {
    fn bound_field(&self) -> Option<&str> {
        if self.is_variable { self.data_field.as_deref() } else { None }
    }
}

impl BarcodeElement {
    pub fn new(value: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            value: value.into(),
            symbology,
            show_text: true,
            ..Default::default()
        }
    }

    /// A barcode whose value comes from `field`.
    pub fn bound(field: impl Into<String>, symbology: Symbology) -> Self {
        Self {
            is_variable: true,
            data_field: Some(field.into()),
            symbology,
            show_text: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// QR CODE
// ============================================================================

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

/// QR code element.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeElement {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_field: Option<String>,
    #[serde(default)]
    pub error_correction_level: ErrorCorrectionLevel,
}

impl ElementMeta for QrCodeElement {
    fn label() -> &'static str {
        "QR Code"
    }
    fn editor_default() -> Self {
        Self {
            value: "https://example.com".into(),
            ..Default::default()
        }
    }
    fn default_extent() -> (f64, f64) {
        (25.0, 25.0)
    }
}

impl Bindable for QrCodeElement {
    fn bound_field(&self) -> Option<&str> {
        if self.is_variable { self.data_field.as_deref() } else { None }
    }
}

impl QrCodeElement {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// A QR code whose value comes from `field`.
    pub fn bound(field: impl Into<String>) -> Self {
        Self {
            is_variable: true,
            data_field: Some(field.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// IMAGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Contain,
    Cover,
    Fill,
}

/// Raster image element. The source is fetched by the renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub object_fit: ObjectFit,
}

impl ElementMeta for ImageElement {
    fn label() -> &'static str {
        "Image"
    }
    fn editor_default() -> Self {
        Self::default()
    }
}

// ============================================================================
// SHAPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Circle,
    RoundedRectangle,
}

fn default_fill() -> String {
    "transparent".into()
}

fn default_stroke_width() -> f64 {
    1.0
}

/// Vector shape element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(default)]
    pub shape_type: ShapeType,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_color")]
    pub stroke: String,
    /// Stroke width in points.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Corner radius in points (rounded rectangles only).
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for ShapeElement {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            fill: default_fill(),
            stroke: default_color(),
            stroke_width: default_stroke_width(),
            corner_radius: 0.0,
        }
    }
}

impl ElementMeta for ShapeElement {
    fn label() -> &'static str {
        "Shape"
    }
    fn editor_default() -> Self {
        Self::default()
    }
}

impl ShapeElement {
    pub fn new(shape_type: ShapeType) -> Self {
        Self {
            shape_type,
            ..Default::default()
        }
    }
}

// ============================================================================
// LINE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Straight line from the frame origin `(x, y)` to `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub x2: f64,
    pub y2: f64,
    #[serde(default = "default_color")]
    pub stroke: String,
    /// Stroke width in points.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
}

impl Default for LineElement {
    fn default() -> Self {
        Self {
            x2: 0.0,
            y2: 0.0,
            stroke: default_color(),
            stroke_width: default_stroke_width(),
            stroke_style: StrokeStyle::Solid,
        }
    }
}

impl ElementMeta for LineElement {
    fn label() -> &'static str {
        "Line"
    }
    fn editor_default() -> Self {
        // Endpoints are absolute; see `ElementDraft::editor_default`.
        Self::default()
    }
    fn default_extent() -> (f64, f64) {
        (50.0, 0.0)
    }
}

impl LineElement {
    pub fn to(x2: f64, y2: f64) -> Self {
        Self {
            x2,
            y2,
            ..Default::default()
        }
    }
}

// ============================================================================
// LABEL SIZE & SETTINGS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Shipping,
    Product,
    Location,
    Pallet,
    #[default]
    Custom,
}

/// Named physical label dimensions, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub category: SizeCategory,
}

impl LabelSize {
    pub fn new(name: impl Into<String>, width: f64, height: f64, category: SizeCategory) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            category,
        }
    }

    /// Whether both sides are strictly positive (and finite).
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Common stock sizes offered by the size picker.
    pub fn presets() -> Vec<LabelSize> {
        vec![
            Self::new("2\" x 1\" Location", 2.0, 1.0, SizeCategory::Location),
            Self::new("3\" x 1\" Location", 3.0, 1.0, SizeCategory::Location),
            Self::new("2.25\" x 1.25\" Product", 2.25, 1.25, SizeCategory::Product),
            Self::new("4\" x 2\" Product", 4.0, 2.0, SizeCategory::Product),
            Self::new("4\" x 6\" Shipping", 4.0, 6.0, SizeCategory::Shipping),
            Self::new("4\" x 6\" Pallet", 4.0, 6.0, SizeCategory::Pallet),
        ]
    }
}

impl Default for LabelSize {
    fn default() -> Self {
        Self::new("2\" x 1\" Location", 2.0, 1.0, SizeCategory::Location)
    }
}

/// Display units for rulers and the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Inches,
    Mm,
}

impl Units {
    /// Convert a length in inches to these units.
    pub fn from_inches(self, inches: f64) -> f64 {
        match self {
            Units::Inches => inches,
            Units::Mm => inches * 25.4,
        }
    }

    /// Convert a length in these units to inches.
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            Units::Inches => value,
            Units::Mm => value / 25.4,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Units::Inches => "in",
            Units::Mm => "mm",
        }
    }
}

fn default_grid_size() -> f64 {
    5.0
}

/// Editor display settings stored with the design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Grid pitch in design-space percent. Must be > 0.
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    #[serde(default = "default_true")]
    pub show_grid: bool,
    #[serde(default = "default_true")]
    pub show_rulers: bool,
    #[serde(default)]
    pub units: Units,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            show_grid: true,
            show_rulers: true,
            units: Units::Inches,
        }
    }
}
