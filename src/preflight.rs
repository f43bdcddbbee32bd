//! # Print Preflight
//!
//! Checks a resolved design before it goes to the renderer and reports what
//! would print wrong. Nothing here fails: issues are returned for the host
//! (or the CLI) to show, and printing may proceed regardless.
//!
//! Barcode values are checked by encoding them with `barcoders`; QR payloads
//! are checked against the symbol capacity for their correction level with
//! `qrcode`. Neither result is kept; rasterizing is the renderer's job.

use std::fmt;

use barcoders::sym::code39::Code39;
use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;
use qrcode::{EcLevel, QrCode};
use serde::Serialize;

use crate::binding::has_unresolved_tokens;
use crate::document::{ElementId, ElementKind, ErrorCorrectionLevel, LabelDocument, Symbology};
use crate::geometry::element_bounds;

/// Slack for edges that sit on the label border.
const EDGE_TOLERANCE: f64 = 1e-6;

/// One problem found on one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    /// A `{{token}}` survived data binding.
    UnresolvedBinding { element: ElementId, text: String },
    /// A barcode or QR code has nothing to encode.
    EmptyValue { element: ElementId },
    /// The symbology cannot encode the value.
    UnencodableBarcode {
        element: ElementId,
        symbology: Symbology,
        value: String,
        reason: String,
    },
    /// The payload does not fit a QR symbol at this correction level.
    QrCapacityExceeded {
        element: ElementId,
        level: ErrorCorrectionLevel,
        length: usize,
    },
    /// A visible element reaches past the label edge.
    OutOfBounds { element: ElementId },
}

impl Issue {
    pub fn element(&self) -> &ElementId {
        match self {
            Issue::UnresolvedBinding { element, .. }
            | Issue::EmptyValue { element }
            | Issue::UnencodableBarcode { element, .. }
            | Issue::QrCapacityExceeded { element, .. }
            | Issue::OutOfBounds { element } => element,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::UnresolvedBinding { element, text } => {
                write!(f, "{}: unresolved data field in \"{}\"", element, text)
            }
            Issue::EmptyValue { element } => write!(f, "{}: nothing to encode", element),
            Issue::UnencodableBarcode {
                element,
                symbology,
                value,
                reason,
            } => write!(
                f,
                "{}: {:?} cannot encode \"{}\" ({})",
                element, symbology, value, reason
            ),
            Issue::QrCapacityExceeded {
                element,
                level,
                length,
            } => write!(
                f,
                "{}: {} bytes do not fit a QR code at level {:?}",
                element, length, level
            ),
            Issue::OutOfBounds { element } => write!(f, "{}: extends past the label edge", element),
        }
    }
}

/// Check `document` (normally already resolved) for print problems.
///
/// Hidden elements are skipped.
pub fn preflight(document: &LabelDocument) -> Vec<Issue> {
    let mut issues = Vec::new();
    for element in document.elements.iter().filter(|e| e.frame.visible) {
        let id = &element.id;

        let b = element_bounds(element);
        if b.left < -EDGE_TOLERANCE
            || b.top < -EDGE_TOLERANCE
            || b.right > 100.0 + EDGE_TOLERANCE
            || b.bottom > 100.0 + EDGE_TOLERANCE
        {
            issues.push(Issue::OutOfBounds { element: id.clone() });
        }

        match &element.kind {
            ElementKind::Text(text) => {
                check_tokens(id, &text.content, &mut issues);
            }
            ElementKind::Barcode(barcode) => {
                if check_tokens(id, &barcode.value, &mut issues) {
                    continue;
                }
                if barcode.value.is_empty() {
                    issues.push(Issue::EmptyValue { element: id.clone() });
                } else if let Err(reason) = encode_barcode(barcode.symbology, &barcode.value) {
                    issues.push(Issue::UnencodableBarcode {
                        element: id.clone(),
                        symbology: barcode.symbology,
                        value: barcode.value.clone(),
                        reason,
                    });
                }
            }
            ElementKind::QrCode(qr) => {
                if check_tokens(id, &qr.value, &mut issues) {
                    continue;
                }
                if qr.value.is_empty() {
                    issues.push(Issue::EmptyValue { element: id.clone() });
                } else if QrCode::with_error_correction_level(&qr.value, ec_level(qr.error_correction_level)).is_err() {
                    issues.push(Issue::QrCapacityExceeded {
                        element: id.clone(),
                        level: qr.error_correction_level,
                        length: qr.value.len(),
                    });
                }
            }
            ElementKind::Image(image) => {
                check_tokens(id, &image.src, &mut issues);
            }
            ElementKind::Shape(_) | ElementKind::Line(_) => {}
        }
    }
    issues
}

/// Record an unresolved token. Returns whether one was found.
fn check_tokens(id: &ElementId, text: &str, issues: &mut Vec<Issue>) -> bool {
    if has_unresolved_tokens(text) {
        issues.push(Issue::UnresolvedBinding {
            element: id.clone(),
            text: text.to_string(),
        });
        true
    } else {
        false
    }
}

fn ec_level(level: ErrorCorrectionLevel) -> EcLevel {
    match level {
        ErrorCorrectionLevel::L => EcLevel::L,
        ErrorCorrectionLevel::M => EcLevel::M,
        ErrorCorrectionLevel::Q => EcLevel::Q,
        ErrorCorrectionLevel::H => EcLevel::H,
    }
}

/// Try to encode `value`; the error is a human-readable reason.
fn encode_barcode(symbology: Symbology, value: &str) -> Result<(), String> {
    let result = match symbology {
        // Character Set B (Ɓ) covers printable ASCII.
        Symbology::Code128 => Code128::new(&format!("\u{0181}{}", value)).map(|_| ()),
        Symbology::Code39 => Code39::new(value).map(|_| ()),
        Symbology::Ean13 => EAN13::new(value).map(|_| ()),
        Symbology::Upc => {
            if !matches!(value.len(), 11 | 12) || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("UPC-A needs 11 or 12 digits, got \"{}\"", value));
            }
            let (body, check) = value.split_at(11);
            if !check.is_empty() && check != upc_check_digit(body).to_string() {
                return Err(format!("check digit should be {}", upc_check_digit(body)));
            }
            // UPC-A is EAN-13 with a leading zero; barcoders appends the check digit.
            EAN13::new(&format!("0{}", body)).map(|_| ())
        }
    };
    result.map_err(|e| e.to_string())
}

/// Modulo-10 check digit over the 11 data digits of a UPC-A code.
fn upc_check_digit(body: &str) -> u32 {
    let sum: u32 = body
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { d })
        .sum();
    (10 - sum % 10) % 10
}
