//! # Data Binding Engine
//!
//! Resolves `{{dotted.path}}` tokens against a runtime data context.
//!
//! ```
//! use labelforge::binding::{DataContext, replace_data_fields};
//! use serde_json::json;
//!
//! let ctx = DataContext::from(json!({"location": {"full": "WH01-A01-S01-01"}}));
//! assert_eq!(replace_data_fields("LOC {{location.full}}", &ctx), "LOC WH01-A01-S01-01");
//! assert_eq!(replace_data_fields("{{missing.x}}", &ctx), "{{missing.x}}");
//! ```
//!
//! ## Resolution rules
//!
//! - A token is replaced only when every path segment exists and the final
//!   value is a string, number or boolean. Anything else (a missing key,
//!   `null`, an object or an array) leaves the whole token verbatim, braces
//!   included, so broken bindings stay visible on the printed label.
//! - Bound barcode and QR values are reduced to ASCII alphanumerics after
//!   resolution; scan codes cannot carry arbitrary punctuation reliably.

pub mod catalog;

pub use catalog::{DataField, FieldCategory, default_catalog, sample_context, unknown_bindings};

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::document::{Bindable, Element, ElementKind, LabelDocument};
use crate::error::LabelError;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}]+)\}\}").expect("token pattern is valid")
});

/// Nested lookup structure keyed by category (`location`, `product`,
/// `pallet`, `inventory`, `system`). Populated by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataContext(Map<String, Value>);

impl From<Map<String, Value>> for DataContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for DataContext {
    /// Non-object values produce an empty context.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl DataContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a context from JSON text. The top level must be an object.
    pub fn from_json(json: &str) -> Result<Self, LabelError> {
        Ok(serde_json::from_str(json)?)
    }

    fn walk(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolve a dotted path to display text.
    pub fn lookup(&self, path: &str) -> Option<String> {
        match self.walk(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(number_text(n)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Object(_) | Value::Array(_) => None,
        }
    }

    /// Set a value at a dotted path, creating intermediate objects.
    pub fn insert(&mut self, path: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut map = &mut self.0;
        for segment in segments {
            let entry = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            map = match entry {
                Value::Object(inner) => inner,
                _ => return,
            };
        }
        map.insert(last.to_string(), value.into());
    }

    /// Add built-in `system.*` date fields for `now`.
    ///
    /// Values already present in the context win over the built-ins.
    pub fn with_system_fields(&self, now: NaiveDateTime) -> Self {
        let mut next = self.clone();
        for (key, value) in system_fields(now) {
            if next.walk(&key).is_none() {
                next.insert(&key, value);
            }
        }
        next
    }
}

/// Built-in datetime fields under the `system` category.
fn system_fields(now: NaiveDateTime) -> Vec<(String, String)> {
    vec![
        ("system.date".into(), now.format("%m/%d/%Y").to_string()), // 01/27/2026
        ("system.time".into(), now.format("%H:%M").to_string()), // 09:30
        (
            "system.datetime".into(),
            now.format("%m/%d/%Y %H:%M").to_string(),
        ),
        ("system.year".into(), now.format("%Y").to_string()),
        ("system.isoDate".into(), now.format("%Y-%m-%d").to_string()), // 2026-01-27
    ]
}

/// Integral floats print without a fraction (`412.0` as `412`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn token(path: &str) -> String {
    format!("{{{{{}}}}}", path)
}

/// Replace every `{{dotted.path}}` token in `text` with its value.
///
/// Unresolvable tokens are left exactly as written. Never fails.
pub fn replace_data_fields(text: &str, context: &DataContext) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            context
                .lookup(caps[1].trim())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Reduce a scan-code value to ASCII letters and digits.
pub fn sanitize_scan_value(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Resolve a bound scan-code field; an unresolved binding keeps its token.
fn resolve_scan_field(field: &str, context: &DataContext) -> String {
    context
        .lookup(field)
        .map(|v| sanitize_scan_value(&v))
        .unwrap_or_else(|| token(field))
}

/// A copy of `element` with every binding and token substituted.
///
/// Resolved elements carry literal content and no binding.
pub fn resolve_element(element: &Element, context: &DataContext) -> Element {
    let kind = match &element.kind {
        ElementKind::Text(text) => {
            let mut next = text.clone();
            next.content = match text.bound_field() {
                Some(field) => context.lookup(field).unwrap_or_else(|| token(field)),
                None => replace_data_fields(&text.content, context),
            };
            next.is_variable = false;
            next.data_field = None;
            ElementKind::Text(next)
        }
        ElementKind::Barcode(barcode) => {
            let mut next = barcode.clone();
            next.value = match barcode.bound_field() {
                Some(field) => resolve_scan_field(field, context),
                None => replace_data_fields(&barcode.value, context),
            };
            next.is_variable = false;
            next.data_field = None;
            ElementKind::Barcode(next)
        }
        ElementKind::QrCode(qr) => {
            let mut next = qr.clone();
            next.value = match qr.bound_field() {
                Some(field) => resolve_scan_field(field, context),
                None => replace_data_fields(&qr.value, context),
            };
            next.is_variable = false;
            next.data_field = None;
            ElementKind::QrCode(next)
        }
        ElementKind::Image(image) => {
            let mut next = image.clone();
            next.src = replace_data_fields(&image.src, context);
            ElementKind::Image(next)
        }
        ElementKind::Shape(_) | ElementKind::Line(_) => element.kind.clone(),
    };
    element.with_kind(kind)
}

/// A copy of `document` with every element resolved.
pub fn resolve_document(document: &LabelDocument, context: &DataContext) -> LabelDocument {
    LabelDocument {
        elements: document
            .elements
            .iter()
            .map(|e| resolve_element(e, context))
            .collect(),
        ..document.clone()
    }
}

/// Every data-field path a document references, through bindings or tokens.
pub fn referenced_fields(document: &LabelDocument) -> BTreeSet<String> {
    let mut fields = BTreeSet::new();
    let mut scan = |text: &str| {
        for caps in TOKEN.captures_iter(text) {
            fields.insert(caps[1].trim().to_string());
        }
    };
    let mut bound = Vec::new();
    for element in &document.elements {
        match &element.kind {
            ElementKind::Text(t) => match t.bound_field() {
                Some(f) => bound.push(f.to_string()),
                None => scan(&t.content),
            },
            ElementKind::Barcode(b) => match b.bound_field() {
                Some(f) => bound.push(f.to_string()),
                None => scan(&b.value),
            },
            ElementKind::QrCode(q) => match q.bound_field() {
                Some(f) => bound.push(f.to_string()),
                None => scan(&q.value),
            },
            ElementKind::Image(i) => scan(&i.src),
            ElementKind::Shape(_) | ElementKind::Line(_) => {}
        }
    }
    fields.extend(bound);
    fields
}

/// Whether `text` still contains a `{{token}}`.
pub fn has_unresolved_tokens(text: &str) -> bool {
    TOKEN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        BarcodeElement, ElementDraft, Frame, ImageElement, QrCodeElement, Symbology, TextElement,
        create_element,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn ctx(value: Value) -> DataContext {
        DataContext::from(value)
    }

    fn element(kind: ElementKind) -> Element {
        create_element(ElementDraft::new(Frame::new(0.0, 0.0, 10.0, 10.0), kind))
    }

    #[test]
    fn test_replace_number() {
        assert_eq!(replace_data_fields("{{a.b}}", &ctx(json!({"a": {"b": 5}}))), "5");
    }

    #[test]
    fn test_integral_float_prints_without_fraction() {
        let c = ctx(json!({"a": {"b": 5.0, "w": 412.0, "p": 4.99, "n": -3.0}}));
        assert_eq!(replace_data_fields("{{a.b}}", &c), "5");
        assert_eq!(replace_data_fields("{{a.w}} lb", &c), "412 lb");
        assert_eq!(replace_data_fields("{{a.p}}", &c), "4.99");
        assert_eq!(replace_data_fields("{{a.n}}", &c), "-3");
    }

    #[test]
    fn test_missing_token_left_verbatim() {
        assert_eq!(replace_data_fields("{{missing.x}}", &DataContext::new()), "{{missing.x}}");
    }

    #[test]
    fn test_partial_path_left_verbatim() {
        let c = ctx(json!({"product": {"sku": "A-1"}}));
        assert_eq!(
            replace_data_fields("{{product.sku.extra}} / {{product}}", &c),
            "{{product.sku.extra}} / {{product}}"
        );
    }

    #[test]
    fn test_mixed_resolved_and_unresolved() {
        let c = ctx(json!({"product": {"sku": "A-1", "qty": 12, "hazmat": false}}));
        assert_eq!(
            replace_data_fields("SKU {{product.sku}} x{{product.qty}} {{product.lot}} {{product.hazmat}}", &c),
            "SKU A-1 x12 {{product.lot}} false"
        );
    }

    #[test]
    fn test_null_is_unresolved() {
        let c = ctx(json!({"pallet": {"number": null}}));
        assert_eq!(replace_data_fields("{{pallet.number}}", &c), "{{pallet.number}}");
    }

    #[test]
    fn test_whitespace_inside_braces() {
        let c = ctx(json!({"a": {"b": "x"}}));
        assert_eq!(replace_data_fields("{{ a.b }}", &c), "x");
    }

    #[test]
    fn test_array_index_segment() {
        let c = ctx(json!({"inventory": {"lots": ["L1", "L2"]}}));
        assert_eq!(replace_data_fields("{{inventory.lots.1}}", &c), "L2");
        assert_eq!(replace_data_fields("{{inventory.lots.9}}", &c), "{{inventory.lots.9}}");
    }

    #[test]
    fn test_text_without_tokens_unchanged() {
        assert_eq!(replace_data_fields("plain {text}", &DataContext::new()), "plain {text}");
    }

    #[test]
    fn test_sanitize_scan_value() {
        assert_eq!(sanitize_scan_value("WH01-A01 S01/01"), "WH01A01S0101");
        assert_eq!(sanitize_scan_value("éa1"), "a1");
    }

    #[test]
    fn test_resolve_bound_text() {
        let c = ctx(json!({"location": {"full": "WH01-A01-S01-01"}}));
        let resolved = resolve_element(&element(ElementKind::Text(TextElement::bound("location.full"))), &c);
        match resolved.kind {
            ElementKind::Text(t) => {
                assert_eq!(t.content, "WH01-A01-S01-01");
                assert!(!t.is_variable);
                assert_eq!(t.data_field, None);
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_bound_barcode_is_sanitized() {
        let c = ctx(json!({"location": {"full": "WH01-A01-S01-01"}}));
        let source = element(ElementKind::Barcode(BarcodeElement::bound("location.full", Symbology::Code128)));
        match resolve_element(&source, &c).kind {
            ElementKind::Barcode(b) => assert_eq!(b.value, "WH01A01S0101"),
            other => panic!("expected barcode, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_bound_qr_keeps_token() {
        let source = element(ElementKind::QrCode(QrCodeElement::bound("pallet.number")));
        match resolve_element(&source, &DataContext::new()).kind {
            ElementKind::QrCode(q) => assert_eq!(q.value, "{{pallet.number}}"),
            other => panic!("expected qrcode, got {:?}", other),
        }
    }

    #[test]
    fn test_static_barcode_value_not_sanitized() {
        let c = ctx(json!({"product": {"sku": "AB-12"}}));
        let source = element(ElementKind::Barcode(BarcodeElement::new("P-{{product.sku}}", Symbology::Code128)));
        match resolve_element(&source, &c).kind {
            ElementKind::Barcode(b) => assert_eq!(b.value, "P-AB-12"),
            other => panic!("expected barcode, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_image_src() {
        let c = ctx(json!({"product": {"image": "https://cdn/x.png"}}));
        let source = element(ElementKind::Image(ImageElement {
            src: "{{product.image}}".into(),
            ..Default::default()
        }));
        match resolve_element(&source, &c).kind {
            ElementKind::Image(i) => assert_eq!(i.src, "https://cdn/x.png"),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_document_leaves_source_untouched() {
        let (doc, id) = LabelDocument::default().add_draft(ElementDraft::new(
            Frame::new(0.0, 0.0, 50.0, 20.0),
            ElementKind::Text(TextElement::bound("location.full")),
        ));
        let resolved = resolve_document(&doc, &ctx(json!({"location": {"full": "A"}})));
        assert_ne!(resolved, doc);
        assert_eq!(resolved.element(&id).unwrap().frame, doc.element(&id).unwrap().frame);
        match &doc.element(&id).unwrap().kind {
            ElementKind::Text(t) => assert!(t.is_variable),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_insert_nested_and_lookup() {
        let mut c = DataContext::new();
        c.insert("system.user", "jdoe");
        c.insert("inventory.quantity", 48);
        assert_eq!(c.lookup("system.user").as_deref(), Some("jdoe"));
        assert_eq!(c.lookup("inventory.quantity").as_deref(), Some("48"));
    }

    #[test]
    fn test_system_fields_do_not_override() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 27)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let c = ctx(json!({"system": {"date": "custom"}})).with_system_fields(now);
        assert_eq!(c.lookup("system.date").as_deref(), Some("custom"));
        assert_eq!(c.lookup("system.time").as_deref(), Some("09:30"));
        assert_eq!(c.lookup("system.isoDate").as_deref(), Some("2026-01-27"));
        assert_eq!(c.lookup("system.year").as_deref(), Some("2026"));
    }

    #[test]
    fn test_from_json_requires_object() {
        assert!(DataContext::from_json(r#"{"a": {"b": 1}}"#).is_ok());
        assert!(DataContext::from_json("[1, 2]").is_err());
        assert!(DataContext::from_json("nope").is_err());
    }

    #[test]
    fn test_referenced_fields() {
        let doc = LabelDocument::default();
        let (doc, _) = doc.add_draft(ElementDraft::new(
            Frame::default(),
            ElementKind::Text(TextElement::new("{{product.name}} / {{ product.sku }}")),
        ));
        let (doc, _) = doc.add_draft(ElementDraft::new(
            Frame::default(),
            ElementKind::QrCode(QrCodeElement::bound("pallet.number")),
        ));
        let fields: Vec<String> = referenced_fields(&doc).into_iter().collect();
        assert_eq!(fields, ["pallet.number", "product.name", "product.sku"]);
    }
}
