//! # Label Pipeline Tests
//!
//! End-to-end runs through the public API: design, save, load, bind,
//! compile and preflight, the way a host application drives the engine.

use labelforge::binding::{
    DataContext, default_catalog, resolve_document, sample_context, unknown_bindings,
};
use labelforge::compile::compile_for_print;
use labelforge::document::{
    BarcodeElement, ElementDraft, ElementKind, Frame, LabelDocument, LabelSize, Symbology,
    TextElement, export_label_design, import_label_design,
};
use labelforge::geometry::{AlignMode, Point};
use labelforge::preflight::{Issue, preflight};
use labelforge::printer::PrinterConfig;
use labelforge::templates::{TemplateLibrary, instantiate_template};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn location_label() -> LabelDocument {
    let (document, _) = LabelDocument::new(LabelSize::default()).add_draft(ElementDraft::new(
        Frame::new(0.0, 0.0, 100.0, 100.0),
        ElementKind::Text(TextElement::bound("location.full")),
    ));
    document
}

fn location_data() -> DataContext {
    DataContext::from(json!({"location": {"full": "WH01-A01-S01-01"}}))
}

fn text_content(kind: &ElementKind) -> &str {
    match kind {
        ElementKind::Text(text) => &text.content,
        other => panic!("expected text, got {:?}", other),
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[test]
fn test_location_label_at_203_dpi() {
    let print = location_label().render(&location_data(), PrinterConfig::THERMAL_203.dpi);

    assert_eq!((print.width, print.height), (406, 203));
    assert_eq!(print.elements.len(), 1);
    assert_eq!(text_content(&print.elements[0].kind), "WH01-A01-S01-01");

    let frame = &print.elements[0].frame;
    assert_eq!((frame.x, frame.y, frame.width, frame.height), (0.0, 0.0, 406.0, 203.0));
}

#[test]
fn test_same_design_every_printer() {
    let design = location_label();
    let snapshot = design.clone();
    let data = location_data();
    let expected = [(203, 406, 203), (300, 600, 300), (600, 1200, 600)];
    for (preset, (dpi, width, height)) in PrinterConfig::presets().iter().zip(expected) {
        let print = design.render(&data, preset.dpi);
        assert_eq!(print.dpi, dpi);
        assert_eq!((print.width, print.height), (width, height));
        assert_eq!(print.elements[0].frame.width as i64, width);
    }
    // the source design is untouched
    assert_eq!(design, snapshot);
}

#[test]
fn test_save_load_then_print() {
    let design = location_label();
    let loaded = import_label_design(&export_label_design(&design)).expect("exported design imports");
    assert_eq!(loaded, design);

    let print = compile_for_print(&resolve_document(&loaded, &location_data()), 300);
    assert_eq!(text_content(&print.elements[0].kind), "WH01-A01-S01-01");
}

#[test]
fn test_print_document_json_shape() {
    let print = location_label().render(&location_data(), 203);
    let value: serde_json::Value = serde_json::from_str(&print.to_json().unwrap()).unwrap();
    assert_eq!(value["dpi"], 203);
    assert_eq!(value["width"], 406);
    assert_eq!(value["elements"][0]["type"], "text");
    assert_eq!(value["elements"][0]["content"], "WH01-A01-S01-01");
    assert_eq!(value["elements"][0]["isVariable"], false);
}

#[test]
fn test_missing_data_keeps_token_and_preflight_reports_it() {
    let resolved = resolve_document(&location_label(), &DataContext::new());
    assert_eq!(text_content(&resolved.elements[0].kind), "{{location.full}}");

    let issues = preflight(&resolved);
    assert_eq!(issues.len(), 1);
    assert!(matches!(&issues[0], Issue::UnresolvedBinding { text, .. } if text == "{{location.full}}"));
}

// ============================================================================
// IMPORT SENTINELS
// ============================================================================

#[test]
fn test_import_rejects_bad_files() {
    assert_eq!(import_label_design("not json"), None);
    assert_eq!(import_label_design(r#"{"elements":[]}"#), None);
    assert_eq!(import_label_design(""), None);
}

// ============================================================================
// TEMPLATES
// ============================================================================

#[test]
fn test_template_instances_have_disjoint_ids() {
    let library = TemplateLibrary::built_in();
    for template in library.templates() {
        let (first, size) = instantiate_template(template);
        let (second, _) = instantiate_template(template);
        assert_eq!(size, template.size);
        let first_ids: HashSet<_> = first.iter().map(|e| e.id.clone()).collect();
        assert!(second.iter().all(|e| !first_ids.contains(&e.id)), "{}", template.id);
    }
}

#[test]
fn test_built_in_templates_preview_cleanly() {
    let catalog = default_catalog();
    let context = sample_context(&catalog);
    for template in TemplateLibrary::built_in().templates() {
        let document = LabelDocument::from_template(template);
        assert_eq!(unknown_bindings(&document, &catalog), Vec::<String>::new());
        let resolved = resolve_document(&document, &context);
        assert_eq!(preflight(&resolved), vec![], "{}", template.id);
    }
}

#[test]
fn test_location_template_barcode_is_sanitized() {
    let library = TemplateLibrary::built_in();
    let document = LabelDocument::from_template(library.get("location-2x1").unwrap());
    let print = document.render(&location_data(), 203);
    let barcode = print
        .elements
        .iter()
        .find_map(|e| match &e.kind {
            ElementKind::Barcode(b) => Some(b),
            _ => None,
        })
        .expect("location template has a barcode");
    assert_eq!(barcode.value, "WH01A01S0101");
}

// ============================================================================
// EDITING SESSION
// ============================================================================

#[test]
fn test_editing_session() {
    let document = LabelDocument::new(LabelSize::default());
    let (document, title) = document.add_draft(ElementDraft::new(
        Frame::new(30.0, 10.0, 40.0, 20.0),
        ElementKind::Text(TextElement::new("BIN")),
    ));
    let (document, code) = document.add_draft(ElementDraft::new(
        Frame::new(12.0, 40.0, 60.0, 40.0),
        ElementKind::Barcode(BarcodeElement::new("A01", Symbology::Code39)),
    ));

    let document = document.align_selection(&[title.clone(), code.clone()], AlignMode::Left);
    assert_eq!(document.element(&title).unwrap().frame.x, 12.0);
    assert_eq!(document.element(&code).unwrap().frame.x, 12.0);

    let document = document.apply_move(&title, 1.0, 1.0).unwrap();
    let document = document.snap_element(&title).unwrap();
    let frame = &document.element(&title).unwrap().frame;
    assert_eq!((frame.x, frame.y), (15.0, 10.0));

    let (document, copy) = document.duplicate_element(&code, 5.0, 5.0).unwrap();
    assert_eq!(document.elements.len(), 3);
    assert_ne!(copy, code);

    let hit = document.element_at(Point::new(70.0, 80.0)).unwrap();
    assert_eq!(hit.id, copy);

    let document = document.delete_element(&copy).unwrap();
    let round_trip = import_label_design(&export_label_design(&document)).unwrap();
    assert_eq!(round_trip, document);
}
