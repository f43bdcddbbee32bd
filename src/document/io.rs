//! Design file export and import.
//!
//! Import never fails loudly: anything that does not describe a valid
//! document yields `None` so the host can show one "invalid design file"
//! message. The reason is logged at `warn` level.

use log::warn;
use serde_json::Value;

use super::LabelDocument;
use crate::error::LabelError;

/// Serialize a document to pretty-printed JSON.
///
/// Geometry must be finite ([`LabelDocument::validate`]); JSON has no NaN,
/// so a non-finite coordinate would be written as `null` and the file would
/// not import again.
pub fn export_label_design(document: &LabelDocument) -> String {
    // Every field is a string, number, bool or nested struct; serialization cannot fail.
    serde_json::to_string_pretty(document).unwrap_or_default()
}

/// Parse a design file. Returns `None` when the text is not JSON, `size` is
/// missing, `elements` is not a list, an element is malformed, or the
/// document breaks an invariant (non-positive size or grid, duplicate ids).
pub fn import_label_design(json: &str) -> Option<LabelDocument> {
    match parse_design(json) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("rejected design file: {}", e);
            None
        }
    }
}

fn parse_design(json: &str) -> Result<LabelDocument, LabelError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(map) = &value else {
        return Err(LabelError::InvalidDesign("top level is not an object".into()));
    };
    if !map.contains_key("size") {
        return Err(LabelError::InvalidDesign("missing 'size'".into()));
    }
    if !map.get("elements").is_some_and(Value::is_array) {
        return Err(LabelError::InvalidDesign("'elements' is not a list".into()));
    }
    let document: LabelDocument = serde_json::from_value(value)?;
    document.validate()?;
    Ok(document)
}
