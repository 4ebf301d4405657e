//! WASM-compatible wrapper for pitch deck structuring.
//!
//! This crate exposes content structuring and outline formatting to
//! JavaScript for use in Cloudflare Workers.

use deck_core::{
    ContentStructurer, DeckRequest, FieldSchema, OutlineFormatter, Placeholder, RawContent,
    SegmentationMode, StructuredDeck,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Structurer options accepted from JavaScript. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructureOptions {
    /// `"data_points_pending"` or `"details_pending"`.
    pub placeholder: Option<Placeholder>,
    /// Field names for flat content, in slide order.
    pub fields: Option<Vec<String>>,
    /// `"compatible"` or `"sentence"`.
    pub segmentation: Option<SegmentationMode>,
    pub slide_bullet_cap: Option<usize>,
    pub field_bullet_cap: Option<usize>,
}

impl StructureOptions {
    fn structurer(&self) -> ContentStructurer {
        let mut structurer = ContentStructurer::new();
        if let Some(placeholder) = self.placeholder {
            structurer = structurer.with_placeholder(placeholder);
        }
        if let Some(fields) = &self.fields {
            structurer = structurer.with_schema(FieldSchema::from_names(fields.iter().cloned()));
        }
        if let Some(mode) = self.segmentation {
            structurer = structurer.with_segmentation(mode);
        }
        if let Some(cap) = self.slide_bullet_cap {
            structurer = structurer.with_slide_bullet_cap(cap);
        }
        if let Some(cap) = self.field_bullet_cap {
            structurer = structurer.with_field_bullet_cap(cap);
        }
        structurer
    }
}

/// Result of formatting a deck as an outline.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutlineResult {
    /// The outline text.
    pub text: String,
    /// Number of slides in the outline.
    pub slide_count: usize,
}

/// Structure raw content (`{"slides": [...]}` or flat fields).
///
/// # Arguments
/// * `raw` - The raw content object
/// * `options` - Optional structurer options (may be `undefined`)
///
/// # Returns
/// A plain object mapping slide keys to `{title, bullets}`, or throws on error.
#[wasm_bindgen]
pub fn structure_content(raw: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let raw: Value = serde_wasm_bindgen::from_value(raw)
        .map_err(|e| JsValue::from_str(&format!("Invalid content: {}", e)))?;
    let options = parse_options(options)?;

    let deck = structure_content_impl(&raw, &options).map_err(|e| JsValue::from_str(&e))?;
    to_js(&deck)
}

/// Build a deck from a tagged `{kind, data}` request.
#[wasm_bindgen]
pub fn structure_request(request: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let request: Value = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid request: {}", e)))?;
    let options = parse_options(options)?;

    let deck = structure_request_impl(request, &options).map_err(|e| JsValue::from_str(&e))?;
    to_js(&deck)
}

/// Format a structured deck as a plain-text outline.
#[wasm_bindgen]
pub fn format_outline(deck: JsValue) -> Result<JsValue, JsValue> {
    let deck: StructuredDeck = serde_wasm_bindgen::from_value(deck)
        .map_err(|e| JsValue::from_str(&format!("Invalid deck: {}", e)))?;

    to_js(&format_outline_impl(&deck))
}

fn parse_options(options: JsValue) -> Result<StructureOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(StructureOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

/// Serialize maps as plain objects rather than `Map` instances.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn structure_content_impl(raw: &Value, options: &StructureOptions) -> Result<StructuredDeck, String> {
    let raw = RawContent::from_value(raw).map_err(|e| e.to_string())?;
    Ok(options.structurer().structure(&raw))
}

fn structure_request_impl(request: Value, options: &StructureOptions) -> Result<StructuredDeck, String> {
    let request: DeckRequest =
        serde_json::from_value(request).map_err(|e| format!("Invalid request: {}", e))?;
    request
        .into_deck(&options.structurer())
        .map_err(|e| e.to_string())
}

fn format_outline_impl(deck: &StructuredDeck) -> OutlineResult {
    OutlineResult {
        text: OutlineFormatter::new().format_with_newline(deck),
        slide_count: deck.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structure_content_with_options() {
        let options: StructureOptions = serde_json::from_value(json!({
            "placeholder": "details_pending",
            "slideBulletCap": 1
        }))
        .unwrap();

        let deck = structure_content_impl(
            &json!({"slides": [{"title": "Intro", "content": "A\nB\nC"}, {"content": "First idea here. Second idea here"}]}),
            &options,
        )
        .unwrap();

        assert_eq!(
            deck.get("slide_1").unwrap().bullets,
            vec!["Details pending team synthesis..."]
        );
        assert_eq!(deck.get("slide_2").unwrap().bullets, vec!["First idea here"]);
    }

    #[test]
    fn test_structure_content_rejects_malformed() {
        let err = structure_content_impl(&json!({"slides": 3}), &StructureOptions::default())
            .unwrap_err();
        assert!(err.starts_with("Malformed input"));
    }

    #[test]
    fn test_structure_request_expert() {
        let deck = structure_request_impl(
            json!({"kind": "expert", "data": {"projectName": "GridSense"}}),
            &StructureOptions::default(),
        )
        .unwrap();
        assert_eq!(deck.get("title").unwrap().bullets, vec!["GridSense"]);
    }

    #[test]
    fn test_custom_fields() {
        let options = StructureOptions {
            fields: Some(vec!["vision".to_string()]),
            ..Default::default()
        };
        let deck = structure_content_impl(&json!({"vision": "Every farm online"}), &options).unwrap();
        assert_eq!(deck.keys().collect::<Vec<_>>(), vec!["vision"]);
        assert_eq!(deck.get("vision").unwrap().title, "Vision");
    }

    #[test]
    fn test_format_outline() {
        let deck = structure_content_impl(
            &json!({"slides": [{"title": "Why", "content": "Because it matters"}]}),
            &StructureOptions::default(),
        )
        .unwrap();

        let result = format_outline_impl(&deck);
        assert_eq!(result.slide_count, 1);
        assert_eq!(result.text, "Why\n• Because it matters\n");
    }
}
