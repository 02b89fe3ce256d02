//! Label binding: turns a shape's inline `label` into a standalone text element bound to its
//! container, mirroring how the canvas represents shape captions.

use crate::color::label_color_for_background;
use crate::config::SceneConfig;
use crate::skeleton::{element_id, element_type, get_f64, is_shape_type, push_bound_element};
use serde_json::{Map, Value, json};

const DEFAULT_BOX: f64 = 100.0;

/// Synthesizes a bound text descriptor for every labelled shape and appends it to the element
/// list. The inline `label` never survives into the resolved form; labels on non-shape types are
/// ignored (the normalizer strips the stray key).
pub fn bind_labels(elements: &mut Vec<Map<String, Value>>, config: &SceneConfig) {
    let mut synthesized: Vec<Map<String, Value>> = Vec::new();

    for el in elements.iter_mut() {
        if !is_shape_type(element_type(el)) {
            continue;
        }
        let Some(label) = el.remove("label") else {
            continue;
        };
        if has_bound_text(el) {
            tracing::warn!(id = element_id(el), "shape already has a bound text; dropping inline label");
            continue;
        }
        let Some(label) = label_fields(&label) else {
            tracing::warn!(id = element_id(el), "inline label has no usable text; dropping it");
            continue;
        };

        synthesized.push(text_descriptor(el, label, config));
    }

    tracing::debug!(count = synthesized.len(), "synthesized bound text elements");
    elements.append(&mut synthesized);
}

struct LabelFields {
    text: String,
    font_size: Option<f64>,
    color: Option<String>,
}

fn label_fields(label: &Value) -> Option<LabelFields> {
    // Accept the `{text, fontSize, color}` object form and, fail-soft, a bare string.
    match label {
        Value::String(text) => Some(LabelFields {
            text: text.clone(),
            font_size: None,
            color: None,
        }),
        Value::Object(obj) => {
            let text = obj.get("text").and_then(Value::as_str)?.to_string();
            Some(LabelFields {
                text,
                font_size: obj.get("fontSize").and_then(Value::as_f64),
                color: obj
                    .get("color")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        }
        _ => None,
    }
}

fn has_bound_text(el: &Map<String, Value>) -> bool {
    el.get("boundElements")
        .and_then(Value::as_array)
        .is_some_and(|list| {
            list.iter()
                .any(|entry| entry.get("type").and_then(Value::as_str) == Some("text"))
        })
}

fn text_descriptor(
    shape: &mut Map<String, Value>,
    label: LabelFields,
    config: &SceneConfig,
) -> Map<String, Value> {
    let shape_id = element_id(shape).to_string();
    let text_id = format!("{shape_id}-text");

    let color = label.color.unwrap_or_else(|| {
        label_color_for_background(shape.get("backgroundColor").and_then(Value::as_str))
            .to_string()
    });
    let font_size = label
        .font_size
        .or_else(|| config.get_f64("text.fontSize"))
        .unwrap_or(20.0);

    // The text occupies exactly the container's box; the renderer centers the glyphs via the
    // alignment flags, not via a distinct text position.
    let x = get_f64(shape, "x").unwrap_or(0.0);
    let y = get_f64(shape, "y").unwrap_or(0.0);
    let width = get_f64(shape, "width").unwrap_or(DEFAULT_BOX);
    let height = get_f64(shape, "height").unwrap_or(DEFAULT_BOX);

    push_bound_element(shape, &text_id, "text");

    let Value::Object(text) = json!({
        "id": text_id,
        "type": "text",
        "x": x,
        "y": y,
        "width": width,
        "height": height,
        "text": label.text,
        "fontSize": font_size,
        "strokeColor": color,
        "textAlign": "center",
        "verticalAlign": "middle",
        "containerId": shape_id,
    }) else {
        unreachable!("literal is an object")
    };
    text
}
