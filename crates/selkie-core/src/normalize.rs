//! Schema normalization: fills every renderer-required field on every element.
//!
//! Filling is absent-only for semantic fields so an already-resolved element round-trips
//! unchanged; only the jitter fields (`seed`, `versionNonce`, `updated`) are regenerated on each
//! run. Null-vs-absent conventions follow the canvas schema exactly: nullable fields are filled
//! only when the key is missing, required fields also when the value is an explicit null.

use crate::config::SceneConfig;
use crate::runtime;
use crate::skeleton::{element_id, is_connector_type, is_shape_type};
use serde_json::{Map, Value, json};

/// Fields rewritten on every run. Everything else is semantic and preserved.
pub const JITTER_FIELDS: [&str; 3] = ["seed", "versionNonce", "updated"];

pub fn normalize_elements(elements: &mut [Map<String, Value>], config: &SceneConfig) {
    for el in elements.iter_mut() {
        normalize_element(el, config);
    }
}

pub fn normalize_element(el: &mut Map<String, Value>, config: &SceneConfig) {
    let ty = coerce_type(el);

    // Skeleton-only markers never reach the renderer.
    el.remove("label");
    el.remove("start");
    el.remove("end");

    fill_required(el, "x", || json!(0.0));
    fill_required(el, "y", || json!(0.0));
    fill_required(el, "angle", || json!(0.0));
    fill_required(el, "strokeColor", || {
        json!(config.get_str("element.strokeColor").unwrap_or("#1e1e1e"))
    });
    fill_required(el, "backgroundColor", || {
        json!(config.get_str("element.backgroundColor").unwrap_or("transparent"))
    });
    fill_required(el, "fillStyle", || {
        json!(config.get_str("element.fillStyle").unwrap_or("solid"))
    });
    fill_required(el, "strokeWidth", || {
        json!(config.get_f64("element.strokeWidth").unwrap_or(2.0))
    });
    fill_required(el, "strokeStyle", || {
        json!(config.get_str("element.strokeStyle").unwrap_or("solid"))
    });
    fill_required(el, "roughness", || {
        json!(config.get_f64("element.roughness").unwrap_or(1.0))
    });
    fill_required(el, "opacity", || {
        json!(config.get_f64("element.opacity").unwrap_or(100.0))
    });
    fill_required(el, "groupIds", || json!([]));
    fill_required(el, "isDeleted", || json!(false));
    fill_required(el, "locked", || json!(false));
    fill_required(el, "version", || json!(1));
    fill_nullable(el, "frameId");
    fill_nullable(el, "link");
    fill_nullable(el, "boundElements");

    match ty.as_str() {
        "text" => normalize_text(el, config),
        ty if is_connector_type(ty) => normalize_connector(el, ty),
        ty => normalize_shape(el, ty),
    }

    el.insert("seed".to_string(), json!(runtime::next_jitter()));
    el.insert("versionNonce".to_string(), json!(runtime::next_jitter()));
    el.insert("updated".to_string(), json!(runtime::now_millis()));
}

/// Unknown types are coerced to `rectangle` so the output never carries a type the renderer
/// cannot mount.
fn coerce_type(el: &mut Map<String, Value>) -> String {
    let ty = el.get("type").and_then(Value::as_str).unwrap_or("");
    if is_shape_type(ty) || is_connector_type(ty) || ty == "text" {
        return ty.to_string();
    }
    if !ty.is_empty() {
        tracing::warn!(id = element_id(el), unknown = %ty, "unrecognized element type; normalizing as a rectangle");
    }
    el.insert("type".to_string(), json!("rectangle"));
    "rectangle".to_string()
}

fn normalize_shape(el: &mut Map<String, Value>, ty: &str) {
    fill_required(el, "width", || json!(100.0));
    fill_required(el, "height", || json!(100.0));
    // Corner rounding is on by default; sharp-corner policy for rectangles differs from the
    // curved policy used by ellipses and diamonds.
    let kind = if ty == "rectangle" { 3 } else { 2 };
    fill_required(el, "roundness", || json!({ "type": kind }));
}

fn normalize_text(el: &mut Map<String, Value>, config: &SceneConfig) {
    let font_size = match el.get("fontSize").and_then(Value::as_f64) {
        Some(v) => v,
        None => {
            let v = config.get_f64("text.fontSize").unwrap_or(20.0);
            el.insert("fontSize".to_string(), json!(v));
            v
        }
    };
    let line_height = match el.get("lineHeight").and_then(Value::as_f64) {
        Some(v) => v,
        None => {
            let v = config.get_f64("text.lineHeight").unwrap_or(1.25);
            el.insert("lineHeight".to_string(), json!(v));
            v
        }
    };
    fill_required(el, "fontFamily", || {
        json!(config.get_f64("text.fontFamily").map(|v| v as i64).unwrap_or(1))
    });
    fill_required(el, "text", || json!(""));
    let text = el
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    fill_required(el, "originalText", || json!(text.clone()));
    fill_required(el, "textAlign", || json!("left"));
    fill_required(el, "verticalAlign", || json!("top"));
    fill_nullable(el, "containerId");

    // Pre-remeasurement estimate so the text is visible before the renderer measures real glyph
    // runs: longest line × ~0.6em per character, one line-height per line.
    let (est_width, est_height) = estimate_text_box(&text, font_size, line_height);
    fill_required(el, "width", || json!(est_width));
    fill_required(el, "height", || json!(est_height));
    fill_required(el, "baseline", || json!((font_size * 0.8).round()));
    fill_nullable(el, "roundness");
}

fn normalize_connector(el: &mut Map<String, Value>, ty: &str) {
    // Connector geometry lives in `points`; a width/height pair would desynchronize from it.
    el.remove("width");
    el.remove("height");
    fill_required(el, "points", || json!([[0.0, 0.0], [100.0, 100.0]]));
    fill_nullable(el, "lastCommittedPoint");
    fill_nullable(el, "startBinding");
    fill_nullable(el, "endBinding");
    fill_nullable(el, "startArrowhead");
    if ty == "arrow" {
        fill_required(el, "endArrowhead", || json!("arrow"));
    } else {
        fill_nullable(el, "endArrowhead");
    }
    fill_required(el, "roundness", || json!({ "type": 2 }));
}

fn estimate_text_box(text: &str, font_size: f64, line_height: f64) -> (f64, f64) {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    let width = (longest as f64 * font_size * 0.6).max(font_size * 0.6);
    let height = lines as f64 * font_size * line_height;
    (width, height)
}

/// Required field: filled when the key is missing or explicitly null.
fn fill_required(el: &mut Map<String, Value>, key: &str, default: impl FnOnce() -> Value) {
    match el.get(key) {
        Some(v) if !v.is_null() => {}
        _ => {
            el.insert(key.to_string(), default());
        }
    }
}

/// Nullable field: an explicit null is meaningful and preserved; only a missing key is filled.
fn fill_nullable(el: &mut Map<String, Value>, key: &str) {
    if !el.contains_key(key) {
        el.insert(key.to_string(), Value::Null);
    }
}
