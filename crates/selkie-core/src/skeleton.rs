//! Skeleton parsing and validation: coerces arbitrary JSON into a sequence of descriptor maps
//! where every descriptor carries a non-empty, unique id.
//!
//! This stage is deliberately fail-soft. The dominant input source is generative (AI-authored)
//! JSON, so malformed top-level values become an empty sequence and garbage entries become
//! placeholder shapes instead of aborting the scene.

use crate::{CompileOptions, Error, Result};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value, json};
use uuid::Uuid;

pub const SHAPE_TYPES: [&str; 3] = ["rectangle", "ellipse", "diamond"];
pub const CONNECTOR_TYPES: [&str; 2] = ["arrow", "line"];

pub(crate) fn element_type(el: &Map<String, Value>) -> &str {
    el.get("type").and_then(Value::as_str).unwrap_or("")
}

pub(crate) fn element_id(el: &Map<String, Value>) -> &str {
    el.get("id").and_then(Value::as_str).unwrap_or("")
}

pub(crate) fn is_shape_type(ty: &str) -> bool {
    SHAPE_TYPES.contains(&ty)
}

pub(crate) fn is_connector_type(ty: &str) -> bool {
    CONNECTOR_TYPES.contains(&ty)
}

pub(crate) fn get_f64(el: &Map<String, Value>, key: &str) -> Option<f64> {
    el.get(key).and_then(Value::as_f64)
}

/// Registers `{id, type}` in the element's `boundElements`, creating the list when missing.
/// Idempotent: re-running on stable ids never duplicates an entry.
pub(crate) fn push_bound_element(el: &mut Map<String, Value>, id: &str, kind: &str) {
    let list = match el.get_mut("boundElements") {
        Some(Value::Array(list)) => list,
        _ => {
            el.insert("boundElements".to_string(), json!([]));
            let Some(Value::Array(list)) = el.get_mut("boundElements") else {
                return;
            };
            list
        }
    };
    let already = list
        .iter()
        .any(|entry| entry.get("id").and_then(Value::as_str) == Some(id));
    if !already {
        list.push(json!({ "id": id, "type": kind }));
    }
}

/// Normalizes a raw value claiming to be a skeleton array into descriptor maps.
///
/// Non-array input yields an empty sequence; non-object entries are substituted with a
/// placeholder rectangle so one bad entry never takes the rest of the scene down.
pub fn parse_skeleton(raw: &Value) -> Vec<Map<String, Value>> {
    let Some(items) = raw.as_array() else {
        if !raw.is_null() {
            tracing::warn!("skeleton input is not an array; compiling an empty scene");
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(obj) => obj.clone(),
            other => {
                tracing::warn!(index, kind = value_kind(other), "replacing malformed skeleton entry with a placeholder shape");
                placeholder_descriptor()
            }
        })
        .collect()
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn placeholder_descriptor() -> Map<String, Value> {
    let Value::Object(map) = json!({ "type": "rectangle", "x": 0.0, "y": 0.0 }) else {
        unreachable!("literal is an object")
    };
    map
}

/// Assigns ids to descriptors that lack one: positional index plus a random suffix so that
/// repeated compilations of partially-identified skeletons cannot collide.
pub fn ensure_ids(elements: &mut [Map<String, Value>]) {
    for (index, el) in elements.iter_mut().enumerate() {
        let missing = el
            .get("id")
            .and_then(Value::as_str)
            .is_none_or(|id| id.is_empty());
        if missing {
            el.insert("id".to_string(), json!(generated_id(index)));
        }
    }
}

fn generated_id(index: usize) -> String {
    let hex: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("el-{index}-{hex}")
}

/// Enforces id uniqueness. Lenient mode keeps the last descriptor for a repeated id (dropping
/// earlier ones, matching the legacy id→descriptor map semantics); strict mode rejects.
pub fn dedup_ids(elements: &mut Vec<Map<String, Value>>, options: CompileOptions) -> Result<()> {
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut out: Vec<Map<String, Value>> = Vec::with_capacity(elements.len());

    for el in elements.drain(..) {
        let id = element_id(&el).to_string();
        match seen.get(&id) {
            Some(&pos) => {
                if options.strict {
                    return Err(Error::DuplicateId { id });
                }
                tracing::warn!(id = %id, "duplicate element id; keeping the last occurrence");
                out[pos] = el;
            }
            None => {
                seen.insert(id, out.len());
                out.push(el);
            }
        }
    }

    *elements = out;
    Ok(())
}

/// Transient id→position index used by the binding stages. Built and discarded per invocation.
pub(crate) fn build_index(elements: &[Map<String, Value>]) -> FxHashMap<String, usize> {
    let mut index = FxHashMap::default();
    for (pos, el) in elements.iter().enumerate() {
        let id = element_id(el);
        if !id.is_empty() {
            index.insert(id.to_string(), pos);
        }
    }
    index
}
