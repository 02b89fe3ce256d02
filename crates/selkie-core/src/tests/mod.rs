mod binder;

use serde_json::Value;

/// Compiler pinned for byte-stable assertions.
pub(crate) fn fixture_compiler() -> crate::Compiler {
    crate::Compiler::new()
        .with_fixed_timestamp_millis(Some(1_700_000_000_000))
        .with_fixed_jitter_seed(Some(42))
}

/// Removes the jitter fields from every element so semantic comparisons can use `assert_eq!`.
pub(crate) fn strip_jitter(scene: &mut Value) {
    let Some(elements) = scene
        .get_mut("elements")
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    for el in elements {
        if let Value::Object(obj) = el {
            for key in crate::normalize::JITTER_FIELDS {
                obj.remove(key);
            }
        }
    }
}

pub(crate) fn elements(scene: &Value) -> &Vec<Value> {
    scene
        .get("elements")
        .and_then(Value::as_array)
        .expect("scene has an elements array")
}

pub(crate) fn find<'a>(scene: &'a Value, id: &str) -> &'a Value {
    elements(scene)
        .iter()
        .find(|el| el.get("id").and_then(Value::as_str) == Some(id))
        .unwrap_or_else(|| panic!("element {id} present"))
}
