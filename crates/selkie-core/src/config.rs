use serde_json::{Map, Value, json};

/// JSON-backed compiler configuration.
///
/// Kept as a raw [`Value`] tree rather than a typed struct so host applications can forward
/// partial overrides (often themselves JSON from a settings store) without schema churn.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig(Value);

impl Default for SceneConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl SceneConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // `from_value` accepts any JSON value; a non-object root is replaced so path writes
        // always have an object to land in.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

/// Defaults every compiled scene starts from. Overridable per compiler via
/// [`crate::Compiler::with_scene_config`].
pub fn default_scene_config() -> SceneConfig {
    SceneConfig::from_value(json!({
        "source": "selkie",
        "appState": {
            "viewBackgroundColor": "#ffffff",
        },
        "element": {
            "strokeColor": "#1e1e1e",
            "backgroundColor": "transparent",
            "fillStyle": "solid",
            "strokeWidth": 2.0,
            "strokeStyle": "solid",
            "roughness": 1.0,
            "opacity": 100.0,
        },
        "text": {
            "fontSize": 20.0,
            "fontFamily": 1,
            "lineHeight": 1.25,
        },
        "binding": {
            "gap": 4.0,
        },
    }))
}
