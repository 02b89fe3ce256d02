//! Typed view of the compiled scene for consumers that prefer structs over raw JSON.
//!
//! The pipeline itself works on `serde_json` maps; these types deserialize losslessly from its
//! output (type-specific fields land in `extra`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(rename = "type")]
    pub format: String,
    pub version: i64,
    pub source: String,
    #[serde(default)]
    pub elements: Vec<SceneElement>,
    pub app_state: AppState,
    #[serde(default)]
    pub files: Map<String, Value>,
}

impl Scene {
    pub fn from_value(value: &Value) -> serde_json::Result<Self> {
        serde_json::from_value(value.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub view_background_color: String,
    #[serde(default)]
    pub grid_size: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: String,
    pub stroke_width: f64,
    pub stroke_style: String,
    pub roughness: f64,
    pub opacity: f64,
    #[serde(default)]
    pub group_ids: Vec<String>,
    #[serde(default)]
    pub frame_id: Option<String>,
    #[serde(default)]
    pub roundness: Option<Roundness>,
    pub seed: i64,
    pub version: i64,
    pub version_nonce: i64,
    pub is_deleted: bool,
    #[serde(default)]
    pub bound_elements: Option<Vec<BoundElement>>,
    pub updated: i64,
    #[serde(default)]
    pub link: Option<String>,
    pub locked: bool,
    /// Type-specific fields: `text`/`containerId`/… for texts, `points`/bindings for connectors.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SceneElement {
    /// Relative polyline for connectors, absent for boxes and texts.
    pub fn points(&self) -> Option<Vec<(f64, f64)>> {
        let points = self.extra.get("points")?.as_array()?;
        points
            .iter()
            .map(|p| {
                let pair = p.as_array()?;
                Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    pub kind: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub element_id: String,
    pub focus: f64,
    pub gap: f64,
}
