//! Arrow routing: resolves connector endpoints by id, computes boundary anchor points on the
//! facing edges of the two boxes, and establishes the mutual bindings.

use crate::config::SceneConfig;
use crate::geom::{facing_anchors, rect};
use crate::skeleton::{
    build_index, element_id, element_type, get_f64, is_connector_type, push_bound_element,
};
use crate::{CompileOptions, Error, Result};
use serde_json::{Map, Value, json};

const DEFAULT_BOX: f64 = 100.0;

struct Route {
    connector: usize,
    start_pos: usize,
    end_pos: usize,
    start_id: String,
    end_id: String,
    start: (f64, f64),
    end: (f64, f64),
}

/// Routes every arrow/line whose `start`/`end` markers resolve to existing, distinct elements.
///
/// Connectors with missing, dangling, or self-referential references are left untouched here and
/// degrade in the normalizer to a default diagonal polyline with no bindings — disconnected but
/// renderable, never an error (except self-loops under strict options).
pub fn route_connectors(
    elements: &mut [Map<String, Value>],
    options: CompileOptions,
    config: &SceneConfig,
) -> Result<()> {
    let index = build_index(elements);
    let mut routes: Vec<Route> = Vec::new();

    for (pos, el) in elements.iter().enumerate() {
        if !is_connector_type(element_type(el)) {
            continue;
        }
        let id = element_id(el).to_string();
        let (start_ref, end_ref) = (endpoint_ref(el, "start"), endpoint_ref(el, "end"));
        let (Some(start_ref), Some(end_ref)) = (start_ref, end_ref) else {
            if el.contains_key("start") || el.contains_key("end") {
                tracing::warn!(id = %id, "connector endpoint reference is missing an id; leaving it unbound");
            }
            continue;
        };

        if start_ref == end_ref {
            if options.strict {
                return Err(Error::SelfReferentialBinding { id });
            }
            tracing::warn!(id = %id, endpoint = %start_ref, "self-referential connector; leaving it unbound");
            continue;
        }

        let (Some(&start_pos), Some(&end_pos)) = (index.get(&start_ref), index.get(&end_ref))
        else {
            tracing::warn!(id = %id, start = %start_ref, end = %end_ref, "dangling connector endpoint; leaving it unbound");
            continue;
        };

        let (start, end) = facing_anchors(
            &bounding_box(&elements[start_pos]),
            &bounding_box(&elements[end_pos]),
        );
        routes.push(Route {
            connector: pos,
            start_pos,
            end_pos,
            start_id: start_ref,
            end_id: end_ref,
            start: (start.x, start.y),
            end: (end.x, end.y),
        });
    }

    let gap = config.get_f64("binding.gap").unwrap_or(4.0);
    for route in routes {
        let connector_id = element_id(&elements[route.connector]).to_string();

        let el = &mut elements[route.connector];
        el.insert("x".to_string(), json!(route.start.0));
        el.insert("y".to_string(), json!(route.start.1));
        el.insert(
            "points".to_string(),
            json!([
                [0.0, 0.0],
                [route.end.0 - route.start.0, route.end.1 - route.start.1]
            ]),
        );
        el.insert(
            "startBinding".to_string(),
            json!({ "elementId": route.start_id, "focus": 0.0, "gap": gap }),
        );
        el.insert(
            "endBinding".to_string(),
            json!({ "elementId": route.end_id, "focus": 0.0, "gap": gap }),
        );

        push_bound_element(&mut elements[route.start_pos], &connector_id, "arrow");
        push_bound_element(&mut elements[route.end_pos], &connector_id, "arrow");
    }

    Ok(())
}

fn endpoint_ref(el: &Map<String, Value>, key: &str) -> Option<String> {
    el.get(key)?
        .get("id")?
        .as_str()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// The referenced element's box. Missing sizes default to 100×100 so center math never divides
/// by zero or produces non-finite anchors.
fn bounding_box(el: &Map<String, Value>) -> crate::geom::Rect {
    rect(
        get_f64(el, "x").unwrap_or(0.0),
        get_f64(el, "y").unwrap_or(0.0),
        get_f64(el, "width").unwrap_or(DEFAULT_BOX),
        get_f64(el, "height").unwrap_or(DEFAULT_BOX),
    )
}
