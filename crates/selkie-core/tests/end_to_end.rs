use selkie_core::{CompileOptions, Compiler, SceneConfig, model};
use serde_json::{Value, json};

fn compiler() -> Compiler {
    Compiler::new()
        .with_fixed_timestamp_millis(Some(1_700_000_000_000))
        .with_fixed_jitter_seed(Some(7))
}

#[test]
fn full_pipeline_produces_a_renderer_ready_scene() {
    let skeleton = json!([
        { "id": "a", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 100,
          "backgroundColor": "#1d3557", "label": { "text": "Start" } },
        { "id": "b", "type": "ellipse", "x": 300, "y": 0, "width": 100, "height": 100,
          "label": { "text": "End" } },
        { "id": "flow", "type": "arrow", "start": { "id": "a" }, "end": { "id": "b" } },
    ]);

    let value = compiler()
        .compile_sync(&skeleton, CompileOptions::default())
        .unwrap();
    let scene = model::Scene::from_value(&value).unwrap();

    assert_eq!(scene.format, "excalidraw");
    assert_eq!(scene.version, 2);
    assert_eq!(scene.app_state.view_background_color, "#ffffff");
    assert_eq!(scene.app_state.grid_size, None);
    assert_eq!(scene.elements.len(), 5);

    // Painter's order: shapes, derived texts, connectors.
    let kinds: Vec<&str> = scene
        .elements
        .iter()
        .map(|el| el.element_type.as_str())
        .collect();
    assert_eq!(kinds, vec!["rectangle", "ellipse", "text", "text", "arrow"]);

    let arrow = scene.elements.iter().find(|el| el.id == "flow").unwrap();
    assert_eq!((arrow.x, arrow.y), (100.0, 50.0));
    assert_eq!(arrow.points(), Some(vec![(0.0, 0.0), (200.0, 0.0)]));
    assert_eq!(arrow.extra["endArrowhead"], json!("arrow"));

    let dark_label = scene.elements.iter().find(|el| el.id == "a-text").unwrap();
    assert_eq!(dark_label.stroke_color, "#ffffff");

    for el in &scene.elements {
        assert!(!el.is_deleted);
        assert!((0.0..=100.0).contains(&el.opacity));
        assert!(el.seed >= 0 && el.version_nonce >= 0);
        assert_eq!(el.updated, 1_700_000_000_000);
    }
}

#[test]
fn saved_scene_reload_is_stable_across_recompilation() {
    let skeleton = json!([
        { "id": "a", "type": "rectangle", "x": 0, "y": 0, "label": { "text": "A" } },
        { "id": "b", "type": "rectangle", "x": 0, "y": 300 },
        { "id": "e", "type": "line", "start": { "id": "a" }, "end": { "id": "b" } },
    ]);
    let c = compiler();
    let saved = c.compile_sync(&skeleton, CompileOptions::default()).unwrap();
    let reloaded = c.compile_sync(&saved, CompileOptions::default()).unwrap();

    let strip = |scene: &Value| -> Value {
        let mut scene = scene.clone();
        for el in scene["elements"].as_array_mut().unwrap() {
            let obj = el.as_object_mut().unwrap();
            obj.remove("seed");
            obj.remove("versionNonce");
            obj.remove("updated");
        }
        scene
    };
    assert_eq!(strip(&saved), strip(&reloaded));
}

#[test]
fn dashboard_style_config_overrides_apply_end_to_end() {
    let c = compiler().with_scene_config(SceneConfig::from_value(json!({
        "source": "finsight",
        "element": { "strokeColor": "#334155" },
        "binding": { "gap": 8.0 },
    })));

    let value = c
        .compile_sync(
            &json!([
                { "id": "a", "type": "rectangle", "x": 0, "y": 0 },
                { "id": "b", "type": "rectangle", "x": 300, "y": 0 },
                { "id": "e", "type": "arrow", "start": { "id": "a" }, "end": { "id": "b" } },
            ]),
            CompileOptions::default(),
        )
        .unwrap();

    assert_eq!(value["source"], json!("finsight"));
    let scene = model::Scene::from_value(&value).unwrap();
    let shape = scene.elements.iter().find(|el| el.id == "a").unwrap();
    assert_eq!(shape.stroke_color, "#334155");
    let arrow = scene.elements.iter().find(|el| el.id == "e").unwrap();
    let binding: model::Binding =
        serde_json::from_value(arrow.extra["startBinding"].clone()).unwrap();
    assert_eq!(binding.gap, 8.0);
}
