use super::{elements, find, fixture_compiler};
use crate::CompileOptions;
use serde_json::{Value, json};

#[test]
fn labeled_shape_synthesizes_a_bound_text() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([{
                "id": "a",
                "type": "rectangle",
                "x": 10, "y": 20, "width": 120, "height": 60,
                "label": { "text": "Start" },
            }]),
            CompileOptions::default(),
        )
        .unwrap();

    assert_eq!(elements(&scene).len(), 2);

    let shape = find(&scene, "a");
    assert_eq!(
        shape["boundElements"],
        json!([{ "id": "a-text", "type": "text" }])
    );
    assert!(shape.get("label").is_none(), "inline label is removed");

    let text = find(&scene, "a-text");
    assert_eq!(text["type"], json!("text"));
    assert_eq!(text["containerId"], json!("a"));
    assert_eq!(text["text"], json!("Start"));
    assert_eq!(text["originalText"], json!("Start"));
    assert_eq!(text["textAlign"], json!("center"));
    assert_eq!(text["verticalAlign"], json!("middle"));
    // The text occupies exactly the container's box.
    assert_eq!(text["x"].as_f64(), shape["x"].as_f64());
    assert_eq!(text["y"].as_f64(), shape["y"].as_f64());
    assert_eq!(text["width"].as_f64(), shape["width"].as_f64());
    assert_eq!(text["height"].as_f64(), shape["height"].as_f64());
}

#[test]
fn binding_is_symmetric_and_never_crosses_shapes() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([
                { "id": "a", "type": "rectangle", "x": 0, "y": 0, "label": { "text": "A" } },
                { "id": "b", "type": "ellipse", "x": 200, "y": 0, "label": { "text": "B" } },
            ]),
            CompileOptions::default(),
        )
        .unwrap();

    for el in elements(&scene) {
        let ty = el["type"].as_str().unwrap();
        if ty == "text" {
            let container = el["containerId"].as_str().unwrap();
            let owner = find(&scene, container);
            let owned = owner["boundElements"]
                .as_array()
                .unwrap()
                .iter()
                .any(|b| b["id"] == el["id"] && b["type"] == json!("text"));
            assert!(owned, "container {container} owns its text");
        } else {
            let Some(bound) = el["boundElements"].as_array() else {
                continue;
            };
            for entry in bound.iter().filter(|b| b["type"] == json!("text")) {
                let text = find(&scene, entry["id"].as_str().unwrap());
                assert_eq!(text["containerId"], el["id"]);
            }
        }
    }
}

#[test]
fn label_color_follows_background_brightness() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([
                { "id": "dark", "type": "rectangle", "x": 0, "y": 0,
                  "backgroundColor": "#1d3557", "label": { "text": "d" } },
                { "id": "light", "type": "rectangle", "x": 0, "y": 200,
                  "backgroundColor": "#ffd166", "label": { "text": "l" } },
                { "id": "bare", "type": "rectangle", "x": 0, "y": 400,
                  "label": { "text": "b" } },
                { "id": "explicit", "type": "rectangle", "x": 0, "y": 600,
                  "backgroundColor": "#000000", "label": { "text": "e", "color": "#ff00ff" } },
            ]),
            CompileOptions::default(),
        )
        .unwrap();

    assert_eq!(find(&scene, "dark-text")["strokeColor"], json!("#ffffff"));
    assert_eq!(find(&scene, "light-text")["strokeColor"], json!("#1e1e1e"));
    assert_eq!(find(&scene, "bare-text")["strokeColor"], json!("#1e1e1e"));
    assert_eq!(find(&scene, "explicit-text")["strokeColor"], json!("#ff00ff"));
}

#[test]
fn label_font_size_is_honored() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([{ "id": "a", "type": "diamond", "x": 0, "y": 0,
                      "label": { "text": "big", "fontSize": 28 } }]),
            CompileOptions::default(),
        )
        .unwrap();
    assert_eq!(find(&scene, "a-text")["fontSize"].as_f64(), Some(28.0));
}

#[test]
fn bare_string_labels_are_accepted() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([{ "id": "a", "type": "rectangle", "x": 0, "y": 0, "label": "Start" }]),
            CompileOptions::default(),
        )
        .unwrap();
    assert_eq!(find(&scene, "a-text")["text"], json!("Start"));
}

#[test]
fn labels_on_connectors_are_ignored_and_stripped() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([{ "id": "x", "type": "arrow", "x": 0, "y": 0,
                      "label": { "text": "never bound" } }]),
            CompileOptions::default(),
        )
        .unwrap();

    let els = elements(&scene);
    assert_eq!(els.len(), 1);
    assert!(els[0].get("label").is_none());
    assert!(
        !els
            .iter()
            .any(|el| el["type"] == json!("text")),
        "no text is synthesized for connector labels"
    );
}

#[test]
fn unlabeled_shapes_pass_through_without_a_text() {
    let compiler = fixture_compiler();
    let scene = compiler
        .compile_sync(
            &json!([
                { "id": "a", "type": "rectangle", "x": 0, "y": 0, "label": { "text": "A" } },
                { "id": "plain", "type": "rectangle", "x": 300, "y": 0 },
            ]),
            CompileOptions::default(),
        )
        .unwrap();
    assert_eq!(find(&scene, "plain")["boundElements"], Value::Null);
    assert_eq!(elements(&scene).len(), 3);
}
