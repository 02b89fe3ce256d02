#![forbid(unsafe_code)]

//! `selkie` is a headless diagram skeleton compiler.
//!
//! It resolves compact, loosely-specified descriptions of boxes, labels, and connectors into
//! fully schema-complete scenes for an interactive hand-drawn-style vector canvas. The canvas
//! renderer itself is an external collaborator; this crate only produces the scene it consumes.

pub use selkie_core::*;

/// Bounds of a compiled scene, padded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

const VIEWBOX_PADDING: f64 = 40.0;

/// Computes the padded bounding box of a scene's visible elements, for host UIs that embed the
/// canvas and need an initial viewport. Empty scenes get a conventional 800×600 frame.
///
/// Boxes contribute their x/y/width/height; connectors have no box and contribute the extent of
/// their relative `points` polyline instead.
pub fn scene_viewbox(scene: &model::Scene) -> ViewBox {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for el in &scene.elements {
        if el.is_deleted {
            continue;
        }
        match (el.width, el.height) {
            (Some(width), Some(height)) => {
                min_x = min_x.min(el.x);
                min_y = min_y.min(el.y);
                max_x = max_x.max(el.x + width);
                max_y = max_y.max(el.y + height);
            }
            _ => {
                for (dx, dy) in el.points().unwrap_or_default() {
                    min_x = min_x.min(el.x + dx);
                    min_y = min_y.min(el.y + dy);
                    max_x = max_x.max(el.x + dx);
                    max_y = max_y.max(el.y + dy);
                }
            }
        }
    }

    if !min_x.is_finite() {
        return ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 800.0,
            height: 600.0,
        };
    }

    ViewBox {
        min_x: min_x - VIEWBOX_PADDING,
        min_y: min_y - VIEWBOX_PADDING,
        width: max_x - min_x + VIEWBOX_PADDING * 2.0,
        height: max_y - min_y + VIEWBOX_PADDING * 2.0,
    }
}
