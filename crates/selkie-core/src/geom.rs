#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(euclid::point2(x, y), euclid::size2(width, height))
}

pub fn top_center(r: &Rect) -> Point {
    point(r.origin.x + r.size.width / 2.0, r.origin.y)
}

pub fn bottom_center(r: &Rect) -> Point {
    point(r.origin.x + r.size.width / 2.0, r.origin.y + r.size.height)
}

pub fn left_center(r: &Rect) -> Point {
    point(r.origin.x, r.origin.y + r.size.height / 2.0)
}

pub fn right_center(r: &Rect) -> Point {
    point(r.origin.x + r.size.width, r.origin.y + r.size.height / 2.0)
}

/// Boundary anchor points for a connector between two boxes: the midpoints of the facing edges.
///
/// The connection is classified as vertical when |Δy| ≥ |Δx| between the two centers (ties go to
/// vertical so the result is deterministic for diagonal layouts).
pub fn facing_anchors(source: &Rect, target: &Rect) -> (Point, Point) {
    let sc = source.center();
    let tc = target.center();
    let dx = tc.x - sc.x;
    let dy = tc.y - sc.y;

    if dy.abs() >= dx.abs() {
        if dy >= 0.0 {
            (bottom_center(source), top_center(target))
        } else {
            (top_center(source), bottom_center(target))
        }
    } else if dx >= 0.0 {
        (right_center(source), left_center(target))
    } else {
        (left_center(source), right_center(target))
    }
}
