//! Geometry predicates driving erasure.
//!
//! All functions are total: degenerate segments and out-of-range projections
//! are handled by clamping, never by panicking or producing NaN.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::ERASE_RADIUS;
use crate::element::{Element, ElementData, ElementId, LineData, RectangleData};
use crate::store::ElementStore;

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle containment, inclusive on all four edges: a point exactly on
/// the boundary counts as inside.
#[must_use]
pub fn point_in_rect(p: Point, rect: &RectangleData) -> bool {
    p.x >= rect.x && p.x <= rect.x + rect.width && p.y >= rect.y && p.y <= rect.y + rect.height
}

/// Minimum distance from `p` to the segment `a..b`.
///
/// Projects `p` onto the segment with the parameter clamped to `[0, 1]`.
/// A zero-length segment collapses to the distance to its endpoint.
#[must_use]
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let nearest_x = a.x + t * dx;
    let nearest_y = a.y + t * dy;
    (p.x - nearest_x).hypot(p.y - nearest_y)
}

/// Whether `p` falls within `radius` of any segment of the line.
///
/// A one-point line has no segments; the lone point itself is tested so a
/// freshly started dot remains erasable.
#[must_use]
pub fn line_hit(p: Point, line: &LineData, radius: f64) -> bool {
    let pts: Vec<Point> = line
        .points
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect();

    match pts.len() {
        0 => false,
        1 => (p.x - pts[0].x).hypot(p.y - pts[0].y) <= radius,
        _ => pts
            .windows(2)
            .any(|seg| segment_distance(p, seg[0], seg[1]) <= radius),
    }
}

/// The kind-appropriate hit test for one element.
///
/// Text elements are never hit: the engine has no font metrics, so any
/// bounding box would be a guess.
#[must_use]
pub fn element_hit(p: Point, element: &Element) -> bool {
    match &element.data {
        ElementData::Line(line) => line_hit(p, line, ERASE_RADIUS),
        ElementData::Rectangle(rect) => point_in_rect(p, rect),
        ElementData::Text(_) => false,
    }
}

/// Scan the store in insertion order and return the first element hit at
/// `p`, if any. At most one target per sample.
#[must_use]
pub fn erase_target(store: &ElementStore, p: Point) -> Option<ElementId> {
    store
        .iter()
        .find(|element| element_hit(p, element))
        .map(|element| element.element_id.clone())
}
