//! Stroke accumulation: turning pointer drags into elements and envelopes.
//!
//! A pen drag becomes one growing line element plus a stream of point-delta
//! envelopes; drag-end re-sends the full line as a terminal snapshot so a
//! peer that dropped deltas still converges. A rectangle drag is tracked as
//! an un-broadcast draft and becomes a single element only on release.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_RECT_STROKE, DEFAULT_STROKE_WIDTH};
use crate::element::{Element, ElementData, ElementId, LineData, RectangleData, new_element_id};
use crate::hit::Point;
use crate::history::Action;
use crate::protocol::Envelope;
use crate::store::ElementStore;

/// Pen styling carried by new line elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub stroke_width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_LINE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// An in-progress pen stroke, tied to the line element it is growing.
#[derive(Debug)]
pub struct LineStroke {
    id: ElementId,
}

impl LineStroke {
    /// Start a stroke: create a one-point line under a fresh id, upsert it
    /// locally, and produce the `add_element` announcement.
    pub fn begin(
        origin: Point,
        style: &StrokeStyle,
        store: &mut ElementStore,
        user: &str,
    ) -> (Self, Envelope) {
        let element = Element::new(
            new_element_id(),
            ElementData::Line(LineData {
                points: vec![origin.x, origin.y],
                color: style.color.clone(),
                stroke_width: style.stroke_width,
            }),
        );
        let id = element.element_id.clone();
        let envelope = Envelope::add_element(&element, user);
        store.upsert(element);
        (Self { id }, envelope)
    }

    /// Take one move sample: append the point locally and produce the
    /// matching delta envelope.
    pub fn extend(&self, point: Point, store: &mut ElementStore, user: &str) -> Envelope {
        store.append_point(&self.id, [point.x, point.y]);
        Envelope::draw_point(&self.id, [point.x, point.y], user)
    }

    /// End the stroke: produce the terminal full-element snapshot and the
    /// undoable add action. Returns `None` if the line is no longer in the
    /// store (a peer erased it mid-draw).
    pub fn finish(self, store: &ElementStore, user: &str) -> Option<(Envelope, Action)> {
        let element = store.get(&self.id)?.clone();
        Some((Envelope::draw_snapshot(&element, user), Action::add(element)))
    }

    /// Id of the line being grown.
    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.id
    }
}

/// A provisional rectangle tracked for live preview only. Nothing is
/// broadcast until the drag ends.
#[derive(Debug, Clone, Copy)]
pub struct RectDraft {
    anchor: Point,
    corner: Point,
}

impl RectDraft {
    /// Open a draft anchored where the drag started.
    #[must_use]
    pub fn begin(anchor: Point) -> Self {
        Self { anchor, corner: anchor }
    }

    /// Track the dragged corner.
    pub fn update(&mut self, point: Point) {
        self.corner = point;
    }

    /// The normalized rectangle as it stands, for rendering the preview.
    #[must_use]
    pub fn preview(&self) -> RectangleData {
        normalized_rect(self.anchor, self.corner)
    }

    /// Close the draft: normalize, assign a fresh id, upsert, and produce
    /// the announcement plus the undoable add action.
    pub fn finish(self, store: &mut ElementStore, user: &str) -> (Envelope, Action) {
        let element = Element::new(
            new_element_id(),
            ElementData::Rectangle(normalized_rect(self.anchor, self.corner)),
        );
        let envelope = Envelope::add_element(&element, user);
        store.upsert(element.clone());
        (envelope, Action::add(element))
    }
}

/// Normalize two drag corners into a rectangle with non-negative size and
/// its origin at the top-left, whatever the drag direction.
#[must_use]
pub fn normalized_rect(anchor: Point, corner: Point) -> RectangleData {
    RectangleData {
        x: anchor.x.min(corner.x),
        y: anchor.y.min(corner.y),
        width: (corner.x - anchor.x).abs(),
        height: (corner.y - anchor.y).abs(),
        stroke: DEFAULT_RECT_STROKE.to_owned(),
        fill: None,
        stroke_width: DEFAULT_STROKE_WIDTH,
    }
}
