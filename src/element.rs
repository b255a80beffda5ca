//! Element model: the drawable primitives shared across the board.
//!
//! An [`Element`] is what the store holds and what travels on the wire as
//! `{element_id, element_type, data}`. The payload variant is chosen by
//! `element_type` during deserialization rather than guessed from field
//! shape, so a malformed payload for a known type is rejected as a unit.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::de::Error as DeError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::consts::{DEFAULT_LINE_COLOR, DEFAULT_RECT_STROKE, DEFAULT_STROKE_WIDTH};

/// Unique identifier for an element. UUID v4 rendered as text on the wire.
pub type ElementId = String;

/// Generate a fresh collision-resistant element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The kind of an element, as tagged by `element_type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Freehand polyline accumulated from pointer samples.
    Line,
    /// Axis-aligned rectangle with its origin at the top-left corner.
    Rectangle,
    /// Positioned text label.
    Text,
}

/// Payload of a line element. `points` is a flat `[x0, y0, x1, y1, …]`
/// sequence so point-appends are two pushes, never a reshape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineData {
    pub points: Vec<f64>,
    #[serde(default = "default_line_color")]
    pub color: String,
    #[serde(rename = "strokeWidth", default = "default_stroke_width")]
    pub stroke_width: f64,
}

/// Payload of a rectangle element. Width and height are non-negative once
/// normalized by the rectangle tool; remote payloads are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_rect_stroke")]
    pub stroke: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(rename = "strokeWidth", default = "default_stroke_width")]
    pub stroke_width: f64,
}

/// Payload of a text element. Created remotely or via hydration; the engine
/// has no text tool of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub x: f64,
    pub y: f64,
    pub text: String,
    #[serde(rename = "fontSize", default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(rename = "fontFamily", default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

fn default_line_color() -> String {
    DEFAULT_LINE_COLOR.to_owned()
}

fn default_rect_stroke() -> String {
    DEFAULT_RECT_STROKE.to_owned()
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// Type-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementData {
    Line(LineData),
    Rectangle(RectangleData),
    Text(TextData),
}

/// A drawable primitive with a globally unique, immutable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub element_id: ElementId,
    pub data: ElementData,
}

impl Element {
    /// Wrap an id and payload into an element.
    #[must_use]
    pub fn new(element_id: ElementId, data: ElementData) -> Self {
        Self { element_id, data }
    }

    /// The wire-level `element_type` tag, derived from the payload variant.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match &self.data {
            ElementData::Line(_) => ElementKind::Line,
            ElementData::Rectangle(_) => ElementKind::Rectangle,
            ElementData::Text(_) => ElementKind::Text,
        }
    }

    /// The line payload, if this element is a line.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineData> {
        match &self.data {
            ElementData::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The rectangle payload, if this element is a rectangle.
    #[must_use]
    pub fn as_rectangle(&self) -> Option<&RectangleData> {
        match &self.data {
            ElementData::Rectangle(rect) => Some(rect),
            _ => None,
        }
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Element", 3)?;
        state.serialize_field("element_id", &self.element_id)?;
        state.serialize_field("element_type", &self.kind())?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            element_id: ElementId,
            element_type: ElementKind,
            data: serde_json::Value,
        }

        let wire = Wire::deserialize(deserializer)?;
        let data = match wire.element_type {
            ElementKind::Line => serde_json::from_value(wire.data)
                .map(ElementData::Line)
                .map_err(DeError::custom)?,
            ElementKind::Rectangle => serde_json::from_value(wire.data)
                .map(ElementData::Rectangle)
                .map_err(DeError::custom)?,
            ElementKind::Text => serde_json::from_value(wire.data)
                .map(ElementData::Text)
                .map_err(DeError::custom)?,
        };
        Ok(Self { element_id: wire.element_id, data })
    }
}
