//! Shared constants for geometry and default element styling.

/// Distance (world units) within which the eraser claims a line.
pub const ERASE_RADIUS: f64 = 10.0;

/// Default stroke color for freehand lines.
pub const DEFAULT_LINE_COLOR: &str = "#ffffff";

/// Default stroke width for freehand lines and rectangles.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Default stroke color for rectangles.
pub const DEFAULT_RECT_STROKE: &str = "#00ff88";
