use serde::{Deserialize, Serialize};
use slabkit_core::{format_inches, Point};

/// Offset given to a newly placed dimension, in pixels.
pub const DEFAULT_DIMENSION_OFFSET_PX: f64 = 12.0;

/// A manual two-point dimension. Endpoints are inches; the offset is a
/// signed pixel distance along the segment's left-hand normal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub offset_px: f64,
}

impl Dimension {
    pub fn new(id: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            id: id.into(),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            offset_px: DEFAULT_DIMENSION_OFFSET_PX,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Measured length in inches.
    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    /// Label text, e.g. `26.83"`.
    pub fn label(&self) -> String {
        format_inches(self.length())
    }
}
