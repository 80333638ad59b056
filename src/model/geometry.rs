//! Points, quadrilaterals and canonical boxes.

use serde::{Deserialize, Serialize};

/// A 2-D point in page or canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    #[serde(alias = "X")]
    pub x: f64,
    /// Vertical coordinate (grows downward)
    #[serde(alias = "Y")]
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Four corners ordered clockwise, starting at the corner that is top-left
/// relative to the text's reading orientation.
pub type Quad = [Point; 4];

/// The unit square `(0,0) (1,0) (1,1) (0,1)` in clockwise order.
pub const UNIT_SQUARE: Quad = [
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
    Point::new(1.0, 1.0),
    Point::new(0.0, 1.0),
];

/// Build a quad from an axis-aligned rectangle.
pub fn rect_quad(left: f64, top: f64, width: f64, height: f64) -> Quad {
    [
        Point::new(left, top),
        Point::new(left + width, top),
        Point::new(left + width, top + height),
        Point::new(left, top + height),
    ]
}

/// Axis-aligned box of a fragment in canonical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanonicalBox {
    /// Mean y of the top edge
    pub top: f64,
    /// Mean x of the left edge
    pub left: f64,
    /// Length of the top edge along x
    pub width: f64,
    /// Length of the left edge along y
    pub height: f64,
}

impl CanonicalBox {
    /// Derive the box from transformed corners.
    ///
    /// Corners 0-1 are the top edge and corners 0-3 the left edge; any other
    /// ordering produces meaningless boxes.
    pub fn from_corners(corners: &Quad) -> Self {
        Self {
            top: (corners[0].y + corners[1].y) / 2.0,
            left: (corners[0].x + corners[3].x) / 2.0,
            width: (corners[0].x - corners[1].x).abs(),
            height: (corners[0].y - corners[3].y).abs(),
        }
    }

    /// Whether every field is finite.
    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Whether the height can inform row-height estimation.
    pub fn has_usable_height(&self) -> bool {
        self.is_finite() && self.height > 0.0
    }
}
