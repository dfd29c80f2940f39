//! Association and aggregation arrow geometry.

use kurbo::{BezPath, Point, Size};

/// Size of a freshly created arrow.
pub(super) const DESIGN_SIZE: Size = Size::new(100.0, 30.0);

const SHAFT_Y: f64 = 15.0;
const SHAFT_START: f64 = 10.0;
const TIP_X: f64 = 90.0;

/// Shaft with a filled triangular head.
pub(super) fn association_outline() -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(SHAFT_START, SHAFT_Y));
    path.line_to(Point::new(TIP_X, SHAFT_Y));
    // Head
    path.move_to(Point::new(TIP_X, SHAFT_Y));
    path.line_to(Point::new(80.0, 10.0));
    path.line_to(Point::new(80.0, 20.0));
    path.close_path();
    path
}

/// Shorter shaft ending in a hollow diamond.
pub(super) fn aggregation_outline() -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::new(SHAFT_START, SHAFT_Y));
    path.line_to(Point::new(50.0, SHAFT_Y));
    // Diamond head
    path.move_to(Point::new(50.0, SHAFT_Y));
    path.line_to(Point::new(70.0, 5.0));
    path.line_to(Point::new(TIP_X, SHAFT_Y));
    path.line_to(Point::new(70.0, 25.0));
    path.close_path();
    path
}
