//! Decision diamond geometry.

use kurbo::{BezPath, Point, Size};

/// Size of a freshly created decision.
pub(super) const DESIGN_SIZE: Size = Size::new(120.0, 80.0);

/// Polygon through the midpoints of the design box edges.
pub(super) fn outline() -> BezPath {
    let (w, h) = (DESIGN_SIZE.width, DESIGN_SIZE.height);
    let mut path = BezPath::new();
    path.move_to(Point::new(w / 2.0, 0.0));
    path.line_to(Point::new(w, h / 2.0));
    path.line_to(Point::new(w / 2.0, h));
    path.line_to(Point::new(0.0, h / 2.0));
    path.close_path();
    path
}
