//! Actor stick-figure geometry.

use kurbo::{BezPath, Circle, Point, Shape as KurboShape, Size};

/// Size of a freshly created actor.
pub(super) const DESIGN_SIZE: Size = Size::new(40.0, 60.0);

/// Head, body, arms and two legs.
pub(super) fn outline() -> BezPath {
    let mut path = Circle::new(Point::new(20.0, 5.0), 5.0).to_path(0.1);
    // Body
    path.move_to(Point::new(20.0, 10.0));
    path.line_to(Point::new(20.0, 30.0));
    // Arms
    path.move_to(Point::new(5.0, 20.0));
    path.line_to(Point::new(35.0, 20.0));
    // Legs
    path.move_to(Point::new(20.0, 30.0));
    path.line_to(Point::new(10.0, 50.0));
    path.move_to(Point::new(20.0, 30.0));
    path.line_to(Point::new(30.0, 50.0));
    path
}
