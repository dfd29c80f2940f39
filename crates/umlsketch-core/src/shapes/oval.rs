//! Use-case ellipse geometry.

use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Shape as KurboShape, Size};

/// Size of a freshly created use case.
pub(super) const DESIGN_SIZE: Size = Size::new(120.0, 80.0);

/// Ellipse inscribed in the design box.
pub(super) fn outline() -> BezPath {
    let center = Point::new(DESIGN_SIZE.width / 2.0, DESIGN_SIZE.height / 2.0);
    KurboEllipse::new(center, (DESIGN_SIZE.width / 2.0, DESIGN_SIZE.height / 2.0), 0.0).to_path(0.1)
}
